// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database queries.
//!
//! All query functions are monomorphic over `SqliteConnection` and use
//! Diesel DSL. Lookups by id return `Ok(None)` when the row is absent.

pub mod events;
pub mod olympiads;
pub mod play;
pub mod sessions;
