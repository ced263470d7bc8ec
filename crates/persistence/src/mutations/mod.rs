// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database mutations.
//!
//! All mutation functions are monomorphic over `SqliteConnection` and
//! use Diesel DSL. Versioned rows are updated with a compare-and-set on
//! the version column; a mismatch surfaces as
//! `PersistenceError::VersionConflict` and writes nothing.

pub mod events;
pub mod olympiads;
pub mod play;
pub mod sessions;
