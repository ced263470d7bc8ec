// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod session_tests;

use crate::Store;

/// Creates a fresh in-memory store for a test.
pub fn setup_store() -> Store {
    Store::new_in_memory().expect("Failed to create in-memory store")
}
