// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation layer for the olympiad progression engine.
//!
//! This crate sits between the transport and the persistence layer. It
//! owns sessions and per-olympiad grants, validates requests against
//! the domain rules, and drives stage building, result recording, and
//! advancement through single transactions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod auth;
pub mod error;
pub mod ops;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, DEFAULT_SESSION_EXPIRATION};
pub use error::{ApiError, AuthError};
