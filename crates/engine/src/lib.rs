// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod advance;
mod bracket;
mod error;
mod plan;
mod record;

pub use advance::{advancing_participants, ensure_group_complete};
pub use bracket::{BracketLink, BracketShape};
pub use error::EngineError;
pub use plan::{GroupPlan, MatchPlan, StagePlan, build_stage};
pub use record::{RecordedScore, validate_result, winner_of};
