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

mod error;
mod pairing;
mod seeding;
mod standings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use pairing::{round_robin_pairs, serpentine_groups};
pub use seeding::{bracket_size, first_round_pairings, seeding_order};
pub use standings::{GroupStanding, ScoredMatch, compute_group_standings};

// Re-export public types
pub use types::{
    EventStage, MatchStatus, OUTCOME_DRAW, OUTCOME_LOSS, OUTCOME_WIN, Pin, REGISTRATION_STAGE,
    ScoreKind, StageKind,
};
pub use validation::{MAX_NAME_LENGTH, validate_name, validate_stage_declaration};
