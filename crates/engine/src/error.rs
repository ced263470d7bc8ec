// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use olympiad_domain::DomainError;

/// Errors that can occur while building stages, deriving brackets, or
/// validating results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A stage was built with zero participants.
    EmptyStage,
    /// A groups stage has fewer participants than groups.
    InsufficientParticipants {
        /// How many participants were available.
        available: usize,
        /// How many the stage layout requires.
        required: usize,
    },
    /// A group still has unfinished matches.
    StageNotComplete,
    /// An event was started with no registered participants.
    NoParticipants,
    /// The submitted score set does not cover exactly the match's
    /// participants.
    ScoreSetMismatch {
        /// The participant ids the match holds.
        expected: Vec<i64>,
        /// The participant ids the scores named.
        provided: Vec<i64>,
    },
    /// Outcome codes do not form a consistent pairing.
    InconsistentOutcome {
        /// The submitted codes.
        codes: Vec<i64>,
    },
    /// A drawn result was submitted for an elimination match.
    DrawNotAllowed,
    /// The bracket link rows do not describe a well-formed tree.
    MalformedBracket(String),
    /// A domain-level validation failure.
    Domain(DomainError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStage => write!(f, "Cannot build a stage with zero participants"),
            Self::InsufficientParticipants {
                available,
                required,
            } => {
                write!(
                    f,
                    "Stage requires at least {required} participants, only {available} available"
                )
            }
            Self::StageNotComplete => {
                write!(f, "Stage has unfinished matches")
            }
            Self::NoParticipants => {
                write!(f, "Event has no registered participants")
            }
            Self::ScoreSetMismatch { expected, provided } => {
                write!(
                    f,
                    "Scores must cover exactly the match participants {expected:?}, got {provided:?}"
                )
            }
            Self::InconsistentOutcome { codes } => {
                write!(
                    f,
                    "Outcome codes {codes:?} are inconsistent: expected a win/loss or draw/draw pair"
                )
            }
            Self::DrawNotAllowed => {
                write!(f, "An elimination match cannot end in a draw")
            }
            Self::MalformedBracket(msg) => write!(f, "Malformed bracket: {msg}"),
            Self::Domain(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<DomainError> for EngineError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}
