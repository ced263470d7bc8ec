// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Olympiad, event, player, or team name is empty or invalid.
    InvalidName(String),
    /// PIN is not exactly four ASCII digits.
    InvalidPin(String),
    /// Score kind string does not name a known kind.
    InvalidScoreKind(String),
    /// Stage kind string does not name a known kind.
    InvalidStageKind(String),
    /// Match status string does not name a known status.
    InvalidMatchStatus(String),
    /// Outcome score code is not win, draw, or loss.
    InvalidOutcomeCode(i64),
    /// Points score is negative.
    NegativeScore(i64),
    /// Stage order must be a positive integer.
    InvalidStageOrder(i64),
    /// Advance count must be a positive integer when present.
    InvalidAdvanceCount(i64),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPin(msg) => write!(f, "Invalid PIN: {msg}"),
            Self::InvalidScoreKind(value) => write!(f, "Invalid score kind: '{value}'"),
            Self::InvalidStageKind(value) => write!(f, "Invalid stage kind: '{value}'"),
            Self::InvalidMatchStatus(value) => write!(f, "Invalid match status: '{value}'"),
            Self::InvalidOutcomeCode(code) => {
                write!(f, "Invalid outcome code: {code}. Must be 0 (loss), 1 (draw), or 2 (win)")
            }
            Self::NegativeScore(score) => write!(f, "Score must not be negative, got {score}"),
            Self::InvalidStageOrder(order) => {
                write!(f, "Stage order must be positive, got {order}")
            }
            Self::InvalidAdvanceCount(count) => {
                write!(f, "Advance count must be positive, got {count}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
