// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome score code for a won match.
pub const OUTCOME_WIN: i64 = 2;
/// Outcome score code for a drawn match.
pub const OUTCOME_DRAW: i64 = 1;
/// Outcome score code for a lost match.
pub const OUTCOME_LOSS: i64 = 0;

/// The stage order sentinel meaning an event has not started.
pub const REGISTRATION_STAGE: i64 = 0;

/// How scores in an event are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreKind {
    /// Raw point totals. Standings rank by sum of points.
    Points,
    /// Win/draw/loss codes. Standings rank by number of wins.
    Outcome,
}

impl FromStr for ScoreKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(Self::Points),
            "outcome" => Ok(Self::Outcome),
            _ => Err(DomainError::InvalidScoreKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ScoreKind {
    /// Converts this score kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Outcome => "outcome",
        }
    }
}

/// The format a stage is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// Several groups, each playing an internal round robin.
    Groups,
    /// One group where everyone plays everyone once.
    RoundRobin,
    /// A knockout bracket.
    SingleElimination,
}

impl FromStr for StageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groups" => Ok(Self::Groups),
            "round_robin" => Ok(Self::RoundRobin),
            "single_elimination" => Ok(Self::SingleElimination),
            _ => Err(DomainError::InvalidStageKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StageKind {
    /// Converts this stage kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::RoundRobin => "round_robin",
            Self::SingleElimination => "single_elimination",
        }
    }
}

/// The lifecycle status of a match.
///
/// Transitions are forward-only; a finished match never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MatchStatus {
    /// Created but not yet underway.
    #[default]
    Pending,
    /// Underway.
    Running,
    /// Result recorded. Terminal.
    Finished,
}

impl FromStr for MatchStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "finished" => Ok(Self::Finished),
            _ => Err(DomainError::InvalidMatchStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MatchStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Running
    /// - Pending → Finished
    /// - Running → Finished
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Running)
                | (Self::Pending | Self::Running, Self::Finished)
        )
    }
}

/// A four-digit olympiad PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin(String);

impl Pin {
    /// Creates a PIN after validating it is exactly four ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPin` if the value is not four digits.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidPin(String::from(
                "PIN must be exactly four digits",
            )))
        }
    }

    /// Returns the PIN digits.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A declared stage of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStage {
    event_stage_id: Option<i64>,
    event_id: i64,
    kind: StageKind,
    /// 1-based position in the event's stage sequence.
    stage_order: i64,
    /// How many participants exit this stage toward the next. For a
    /// groups stage this doubles as the number of groups to create, one
    /// promotion per group. `None` only on the final stage.
    advance_count: Option<i64>,
}

impl EventStage {
    /// Creates a stage with a canonical database identifier.
    #[must_use]
    pub fn with_id(
        event_stage_id: i64,
        event_id: i64,
        kind: StageKind,
        stage_order: i64,
        advance_count: Option<i64>,
    ) -> Self {
        Self {
            event_stage_id: Some(event_stage_id),
            event_id,
            kind,
            stage_order,
            advance_count,
        }
    }

    /// Returns the canonical identifier, if persisted.
    #[must_use]
    pub const fn event_stage_id(&self) -> Option<i64> {
        self.event_stage_id
    }

    /// Returns the event this stage belongs to.
    #[must_use]
    pub const fn event_id(&self) -> i64 {
        self.event_id
    }

    /// Returns the format this stage is played in.
    #[must_use]
    pub const fn kind(&self) -> StageKind {
        self.kind
    }

    /// Returns the 1-based stage order.
    #[must_use]
    pub const fn stage_order(&self) -> i64 {
        self.stage_order
    }

    /// Returns the raw advance count column.
    #[must_use]
    pub const fn advance_count(&self) -> Option<i64> {
        self.advance_count
    }

    /// Returns whether this is a final stage (nothing advances past it).
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.advance_count.is_none()
    }

    /// Returns the number of groups this stage builds.
    ///
    /// For a groups stage that is the advance count; every other kind
    /// plays in a single group.
    #[must_use]
    pub fn group_count(&self) -> i64 {
        match self.kind {
            StageKind::Groups => self.advance_count.unwrap_or(1),
            StageKind::RoundRobin | StageKind::SingleElimination => 1,
        }
    }

    /// Returns how many participants are promoted from each group.
    #[must_use]
    pub fn promoted_per_group(&self) -> i64 {
        match self.kind {
            StageKind::Groups => 1,
            StageKind::RoundRobin | StageKind::SingleElimination => {
                self.advance_count.unwrap_or(0)
            }
        }
    }
}
