// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation error taxonomy.
//!
//! Every operation returns `ApiError` on failure. Lower-layer errors
//! are folded in through the `From` impls below so callers see one
//! vocabulary regardless of which layer rejected the request.

use olympiad_domain::DomainError;
use olympiad_engine::EngineError;
use olympiad_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during authentication.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The session token is unknown or the session has expired.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// Why authentication failed.
        reason: String,
    },
    /// The session holds no grant for the olympiad it tried to touch.
    #[error("Session is not authorized for olympiad {olympiad_id}")]
    AccessDenied {
        /// The olympiad the session tried to touch.
        olympiad_id: i64,
    },
}

/// Errors returned by API operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The session is missing, expired, or lacks the required grant.
    #[error("Unauthorized")]
    Unauthorized,
    /// The caller's expected version is stale.
    #[error("Version conflict: another writer got there first")]
    VersionConflict,
    /// Progression needs a stage that was never declared.
    #[error("Stage {0} is not configured")]
    StageNotConfigured(i64),
    /// The current stage still has unfinished matches.
    #[error("Stage is not complete")]
    StageNotComplete,
    /// The event has no registered participants.
    #[error("Event has no participants")]
    NoParticipants,
    /// Fewer participants than the stage layout requires.
    #[error("Insufficient participants: {available} available, {required} required")]
    InsufficientParticipants {
        /// How many participants are available.
        available: usize,
        /// How many the stage layout requires.
        required: usize,
    },
    /// A stage was asked to build over zero entrants.
    #[error("Stage has no entrants")]
    EmptyStage,
    /// The match already has a recorded result.
    #[error("Match is already finished")]
    MatchAlreadyFinished,
    /// A reference crossed an olympiad or mixed participant modes.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for ApiError {
    fn from(_err: AuthError) -> Self {
        // The reason is logged at the auth layer; callers only learn
        // that they are not authorized.
        Self::Unauthorized
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::DuplicateRecord(message) => Self::Validation(message),
            PersistenceError::NotFound(what) | PersistenceError::SessionNotFound(what) => {
                Self::NotFound(what)
            }
            PersistenceError::VersionConflict { .. } => Self::VersionConflict,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        // Raw Diesel errors only surface through `Store::transaction`;
        // everything else arrives already folded into PersistenceError.
        PersistenceError::from(err).into()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyStage => Self::EmptyStage,
            EngineError::InsufficientParticipants {
                available,
                required,
            } => Self::InsufficientParticipants {
                available,
                required,
            },
            EngineError::StageNotComplete => Self::StageNotComplete,
            EngineError::NoParticipants => Self::NoParticipants,
            EngineError::MalformedBracket(message) => Self::Internal(message),
            other => Self::Validation(other.to_string()),
        }
    }
}
