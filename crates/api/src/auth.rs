// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session handling.
//!
//! Sessions are anonymous: opening one requires no credentials and
//! grants nothing. Write access to an olympiad is earned per olympiad
//! by presenting its PIN, which records a grant against the session.

use olympiad_persistence::{SessionData, Store, mutations, queries};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError};

/// How long a session lives from the moment it is opened.
pub const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

/// Issues and validates sessions and per-olympiad grants.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticationService;

impl AuthenticationService {
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Opens a new anonymous session.
    ///
    /// Returns the session token and its expiration timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiration cannot be formatted or the
    /// session cannot be stored.
    pub fn open_session(&self, store: &mut Store) -> Result<(String, String), ApiError> {
        let session_token: String = generate_session_token();
        let expires_at: OffsetDateTime = OffsetDateTime::now_utc() + DEFAULT_SESSION_EXPIRATION;
        let expires_at: String = expires_at
            .format(&Iso8601::DEFAULT)
            .map_err(|e| ApiError::Internal(format!("Failed to format expiration: {e}")))?;

        mutations::sessions::create_session(store.connection(), &session_token, &expires_at)?;

        info!("Session opened");
        Ok((session_token, expires_at))
    }

    /// Validates a session token and returns the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if the token is unknown, the
    /// session has expired, or the stored expiration cannot be parsed.
    pub fn validate_session(
        &self,
        store: &mut Store,
        session_token: &str,
    ) -> Result<SessionData, AuthError> {
        let session: SessionData =
            queries::sessions::get_session_by_token(store.connection(), session_token)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Session lookup failed: {e}"),
                })?
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("Unknown session token"),
                })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Invalid session expiration: {e}"),
            })?;

        if expires_at <= OffsetDateTime::now_utc() {
            warn!(session.session_id, "Rejected expired session");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session has expired"),
            });
        }

        debug!(session.session_id, "Session validated");
        Ok(session)
    }

    /// Validates a session and checks it holds a grant for an olympiad.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for a bad session and
    /// `AccessDenied` when the session holds no grant for the olympiad.
    pub fn require_olympiad_access(
        &self,
        store: &mut Store,
        session_token: &str,
        olympiad_id: i64,
    ) -> Result<SessionData, AuthError> {
        let session: SessionData = self.validate_session(store, session_token)?;

        let granted: bool =
            queries::sessions::has_olympiad_grant(store.connection(), session.session_id, olympiad_id)
                .map_err(|e| AuthError::AuthenticationFailed {
                    reason: format!("Grant lookup failed: {e}"),
                })?;

        if !granted {
            warn!(
                session.session_id,
                olympiad_id, "Rejected ungranted olympiad access"
            );
            return Err(AuthError::AccessDenied { olympiad_id });
        }

        Ok(session)
    }

    /// Deletes all expired sessions and their grants.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleanup delete fails.
    pub fn cleanup_expired_sessions(&self, store: &mut Store) -> Result<usize, ApiError> {
        Ok(mutations::sessions::delete_expired_sessions(
            store.connection(),
        )?)
    }
}

/// Generates a unique session token.
fn generate_session_token() -> String {
    let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
    format!("session_{timestamp}_{}", rand::random::<u64>())
}
