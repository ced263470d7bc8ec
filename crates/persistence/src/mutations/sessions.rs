// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session and authorization-grant mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{session_olympiad_grants, sessions};
use crate::error::PersistenceError;

/// Creates a new session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!("Creating session with expiration: {}", expires_at);

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;

    debug!(session_id, "Session created");
    Ok(session_id)
}

/// Records that a session is authorized for an olympiad.
///
/// Granting twice is harmless; the duplicate is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn grant_olympiad_access(
    conn: &mut SqliteConnection,
    session_id: i64,
    olympiad_id: i64,
) -> Result<(), PersistenceError> {
    info!(
        "Granting session {} access to olympiad {}",
        session_id, olympiad_id
    );

    diesel::insert_into(session_olympiad_grants::table)
        .values((
            session_olympiad_grants::session_id.eq(session_id),
            session_olympiad_grants::olympiad_id.eq(olympiad_id),
        ))
        .on_conflict_do_nothing()
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token.
///
/// Grants cascade away with the session.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all expired sessions.
///
/// This is a cleanup operation that should be run periodically.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(
            sessions::expires_at.lt(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        )
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
