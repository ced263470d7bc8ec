// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Olympiad mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::olympiads;
use crate::error::PersistenceError;

/// Creates a new olympiad.
///
/// The PIN is hashed with bcrypt before storage; the plain PIN never
/// touches the database.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The olympiad name (unique)
/// * `pin` - The plain four-digit PIN (will be hashed)
///
/// # Errors
///
/// Returns an error if the name already exists or the insert fails.
pub fn create_olympiad(
    conn: &mut SqliteConnection,
    name: &str,
    pin: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating olympiad with name: {}", name);

    let pin_hash: String = bcrypt::hash(pin, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash PIN: {e}")))?;

    diesel::insert_into(olympiads::table)
        .values((
            olympiads::name.eq(name),
            olympiads::pin_hash.eq(&pin_hash),
        ))
        .execute(conn)?;

    let olympiad_id: i64 = get_last_insert_rowid(conn)?;

    info!(olympiad_id, "Olympiad created successfully");
    Ok(olympiad_id)
}

/// Renames an olympiad with a compare-and-set on its version.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `olympiad_id` - The olympiad ID
/// * `expected_version` - The version the caller last observed
/// * `new_name` - The replacement name
///
/// # Errors
///
/// Returns `VersionConflict` if the stored version differs from
/// `expected_version`, `NotFound` if the olympiad does not exist, and
/// `DuplicateRecord` if the new name is taken.
pub fn rename_olympiad(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    expected_version: i64,
    new_name: &str,
) -> Result<(), PersistenceError> {
    info!("Renaming olympiad ID {} to: {}", olympiad_id, new_name);

    let rows_affected: usize = diesel::update(olympiads::table)
        .filter(olympiads::olympiad_id.eq(olympiad_id))
        .filter(olympiads::version.eq(expected_version))
        .set((
            olympiads::name.eq(new_name),
            olympiads::version.eq(expected_version + 1),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(versioned_update_failure(
            conn,
            olympiad_id,
            expected_version,
        )?);
    }

    Ok(())
}

/// Deletes an olympiad with a compare-and-set on its version.
///
/// Foreign keys cascade: players, teams, events, and everything under
/// them are removed with the olympiad.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `olympiad_id` - The olympiad ID
/// * `expected_version` - The version the caller last observed
///
/// # Errors
///
/// Returns `VersionConflict` if the stored version differs from
/// `expected_version` and `NotFound` if the olympiad does not exist.
pub fn delete_olympiad(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting olympiad ID: {}", olympiad_id);

    let rows_affected: usize = diesel::delete(olympiads::table)
        .filter(olympiads::olympiad_id.eq(olympiad_id))
        .filter(olympiads::version.eq(expected_version))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(versioned_update_failure(
            conn,
            olympiad_id,
            expected_version,
        )?);
    }

    info!("Deleted olympiad ID: {}", olympiad_id);
    Ok(())
}

/// Distinguishes a stale version from a missing row after a guarded
/// update touched nothing.
fn versioned_update_failure(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    expected_version: i64,
) -> Result<PersistenceError, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        olympiads::table.filter(olympiads::olympiad_id.eq(olympiad_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(PersistenceError::VersionConflict {
            entity: "olympiad",
            id: olympiad_id,
            expected: expected_version,
        })
    } else {
        Ok(PersistenceError::NotFound(format!(
            "Olympiad with ID {olympiad_id} not found"
        )))
    }
}
