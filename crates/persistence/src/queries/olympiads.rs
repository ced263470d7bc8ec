// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Olympiad queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::OlympiadData;
use crate::diesel_schema::olympiads;
use crate::error::PersistenceError;

/// Diesel Queryable struct for olympiad rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = olympiads)]
struct OlympiadRow {
    olympiad_id: i64,
    name: String,
    pin_hash: String,
    version: i64,
}

impl From<OlympiadRow> for OlympiadData {
    fn from(row: OlympiadRow) -> Self {
        Self {
            olympiad_id: row.olympiad_id,
            name: row.name,
            pin_hash: row.pin_hash,
            version: row.version,
        }
    }
}

/// Retrieves an olympiad by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the olympiad is not found.
pub fn get_olympiad(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
) -> Result<Option<OlympiadData>, PersistenceError> {
    debug!("Looking up olympiad by ID: {}", olympiad_id);

    let result: Result<OlympiadRow, diesel::result::Error> = olympiads::table
        .filter(olympiads::olympiad_id.eq(olympiad_id))
        .select(OlympiadRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(OlympiadData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an olympiad by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the olympiad is not found.
pub fn get_olympiad_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<OlympiadData>, PersistenceError> {
    debug!("Looking up olympiad by name: {}", name);

    let result: Result<OlympiadRow, diesel::result::Error> = olympiads::table
        .filter(olympiads::name.eq(name))
        .select(OlympiadRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(OlympiadData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all olympiads ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_olympiads(
    conn: &mut SqliteConnection,
) -> Result<Vec<OlympiadData>, PersistenceError> {
    let rows: Vec<OlympiadRow> = olympiads::table
        .order(olympiads::name.asc())
        .select(OlympiadRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(OlympiadData::from).collect())
}
