// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group, match, score, and bracket queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use olympiad_domain::MatchStatus;
use tracing::debug;

use crate::data_models::{
    BracketLinkData, GroupData, GroupParticipantData, MatchData, MatchScoreData,
};
use crate::diesel_schema::{
    bracket_matches, group_participants, match_participant_scores, match_participants, matches,
    stage_groups,
};
use crate::error::PersistenceError;

/// Diesel Queryable struct for group rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = stage_groups)]
struct GroupRow {
    group_id: i64,
    event_stage_id: i64,
    position: i64,
}

impl From<GroupRow> for GroupData {
    fn from(row: GroupRow) -> Self {
        Self {
            group_id: row.group_id,
            event_stage_id: row.event_stage_id,
            position: row.position,
        }
    }
}

/// Diesel Queryable struct for match rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = matches)]
struct MatchRow {
    match_id: i64,
    group_id: i64,
    status: String,
    version: i64,
}

impl From<MatchRow> for MatchData {
    fn from(row: MatchRow) -> Self {
        Self {
            match_id: row.match_id,
            group_id: row.group_id,
            status: row.status,
            version: row.version,
        }
    }
}

/// Retrieves a group by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the group is not found.
pub fn get_group(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Option<GroupData>, PersistenceError> {
    let result: Result<GroupRow, diesel::result::Error> = stage_groups::table
        .filter(stage_groups::group_id.eq(group_id))
        .select(GroupRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(GroupData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the groups of a stage ordered by position.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_groups(
    conn: &mut SqliteConnection,
    event_stage_id: i64,
) -> Result<Vec<GroupData>, PersistenceError> {
    let rows: Vec<GroupRow> = stage_groups::table
        .filter(stage_groups::event_stage_id.eq(event_stage_id))
        .order(stage_groups::position.asc())
        .select(GroupRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(GroupData::from).collect())
}

/// Lists a group's members ordered by seed.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_group_participants(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<GroupParticipantData>, PersistenceError> {
    let rows: Vec<(i64, i64)> = group_participants::table
        .filter(group_participants::group_id.eq(group_id))
        .order(group_participants::seed.asc())
        .select((
            group_participants::participant_id,
            group_participants::seed,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(participant_id, seed)| GroupParticipantData {
            participant_id,
            seed,
        })
        .collect())
}

/// Retrieves a match by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the match is not found.
pub fn get_match(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Option<MatchData>, PersistenceError> {
    debug!("Looking up match by ID: {}", match_id);

    let result: Result<MatchRow, diesel::result::Error> = matches::table
        .filter(matches::match_id.eq(match_id))
        .select(MatchRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(MatchData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the matches of a group in creation order.
///
/// Creation order is schedule order for round robin play and bracket
/// position order for elimination play.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_matches(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<MatchData>, PersistenceError> {
    let rows: Vec<MatchRow> = matches::table
        .filter(matches::group_id.eq(group_id))
        .order(matches::match_id.asc())
        .select(MatchRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MatchData::from).collect())
}

/// Lists the participant IDs assigned to a match.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_match_participants(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let rows: Vec<i64> = match_participants::table
        .filter(match_participants::match_id.eq(match_id))
        .order(match_participants::match_participant_id.asc())
        .select(match_participants::participant_id)
        .load(conn)?;

    Ok(rows)
}

/// Lists the scores recorded for a match.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_match_scores(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Vec<MatchScoreData>, PersistenceError> {
    let rows: Vec<(i64, i64)> = match_participant_scores::table
        .filter(match_participant_scores::match_id.eq(match_id))
        .order(match_participant_scores::participant_id.asc())
        .select((
            match_participant_scores::participant_id,
            match_participant_scores::score,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(participant_id, score)| MatchScoreData {
            participant_id,
            score,
        })
        .collect())
}

/// Retrieves the bracket link of a match, if any.
///
/// Matches in round robin groups have no link.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_bracket_link(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Option<BracketLinkData>, PersistenceError> {
    let result: Result<(i64, Option<i64>), diesel::result::Error> = bracket_matches::table
        .filter(bracket_matches::match_id.eq(match_id))
        .select((bracket_matches::match_id, bracket_matches::next_match_id))
        .first(conn);

    match result {
        Ok((match_id, next_match_id)) => Ok(Some(BracketLinkData {
            match_id,
            next_match_id,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the bracket links of a group's matches in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bracket_links(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<BracketLinkData>, PersistenceError> {
    let match_ids = matches::table
        .filter(matches::group_id.eq(group_id))
        .select(matches::match_id);

    let rows: Vec<(i64, Option<i64>)> = bracket_matches::table
        .filter(bracket_matches::match_id.eq_any(match_ids))
        .order(bracket_matches::match_id.asc())
        .select((bracket_matches::match_id, bracket_matches::next_match_id))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(match_id, next_match_id)| BracketLinkData {
            match_id,
            next_match_id,
        })
        .collect())
}

/// Counts the matches of a stage that are not yet finished.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_unfinished_matches(
    conn: &mut SqliteConnection,
    event_stage_id: i64,
) -> Result<i64, PersistenceError> {
    let group_ids = stage_groups::table
        .filter(stage_groups::event_stage_id.eq(event_stage_id))
        .select(stage_groups::group_id);

    let count: i64 = matches::table
        .filter(matches::group_id.eq_any(group_ids))
        .filter(matches::status.ne(MatchStatus::Finished.as_str()))
        .count()
        .get_result(conn)?;

    Ok(count)
}
