// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group, match, score, and progression-cursor mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use olympiad_domain::MatchStatus;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{
    bracket_matches, events, group_participants, match_participant_scores, match_participants,
    matches, stage_groups,
};
use crate::error::PersistenceError;

/// Creates a group within a stage.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_group(
    conn: &mut SqliteConnection,
    event_stage_id: i64,
    position: i64,
) -> Result<i64, PersistenceError> {
    debug!("Creating group {} for stage {}", position, event_stage_id);

    diesel::insert_into(stage_groups::table)
        .values((
            stage_groups::event_stage_id.eq(event_stage_id),
            stage_groups::position.eq(position),
        ))
        .execute(conn)?;

    Ok(get_last_insert_rowid(conn)?)
}

/// Adds a participant to a group with its seed.
///
/// # Errors
///
/// Returns an error if the participant is already in the group or the
/// insert fails.
pub fn add_group_participant(
    conn: &mut SqliteConnection,
    group_id: i64,
    participant_id: i64,
    seed: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(group_participants::table)
        .values((
            group_participants::group_id.eq(group_id),
            group_participants::participant_id.eq(participant_id),
            group_participants::seed.eq(seed),
        ))
        .execute(conn)?;

    Ok(())
}

/// Creates a match within a group.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `group_id` - The owning group
/// * `status` - The initial status (`pending`, or `finished` for byes)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_match(
    conn: &mut SqliteConnection,
    group_id: i64,
    status: MatchStatus,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(matches::table)
        .values((
            matches::group_id.eq(group_id),
            matches::status.eq(status.as_str()),
        ))
        .execute(conn)?;

    Ok(get_last_insert_rowid(conn)?)
}

/// Links a bracket match to the match its winner feeds.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `match_id` - The match being linked
/// * `next_match_id` - The parent match; `None` marks the final
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_bracket_link(
    conn: &mut SqliteConnection,
    match_id: i64,
    next_match_id: Option<i64>,
) -> Result<(), PersistenceError> {
    diesel::insert_into(bracket_matches::table)
        .values((
            bracket_matches::match_id.eq(match_id),
            bracket_matches::next_match_id.eq(next_match_id),
        ))
        .execute(conn)?;

    Ok(())
}

/// Adds a participant to a match.
///
/// Used at stage build time and when a bracket winner propagates into
/// its parent match.
///
/// # Errors
///
/// Returns an error if the participant is already in the match or the
/// insert fails.
pub fn add_match_participant(
    conn: &mut SqliteConnection,
    match_id: i64,
    participant_id: i64,
) -> Result<(), PersistenceError> {
    debug!(
        "Adding participant {} to match {}",
        participant_id, match_id
    );

    diesel::insert_into(match_participants::table)
        .values((
            match_participants::match_id.eq(match_id),
            match_participants::participant_id.eq(participant_id),
        ))
        .execute(conn)?;

    Ok(())
}

/// Records one participant's score for a match.
///
/// # Errors
///
/// Returns an error if a score already exists for the participant or
/// the insert fails.
pub fn record_score(
    conn: &mut SqliteConnection,
    match_id: i64,
    participant_id: i64,
    score: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(match_participant_scores::table)
        .values((
            match_participant_scores::match_id.eq(match_id),
            match_participant_scores::participant_id.eq(participant_id),
            match_participant_scores::score.eq(score),
        ))
        .execute(conn)?;

    Ok(())
}

/// Marks a match finished with a compare-and-set on its version.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `match_id` - The match ID
/// * `expected_version` - The version the caller last observed
///
/// # Errors
///
/// Returns `VersionConflict` if the stored version differs from
/// `expected_version` and `NotFound` if the match does not exist.
/// Nothing is written on either failure.
pub fn finish_match(
    conn: &mut SqliteConnection,
    match_id: i64,
    expected_version: i64,
) -> Result<(), PersistenceError> {
    info!("Finishing match ID: {}", match_id);

    let rows_affected: usize = diesel::update(matches::table)
        .filter(matches::match_id.eq(match_id))
        .filter(matches::version.eq(expected_version))
        .set((
            matches::status.eq(MatchStatus::Finished.as_str()),
            matches::version.eq(expected_version + 1),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        let exists: bool = diesel::select(diesel::dsl::exists(
            matches::table.filter(matches::match_id.eq(match_id)),
        ))
        .get_result(conn)?;

        if exists {
            return Err(PersistenceError::VersionConflict {
                entity: "match",
                id: match_id,
                expected: expected_version,
            });
        }
        return Err(PersistenceError::NotFound(format!(
            "Match with ID {match_id} not found"
        )));
    }

    Ok(())
}

/// Moves an event's progression cursor with a compare-and-set on the
/// cursor itself.
///
/// Returns `true` if the cursor moved and `false` if it was no longer
/// at `from_order`, which makes repeated advancement triggers no-ops.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn advance_event_cursor(
    conn: &mut SqliteConnection,
    event_id: i64,
    from_order: i64,
    to_order: i64,
) -> Result<bool, PersistenceError> {
    info!(
        "Moving event {} cursor from stage {} to {}",
        event_id, from_order, to_order
    );

    let rows_affected: usize = diesel::update(events::table)
        .filter(events::event_id.eq(event_id))
        .filter(events::current_stage_order.eq(from_order))
        .set((
            events::current_stage_order.eq(to_order),
            events::version.eq(events::version + 1),
        ))
        .execute(conn)?;

    Ok(rows_affected > 0)
}
