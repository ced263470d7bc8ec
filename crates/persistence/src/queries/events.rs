// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, stage, participant, player, and team queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{EventData, EventStageData, ParticipantData, PlayerData, TeamData};
use crate::diesel_schema::{event_stages, events, participants, players, teams};
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    olympiad_id: i64,
    name: String,
    score_kind: String,
    current_stage_order: i64,
    version: i64,
}

impl From<EventRow> for EventData {
    fn from(row: EventRow) -> Self {
        Self {
            event_id: row.event_id,
            olympiad_id: row.olympiad_id,
            name: row.name,
            score_kind: row.score_kind,
            current_stage_order: row.current_stage_order,
            version: row.version,
        }
    }
}

/// Diesel Queryable struct for event stage rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = event_stages)]
struct EventStageRow {
    event_stage_id: i64,
    event_id: i64,
    kind: String,
    stage_order: i64,
    advance_count: Option<i64>,
}

impl From<EventStageRow> for EventStageData {
    fn from(row: EventStageRow) -> Self {
        Self {
            event_stage_id: row.event_stage_id,
            event_id: row.event_id,
            kind: row.kind,
            stage_order: row.stage_order,
            advance_count: row.advance_count,
        }
    }
}

/// Diesel Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = participants)]
struct ParticipantRow {
    participant_id: i64,
    event_id: i64,
    player_id: Option<i64>,
    team_id: Option<i64>,
}

impl From<ParticipantRow> for ParticipantData {
    fn from(row: ParticipantRow) -> Self {
        Self {
            participant_id: row.participant_id,
            event_id: row.event_id,
            player_id: row.player_id,
            team_id: row.team_id,
        }
    }
}

/// Diesel Queryable struct for player rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = players)]
struct PlayerRow {
    player_id: i64,
    olympiad_id: i64,
    name: String,
}

impl From<PlayerRow> for PlayerData {
    fn from(row: PlayerRow) -> Self {
        Self {
            player_id: row.player_id,
            olympiad_id: row.olympiad_id,
            name: row.name,
        }
    }
}

/// Diesel Queryable struct for team rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teams)]
struct TeamRow {
    team_id: i64,
    olympiad_id: i64,
    name: String,
}

impl From<TeamRow> for TeamData {
    fn from(row: TeamRow) -> Self {
        Self {
            team_id: row.team_id,
            olympiad_id: row.olympiad_id,
            name: row.name,
        }
    }
}

/// Retrieves an event by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the event is not found.
pub fn get_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Option<EventData>, PersistenceError> {
    debug!("Looking up event by ID: {}", event_id);

    let result: Result<EventRow, diesel::result::Error> = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the declared stages of an event ordered by stage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_stages(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<EventStageData>, PersistenceError> {
    let rows: Vec<EventStageRow> = event_stages::table
        .filter(event_stages::event_id.eq(event_id))
        .order(event_stages::stage_order.asc())
        .select(EventStageRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(EventStageData::from).collect())
}

/// Retrieves the stage of an event at a given stage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no stage is declared at that order.
pub fn get_stage(
    conn: &mut SqliteConnection,
    event_id: i64,
    stage_order: i64,
) -> Result<Option<EventStageData>, PersistenceError> {
    debug!("Looking up stage {} of event {}", stage_order, event_id);

    let result: Result<EventStageRow, diesel::result::Error> = event_stages::table
        .filter(event_stages::event_id.eq(event_id))
        .filter(event_stages::stage_order.eq(stage_order))
        .select(EventStageRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventStageData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a stage by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the stage is not found.
pub fn get_stage_by_id(
    conn: &mut SqliteConnection,
    event_stage_id: i64,
) -> Result<Option<EventStageData>, PersistenceError> {
    let result: Result<EventStageRow, diesel::result::Error> = event_stages::table
        .filter(event_stages::event_stage_id.eq(event_stage_id))
        .select(EventStageRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(EventStageData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the participants of an event in registration order.
///
/// Registration order is insertion order, which seeds the first stage.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_participants(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<ParticipantData>, PersistenceError> {
    let rows: Vec<ParticipantRow> = participants::table
        .filter(participants::event_id.eq(event_id))
        .order(participants::participant_id.asc())
        .select(ParticipantRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(ParticipantData::from).collect())
}

/// Retrieves a participant by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the participant is not found.
pub fn get_participant(
    conn: &mut SqliteConnection,
    participant_id: i64,
) -> Result<Option<ParticipantData>, PersistenceError> {
    let result: Result<ParticipantRow, diesel::result::Error> = participants::table
        .filter(participants::participant_id.eq(participant_id))
        .select(ParticipantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ParticipantData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Finds an event's participant referencing a given player.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the player is not registered for the event.
pub fn find_participant_by_player(
    conn: &mut SqliteConnection,
    event_id: i64,
    player_id: i64,
) -> Result<Option<ParticipantData>, PersistenceError> {
    let result: Result<ParticipantRow, diesel::result::Error> = participants::table
        .filter(participants::event_id.eq(event_id))
        .filter(participants::player_id.eq(player_id))
        .select(ParticipantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ParticipantData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Finds an event's participant referencing a given team.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the team is not registered for the event.
pub fn find_participant_by_team(
    conn: &mut SqliteConnection,
    event_id: i64,
    team_id: i64,
) -> Result<Option<ParticipantData>, PersistenceError> {
    let result: Result<ParticipantRow, diesel::result::Error> = participants::table
        .filter(participants::event_id.eq(event_id))
        .filter(participants::team_id.eq(team_id))
        .select(ParticipantRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(ParticipantData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a player by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the player is not found.
pub fn get_player(
    conn: &mut SqliteConnection,
    player_id: i64,
) -> Result<Option<PlayerData>, PersistenceError> {
    let result: Result<PlayerRow, diesel::result::Error> = players::table
        .filter(players::player_id.eq(player_id))
        .select(PlayerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(PlayerData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a team by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the team is not found.
pub fn get_team(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<TeamData>, PersistenceError> {
    let result: Result<TeamRow, diesel::result::Error> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(TeamData::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
