// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Player, team, event, stage, and participant mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{
    event_stages, events, participants, players, team_players, teams,
};
use crate::error::PersistenceError;

/// Creates a new player within an olympiad.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `olympiad_id` - The owning olympiad
/// * `name` - The player name (unique per olympiad)
///
/// # Errors
///
/// Returns an error if the name is taken within the olympiad or the
/// insert fails.
pub fn create_player(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating player '{}' in olympiad {}", name, olympiad_id);

    diesel::insert_into(players::table)
        .values((
            players::olympiad_id.eq(olympiad_id),
            players::name.eq(name),
        ))
        .execute(conn)?;

    let player_id: i64 = get_last_insert_rowid(conn)?;

    info!(player_id, "Player created");
    Ok(player_id)
}

/// Creates a new team within an olympiad.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `olympiad_id` - The owning olympiad
/// * `name` - The team name (unique per olympiad)
///
/// # Errors
///
/// Returns an error if the name is taken within the olympiad or the
/// insert fails.
pub fn create_team(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating team '{}' in olympiad {}", name, olympiad_id);

    diesel::insert_into(teams::table)
        .values((teams::olympiad_id.eq(olympiad_id), teams::name.eq(name)))
        .execute(conn)?;

    let team_id: i64 = get_last_insert_rowid(conn)?;

    info!(team_id, "Team created");
    Ok(team_id)
}

/// Adds a player to a team's roster.
///
/// # Errors
///
/// Returns an error if the player is already on the roster or the
/// insert fails.
pub fn add_team_player(
    conn: &mut SqliteConnection,
    team_id: i64,
    player_id: i64,
) -> Result<(), PersistenceError> {
    debug!("Adding player {} to team {}", player_id, team_id);

    diesel::insert_into(team_players::table)
        .values((
            team_players::team_id.eq(team_id),
            team_players::player_id.eq(player_id),
        ))
        .execute(conn)?;

    Ok(())
}

/// Creates a new event within an olympiad.
///
/// The event starts in registration (cursor 0).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `olympiad_id` - The owning olympiad
/// * `name` - The event name (unique per olympiad)
/// * `score_kind` - How scores are interpreted (`points` or `outcome`)
///
/// # Errors
///
/// Returns an error if the name is taken within the olympiad or the
/// insert fails.
pub fn create_event(
    conn: &mut SqliteConnection,
    olympiad_id: i64,
    name: &str,
    score_kind: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating event '{}' ({}) in olympiad {}",
        name, score_kind, olympiad_id
    );

    diesel::insert_into(events::table)
        .values((
            events::olympiad_id.eq(olympiad_id),
            events::name.eq(name),
            events::score_kind.eq(score_kind),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;

    info!(event_id, "Event created");
    Ok(event_id)
}

/// Declares a stage of an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The owning event
/// * `kind` - The stage format
/// * `stage_order` - The 1-based position in the stage sequence
/// * `advance_count` - How many participants exit the stage; `None`
///   marks the final stage
///
/// # Errors
///
/// Returns an error if the order is already declared for the event or
/// the insert fails.
pub fn declare_stage(
    conn: &mut SqliteConnection,
    event_id: i64,
    kind: &str,
    stage_order: i64,
    advance_count: Option<i64>,
) -> Result<i64, PersistenceError> {
    info!(
        "Declaring stage {} ({}) for event {}",
        stage_order, kind, event_id
    );

    diesel::insert_into(event_stages::table)
        .values((
            event_stages::event_id.eq(event_id),
            event_stages::kind.eq(kind),
            event_stages::stage_order.eq(stage_order),
            event_stages::advance_count.eq(advance_count),
        ))
        .execute(conn)?;

    let event_stage_id: i64 = get_last_insert_rowid(conn)?;

    info!(event_stage_id, "Stage declared");
    Ok(event_stage_id)
}

/// Creates an event participant referencing exactly one of a player or
/// a team.
///
/// # Errors
///
/// Returns an error if the reference is already registered for the
/// event or the insert fails.
pub fn create_participant(
    conn: &mut SqliteConnection,
    event_id: i64,
    player_id: Option<i64>,
    team_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    debug!(
        "Registering participant for event {} (player: {:?}, team: {:?})",
        event_id, player_id, team_id
    );

    diesel::insert_into(participants::table)
        .values((
            participants::event_id.eq(event_id),
            participants::player_id.eq(player_id),
            participants::team_id.eq(team_id),
        ))
        .execute(conn)?;

    let participant_id: i64 = get_last_insert_rowid(conn)?;

    debug!(participant_id, "Participant registered");
    Ok(participant_id)
}
