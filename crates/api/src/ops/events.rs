// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event, stage, and registration operations.

use olympiad_domain::{
    REGISTRATION_STAGE, ScoreKind, StageKind, validate_name, validate_stage_declaration,
};
use olympiad_persistence::{
    EventData, ParticipantData, PlayerData, Store, TeamData, mutations, queries,
};
use tracing::{debug, info};

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::ops::require_event_access;
use crate::request_response::{
    CreateEventRequest, DeclareStageRequest, EventResponse, ParticipantResponse,
    RegisterParticipantRequest, StageView,
};

/// Creates an event within an olympiad.
///
/// The event starts in registration with no stages declared.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant and `Validation` for a bad
/// name, an unknown score kind, or a duplicate name.
pub fn create_event(
    store: &mut Store,
    session_token: &str,
    request: &CreateEventRequest,
) -> Result<EventResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, request.olympiad_id)?;

    let name: &str = request.name.trim();
    validate_name(name)?;
    let score_kind: ScoreKind = request.score_kind.parse()?;

    let event_id: i64 = mutations::events::create_event(
        store.connection(),
        request.olympiad_id,
        name,
        score_kind.as_str(),
    )?;

    event_response(store, event_id)
}

/// Declares the next stage of an event.
///
/// Stages are declared contiguously from 1. A null advance count marks
/// the final stage and closes the sequence. Declaration is rejected
/// once the event's cursor has reached the order being declared.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `NotFound` for an unknown
/// event, and `Validation` for an out-of-sequence declaration.
pub fn declare_stage(
    store: &mut Store,
    session_token: &str,
    request: &DeclareStageRequest,
) -> Result<StageView, ApiError> {
    let event: EventData = require_event_access(store, session_token, request.event_id)?;

    let kind: StageKind = request.kind.parse()?;
    validate_stage_declaration(request.stage_order, request.advance_count)?;

    let conn = store.connection();
    let declared = queries::events::list_stages(conn, event.event_id)?;

    let next_order: i64 = i64::try_from(declared.len()).unwrap_or(i64::MAX) + 1;
    if request.stage_order != next_order {
        return Err(ApiError::Validation(format!(
            "Stage order {} does not extend the declared sequence; expected {next_order}",
            request.stage_order
        )));
    }

    if declared.iter().any(|stage| stage.advance_count.is_none()) {
        return Err(ApiError::Validation(String::from(
            "The final stage is already declared",
        )));
    }

    if event.current_stage_order >= request.stage_order {
        return Err(ApiError::Validation(format!(
            "Event has already progressed past stage {}",
            request.stage_order
        )));
    }

    mutations::events::declare_stage(
        conn,
        event.event_id,
        kind.as_str(),
        request.stage_order,
        request.advance_count,
    )?;

    Ok(StageView {
        stage_order: request.stage_order,
        kind: kind.as_str().to_string(),
        advance_count: request.advance_count,
    })
}

/// Registers a player or team as an event participant.
///
/// Registration is lazy and idempotent: registering the same reference
/// twice returns the existing participant. The event's participation
/// mode is fixed by its first registration; mixing players and teams
/// or crossing olympiads is an invalid reference.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `NotFound` for an unknown
/// event, player, or team, `Validation` if registration has closed or
/// the request names both or neither reference, and `InvalidReference`
/// for a mode mix or a cross-olympiad reference.
pub fn register_participant(
    store: &mut Store,
    session_token: &str,
    request: &RegisterParticipantRequest,
) -> Result<ParticipantResponse, ApiError> {
    let event: EventData = require_event_access(store, session_token, request.event_id)?;

    if event.current_stage_order != REGISTRATION_STAGE {
        return Err(ApiError::Validation(String::from(
            "Registration is closed once the event has started",
        )));
    }

    let participant: ParticipantData = match (request.player_id, request.team_id) {
        (Some(player_id), None) => register_player(store, &event, player_id)?,
        (None, Some(team_id)) => register_team(store, &event, team_id)?,
        _ => {
            return Err(ApiError::Validation(String::from(
                "Exactly one of player_id and team_id must be set",
            )));
        }
    };

    Ok(ParticipantResponse {
        participant_id: participant.participant_id,
        event_id: participant.event_id,
        player_id: participant.player_id,
        team_id: participant.team_id,
    })
}

fn register_player(
    store: &mut Store,
    event: &EventData,
    player_id: i64,
) -> Result<ParticipantData, ApiError> {
    let conn = store.connection();

    let player: PlayerData = queries::events::get_player(conn, player_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Player {player_id}")))?;

    if player.olympiad_id != event.olympiad_id {
        return Err(ApiError::InvalidReference(format!(
            "Player {player_id} belongs to a different olympiad"
        )));
    }

    if let Some(existing) = queries::events::find_participant_by_player(conn, event.event_id, player_id)? {
        debug!(
            participant_id = existing.participant_id,
            "Player already registered"
        );
        return Ok(existing);
    }

    ensure_mode(conn, event, true)?;

    let participant_id: i64 =
        mutations::events::create_participant(conn, event.event_id, Some(player_id), None)?;
    info!(participant_id, player_id, "Player registered");

    fetch_participant(conn, participant_id)
}

fn register_team(
    store: &mut Store,
    event: &EventData,
    team_id: i64,
) -> Result<ParticipantData, ApiError> {
    let conn = store.connection();

    let team: TeamData = queries::events::get_team(conn, team_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Team {team_id}")))?;

    if team.olympiad_id != event.olympiad_id {
        return Err(ApiError::InvalidReference(format!(
            "Team {team_id} belongs to a different olympiad"
        )));
    }

    if let Some(existing) = queries::events::find_participant_by_team(conn, event.event_id, team_id)? {
        debug!(
            participant_id = existing.participant_id,
            "Team already registered"
        );
        return Ok(existing);
    }

    ensure_mode(conn, event, false)?;

    let participant_id: i64 =
        mutations::events::create_participant(conn, event.event_id, None, Some(team_id))?;
    info!(participant_id, team_id, "Team registered");

    fetch_participant(conn, participant_id)
}

/// Checks a new registration matches the mode set by the event's first
/// participant.
fn ensure_mode(
    conn: &mut diesel::SqliteConnection,
    event: &EventData,
    registering_player: bool,
) -> Result<(), ApiError> {
    let participants = queries::events::list_participants(conn, event.event_id)?;

    if let Some(first) = participants.first() {
        let solo_event: bool = first.player_id.is_some();
        if solo_event != registering_player {
            let (event_mode, attempted) = if solo_event {
                ("players", "team")
            } else {
                ("teams", "player")
            };
            return Err(ApiError::InvalidReference(format!(
                "Event is played by {event_mode}; cannot register a {attempted}"
            )));
        }
    }

    Ok(())
}

fn fetch_participant(
    conn: &mut diesel::SqliteConnection,
    participant_id: i64,
) -> Result<ParticipantData, ApiError> {
    queries::events::get_participant(conn, participant_id)?.ok_or_else(|| {
        ApiError::Internal(format!("Participant {participant_id} vanished after creation"))
    })
}

/// Builds the full event view with its declared stages.
pub(crate) fn event_response(store: &mut Store, event_id: i64) -> Result<EventResponse, ApiError> {
    let conn = store.connection();

    let event: EventData = crate::ops::fetch_event(conn, event_id)?;
    let stages = queries::events::list_stages(conn, event_id)?;

    Ok(EventResponse {
        event_id: event.event_id,
        olympiad_id: event.olympiad_id,
        name: event.name,
        score_kind: event.score_kind,
        current_stage_order: event.current_stage_order,
        version: event.version,
        stages: stages
            .iter()
            .map(|stage| StageView {
                stage_order: stage.stage_order,
                kind: stage.kind.clone(),
                advance_count: stage.advance_count,
            })
            .collect(),
    })
}
