// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side views: events, standings, and derived brackets.
//!
//! Views require a valid session but no per-olympiad grant; grants
//! gate writes only.

use std::collections::HashMap;

use diesel::SqliteConnection;
use olympiad_domain::{ScoreKind, StageKind};
use olympiad_engine::{BracketLink, BracketShape};
use olympiad_persistence::{EventData, EventStageData, Store, queries};

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::ops::events::event_response;
use crate::ops::{fetch_event, stage_group_standings, stored_score_kind};
use crate::request_response::{
    BracketMatchView, BracketResponse, EventResponse, GroupStandingsView, ScoreEntry,
    StandingRow, StandingsResponse,
};

/// Returns an event with its declared stages and progression cursor.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session and `NotFound` for an
/// unknown event.
pub fn get_event(
    store: &mut Store,
    session_token: &str,
    event_id: i64,
) -> Result<EventResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.validate_session(store, session_token)?;

    event_response(store, event_id)
}

/// Returns per-group standings of a named stage.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session, `NotFound` for an unknown
/// event or undeclared stage, and `StageNotComplete` while the stage is
/// unbuilt or has unfinished matches.
pub fn get_standings(
    store: &mut Store,
    session_token: &str,
    event_id: i64,
    stage_order: i64,
) -> Result<StandingsResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.validate_session(store, session_token)?;

    let conn = store.connection();
    let event: EventData = fetch_event(conn, event_id)?;
    let score_kind: ScoreKind = stored_score_kind(&event)?;

    let stage: EventStageData = queries::events::get_stage(conn, event_id, stage_order)?
        .ok_or_else(|| ApiError::NotFound(format!("Stage {stage_order} of event {event_id}")))?;

    let groups = stage_group_standings(conn, &stage, score_kind)?;

    // A declared stage the event has not reached has no groups yet.
    if groups.is_empty() {
        return Err(ApiError::StageNotComplete);
    }

    Ok(StandingsResponse {
        event_id,
        stage_order,
        groups: groups
            .into_iter()
            .map(|(position, standings)| GroupStandingsView {
                position,
                standings: standings
                    .iter()
                    .map(|row| StandingRow {
                        participant_id: row.participant_id,
                        rank: row.rank,
                        total_score: row.total_score,
                        wins: row.wins,
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Returns the event's single-elimination bracket organized into
/// derived rounds, first round to final.
///
/// When several elimination stages exist, the latest one that has been
/// built is returned.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session and `NotFound` for an
/// unknown event or when no elimination stage has been built.
pub fn get_bracket(
    store: &mut Store,
    session_token: &str,
    event_id: i64,
) -> Result<BracketResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.validate_session(store, session_token)?;

    let conn = store.connection();
    fetch_event(conn, event_id)?;

    let (stage, group_id) = built_elimination_stage(conn, event_id)?;

    let links: Vec<BracketLink> = queries::play::list_bracket_links(conn, group_id)?
        .iter()
        .map(|link| BracketLink {
            match_id: link.match_id,
            next_match_id: link.next_match_id,
        })
        .collect();

    let next_by_match: HashMap<i64, Option<i64>> = links
        .iter()
        .map(|link| (link.match_id, link.next_match_id))
        .collect();

    let shape: BracketShape = BracketShape::from_links(&links)?;

    let mut rounds: Vec<Vec<BracketMatchView>> = Vec::with_capacity(shape.rounds().len());
    for round in shape.rounds() {
        let mut views: Vec<BracketMatchView> = Vec::with_capacity(round.len());
        for &match_id in round {
            views.push(bracket_match_view(conn, match_id, &next_by_match)?);
        }
        rounds.push(views);
    }

    Ok(BracketResponse {
        event_id,
        stage_order: stage.stage_order,
        rounds,
    })
}

/// Finds the latest single-elimination stage that has been built,
/// returning it with its lone group.
fn built_elimination_stage(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<(EventStageData, i64), ApiError> {
    let stages = queries::events::list_stages(conn, event_id)?;

    for stage in stages.into_iter().rev() {
        if stage.kind != StageKind::SingleElimination.as_str() {
            continue;
        }
        let groups = queries::play::list_groups(conn, stage.event_stage_id)?;
        if let Some(group) = groups.first() {
            let group_id: i64 = group.group_id;
            return Ok((stage, group_id));
        }
    }

    Err(ApiError::NotFound(format!(
        "A built elimination stage of event {event_id}"
    )))
}

fn bracket_match_view(
    conn: &mut SqliteConnection,
    match_id: i64,
    next_by_match: &HashMap<i64, Option<i64>>,
) -> Result<BracketMatchView, ApiError> {
    let match_row = queries::play::get_match(conn, match_id)?
        .ok_or_else(|| ApiError::Internal(format!("Bracket match {match_id} missing")))?;

    let participant_ids: Vec<i64> = queries::play::list_match_participants(conn, match_id)?;
    let scores: Vec<ScoreEntry> = queries::play::list_match_scores(conn, match_id)?
        .iter()
        .map(|score| ScoreEntry {
            participant_id: score.participant_id,
            score: score.score,
        })
        .collect();

    Ok(BracketMatchView {
        match_id,
        status: match_row.status,
        participant_ids,
        scores,
        next_match_id: next_by_match.get(&match_id).copied().flatten(),
    })
}
