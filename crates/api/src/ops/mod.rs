// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation validates its session, checks the request against the
//! domain rules, and drives persistence. Multi-step writes run inside a
//! single transaction via [`Store::transaction`].

use diesel::SqliteConnection;
use olympiad_domain::{
    GroupStanding, MatchStatus, ScoreKind, ScoredMatch, StageKind, compute_group_standings,
};
use olympiad_engine::{RecordedScore, ensure_group_complete, winner_of};
use olympiad_persistence::{EventData, EventStageData, Store, queries};

use crate::auth::AuthenticationService;
use crate::error::ApiError;

pub mod events;
pub mod olympiads;
pub mod play;
pub mod views;

/// Fetches an event or reports it missing.
pub(crate) fn fetch_event(conn: &mut SqliteConnection, event_id: i64) -> Result<EventData, ApiError> {
    queries::events::get_event(conn, event_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Event {event_id}")))
}

/// Validates the session and checks it is granted the event's olympiad.
pub(crate) fn require_event_access(
    store: &mut Store,
    session_token: &str,
    event_id: i64,
) -> Result<EventData, ApiError> {
    let event: EventData = fetch_event(store.connection(), event_id)?;

    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, event.olympiad_id)?;

    Ok(event)
}

/// Parses a stored score kind. The column is written from
/// `ScoreKind::as_str`, so failure here is corruption, not bad input.
pub(crate) fn stored_score_kind(event: &EventData) -> Result<ScoreKind, ApiError> {
    event
        .score_kind
        .parse()
        .map_err(|_| ApiError::Internal(format!("Unknown stored score kind: {}", event.score_kind)))
}

/// Parses a stored stage kind.
pub(crate) fn stored_stage_kind(stage: &EventStageData) -> Result<StageKind, ApiError> {
    stage
        .kind
        .parse()
        .map_err(|_| ApiError::Internal(format!("Unknown stored stage kind: {}", stage.kind)))
}

/// Parses a stored match status.
pub(crate) fn stored_match_status(status: &str) -> Result<MatchStatus, ApiError> {
    status
        .parse()
        .map_err(|_| ApiError::Internal(format!("Unknown stored match status: {status}")))
}

/// Computes final standings for every group of a stage, in group order,
/// paired with each group's position.
///
/// Single-elimination standings are degenerate: only the winner of the
/// final appears, at rank 1. Every other kind ranks the whole group.
///
/// # Errors
///
/// Returns `StageNotComplete` if any match of the stage is unfinished.
pub(crate) fn stage_group_standings(
    conn: &mut SqliteConnection,
    stage: &EventStageData,
    score_kind: ScoreKind,
) -> Result<Vec<(i64, Vec<GroupStanding>)>, ApiError> {
    let stage_kind: StageKind = stored_stage_kind(stage)?;
    let groups = queries::play::list_groups(conn, stage.event_stage_id)?;

    let mut results: Vec<(i64, Vec<GroupStanding>)> = Vec::with_capacity(groups.len());

    for group in groups {
        let members: Vec<i64> = queries::play::list_group_participants(conn, group.group_id)?
            .iter()
            .map(|member| member.participant_id)
            .collect();

        let matches = queries::play::list_matches(conn, group.group_id)?;

        let statuses: Vec<MatchStatus> = matches
            .iter()
            .map(|row| stored_match_status(&row.status))
            .collect::<Result<_, _>>()?;
        ensure_group_complete(&statuses)?;

        let mut scored: Vec<ScoredMatch> = Vec::with_capacity(matches.len());
        for row in &matches {
            let scores: Vec<(i64, i64)> = queries::play::list_match_scores(conn, row.match_id)?
                .iter()
                .map(|score| (score.participant_id, score.score))
                .collect();
            scored.push(ScoredMatch { scores });
        }

        let standings: Vec<GroupStanding> =
            compute_group_standings(score_kind, &members, &scored);

        let standings: Vec<GroupStanding> = if stage_kind == StageKind::SingleElimination {
            bracket_winner_standings(conn, group.group_id, &members, standings)?
        } else {
            standings
        };

        results.push((group.position, standings));
    }

    Ok(results)
}

/// Reduces a completed bracket group's standings to its sole winner.
fn bracket_winner_standings(
    conn: &mut SqliteConnection,
    group_id: i64,
    members: &[i64],
    standings: Vec<GroupStanding>,
) -> Result<Vec<GroupStanding>, ApiError> {
    let winner: i64 = match final_match_id(conn, group_id)? {
        Some(final_id) => {
            let scores: Vec<RecordedScore> = queries::play::list_match_scores(conn, final_id)?
                .iter()
                .map(|score| RecordedScore {
                    participant_id: score.participant_id,
                    score: score.score,
                })
                .collect();

            winner_of(&scores).ok_or_else(|| {
                ApiError::Internal(format!("Final match {final_id} finished without a winner"))
            })?
        }
        // A lone entrant wins a bracket with no matches.
        None => *members.first().ok_or_else(|| {
            ApiError::Internal(format!("Bracket group {group_id} has no members"))
        })?,
    };

    Ok(standings
        .into_iter()
        .filter(|row| row.participant_id == winner)
        .map(|row| GroupStanding { rank: 1, ..row })
        .collect())
}

/// Finds the final of a bracket group, if the group has matches.
pub(crate) fn final_match_id(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Option<i64>, ApiError> {
    let links = queries::play::list_bracket_links(conn, group_id)?;

    Ok(links
        .iter()
        .find(|link| link.next_match_id.is_none())
        .map(|link| link.match_id))
}
