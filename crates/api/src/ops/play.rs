// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event start, result recording, and the advancement cascade.
//!
//! Everything a result can trigger (bracket propagation, advancement,
//! building the next stage) commits atomically with the result itself.

use diesel::SqliteConnection;
use olympiad_domain::{
    EventStage, GroupStanding, MatchStatus, REGISTRATION_STAGE, ScoreKind, StageKind,
};
use olympiad_engine::{
    RecordedScore, StagePlan, advancing_participants, build_stage, validate_result, winner_of,
};
use olympiad_persistence::{EventData, EventStageData, Store, mutations, queries};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::ops::events::event_response;
use crate::ops::{
    require_event_access, stage_group_standings, stored_match_status, stored_score_kind,
    stored_stage_kind,
};
use crate::request_response::{
    EventResponse, RecordMatchResultRequest, RecordMatchResultResponse,
};

/// Starts an event: seeds its participants in registration order,
/// builds stage 1, and moves the cursor out of registration.
///
/// Calling again after the event has started is a no-op that returns
/// the current state.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `NoParticipants` with an
/// empty registration list, and `StageNotConfigured` if stage 1 was
/// never declared.
pub fn start_event(
    store: &mut Store,
    session_token: &str,
    event_id: i64,
) -> Result<EventResponse, ApiError> {
    let event: EventData = require_event_access(store, session_token, event_id)?;

    if event.current_stage_order > REGISTRATION_STAGE {
        debug!(event_id, "Event already started");
        return event_response(store, event_id);
    }

    let score_kind: ScoreKind = stored_score_kind(&event)?;

    let conn = store.connection();
    let participants = queries::events::list_participants(conn, event_id)?;
    if participants.is_empty() {
        return Err(ApiError::NoParticipants);
    }

    let stage: EventStageData = queries::events::get_stage(conn, event_id, 1)?
        .ok_or(ApiError::StageNotConfigured(1))?;
    let stage_kind: StageKind = stored_stage_kind(&stage)?;

    // Seed order is registration order.
    let seeds: Vec<i64> = participants
        .iter()
        .map(|participant| participant.participant_id)
        .collect();

    let plan: StagePlan = build_stage(
        stage_kind,
        score_kind,
        seeds.len(),
        group_count_of(&stage, stage_kind),
    )?;

    store.transaction(|conn| {
        let moved: bool =
            mutations::play::advance_event_cursor(conn, event_id, REGISTRATION_STAGE, 1)?;
        if !moved {
            return Err(ApiError::VersionConflict);
        }

        persist_stage_plan(conn, stage.event_stage_id, stage_kind, &seeds, &plan)?;

        // A degenerate first stage (for example a bracket over one
        // entrant) completes without any results.
        if plan.is_born_complete() {
            run_advancement(conn, event_id)?;
        }

        Ok(())
    })?;

    info!(event_id, "Event started");
    event_response(store, event_id)
}

/// Records a match result and runs everything it triggers.
///
/// The match is finished with a compare-and-set on its version, scores
/// are inserted, a bracket winner propagates to its parent match, and
/// if this was the stage's last unfinished match the advancement
/// cascade runs. All of it commits or rolls back as one transaction.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `NotFound` for an unknown
/// match, `MatchAlreadyFinished` for a settled match, `Validation` for
/// a malformed score set, `VersionConflict` for a stale version, and
/// `StageNotConfigured` if advancement needs an undeclared stage.
pub fn record_match_result(
    store: &mut Store,
    session_token: &str,
    request: &RecordMatchResultRequest,
) -> Result<RecordMatchResultResponse, ApiError> {
    let conn = store.connection();

    let match_row = queries::play::get_match(conn, request.match_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Match {}", request.match_id)))?;
    let group = queries::play::get_group(conn, match_row.group_id)?.ok_or_else(|| {
        ApiError::Internal(format!("Group {} missing for match", match_row.group_id))
    })?;
    let stage: EventStageData = queries::events::get_stage_by_id(conn, group.event_stage_id)?
        .ok_or_else(|| {
            ApiError::Internal(format!("Stage {} missing for group", group.event_stage_id))
        })?;
    let event: EventData = crate::ops::fetch_event(conn, stage.event_id)?;

    let auth = crate::auth::AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, event.olympiad_id)?;

    let score_kind: ScoreKind = stored_score_kind(&event)?;
    let stage_kind: StageKind = stored_stage_kind(&stage)?;

    let (current_stage_order, event_finished) = store.transaction(|conn| {
        // Refetch under the transaction; the context reads above ran
        // outside it.
        let match_row = queries::play::get_match(conn, request.match_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Match {}", request.match_id)))?;

        let status: MatchStatus = stored_match_status(&match_row.status)?;
        if !status.can_transition_to(MatchStatus::Finished) {
            // A writer holding a stale version lost a race; a writer
            // holding the current version is resubmitting a settled
            // match.
            if request.expected_version == match_row.version {
                return Err(ApiError::MatchAlreadyFinished);
            }
            return Err(ApiError::VersionConflict);
        }

        let participants: Vec<i64> =
            queries::play::list_match_participants(conn, request.match_id)?;
        let scores: Vec<RecordedScore> = request
            .scores
            .iter()
            .map(|entry| RecordedScore {
                participant_id: entry.participant_id,
                score: entry.score,
            })
            .collect();

        // An elimination match must produce a winner even when it is
        // the final, whose winner decides the standings.
        let needs_winner: bool = stage_kind == StageKind::SingleElimination;
        validate_result(score_kind, &participants, &scores, needs_winner)?;

        mutations::play::finish_match(conn, request.match_id, request.expected_version)?;
        for entry in &request.scores {
            mutations::play::record_score(conn, request.match_id, entry.participant_id, entry.score)?;
        }

        if stage_kind == StageKind::SingleElimination {
            propagate_bracket_winner(conn, request.match_id, &scores)?;
        }

        if queries::play::count_unfinished_matches(conn, stage.event_stage_id)? == 0 {
            run_advancement(conn, event.event_id)
        } else {
            Ok((event.current_stage_order, false))
        }
    })?;

    info!(match_id = request.match_id, "Match result recorded");
    Ok(RecordMatchResultResponse {
        match_id: request.match_id,
        current_stage_order,
        event_finished,
    })
}

/// Appends a finished bracket match's winner to its parent match.
fn propagate_bracket_winner(
    conn: &mut SqliteConnection,
    match_id: i64,
    scores: &[RecordedScore],
) -> Result<(), ApiError> {
    let Some(link) = queries::play::get_bracket_link(conn, match_id)? else {
        return Ok(());
    };
    let Some(next_match_id) = link.next_match_id else {
        return Ok(());
    };

    let winner: i64 = winner_of(scores).ok_or_else(|| {
        ApiError::Internal(format!("Match {match_id} finished without a winner"))
    })?;

    debug!(winner, next_match_id, "Propagating bracket winner");
    mutations::play::add_match_participant(conn, next_match_id, winner)
        .map_err(ApiError::from)
}

/// Advances an event out of its completed current stage, repeatedly if
/// the stages it builds are born complete.
///
/// Returns the cursor after advancement and whether the event finished.
pub(crate) fn run_advancement(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<(i64, bool), ApiError> {
    loop {
        let event: EventData = crate::ops::fetch_event(conn, event_id)?;
        let current: i64 = event.current_stage_order;
        let score_kind: ScoreKind = stored_score_kind(&event)?;

        let stage: EventStageData = queries::events::get_stage(conn, event_id, current)?
            .ok_or_else(|| {
                ApiError::Internal(format!("Active stage {current} missing for event {event_id}"))
            })?;
        let stage_kind: StageKind = stored_stage_kind(&stage)?;

        let standings: Vec<Vec<GroupStanding>> = stage_group_standings(conn, &stage, score_kind)?
            .into_iter()
            .map(|(_, group)| group)
            .collect();

        let completed: EventStage = EventStage::with_id(
            stage.event_stage_id,
            stage.event_id,
            stage_kind,
            stage.stage_order,
            stage.advance_count,
        );

        if completed.is_final() {
            // The final stage is complete: park the cursor past it.
            mutations::play::advance_event_cursor(conn, event_id, current, current + 1)?;
            info!(event_id, "Event finished");
            return Ok((current + 1, true));
        }

        let advancing: Vec<i64> = advancing_participants(&completed, &standings);

        let next_order: i64 = current + 1;
        let next: EventStageData = queries::events::get_stage(conn, event_id, next_order)?
            .ok_or(ApiError::StageNotConfigured(next_order))?;
        let next_kind: StageKind = stored_stage_kind(&next)?;

        let plan: StagePlan = build_stage(
            next_kind,
            score_kind,
            advancing.len(),
            group_count_of(&next, next_kind),
        )?;

        let moved: bool =
            mutations::play::advance_event_cursor(conn, event_id, current, next_order)?;
        if !moved {
            // A concurrent trigger advanced the event first.
            return Ok((current, false));
        }

        persist_stage_plan(conn, next.event_stage_id, next_kind, &advancing, &plan)?;
        info!(event_id, next_order, "Advanced to next stage");

        if !plan.is_born_complete() {
            return Ok((next_order, false));
        }
    }
}

/// How many groups a stage builds.
fn group_count_of(stage: &EventStageData, stage_kind: StageKind) -> usize {
    let with_kind: EventStage = EventStage::with_id(
        stage.event_stage_id,
        stage.event_id,
        stage_kind,
        stage.stage_order,
        stage.advance_count,
    );
    usize::try_from(with_kind.group_count()).unwrap_or(1)
}

/// Writes a stage plan's groups, memberships, matches, bye scores, and
/// bracket links, mapping planned seed positions to participant ids.
fn persist_stage_plan(
    conn: &mut SqliteConnection,
    event_stage_id: i64,
    stage_kind: StageKind,
    seeds: &[i64],
    plan: &StagePlan,
) -> Result<(), ApiError> {
    for (position, group) in plan.groups.iter().enumerate() {
        let group_id: i64 = mutations::play::create_group(
            conn,
            event_stage_id,
            i64::try_from(position).unwrap_or(i64::MAX),
        )?;

        for (index, &member) in group.members.iter().enumerate() {
            mutations::play::add_group_participant(
                conn,
                group_id,
                seed_participant(seeds, member)?,
                i64::try_from(index + 1).unwrap_or(i64::MAX),
            )?;
        }

        let mut match_ids: Vec<i64> = Vec::with_capacity(group.matches.len());
        for planned in &group.matches {
            let status: MatchStatus = if planned.finished {
                MatchStatus::Finished
            } else {
                MatchStatus::Pending
            };
            let match_id: i64 = mutations::play::create_match(conn, group_id, status)?;

            for &entrant in &planned.entrants {
                mutations::play::add_match_participant(
                    conn,
                    match_id,
                    seed_participant(seeds, entrant)?,
                )?;
            }
            for &(entrant, score) in &planned.prefilled_scores {
                mutations::play::record_score(
                    conn,
                    match_id,
                    seed_participant(seeds, entrant)?,
                    score,
                )?;
            }

            match_ids.push(match_id);
        }

        if stage_kind == StageKind::SingleElimination {
            for (&match_id, planned) in match_ids.iter().zip(&group.matches) {
                let next_match_id: Option<i64> = match planned.next_match {
                    Some(next_index) => {
                        Some(match_ids.get(next_index).copied().ok_or_else(|| {
                            ApiError::Internal(format!(
                                "Planned parent index {next_index} out of range"
                            ))
                        })?)
                    }
                    None => None,
                };
                mutations::play::create_bracket_link(conn, match_id, next_match_id)?;
            }
        }
    }

    Ok(())
}

fn seed_participant(seeds: &[i64], position: usize) -> Result<i64, ApiError> {
    seeds
        .get(position)
        .copied()
        .ok_or_else(|| ApiError::Internal(format!("Seed position {position} out of range")))
}
