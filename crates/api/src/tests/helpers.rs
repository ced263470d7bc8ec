// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API operation tests.

use olympiad_persistence::{MatchData, Store, queries};

use crate::error::ApiError;
use crate::ops;
use crate::request_response::{
    CreateEventRequest, CreateOlympiadRequest, CreatePlayerRequest, DeclareStageRequest,
    RecordMatchResultRequest, RecordMatchResultResponse, RegisterParticipantRequest, ScoreEntry,
};

pub fn setup_store() -> Store {
    Store::new_in_memory().expect("Failed to create in-memory store")
}

/// Creates a store with an authorized session and one olympiad.
pub fn setup_olympiad() -> (Store, String, i64) {
    let mut store = setup_store();

    let session = ops::olympiads::open_session(&mut store).unwrap();
    let token = session.session_token;

    let olympiad = ops::olympiads::create_olympiad(
        &mut store,
        &token,
        &CreateOlympiadRequest {
            name: String::from("Summer Games"),
            pin: String::from("1234"),
        },
    )
    .unwrap();

    (store, token, olympiad.olympiad_id)
}

/// Creates players named `P1`, `P2`, and so on.
pub fn create_players(
    store: &mut Store,
    token: &str,
    olympiad_id: i64,
    count: usize,
) -> Vec<i64> {
    (1..=count)
        .map(|index| {
            ops::olympiads::create_player(
                store,
                token,
                &CreatePlayerRequest {
                    olympiad_id,
                    name: format!("P{index}"),
                },
            )
            .unwrap()
            .player_id
        })
        .collect()
}

/// Creates an event and registers the given players, returning the
/// event id and participant ids in registration order.
pub fn setup_event_with_players(
    store: &mut Store,
    token: &str,
    olympiad_id: i64,
    score_kind: &str,
    player_ids: &[i64],
) -> (i64, Vec<i64>) {
    let event = ops::events::create_event(
        store,
        token,
        &CreateEventRequest {
            olympiad_id,
            name: String::from("Main Event"),
            score_kind: score_kind.to_string(),
        },
    )
    .unwrap();

    let participant_ids: Vec<i64> = player_ids
        .iter()
        .map(|&player_id| {
            ops::events::register_participant(
                store,
                token,
                &RegisterParticipantRequest {
                    event_id: event.event_id,
                    player_id: Some(player_id),
                    team_id: None,
                },
            )
            .unwrap()
            .participant_id
        })
        .collect();

    (event.event_id, participant_ids)
}

pub fn declare_stage(
    store: &mut Store,
    token: &str,
    event_id: i64,
    kind: &str,
    stage_order: i64,
    advance_count: Option<i64>,
) {
    ops::events::declare_stage(
        store,
        token,
        &DeclareStageRequest {
            event_id,
            kind: kind.to_string(),
            stage_order,
            advance_count,
        },
    )
    .unwrap();
}

/// Finds the pending match of a stage played between exactly the two
/// given participants.
pub fn pending_match_between(
    store: &mut Store,
    event_id: i64,
    stage_order: i64,
    first: i64,
    second: i64,
) -> MatchData {
    let conn = store.connection();
    let stage = queries::events::get_stage(conn, event_id, stage_order)
        .unwrap()
        .expect("Stage should be built");

    for group in queries::play::list_groups(conn, stage.event_stage_id).unwrap() {
        for match_row in queries::play::list_matches(conn, group.group_id).unwrap() {
            let mut participants =
                queries::play::list_match_participants(conn, match_row.match_id).unwrap();
            participants.sort_unstable();

            let mut wanted = vec![first, second];
            wanted.sort_unstable();

            if participants == wanted && match_row.status == "pending" {
                return match_row;
            }
        }
    }

    panic!("No pending match between {first} and {second} in stage {stage_order}");
}

/// Records a result with the match's current version.
pub fn record(
    store: &mut Store,
    token: &str,
    match_id: i64,
    scores: &[(i64, i64)],
) -> Result<RecordMatchResultResponse, ApiError> {
    let version = queries::play::get_match(store.connection(), match_id)
        .unwrap()
        .expect("Match should exist")
        .version;

    ops::play::record_match_result(
        store,
        token,
        &RecordMatchResultRequest {
            match_id,
            expected_version: version,
            scores: scores
                .iter()
                .map(|&(participant_id, score)| ScoreEntry {
                    participant_id,
                    score,
                })
                .collect(),
        },
    )
}

/// Records an outcome-scored win.
pub fn record_win(
    store: &mut Store,
    token: &str,
    match_id: i64,
    winner: i64,
    loser: i64,
) -> RecordMatchResultResponse {
    record(store, token, match_id, &[(winner, 2), (loser, 0)]).unwrap()
}
