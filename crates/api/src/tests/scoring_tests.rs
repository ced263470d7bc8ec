// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for result validation, versioning, and standings.

use olympiad_persistence::queries;

use super::helpers::{
    create_players, declare_stage, pending_match_between, record, record_win,
    setup_event_with_players, setup_olympiad,
};
use crate::error::ApiError;
use crate::ops;
use crate::request_response::{RecordMatchResultRequest, ScoreEntry};

/// Builds a started two-player round-robin event and returns its
/// pending match with the participant ids.
fn two_player_event(score_kind: &str) -> (olympiad_persistence::Store, String, i64, i64, i64, i64) {
    let (mut store, token, olympiad_id) = setup_olympiad();
    let players = create_players(&mut store, &token, olympiad_id, 2);
    let (event_id, participants) =
        setup_event_with_players(&mut store, &token, olympiad_id, score_kind, &players);
    declare_stage(&mut store, &token, event_id, "round_robin", 1, None);
    ops::play::start_event(&mut store, &token, event_id).unwrap();

    let m = pending_match_between(&mut store, event_id, 1, participants[0], participants[1]);
    (store, token, event_id, m.match_id, participants[0], participants[1])
}

#[test]
fn test_score_set_must_cover_exactly_the_match_participants() {
    let (mut store, token, _, match_id, a, b) = two_player_event("outcome");

    let missing = record(&mut store, &token, match_id, &[(a, 2)]);
    match missing {
        Err(ApiError::Validation(_)) => {}
        other => panic!("Expected Validation, got: {other:?}"),
    }

    let stranger = record(&mut store, &token, match_id, &[(a, 2), (b + 999, 0)]);
    match stranger {
        Err(ApiError::Validation(_)) => {}
        other => panic!("Expected Validation, got: {other:?}"),
    }
}

#[test]
fn test_outcome_codes_must_be_consistent() {
    let (mut store, token, _, match_id, a, b) = two_player_event("outcome");

    for bad_pair in [[(a, 2), (b, 2)], [(a, 2), (b, 1)], [(a, 0), (b, 0)]] {
        let result = record(&mut store, &token, match_id, &bad_pair);
        match result {
            Err(ApiError::Validation(_)) => {}
            other => panic!("Expected Validation for {bad_pair:?}, got: {other:?}"),
        }
    }

    let out_of_range = record(&mut store, &token, match_id, &[(a, 3), (b, 0)]);
    match out_of_range {
        Err(ApiError::Validation(_)) => {}
        other => panic!("Expected Validation, got: {other:?}"),
    }
}

#[test]
fn test_points_scores_must_be_non_negative() {
    let (mut store, token, _, match_id, a, b) = two_player_event("points");

    let result = record(&mut store, &token, match_id, &[(a, -1), (b, 10)]);
    match result {
        Err(ApiError::Validation(_)) => {}
        other => panic!("Expected Validation, got: {other:?}"),
    }
}

#[test]
fn test_draws_are_allowed_in_round_robin_play() {
    let (mut store, token, event_id, match_id, a, b) = two_player_event("outcome");

    record(&mut store, &token, match_id, &[(a, 1), (b, 1)]).unwrap();

    // A drawn meeting cannot break the tie; ascending id order holds.
    let standings = ops::views::get_standings(&mut store, &token, event_id, 1).unwrap();
    let rows = &standings.groups[0].standings;
    assert_eq!(rows[0].participant_id, a.min(b));
    assert_eq!(rows[1].participant_id, a.max(b));
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[1].rank, 2);
}

#[test]
fn test_draws_are_rejected_in_elimination_play() {
    let (mut store, token, olympiad_id) = setup_olympiad();
    let players = create_players(&mut store, &token, olympiad_id, 2);
    let (event_id, participants) =
        setup_event_with_players(&mut store, &token, olympiad_id, "points", &players);
    declare_stage(&mut store, &token, event_id, "single_elimination", 1, None);
    ops::play::start_event(&mut store, &token, event_id).unwrap();

    let m = pending_match_between(&mut store, event_id, 1, participants[0], participants[1]);

    let drawn = record(
        &mut store,
        &token,
        m.match_id,
        &[(participants[0], 5), (participants[1], 5)],
    );
    match drawn {
        Err(ApiError::Validation(_)) => {}
        other => panic!("Expected Validation, got: {other:?}"),
    }
}

#[test]
fn test_exactly_one_of_two_same_version_writers_wins() {
    let (mut store, token, _, match_id, a, b) = two_player_event("outcome");

    let version = queries::play::get_match(store.connection(), match_id)
        .unwrap()
        .expect("Match should exist")
        .version;

    let request = |winner: i64, loser: i64| RecordMatchResultRequest {
        match_id,
        expected_version: version,
        scores: vec![
            ScoreEntry {
                participant_id: winner,
                score: 2,
            },
            ScoreEntry {
                participant_id: loser,
                score: 0,
            },
        ],
    };

    ops::play::record_match_result(&mut store, &token, &request(a, b)).unwrap();

    // The second writer observed the same version and must lose.
    let result = ops::play::record_match_result(&mut store, &token, &request(b, a));
    match result {
        Err(ApiError::VersionConflict) => {}
        other => panic!("Expected VersionConflict, got: {other:?}"),
    }

    // The first result stands.
    let scores = queries::play::list_match_scores(store.connection(), match_id).unwrap();
    let winner_score = scores.iter().find(|s| s.participant_id == a).unwrap();
    assert_eq!(winner_score.score, 2);
}

#[test]
fn test_resubmitting_a_settled_match_is_rejected() {
    let (mut store, token, _, match_id, a, b) = two_player_event("outcome");

    record_win(&mut store, &token, match_id, a, b);

    // `record` reads the current version, so the refusal is about the
    // match being settled, not about staleness.
    let result = record(&mut store, &token, match_id, &[(b, 2), (a, 0)]);
    match result {
        Err(ApiError::MatchAlreadyFinished) => {}
        other => panic!("Expected MatchAlreadyFinished, got: {other:?}"),
    }
}

#[test]
fn test_points_standings_rank_by_total_with_head_to_head_tiebreak() {
    let (mut store, token, olympiad_id) = setup_olympiad();
    let players = create_players(&mut store, &token, olympiad_id, 3);
    let (event_id, participants) =
        setup_event_with_players(&mut store, &token, olympiad_id, "points", &players);
    declare_stage(&mut store, &token, event_id, "round_robin", 1, None);
    ops::play::start_event(&mut store, &token, event_id).unwrap();

    let (a, b, c) = (participants[0], participants[1], participants[2]);

    // Totals: a = 18, b = 18, c = 9; a beat b head-to-head.
    let ab = pending_match_between(&mut store, event_id, 1, a, b);
    record(&mut store, &token, ab.match_id, &[(a, 10), (b, 8)]).unwrap();
    let ac = pending_match_between(&mut store, event_id, 1, a, c);
    record(&mut store, &token, ac.match_id, &[(a, 8), (c, 4)]).unwrap();
    let bc = pending_match_between(&mut store, event_id, 1, b, c);
    record(&mut store, &token, bc.match_id, &[(b, 10), (c, 5)]).unwrap();

    let first = ops::views::get_standings(&mut store, &token, event_id, 1).unwrap();
    let rows = &first.groups[0].standings;
    assert_eq!(rows[0].participant_id, a);
    assert_eq!(rows[0].total_score, 18);
    assert_eq!(rows[1].participant_id, b);
    assert_eq!(rows[2].participant_id, c);

    // Determinism: recomputing yields the identical order.
    let second = ops::views::get_standings(&mut store, &token, event_id, 1).unwrap();
    let repeat: Vec<i64> = second.groups[0]
        .standings
        .iter()
        .map(|row| row.participant_id)
        .collect();
    assert_eq!(repeat, vec![a, b, c]);
}

#[test]
fn test_standings_of_an_unfinished_stage_are_refused() {
    let (mut store, token, event_id, _, _, _) = two_player_event("outcome");

    let result = ops::views::get_standings(&mut store, &token, event_id, 1);
    match result {
        Err(ApiError::StageNotComplete) => {}
        other => panic!("Expected StageNotComplete, got: {other:?}"),
    }
}
