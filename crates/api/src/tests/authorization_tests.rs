// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for session and grant enforcement across operations.

use super::helpers::{setup_olympiad, setup_store};
use crate::error::ApiError;
use crate::ops;
use crate::request_response::{
    AuthorizeOlympiadRequest, CreateOlympiadRequest, CreatePlayerRequest, RenameOlympiadRequest,
};

#[test]
fn test_operations_require_a_valid_session() {
    let mut store = setup_store();

    let result = ops::olympiads::create_olympiad(
        &mut store,
        "made-up-token",
        &CreateOlympiadRequest {
            name: String::from("Games"),
            pin: String::from("1234"),
        },
    );
    match result {
        Err(ApiError::Unauthorized) => {}
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }

    let listing = ops::olympiads::list_olympiads(&mut store, "made-up-token");
    match listing {
        Err(ApiError::Unauthorized) => {}
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }
}

#[test]
fn test_mutations_require_a_grant_for_the_olympiad() {
    let (mut store, _, olympiad_id) = setup_olympiad();

    // A fresh session can see the olympiad but not touch it.
    let stranger = ops::olympiads::open_session(&mut store).unwrap().session_token;

    let listed = ops::olympiads::list_olympiads(&mut store, &stranger).unwrap();
    assert_eq!(listed.len(), 1);

    let result = ops::olympiads::create_player(
        &mut store,
        &stranger,
        &CreatePlayerRequest {
            olympiad_id,
            name: String::from("Intruder"),
        },
    );
    match result {
        Err(ApiError::Unauthorized) => {}
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }
}

#[test]
fn test_authorize_olympiad_verifies_the_pin() {
    let (mut store, _, olympiad_id) = setup_olympiad();
    let stranger = ops::olympiads::open_session(&mut store).unwrap().session_token;

    let wrong = ops::olympiads::authorize_olympiad(
        &mut store,
        &stranger,
        &AuthorizeOlympiadRequest {
            olympiad_id,
            pin: String::from("0000"),
        },
    );
    match wrong {
        Err(ApiError::Unauthorized) => {}
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }

    ops::olympiads::authorize_olympiad(
        &mut store,
        &stranger,
        &AuthorizeOlympiadRequest {
            olympiad_id,
            pin: String::from("1234"),
        },
    )
    .unwrap();

    // The grant unlocks mutations for this session.
    ops::olympiads::create_player(
        &mut store,
        &stranger,
        &CreatePlayerRequest {
            olympiad_id,
            name: String::from("Newcomer"),
        },
    )
    .unwrap();
}

#[test]
fn test_authorizing_an_unknown_olympiad_is_not_found() {
    let mut store = setup_store();
    let token = ops::olympiads::open_session(&mut store).unwrap().session_token;

    let result = ops::olympiads::authorize_olympiad(
        &mut store,
        &token,
        &AuthorizeOlympiadRequest {
            olympiad_id: 9999,
            pin: String::from("1234"),
        },
    );
    match result {
        Err(ApiError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got: {other:?}"),
    }
}

#[test]
fn test_grants_are_scoped_per_olympiad() {
    let (mut store, token, _) = setup_olympiad();

    // The same session creates a second olympiad and is granted both,
    // but a grant on one never implies the other for a new session.
    let second = ops::olympiads::create_olympiad(
        &mut store,
        &token,
        &CreateOlympiadRequest {
            name: String::from("Other Games"),
            pin: String::from("5678"),
        },
    )
    .unwrap();

    let stranger = ops::olympiads::open_session(&mut store).unwrap().session_token;
    ops::olympiads::authorize_olympiad(
        &mut store,
        &stranger,
        &AuthorizeOlympiadRequest {
            olympiad_id: second.olympiad_id,
            pin: String::from("5678"),
        },
    )
    .unwrap();

    let allowed = ops::olympiads::rename_olympiad(
        &mut store,
        &stranger,
        &RenameOlympiadRequest {
            olympiad_id: second.olympiad_id,
            expected_version: 1,
            new_name: String::from("Renamed Other Games"),
        },
    );
    assert!(allowed.is_ok());

    let first_id = ops::olympiads::list_olympiads(&mut store, &stranger)
        .unwrap()
        .iter()
        .find(|o| o.name == "Summer Games")
        .map(|o| o.olympiad_id)
        .expect("First olympiad should be listed");

    let denied = ops::olympiads::rename_olympiad(
        &mut store,
        &stranger,
        &RenameOlympiadRequest {
            olympiad_id: first_id,
            expected_version: 1,
            new_name: String::from("Hijacked"),
        },
    );
    match denied {
        Err(ApiError::Unauthorized) => {}
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }
}
