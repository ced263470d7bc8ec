// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for session and authorization-grant persistence.

use super::setup_store;
use crate::{mutations, queries};

#[test]
fn test_create_and_get_session() {
    let mut store = setup_store();
    let conn = store.connection();

    let session_id =
        mutations::sessions::create_session(conn, "token-abc", "2099-01-01T00:00:00Z").unwrap();

    let session = queries::sessions::get_session_by_token(conn, "token-abc")
        .unwrap()
        .expect("Session should exist");

    assert_eq!(session.session_id, session_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00Z");
    assert!(!session.created_at.is_empty());
}

#[test]
fn test_get_missing_session_returns_none() {
    let mut store = setup_store();
    let conn = store.connection();

    let result = queries::sessions::get_session_by_token(conn, "no-such-token").unwrap();
    assert!(result.is_none());
}

#[test]
fn test_grant_and_check_olympiad_access() {
    let mut store = setup_store();
    let conn = store.connection();

    let olympiad_id = mutations::olympiads::create_olympiad(conn, "Games", "1234").unwrap();
    let session_id =
        mutations::sessions::create_session(conn, "token-abc", "2099-01-01T00:00:00Z").unwrap();

    assert!(!queries::sessions::has_olympiad_grant(conn, session_id, olympiad_id).unwrap());

    mutations::sessions::grant_olympiad_access(conn, session_id, olympiad_id).unwrap();
    assert!(queries::sessions::has_olympiad_grant(conn, session_id, olympiad_id).unwrap());

    // Granting twice is harmless.
    mutations::sessions::grant_olympiad_access(conn, session_id, olympiad_id).unwrap();
    assert!(queries::sessions::has_olympiad_grant(conn, session_id, olympiad_id).unwrap());
}

#[test]
fn test_grant_is_scoped_to_olympiad() {
    let mut store = setup_store();
    let conn = store.connection();

    let first = mutations::olympiads::create_olympiad(conn, "Games A", "1234").unwrap();
    let second = mutations::olympiads::create_olympiad(conn, "Games B", "5678").unwrap();
    let session_id =
        mutations::sessions::create_session(conn, "token-abc", "2099-01-01T00:00:00Z").unwrap();

    mutations::sessions::grant_olympiad_access(conn, session_id, first).unwrap();

    assert!(queries::sessions::has_olympiad_grant(conn, session_id, first).unwrap());
    assert!(!queries::sessions::has_olympiad_grant(conn, session_id, second).unwrap());
}

#[test]
fn test_delete_session_removes_grants() {
    let mut store = setup_store();
    let conn = store.connection();

    let olympiad_id = mutations::olympiads::create_olympiad(conn, "Games", "1234").unwrap();
    let session_id =
        mutations::sessions::create_session(conn, "token-abc", "2099-01-01T00:00:00Z").unwrap();
    mutations::sessions::grant_olympiad_access(conn, session_id, olympiad_id).unwrap();

    mutations::sessions::delete_session(conn, "token-abc").unwrap();

    assert!(queries::sessions::get_session_by_token(conn, "token-abc")
        .unwrap()
        .is_none());
    assert!(!queries::sessions::has_olympiad_grant(conn, session_id, olympiad_id).unwrap());
}

#[test]
fn test_delete_expired_sessions() {
    let mut store = setup_store();
    let conn = store.connection();

    mutations::sessions::create_session(conn, "expired", "2000-01-01T00:00:00Z").unwrap();
    mutations::sessions::create_session(conn, "current", "2099-01-01T00:00:00Z").unwrap();

    let deleted = mutations::sessions::delete_expired_sessions(conn).unwrap();
    assert_eq!(deleted, 1);

    assert!(queries::sessions::get_session_by_token(conn, "expired")
        .unwrap()
        .is_none());
    assert!(queries::sessions::get_session_by_token(conn, "current")
        .unwrap()
        .is_some());
}
