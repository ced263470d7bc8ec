// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session, olympiad, player, and team operations.

use olympiad_domain::{Pin, validate_name};
use olympiad_persistence::{OlympiadData, PlayerData, Store, TeamData, mutations, queries};
use tracing::{info, warn};

use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::request_response::{
    AuthorizeOlympiadRequest, CreateOlympiadRequest, CreatePlayerRequest, CreateTeamRequest,
    DeleteOlympiadRequest, OlympiadResponse, OlympiadSummary, OpenSessionResponse, PlayerResponse,
    RenameOlympiadRequest, TeamResponse,
};

/// Opens a new anonymous session.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn open_session(store: &mut Store) -> Result<OpenSessionResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    let (session_token, expires_at) = auth.open_session(store)?;

    Ok(OpenSessionResponse {
        session_token,
        expires_at,
    })
}

/// Creates an olympiad and grants the creating session access to it.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session, `Validation` for a bad
/// name, PIN, or duplicate name.
pub fn create_olympiad(
    store: &mut Store,
    session_token: &str,
    request: &CreateOlympiadRequest,
) -> Result<OlympiadResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    let session = auth.validate_session(store, session_token)?;

    let name: &str = request.name.trim();
    validate_name(name)?;
    let pin: Pin = Pin::new(&request.pin)?;

    let olympiad: OlympiadData = store.transaction(|conn| {
        let olympiad_id: i64 = mutations::olympiads::create_olympiad(conn, name, pin.value())?;
        mutations::sessions::grant_olympiad_access(conn, session.session_id, olympiad_id)?;

        queries::olympiads::get_olympiad(conn, olympiad_id)?.ok_or_else(|| {
            ApiError::Internal(format!("Olympiad {olympiad_id} vanished after creation"))
        })
    })?;

    Ok(olympiad_response(&olympiad))
}

/// Lists all olympiads by name.
///
/// Any valid session may list; per-olympiad grants gate writes only.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session.
pub fn list_olympiads(
    store: &mut Store,
    session_token: &str,
) -> Result<Vec<OlympiadSummary>, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.validate_session(store, session_token)?;

    let olympiads = queries::olympiads::list_olympiads(store.connection())?;

    Ok(olympiads
        .iter()
        .map(|olympiad| OlympiadSummary {
            olympiad_id: olympiad.olympiad_id,
            name: olympiad.name.clone(),
        })
        .collect())
}

/// Verifies an olympiad's PIN and records a grant for the session.
///
/// # Errors
///
/// Returns `Unauthorized` for a bad session or a wrong PIN and
/// `NotFound` for an unknown olympiad.
pub fn authorize_olympiad(
    store: &mut Store,
    session_token: &str,
    request: &AuthorizeOlympiadRequest,
) -> Result<(), ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    let session = auth.validate_session(store, session_token)?;

    let olympiad: OlympiadData =
        queries::olympiads::get_olympiad(store.connection(), request.olympiad_id)?.ok_or_else(
            || ApiError::NotFound(format!("Olympiad {}", request.olympiad_id)),
        )?;

    let pin_matches: bool = bcrypt::verify(&request.pin, &olympiad.pin_hash)
        .map_err(|e| ApiError::Internal(format!("Failed to verify PIN: {e}")))?;

    if !pin_matches {
        warn!(
            olympiad_id = olympiad.olympiad_id,
            "Rejected authorization with wrong PIN"
        );
        return Err(ApiError::Unauthorized);
    }

    mutations::sessions::grant_olympiad_access(
        store.connection(),
        session.session_id,
        olympiad.olympiad_id,
    )?;

    info!(
        olympiad_id = olympiad.olympiad_id,
        "Session authorized for olympiad"
    );
    Ok(())
}

/// Renames an olympiad with a compare-and-set on its version.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `VersionConflict` for a
/// stale version, and `Validation` for a bad or duplicate name.
pub fn rename_olympiad(
    store: &mut Store,
    session_token: &str,
    request: &RenameOlympiadRequest,
) -> Result<OlympiadResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, request.olympiad_id)?;

    let new_name: &str = request.new_name.trim();
    validate_name(new_name)?;

    let conn = store.connection();
    mutations::olympiads::rename_olympiad(
        conn,
        request.olympiad_id,
        request.expected_version,
        new_name,
    )?;

    let olympiad: OlympiadData = queries::olympiads::get_olympiad(conn, request.olympiad_id)?
        .ok_or_else(|| {
            ApiError::Internal(format!("Olympiad {} vanished after rename", request.olympiad_id))
        })?;

    Ok(olympiad_response(&olympiad))
}

/// Deletes an olympiad with a compare-and-set on its version.
///
/// Everything under the olympiad cascades away with it.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant and `VersionConflict` for a
/// stale version.
pub fn delete_olympiad(
    store: &mut Store,
    session_token: &str,
    request: &DeleteOlympiadRequest,
) -> Result<(), ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, request.olympiad_id)?;

    mutations::olympiads::delete_olympiad(
        store.connection(),
        request.olympiad_id,
        request.expected_version,
    )?;

    Ok(())
}

/// Creates a player within an olympiad.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant and `Validation` for a bad
/// or duplicate name.
pub fn create_player(
    store: &mut Store,
    session_token: &str,
    request: &CreatePlayerRequest,
) -> Result<PlayerResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, request.olympiad_id)?;

    let name: &str = request.name.trim();
    validate_name(name)?;

    let player_id: i64 =
        mutations::events::create_player(store.connection(), request.olympiad_id, name)?;

    Ok(PlayerResponse {
        player_id,
        olympiad_id: request.olympiad_id,
        name: name.to_string(),
    })
}

/// Creates a team with its roster within an olympiad.
///
/// # Errors
///
/// Returns `Unauthorized` without a grant, `Validation` for a bad or
/// duplicate name or a duplicated roster entry, `NotFound` for an
/// unknown player, and `InvalidReference` if a roster player belongs
/// to a different olympiad.
pub fn create_team(
    store: &mut Store,
    session_token: &str,
    request: &CreateTeamRequest,
) -> Result<TeamResponse, ApiError> {
    let auth: AuthenticationService = AuthenticationService::new();
    auth.require_olympiad_access(store, session_token, request.olympiad_id)?;

    let name: &str = request.name.trim();
    validate_name(name)?;

    let team: TeamData = store.transaction(|conn| {
        for &player_id in &request.player_ids {
            let player: PlayerData = queries::events::get_player(conn, player_id)?
                .ok_or_else(|| ApiError::NotFound(format!("Player {player_id}")))?;

            if player.olympiad_id != request.olympiad_id {
                return Err(ApiError::InvalidReference(format!(
                    "Player {player_id} belongs to a different olympiad"
                )));
            }
        }

        let team_id: i64 = mutations::events::create_team(conn, request.olympiad_id, name)?;
        for &player_id in &request.player_ids {
            mutations::events::add_team_player(conn, team_id, player_id)?;
        }

        queries::events::get_team(conn, team_id)?
            .ok_or_else(|| ApiError::Internal(format!("Team {team_id} vanished after creation")))
    })?;

    Ok(TeamResponse {
        team_id: team.team_id,
        olympiad_id: team.olympiad_id,
        name: team.name,
        player_ids: request.player_ids.clone(),
    })
}

fn olympiad_response(olympiad: &OlympiadData) -> OlympiadResponse {
    OlympiadResponse {
        olympiad_id: olympiad.olympiad_id,
        name: olympiad.name.clone(),
        version: olympiad.version,
    }
}
