// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Olympiad system.
//!
//! Exposes the operation layer over a JSON API. Sessions are opened
//! with `POST /sessions` and presented on every other call as a
//! bearer token in the `Authorization` header.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use olympiad_api::ops;
use olympiad_api::{ApiError, AuthenticationService};
use olympiad_api::request_response::{
    AuthorizeOlympiadRequest, BracketResponse, CreateEventRequest, CreateOlympiadRequest,
    CreatePlayerRequest, CreateTeamRequest, DeclareStageRequest, DeleteOlympiadRequest,
    EventResponse, OlympiadResponse, OlympiadSummary, OpenSessionResponse, ParticipantResponse,
    PlayerResponse, RecordMatchResultRequest, RecordMatchResultResponse,
    RegisterParticipantRequest, RenameOlympiadRequest, StageView, StandingsResponse, TeamResponse,
};
use olympiad_persistence::Store;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command line arguments for the server.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the SQLite database file; an in-memory database is
    /// used when omitted.
    #[arg(short, long)]
    database: Option<String>,

    /// TCP port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Shared state handed to every handler.
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<Store>>,
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

/// Response of the health probe.
#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// An error carrying the HTTP status it should be reported with.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: String::from(message),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: true,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::Validation(_) | ApiError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::VersionConflict | ApiError::MatchAlreadyFinished => StatusCode::CONFLICT,
            ApiError::StageNotConfigured(_)
            | ApiError::StageNotComplete
            | ApiError::NoParticipants
            | ApiError::InsufficientParticipants { .. }
            | ApiError::EmptyStage => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details stay in the log, not in the response body.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {err}");
            return Self {
                status,
                message: String::from("Internal server error"),
            };
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Pulls the session token out of the `Authorization: Bearer` header.
///
/// # Errors
///
/// Returns a 401 error when the header is missing or malformed.
fn bearer_token(headers: &HeaderMap) -> Result<String, HttpError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or_else(|| HttpError::unauthorized("Missing or malformed Authorization header"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn open_session(State(state): State<AppState>) -> Result<Json<OpenSessionResponse>, HttpError> {
    let mut store = state.store.lock().await;
    let response = ops::olympiads::open_session(&mut store)?;
    Ok(Json(response))
}

async fn create_olympiad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateOlympiadRequest>,
) -> Result<Json<OlympiadResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::olympiads::create_olympiad(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn list_olympiads(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OlympiadSummary>>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::olympiads::list_olympiads(&mut store, &token)?;
    Ok(Json(response))
}

async fn authorize_olympiad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AuthorizeOlympiadRequest>,
) -> Result<StatusCode, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    ops::olympiads::authorize_olympiad(&mut store, &token, &request)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn rename_olympiad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RenameOlympiadRequest>,
) -> Result<Json<OlympiadResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::olympiads::rename_olympiad(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn delete_olympiad(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DeleteOlympiadRequest>,
) -> Result<StatusCode, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    ops::olympiads::delete_olympiad(&mut store, &token, &request)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<Json<PlayerResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::olympiads::create_player(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn create_team(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<TeamResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::olympiads::create_team(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<EventResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::events::create_event(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::views::get_event(&mut store, &token, event_id)?;
    Ok(Json(response))
}

async fn declare_stage(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<DeclareStageRequest>,
) -> Result<Json<StageView>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::events::declare_stage(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn register_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterParticipantRequest>,
) -> Result<Json<ParticipantResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::events::register_participant(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn start_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::play::start_event(&mut store, &token, event_id)?;
    Ok(Json(response))
}

async fn record_match_result(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecordMatchResultRequest>,
) -> Result<Json<RecordMatchResultResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::play::record_match_result(&mut store, &token, &request)?;
    Ok(Json(response))
}

async fn get_standings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((event_id, stage_order)): Path<(i64, i64)>,
) -> Result<Json<StandingsResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::views::get_standings(&mut store, &token, event_id, stage_order)?;
    Ok(Json(response))
}

async fn get_bracket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<i64>,
) -> Result<Json<BracketResponse>, HttpError> {
    let token = bearer_token(&headers)?;
    let mut store = state.store.lock().await;
    let response = ops::views::get_bracket(&mut store, &token, event_id)?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", post(open_session))
        .route("/olympiads", post(create_olympiad).get(list_olympiads))
        .route("/olympiads/authorize", post(authorize_olympiad))
        .route("/olympiads/rename", post(rename_olympiad))
        .route("/olympiads/delete", post(delete_olympiad))
        .route("/players", post(create_player))
        .route("/teams", post(create_team))
        .route("/events", post(create_event))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/start", post(start_event))
        .route(
            "/events/{event_id}/standings/{stage_order}",
            get(get_standings),
        )
        .route("/events/{event_id}/bracket", get(get_bracket))
        .route("/stages", post(declare_stage))
        .route("/participants", post(register_participant))
        .route("/results", post(record_match_result))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut store = match &args.database {
        Some(path) => {
            info!("Using database file at {path}");
            Store::new_with_file(path)?
        }
        None => {
            info!("Using an in-memory database; state is lost on exit");
            Store::new_in_memory()?
        }
    };

    // Sessions outlive restarts in a file-backed database; sweep the
    // stale ones before serving.
    let swept: usize = AuthenticationService::new().cleanup_expired_sessions(&mut store)?;
    if swept > 0 {
        info!(swept, "Removed expired sessions");
    }

    let app_state = AppState {
        store: Arc::new(Mutex::new(store)),
    };
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
