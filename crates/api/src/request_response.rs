// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for API operations.

use serde::{Deserialize, Serialize};

/// Response to opening a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSessionResponse {
    /// The token to present on subsequent calls.
    pub session_token: String,
    /// When the session expires (ISO 8601).
    pub expires_at: String,
}

/// Request to create an olympiad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOlympiadRequest {
    /// The olympiad name (unique).
    pub name: String,
    /// The four-digit PIN guarding write access.
    pub pin: String,
}

/// An olympiad as returned to callers. The PIN hash never leaves the
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OlympiadResponse {
    pub olympiad_id: i64,
    pub name: String,
    /// The version to present on rename or delete.
    pub version: i64,
}

/// One row of the olympiad listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OlympiadSummary {
    pub olympiad_id: i64,
    pub name: String,
}

/// Request to authorize a session for an olympiad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeOlympiadRequest {
    pub olympiad_id: i64,
    /// The olympiad's PIN.
    pub pin: String,
}

/// Request to rename an olympiad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOlympiadRequest {
    pub olympiad_id: i64,
    /// The version the caller last observed.
    pub expected_version: i64,
    pub new_name: String,
}

/// Request to delete an olympiad and everything under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOlympiadRequest {
    pub olympiad_id: i64,
    /// The version the caller last observed.
    pub expected_version: i64,
}

/// Request to create a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub olympiad_id: i64,
    pub name: String,
}

/// A player as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player_id: i64,
    pub olympiad_id: i64,
    pub name: String,
}

/// Request to create a team with its roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub olympiad_id: i64,
    pub name: String,
    /// Players on the roster; all must belong to `olympiad_id`.
    pub player_ids: Vec<i64>,
}

/// A team as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    pub team_id: i64,
    pub olympiad_id: i64,
    pub name: String,
    pub player_ids: Vec<i64>,
}

/// Request to create an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub olympiad_id: i64,
    pub name: String,
    /// `points` or `outcome`.
    pub score_kind: String,
}

/// One declared stage of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageView {
    pub stage_order: i64,
    /// `groups`, `round_robin`, or `single_elimination`.
    pub kind: String,
    /// How many participants exit the stage; `None` marks the final.
    pub advance_count: Option<i64>,
}

/// An event with its declared stages and progression cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: i64,
    pub olympiad_id: i64,
    pub name: String,
    pub score_kind: String,
    /// 0 while registering, 1..N during play, N+1 once finished.
    pub current_stage_order: i64,
    /// The version to present on result recording paths.
    pub version: i64,
    pub stages: Vec<StageView>,
}

/// Request to declare a stage of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclareStageRequest {
    pub event_id: i64,
    pub kind: String,
    pub stage_order: i64,
    pub advance_count: Option<i64>,
}

/// Request to register a participant. Exactly one of `player_id` and
/// `team_id` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub event_id: i64,
    pub player_id: Option<i64>,
    pub team_id: Option<i64>,
}

/// A participant as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub participant_id: i64,
    pub event_id: i64,
    pub player_id: Option<i64>,
    pub team_id: Option<i64>,
}

/// One participant's score within a result submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub participant_id: i64,
    /// A raw score for points events; 0, 1, or 2 for outcome events.
    pub score: i64,
}

/// Request to record a match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatchResultRequest {
    pub match_id: i64,
    /// The match version the caller last observed.
    pub expected_version: i64,
    /// One entry per match participant.
    pub scores: Vec<ScoreEntry>,
}

/// Outcome of recording a match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMatchResultResponse {
    pub match_id: i64,
    /// The event's cursor after any advancement the result triggered.
    pub current_stage_order: i64,
    /// Whether the event finished as a consequence of this result.
    pub event_finished: bool,
}

/// One row of a group's standings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub participant_id: i64,
    /// 1-based position within the group.
    pub rank: u32,
    pub total_score: i64,
    pub wins: u32,
}

/// Standings of one group within a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStandingsView {
    /// The group's creation-order position within its stage.
    pub position: i64,
    pub standings: Vec<StandingRow>,
}

/// Standings of every group in a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub event_id: i64,
    pub stage_order: i64,
    pub groups: Vec<GroupStandingsView>,
}

/// One match within a derived bracket round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketMatchView {
    pub match_id: i64,
    /// `pending`, `running`, or `finished`.
    pub status: String,
    /// Match participants in insertion order.
    pub participant_ids: Vec<i64>,
    /// Recorded scores, present once the match is finished.
    pub scores: Vec<ScoreEntry>,
    /// The match the winner feeds into; `None` for the final.
    pub next_match_id: Option<i64>,
}

/// A single-elimination stage organized into derived rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketResponse {
    pub event_id: i64,
    pub stage_order: i64,
    /// Rounds first to final, matches left to right.
    pub rounds: Vec<Vec<BracketMatchView>>,
}
