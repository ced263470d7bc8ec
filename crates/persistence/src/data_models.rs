// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of an olympiad row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OlympiadData {
    pub olympiad_id: i64,
    pub name: String,
    pub pin_hash: String,
    pub version: i64,
}

/// Serializable representation of a player row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    pub player_id: i64,
    pub olympiad_id: i64,
    pub name: String,
}

/// Serializable representation of a team row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamData {
    pub team_id: i64,
    pub olympiad_id: i64,
    pub name: String,
}

/// Serializable representation of an event row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: i64,
    pub olympiad_id: i64,
    pub name: String,
    pub score_kind: String,
    pub current_stage_order: i64,
    pub version: i64,
}

/// Serializable representation of an event stage row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStageData {
    pub event_stage_id: i64,
    pub event_id: i64,
    pub kind: String,
    pub stage_order: i64,
    pub advance_count: Option<i64>,
}

/// Serializable representation of a participant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantData {
    pub participant_id: i64,
    pub event_id: i64,
    pub player_id: Option<i64>,
    pub team_id: Option<i64>,
}

/// Serializable representation of a group row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupData {
    pub group_id: i64,
    pub event_stage_id: i64,
    pub position: i64,
}

/// Serializable representation of a group membership row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupParticipantData {
    pub participant_id: i64,
    pub seed: i64,
}

/// Serializable representation of a match row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchData {
    pub match_id: i64,
    pub group_id: i64,
    pub status: String,
    pub version: i64,
}

/// Serializable representation of a bracket link row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BracketLinkData {
    pub match_id: i64,
    pub next_match_id: Option<i64>,
}

/// Serializable representation of a recorded score row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchScoreData {
    pub participant_id: i64,
    pub score: i64,
}

/// Serializable representation of a session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub created_at: String,
    pub expires_at: String,
}
