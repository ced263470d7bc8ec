// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Advancement selection.

use olympiad_domain::{EventStage, GroupStanding, MatchStatus};

use crate::error::EngineError;

/// Verifies that every match in a group has finished.
///
/// # Errors
///
/// Returns `EngineError::StageNotComplete` if any match is still
/// pending or running. Partial standings are never produced.
pub fn ensure_group_complete(statuses: &[MatchStatus]) -> Result<(), EngineError> {
    if statuses
        .iter()
        .any(|status| *status != MatchStatus::Finished)
    {
        return Err(EngineError::StageNotComplete);
    }
    Ok(())
}

/// Selects the participants advancing out of a completed stage.
///
/// Selection is rank-then-group: every group's rank-1 finisher first,
/// in group order, then every rank-2 finisher, and so on, up to the
/// stage's promotion count. For a groups stage that is one finisher per
/// group; for single-group kinds it is the top of the lone group's
/// standings.
///
/// # Arguments
///
/// * `stage` - The completed stage
/// * `group_standings` - Final standings per group, in group order
#[must_use]
pub fn advancing_participants(
    stage: &EventStage,
    group_standings: &[Vec<GroupStanding>],
) -> Vec<i64> {
    let promoted_per_group: usize =
        usize::try_from(stage.promoted_per_group()).unwrap_or(0);

    let mut advancing: Vec<i64> = Vec::new();

    for rank_index in 0..promoted_per_group {
        for standings in group_standings {
            if let Some(row) = standings.get(rank_index) {
                advancing.push(row.participant_id);
            }
        }
    }

    advancing
}
