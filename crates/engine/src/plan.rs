// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stage building.
//!
//! A stage plan describes the groups and matches to persist for a stage,
//! referencing participants by their 0-based position in the stage's
//! seeded entrant list. The caller maps positions to participant ids
//! when writing rows.

use olympiad_domain::{
    OUTCOME_WIN, ScoreKind, StageKind, bracket_size, first_round_pairings, round_robin_pairs,
    serpentine_groups,
};

use crate::error::EngineError;

/// One match to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    /// Seeded entrant positions taking part. Two for a playable match,
    /// one for a bye, empty for a later-round match awaiting winners.
    pub entrants: Vec<usize>,
    /// Whether the match is created already finished (byes).
    pub finished: bool,
    /// Scores to record at creation, as (entrant position, score).
    /// Only byes carry these.
    pub prefilled_scores: Vec<(usize, i64)>,
    /// Index of the match the winner feeds into, within the same
    /// group's match list. `None` for a final and for round-robin play.
    pub next_match: Option<usize>,
}

/// One group to create, with its matches in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    /// Seeded entrant positions belonging to this group, in seed order.
    pub members: Vec<usize>,
    pub matches: Vec<MatchPlan>,
}

/// The full layout of a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePlan {
    /// Groups in creation order.
    pub groups: Vec<GroupPlan>,
}

impl StagePlan {
    /// Returns whether every planned match is already finished.
    ///
    /// A stage can be born complete when it has no playable matches at
    /// all, such as a bracket over a single entrant. The caller must
    /// then advance immediately instead of waiting for results.
    #[must_use]
    pub fn is_born_complete(&self) -> bool {
        self.groups
            .iter()
            .flat_map(|group| group.matches.iter())
            .all(|planned| planned.finished)
    }

    /// Returns the total number of planned matches.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.groups.iter().map(|group| group.matches.len()).sum()
    }
}

/// Builds the layout for a stage over a seeded entrant list.
///
/// # Arguments
///
/// * `stage_kind` - The format the stage is played in
/// * `score_kind` - How the event's scores are interpreted
/// * `entrant_count` - How many seeded entrants enter the stage
/// * `group_count` - How many groups a groups stage creates; ignored
///   for single-group kinds
///
/// # Errors
///
/// Returns `EngineError::EmptyStage` for zero entrants and
/// `EngineError::InsufficientParticipants` when a groups stage has more
/// groups than entrants.
pub fn build_stage(
    stage_kind: StageKind,
    score_kind: ScoreKind,
    entrant_count: usize,
    group_count: usize,
) -> Result<StagePlan, EngineError> {
    if entrant_count == 0 {
        return Err(EngineError::EmptyStage);
    }

    match stage_kind {
        StageKind::RoundRobin => {
            let members: Vec<usize> = (0..entrant_count).collect();
            let matches: Vec<MatchPlan> = round_robin_group_matches(&members);

            Ok(StagePlan {
                groups: vec![GroupPlan { members, matches }],
            })
        }
        StageKind::Groups => {
            if entrant_count < group_count {
                return Err(EngineError::InsufficientParticipants {
                    available: entrant_count,
                    required: group_count,
                });
            }

            let groups: Vec<GroupPlan> = serpentine_groups(group_count, entrant_count)
                .into_iter()
                .map(|members| {
                    let matches: Vec<MatchPlan> = round_robin_group_matches(&members);
                    GroupPlan { members, matches }
                })
                .collect();

            Ok(StagePlan { groups })
        }
        StageKind::SingleElimination => {
            let members: Vec<usize> = (0..entrant_count).collect();
            let matches: Vec<MatchPlan> = bracket_matches(entrant_count, score_kind);

            Ok(StagePlan {
                groups: vec![GroupPlan { members, matches }],
            })
        }
    }
}

/// Builds the C(n, 2) round-robin matches for a group's members, in
/// ascending seed-pair order.
fn round_robin_group_matches(members: &[usize]) -> Vec<MatchPlan> {
    round_robin_pairs(members.len())
        .into_iter()
        .map(|(low, high)| MatchPlan {
            entrants: vec![members[low], members[high]],
            finished: false,
            prefilled_scores: Vec::new(),
            next_match: None,
        })
        .collect()
}

/// Builds a full knockout bracket, leaf rounds first.
///
/// The bracket spans the next power of two at or above the entrant
/// count; slots beyond the entrant count become byes, created finished
/// with the sole entrant scored and propagated into the parent match.
fn bracket_matches(entrant_count: usize, score_kind: ScoreKind) -> Vec<MatchPlan> {
    let size: usize = bracket_size(entrant_count);

    if size < 2 {
        // A lone entrant has nothing to play.
        return Vec::new();
    }

    let bye_score: i64 = match score_kind {
        ScoreKind::Outcome => OUTCOME_WIN,
        ScoreKind::Points => 0,
    };

    // Round r holds size / 2^(r+1) matches; offsets index the flattened
    // creation-order list.
    let mut round_offsets: Vec<usize> = Vec::new();
    let mut offset: usize = 0;
    let mut round_size: usize = size / 2;
    while round_size >= 1 {
        round_offsets.push(offset);
        offset += round_size;
        round_size /= 2;
    }
    let total: usize = offset;

    let mut matches: Vec<MatchPlan> = Vec::with_capacity(total);
    for (round_index, &round_offset) in round_offsets.iter().enumerate() {
        let this_round: usize = if round_index + 1 < round_offsets.len() {
            round_offsets[round_index + 1] - round_offset
        } else {
            1
        };

        for position in 0..this_round {
            let next_match: Option<usize> = round_offsets
                .get(round_index + 1)
                .map(|&next_offset| next_offset + position / 2);

            matches.push(MatchPlan {
                entrants: Vec::new(),
                finished: false,
                prefilled_scores: Vec::new(),
                next_match,
            });
        }
    }

    // Fill the first round from the seeding permutation, then propagate
    // bye winners upward.
    let mut propagations: Vec<(usize, usize)> = Vec::new();

    for (position, pairing) in first_round_pairings(entrant_count).iter().enumerate() {
        let planned: &mut MatchPlan = &mut matches[position];

        match *pairing {
            (Some(a), Some(b)) => {
                planned.entrants = vec![a - 1, b - 1];
            }
            (Some(seed), None) | (None, Some(seed)) => {
                let entrant: usize = seed - 1;
                planned.entrants = vec![entrant];
                planned.finished = true;
                planned.prefilled_scores = vec![(entrant, bye_score)];

                if let Some(next) = planned.next_match {
                    propagations.push((next, entrant));
                }
            }
            (None, None) => {
                // Unreachable with a power-of-two pad: every pairing's
                // seeds sum to size + 1, so at most one side exceeds
                // the entrant count.
                planned.finished = true;
            }
        }
    }

    for (next, entrant) in propagations {
        matches[next].entrants.push(entrant);
    }

    matches
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn bracket_plan(entrant_count: usize) -> StagePlan {
        build_stage(
            StageKind::SingleElimination,
            ScoreKind::Outcome,
            entrant_count,
            1,
        )
        .expect("bracket builds")
    }

    #[test]
    fn test_round_robin_has_n_choose_two_matches() {
        for entrant_count in 1..=8 {
            let plan = build_stage(StageKind::RoundRobin, ScoreKind::Points, entrant_count, 1)
                .expect("round robin builds");

            let expected: usize = entrant_count * (entrant_count - 1) / 2;
            assert_eq!(plan.groups.len(), 1);
            assert_eq!(plan.match_count(), expected);
        }
    }

    #[test]
    fn test_round_robin_matches_in_ascending_seed_pair_order() {
        let plan = build_stage(StageKind::RoundRobin, ScoreKind::Points, 4, 1)
            .expect("round robin builds");

        let entrants: Vec<Vec<usize>> = plan.groups[0]
            .matches
            .iter()
            .map(|planned| planned.entrants.clone())
            .collect();

        assert_eq!(
            entrants,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_groups_stage_distributes_serpentine() {
        let plan = build_stage(StageKind::Groups, ScoreKind::Outcome, 6, 2)
            .expect("groups stage builds");

        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.groups[0].members, vec![0, 3, 4]);
        assert_eq!(plan.groups[1].members, vec![1, 2, 5]);

        // Each group plays an internal round robin.
        assert_eq!(plan.groups[0].matches.len(), 3);
        assert_eq!(plan.groups[1].matches.len(), 3);
        assert_eq!(plan.groups[0].matches[0].entrants, vec![0, 3]);
    }

    #[test]
    fn test_groups_stage_rejects_more_groups_than_entrants() {
        let result = build_stage(StageKind::Groups, ScoreKind::Outcome, 2, 3);

        assert_eq!(
            result,
            Err(EngineError::InsufficientParticipants {
                available: 2,
                required: 3,
            })
        );
    }

    #[test]
    fn test_empty_stage_is_rejected_for_every_kind() {
        for kind in [
            StageKind::Groups,
            StageKind::RoundRobin,
            StageKind::SingleElimination,
        ] {
            let result = build_stage(kind, ScoreKind::Points, 0, 1);
            assert_eq!(result, Err(EngineError::EmptyStage));
        }
    }

    #[test]
    fn test_bracket_has_size_minus_one_matches_and_one_final() {
        for entrant_count in 2..=16 {
            let plan = bracket_plan(entrant_count);
            let expected: usize = bracket_size(entrant_count) - 1;

            assert_eq!(plan.match_count(), expected, "n = {entrant_count}");

            let final_count: usize = plan.groups[0]
                .matches
                .iter()
                .filter(|planned| planned.next_match.is_none())
                .count();
            assert_eq!(final_count, 1, "n = {entrant_count}");
        }
    }

    #[test]
    fn test_full_bracket_first_round_pairs_seeds() {
        let plan = bracket_plan(8);
        let matches = &plan.groups[0].matches;

        assert_eq!(matches[0].entrants, vec![0, 7]);
        assert_eq!(matches[1].entrants, vec![3, 4]);
        assert_eq!(matches[2].entrants, vec![1, 6]);
        assert_eq!(matches[3].entrants, vec![2, 5]);
    }

    #[test]
    fn test_top_two_seeds_converge_only_at_the_final() {
        let plan = bracket_plan(8);
        let matches = &plan.groups[0].matches;

        let path_to_final = |start: usize| -> Vec<usize> {
            let mut path: Vec<usize> = vec![start];
            let mut current: usize = start;
            while let Some(next) = matches[current].next_match {
                path.push(next);
                current = next;
            }
            path
        };

        // Seed 1 starts in match 0, seed 2 in match 2.
        let seed_one_path: Vec<usize> = path_to_final(0);
        let seed_two_path: Vec<usize> = path_to_final(2);

        let shared: Vec<usize> = seed_one_path
            .iter()
            .filter(|index| seed_two_path.contains(index))
            .copied()
            .collect();

        // The paths share exactly one match, and it is the final.
        assert_eq!(shared.len(), 1);
        assert!(matches[shared[0]].next_match.is_none());
    }

    #[test]
    fn test_byes_are_born_finished_and_propagated() {
        // Six entrants in a size-8 bracket: seeds 1 and 2 get byes.
        let plan = bracket_plan(6);
        let matches = &plan.groups[0].matches;

        assert!(matches[0].finished);
        assert_eq!(matches[0].entrants, vec![0]);
        assert_eq!(matches[0].prefilled_scores, vec![(0, OUTCOME_WIN)]);

        assert!(matches[2].finished);
        assert_eq!(matches[2].entrants, vec![1]);

        // Bye winners are already waiting in the semifinals.
        assert_eq!(matches[4].entrants, vec![0]);
        assert_eq!(matches[5].entrants, vec![1]);

        // The playable first-round matches are pending.
        assert!(!matches[1].finished);
        assert_eq!(matches[1].entrants, vec![3, 4]);
        assert!(!matches[3].finished);
        assert_eq!(matches[3].entrants, vec![2, 5]);
    }

    #[test]
    fn test_points_bye_scores_zero() {
        let plan = build_stage(StageKind::SingleElimination, ScoreKind::Points, 3, 1)
            .expect("bracket builds");
        let matches = &plan.groups[0].matches;

        assert!(matches[0].finished);
        assert_eq!(matches[0].prefilled_scores, vec![(0, 0)]);
    }

    #[test]
    fn test_single_entrant_bracket_is_born_complete() {
        let plan = bracket_plan(1);

        assert_eq!(plan.match_count(), 0);
        assert!(plan.is_born_complete());
        assert_eq!(plan.groups[0].members, vec![0]);
    }

    #[test]
    fn test_two_entrant_bracket_is_a_single_final() {
        let plan = bracket_plan(2);
        let matches = &plan.groups[0].matches;

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].entrants, vec![0, 1]);
        assert!(matches[0].next_match.is_none());
        assert!(!plan.is_born_complete());
    }
}
