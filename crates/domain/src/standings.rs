// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group standings calculation.
//!
//! Standings are computed over a group whose matches have all finished.
//! Points events rank by total score; outcome events rank by number of
//! wins. A tie between exactly two participants who met head-to-head is
//! broken by that result; every other tie falls back to ascending
//! participant id so the order is deterministic.

use std::collections::HashMap;

use crate::types::{OUTCOME_WIN, ScoreKind};

/// The recorded scores of one finished match, as (participant id, score).
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// One entry per match participant.
    pub scores: Vec<(i64, i64)>,
}

/// One row of a group's final standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStanding {
    /// The participant this row ranks.
    pub participant_id: i64,
    /// 1-based position within the group.
    pub rank: u32,
    /// Sum of recorded scores across the group's matches.
    pub total_score: i64,
    /// Number of matches won (outcome code 2).
    pub wins: u32,
}

/// Computes final standings for a group.
///
/// The caller guarantees every match in `matches` is finished; partial
/// standings are never produced.
///
/// # Arguments
///
/// * `score_kind` - How scores are interpreted for ranking
/// * `participant_ids` - The group's members, in any order
/// * `matches` - Recorded scores of the group's finished matches
#[must_use]
pub fn compute_group_standings(
    score_kind: ScoreKind,
    participant_ids: &[i64],
    matches: &[ScoredMatch],
) -> Vec<GroupStanding> {
    let mut totals: HashMap<i64, i64> = HashMap::new();
    let mut wins: HashMap<i64, u32> = HashMap::new();

    for &participant_id in participant_ids {
        totals.insert(participant_id, 0);
        wins.insert(participant_id, 0);
    }

    for scored_match in matches {
        for &(participant_id, score) in &scored_match.scores {
            if let Some(total) = totals.get_mut(&participant_id) {
                *total += score;
            }
            if score == OUTCOME_WIN {
                if let Some(win_count) = wins.get_mut(&participant_id) {
                    *win_count += 1;
                }
            }
        }
    }

    let ranking_key = |participant_id: i64| -> i64 {
        match score_kind {
            ScoreKind::Points => totals.get(&participant_id).copied().unwrap_or(0),
            ScoreKind::Outcome => i64::from(wins.get(&participant_id).copied().unwrap_or(0)),
        }
    };

    let mut ordered: Vec<i64> = participant_ids.to_vec();
    ordered.sort_by(|&a, &b| {
        ranking_key(b)
            .cmp(&ranking_key(a))
            .then_with(|| a.cmp(&b))
    });

    apply_head_to_head(&mut ordered, &ranking_key, matches);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, participant_id)| GroupStanding {
            participant_id,
            rank: u32::try_from(index + 1).unwrap_or(u32::MAX),
            total_score: totals.get(&participant_id).copied().unwrap_or(0),
            wins: wins.get(&participant_id).copied().unwrap_or(0),
        })
        .collect()
}

/// Reorders two-way ties in place using the tied pair's direct meeting.
///
/// Ties of three or more, pairs that never met, and drawn meetings keep
/// the incoming (ascending id) order.
fn apply_head_to_head(
    ordered: &mut [i64],
    ranking_key: &dyn Fn(i64) -> i64,
    matches: &[ScoredMatch],
) {
    let mut start: usize = 0;

    while start < ordered.len() {
        let key: i64 = ranking_key(ordered[start]);
        let mut end: usize = start + 1;

        while end < ordered.len() && ranking_key(ordered[end]) == key {
            end += 1;
        }

        if end - start == 2 {
            let first: i64 = ordered[start];
            let second: i64 = ordered[start + 1];

            if let Some(winner) = head_to_head_winner(first, second, matches) {
                if winner == second {
                    ordered.swap(start, start + 1);
                }
            }
        }

        start = end;
    }
}

/// Finds the decisive winner of the direct meeting between two
/// participants, if they met and the meeting was not drawn.
fn head_to_head_winner(first: i64, second: i64, matches: &[ScoredMatch]) -> Option<i64> {
    for scored_match in matches {
        let first_score: Option<i64> = scored_match
            .scores
            .iter()
            .find(|(id, _)| *id == first)
            .map(|&(_, score)| score);
        let second_score: Option<i64> = scored_match
            .scores
            .iter()
            .find(|(id, _)| *id == second)
            .map(|&(_, score)| score);

        if let (Some(a), Some(b)) = (first_score, second_score) {
            if a > b {
                return Some(first);
            }
            if b > a {
                return Some(second);
            }
            return None;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[(i64, i64)]) -> ScoredMatch {
        ScoredMatch {
            scores: scores.to_vec(),
        }
    }

    #[test]
    fn test_points_standings_rank_by_total_descending() {
        let participants = vec![10, 20, 30];
        let matches = vec![
            scored(&[(10, 5), (20, 3)]),
            scored(&[(10, 2), (30, 7)]),
            scored(&[(20, 1), (30, 4)]),
        ];

        let standings = compute_group_standings(ScoreKind::Points, &participants, &matches);

        assert_eq!(standings[0].participant_id, 30);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[0].total_score, 11);
        assert_eq!(standings[1].participant_id, 10);
        assert_eq!(standings[1].total_score, 7);
        assert_eq!(standings[2].participant_id, 20);
        assert_eq!(standings[2].total_score, 4);
    }

    #[test]
    fn test_outcome_standings_rank_by_wins() {
        let participants = vec![1, 2, 3];
        let matches = vec![
            scored(&[(1, 2), (2, 0)]),
            scored(&[(1, 2), (3, 0)]),
            scored(&[(2, 2), (3, 0)]),
        ];

        let standings = compute_group_standings(ScoreKind::Outcome, &participants, &matches);

        assert_eq!(standings[0].participant_id, 1);
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[1].participant_id, 2);
        assert_eq!(standings[1].wins, 1);
        assert_eq!(standings[2].participant_id, 3);
        assert_eq!(standings[2].wins, 0);
    }

    #[test]
    fn test_two_way_tie_broken_by_head_to_head() {
        // Participants 5 and 9 both finish on one win; 9 beat 5
        // directly, so 9 ranks first despite the higher id.
        let participants = vec![5, 9, 7];
        let matches = vec![
            scored(&[(9, 2), (5, 0)]),
            scored(&[(5, 2), (7, 0)]),
            scored(&[(9, 0), (7, 2)]),
        ];

        let standings = compute_group_standings(ScoreKind::Outcome, &participants, &matches);

        // Everyone has one win; a three-way tie keeps id order.
        assert_eq!(
            standings
                .iter()
                .map(|s| s.participant_id)
                .collect::<Vec<i64>>(),
            vec![5, 7, 9]
        );
    }

    #[test]
    fn test_exactly_two_tied_with_decisive_meeting() {
        let participants = vec![5, 9];
        let matches = vec![scored(&[(9, 2), (5, 0)])];

        let standings = compute_group_standings(ScoreKind::Outcome, &participants, &matches);

        assert_eq!(standings[0].participant_id, 9);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].participant_id, 5);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_drawn_meeting_keeps_id_order() {
        let participants = vec![4, 2];
        let matches = vec![scored(&[(2, 1), (4, 1)])];

        let standings = compute_group_standings(ScoreKind::Outcome, &participants, &matches);

        assert_eq!(standings[0].participant_id, 2);
        assert_eq!(standings[1].participant_id, 4);
    }

    #[test]
    fn test_points_tie_head_to_head_applies() {
        // 11 and 22 both total 6; 22 took their direct meeting.
        let participants = vec![11, 22, 33];
        let matches = vec![
            scored(&[(11, 2), (22, 4)]),
            scored(&[(11, 4), (33, 1)]),
            scored(&[(22, 2), (33, 0)]),
        ];

        let standings = compute_group_standings(ScoreKind::Points, &participants, &matches);

        assert_eq!(standings[0].participant_id, 22);
        assert_eq!(standings[1].participant_id, 11);
        assert_eq!(standings[2].participant_id, 33);
    }

    #[test]
    fn test_standings_are_deterministic() {
        let participants = vec![3, 1, 2];
        let matches = vec![
            scored(&[(1, 1), (2, 1)]),
            scored(&[(1, 1), (3, 1)]),
            scored(&[(2, 1), (3, 1)]),
        ];

        let first = compute_group_standings(ScoreKind::Outcome, &participants, &matches);
        let second = compute_group_standings(ScoreKind::Outcome, &participants, &matches);

        assert_eq!(first, second);
        // A full three-way draw ranks by ascending id.
        assert_eq!(
            first
                .iter()
                .map(|s| s.participant_id)
                .collect::<Vec<i64>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_participant_with_no_matches_scores_zero() {
        let participants = vec![8];
        let standings = compute_group_standings(ScoreKind::Points, &participants, &[]);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].total_score, 0);
        assert_eq!(standings[0].rank, 1);
    }
}
