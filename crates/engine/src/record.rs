// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match result validation and winner determination.

use olympiad_domain::{DomainError, OUTCOME_DRAW, OUTCOME_LOSS, OUTCOME_WIN, ScoreKind};

use crate::error::EngineError;

/// One submitted score line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedScore {
    pub participant_id: i64,
    pub score: i64,
}

/// Validates a submitted result against a match's participant set.
///
/// # Arguments
///
/// * `score_kind` - How the event's scores are interpreted
/// * `match_participants` - The participant ids the match holds
/// * `scores` - The submitted score lines
/// * `feeds_next_match` - Whether the match winner propagates onward,
///   which forbids draws
///
/// # Errors
///
/// Returns `ScoreSetMismatch` if the score lines do not cover exactly
/// the match participants, a domain error for out-of-range values,
/// `InconsistentOutcome` for an impossible outcome pairing, and
/// `DrawNotAllowed` for a drawn elimination match.
pub fn validate_result(
    score_kind: ScoreKind,
    match_participants: &[i64],
    scores: &[RecordedScore],
    feeds_next_match: bool,
) -> Result<(), EngineError> {
    let mut expected: Vec<i64> = match_participants.to_vec();
    expected.sort_unstable();

    let mut provided: Vec<i64> = scores.iter().map(|line| line.participant_id).collect();
    provided.sort_unstable();

    if expected != provided {
        return Err(EngineError::ScoreSetMismatch { expected, provided });
    }

    match score_kind {
        ScoreKind::Outcome => {
            for line in scores {
                if !matches!(line.score, OUTCOME_LOSS | OUTCOME_DRAW | OUTCOME_WIN) {
                    return Err(EngineError::Domain(DomainError::InvalidOutcomeCode(
                        line.score,
                    )));
                }
            }

            let mut codes: Vec<i64> = scores.iter().map(|line| line.score).collect();
            codes.sort_unstable();

            // A two-sided result is either a decisive win/loss or a
            // double draw.
            if codes != [OUTCOME_LOSS, OUTCOME_WIN] && codes != [OUTCOME_DRAW, OUTCOME_DRAW] {
                return Err(EngineError::InconsistentOutcome { codes });
            }
        }
        ScoreKind::Points => {
            for line in scores {
                if line.score < 0 {
                    return Err(EngineError::Domain(DomainError::NegativeScore(line.score)));
                }
            }
        }
    }

    if feeds_next_match && winner_of(scores).is_none() {
        return Err(EngineError::DrawNotAllowed);
    }

    Ok(())
}

/// Returns the participant with the strictly highest score, or `None`
/// for a draw.
#[must_use]
pub fn winner_of(scores: &[RecordedScore]) -> Option<i64> {
    let best: i64 = scores.iter().map(|line| line.score).max()?;
    let mut leaders = scores.iter().filter(|line| line.score == best);

    let leader: &RecordedScore = leaders.next()?;
    if leaders.next().is_some() {
        None
    } else {
        Some(leader.participant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(participant_id: i64, score: i64) -> RecordedScore {
        RecordedScore {
            participant_id,
            score,
        }
    }

    #[test]
    fn test_valid_decisive_outcome() {
        let result = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, OUTCOME_WIN), line(2, OUTCOME_LOSS)],
            false,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_valid_double_draw_outcome() {
        let result = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, OUTCOME_DRAW), line(2, OUTCOME_DRAW)],
            false,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_score_set_must_match_participants_exactly() {
        let missing = validate_result(ScoreKind::Points, &[1, 2], &[line(1, 5)], false);
        assert!(matches!(
            missing,
            Err(EngineError::ScoreSetMismatch { .. })
        ));

        let stranger = validate_result(
            ScoreKind::Points,
            &[1, 2],
            &[line(1, 5), line(3, 2)],
            false,
        );
        assert!(matches!(
            stranger,
            Err(EngineError::ScoreSetMismatch { .. })
        ));

        let extra = validate_result(
            ScoreKind::Points,
            &[1, 2],
            &[line(1, 5), line(2, 2), line(3, 1)],
            false,
        );
        assert!(matches!(extra, Err(EngineError::ScoreSetMismatch { .. })));
    }

    #[test]
    fn test_outcome_code_out_of_range() {
        let result = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, 3), line(2, 0)],
            false,
        );
        assert!(matches!(
            result,
            Err(EngineError::Domain(DomainError::InvalidOutcomeCode(3)))
        ));
    }

    #[test]
    fn test_inconsistent_outcome_pairings() {
        // Two wins.
        let two_wins = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, OUTCOME_WIN), line(2, OUTCOME_WIN)],
            false,
        );
        assert!(matches!(
            two_wins,
            Err(EngineError::InconsistentOutcome { .. })
        ));

        // A win paired with a draw.
        let win_draw = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, OUTCOME_WIN), line(2, OUTCOME_DRAW)],
            false,
        );
        assert!(matches!(
            win_draw,
            Err(EngineError::InconsistentOutcome { .. })
        ));
    }

    #[test]
    fn test_negative_points_rejected() {
        let result = validate_result(
            ScoreKind::Points,
            &[1, 2],
            &[line(1, -1), line(2, 3)],
            false,
        );
        assert!(matches!(
            result,
            Err(EngineError::Domain(DomainError::NegativeScore(-1)))
        ));
    }

    #[test]
    fn test_draw_rejected_when_winner_must_propagate() {
        let points_draw = validate_result(
            ScoreKind::Points,
            &[1, 2],
            &[line(1, 3), line(2, 3)],
            true,
        );
        assert!(matches!(points_draw, Err(EngineError::DrawNotAllowed)));

        let outcome_draw = validate_result(
            ScoreKind::Outcome,
            &[1, 2],
            &[line(1, OUTCOME_DRAW), line(2, OUTCOME_DRAW)],
            true,
        );
        assert!(matches!(outcome_draw, Err(EngineError::DrawNotAllowed)));
    }

    #[test]
    fn test_winner_of_picks_strict_maximum() {
        assert_eq!(winner_of(&[line(1, 4), line(2, 2)]), Some(1));
        assert_eq!(winner_of(&[line(1, 2), line(2, 4)]), Some(2));
        assert_eq!(winner_of(&[line(1, 3), line(2, 3)]), None);
        assert_eq!(winner_of(&[line(9, 0)]), Some(9));
        assert_eq!(winner_of(&[]), None);
    }
}
