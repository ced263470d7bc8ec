// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{DomainError, EventStage, MatchStatus, Pin, ScoreKind, StageKind};

#[test]
fn test_score_kind_round_trip() {
    for kind in [ScoreKind::Points, ScoreKind::Outcome] {
        let parsed: ScoreKind = ScoreKind::from_str(kind.as_str()).expect("round trip");
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_score_kind_rejects_unknown_value() {
    let result = ScoreKind::from_str("goals");
    assert!(matches!(result, Err(DomainError::InvalidScoreKind(_))));
}

#[test]
fn test_stage_kind_round_trip() {
    for kind in [
        StageKind::Groups,
        StageKind::RoundRobin,
        StageKind::SingleElimination,
    ] {
        let parsed: StageKind = StageKind::from_str(kind.as_str()).expect("round trip");
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_stage_kind_rejects_unknown_value() {
    let result = StageKind::from_str("double_elimination");
    assert!(matches!(result, Err(DomainError::InvalidStageKind(_))));
}

#[test]
fn test_match_status_transitions_are_forward_only() {
    assert!(MatchStatus::Pending.can_transition_to(MatchStatus::Running));
    assert!(MatchStatus::Pending.can_transition_to(MatchStatus::Finished));
    assert!(MatchStatus::Running.can_transition_to(MatchStatus::Finished));

    assert!(!MatchStatus::Finished.can_transition_to(MatchStatus::Pending));
    assert!(!MatchStatus::Finished.can_transition_to(MatchStatus::Running));
    assert!(!MatchStatus::Running.can_transition_to(MatchStatus::Pending));
}

#[test]
fn test_pin_accepts_four_digits() {
    let pin: Pin = Pin::new("0427").expect("valid PIN");
    assert_eq!(pin.value(), "0427");
}

#[test]
fn test_pin_rejects_wrong_length_and_non_digits() {
    assert!(matches!(Pin::new("123"), Err(DomainError::InvalidPin(_))));
    assert!(matches!(Pin::new("12345"), Err(DomainError::InvalidPin(_))));
    assert!(matches!(Pin::new("12a4"), Err(DomainError::InvalidPin(_))));
    assert!(matches!(Pin::new(""), Err(DomainError::InvalidPin(_))));
}

#[test]
fn test_groups_stage_advance_count_doubles_as_group_count() {
    let stage: EventStage = EventStage::with_id(1, 1, StageKind::Groups, 1, Some(2));

    assert_eq!(stage.group_count(), 2);
    assert_eq!(stage.promoted_per_group(), 1);
    assert!(!stage.is_final());
}

#[test]
fn test_single_group_kinds_promote_top_advance_count() {
    let round_robin: EventStage = EventStage::with_id(1, 1, StageKind::RoundRobin, 1, Some(3));
    assert_eq!(round_robin.group_count(), 1);
    assert_eq!(round_robin.promoted_per_group(), 3);

    let knockout: EventStage =
        EventStage::with_id(2, 1, StageKind::SingleElimination, 2, None);
    assert_eq!(knockout.group_count(), 1);
    assert!(knockout.is_final());
}
