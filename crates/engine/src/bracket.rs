// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bracket shape derivation.
//!
//! Rounds and positions are never persisted; they are recomputed from
//! the parent-pointer rows on demand. A `BracketShape` memoizes the
//! derivation for the duration of a request.

use std::collections::HashMap;

use crate::error::EngineError;

/// One persisted bracket link: a match and the match its winner feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketLink {
    pub match_id: i64,
    /// `None` marks the final.
    pub next_match_id: Option<i64>,
}

/// The derived round structure of a bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketShape {
    /// Match ids per round, first round to final, left to right.
    rounds: Vec<Vec<i64>>,
}

impl BracketShape {
    /// Derives the round structure from persisted bracket links.
    ///
    /// Children of a parent are ordered by ascending match id, which is
    /// creation order and therefore left to right.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MalformedBracket` if the links do not form
    /// a single tree with exactly one final.
    pub fn from_links(links: &[BracketLink]) -> Result<Self, EngineError> {
        if links.is_empty() {
            return Ok(Self { rounds: Vec::new() });
        }

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut finals: Vec<i64> = Vec::new();

        for link in links {
            match link.next_match_id {
                Some(parent) => children.entry(parent).or_default().push(link.match_id),
                None => finals.push(link.match_id),
            }
        }

        if finals.len() != 1 {
            return Err(EngineError::MalformedBracket(format!(
                "expected exactly one final, found {}",
                finals.len()
            )));
        }

        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        // Walk down from the final, one round per depth.
        let mut rounds_from_final: Vec<Vec<i64>> = vec![vec![finals[0]]];
        let mut visited: usize = 1;

        loop {
            let current: &Vec<i64> = match rounds_from_final.last() {
                Some(round) => round,
                None => break,
            };

            let mut deeper: Vec<i64> = Vec::new();
            for match_id in current {
                if let Some(ids) = children.get(match_id) {
                    deeper.extend_from_slice(ids);
                }
            }

            if deeper.is_empty() {
                break;
            }

            visited += deeper.len();
            rounds_from_final.push(deeper);
        }

        if visited != links.len() {
            return Err(EngineError::MalformedBracket(format!(
                "{} matches are not reachable from the final",
                links.len() - visited
            )));
        }

        rounds_from_final.reverse();
        Ok(Self {
            rounds: rounds_from_final,
        })
    }

    /// Returns the match ids per round, first round to final.
    #[must_use]
    pub fn rounds(&self) -> &[Vec<i64>] {
        &self.rounds
    }

    /// Returns the final's match id, if the bracket is non-empty.
    #[must_use]
    pub fn final_match_id(&self) -> Option<i64> {
        self.rounds.last().and_then(|round| round.first()).copied()
    }
}
