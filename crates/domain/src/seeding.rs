// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-elimination bracket mathematics.
//!
//! A bracket always spans the next power of two at or above the entrant
//! count. Entrants are placed by the canonical seeding permutation so that
//! higher seeds meet as late as possible; slots above the entrant count are
//! byes. For size 8 the permutation is 1, 8, 4, 5, 2, 7, 3, 6, which pairs
//! to (1 v 8), (4 v 5), (2 v 7), (3 v 6) and keeps seeds 1 and 2 apart
//! until the final.

/// Returns the bracket size for an entrant count: the next power of two
/// at or above `entrant_count`. Zero entrants give a zero-size bracket.
#[must_use]
pub const fn bracket_size(entrant_count: usize) -> usize {
    if entrant_count == 0 {
        0
    } else {
        entrant_count.next_power_of_two()
    }
}

/// Computes the canonical seeding permutation for a power-of-two bracket
/// size.
///
/// The permutation lists 1-based seed numbers in slot order. Adjacent
/// slot pairs form the first-round pairings, and every pairing's seeds
/// sum to `size + 1`.
///
/// # Arguments
///
/// * `size` - The bracket size; must be a power of two (or zero)
#[must_use]
pub fn seeding_order(size: usize) -> Vec<usize> {
    if size == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = vec![1];

    while order.len() < size {
        let doubled: usize = order.len() * 2;
        let mut next: Vec<usize> = Vec::with_capacity(doubled);

        for &seed in &order {
            next.push(seed);
            next.push(doubled + 1 - seed);
        }

        order = next;
    }

    order
}

/// Computes the first-round pairings for an entrant count.
///
/// Each pairing holds 1-based seed numbers; `None` marks a bye slot
/// (a seed beyond the entrant count). Pairings are listed left to right
/// across the bracket.
#[must_use]
pub fn first_round_pairings(entrant_count: usize) -> Vec<(Option<usize>, Option<usize>)> {
    let size: usize = bracket_size(entrant_count);

    if size < 2 {
        return Vec::new();
    }

    let occupied = |seed: usize| -> Option<usize> {
        if seed <= entrant_count { Some(seed) } else { None }
    };

    seeding_order(size)
        .chunks(2)
        .map(|pair| (occupied(pair[0]), occupied(pair[1])))
        .collect()
}
