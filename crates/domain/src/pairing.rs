// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin pairing and serpentine group distribution.

/// Computes every unordered pair over `count` seed positions.
///
/// Positions are 0-based indices into a seed-ordered list. Pairs are
/// produced in ascending (low, high) order, which fixes the match
/// creation order for a round robin: C(n, 2) pairs in total.
#[must_use]
pub fn round_robin_pairs(count: usize) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(count * count.saturating_sub(1) / 2);

    for low in 0..count {
        for high in (low + 1)..count {
            pairs.push((low, high));
        }
    }

    pairs
}

/// Distributes `count` seed positions into `group_count` groups
/// serpentine-style.
///
/// The first `group_count` seeds go left to right across the groups, the
/// next `group_count` right to left, and so on, balancing seed strength.
/// Returns one 0-based index list per group; groups are in creation
/// order and each list preserves seed order.
///
/// # Arguments
///
/// * `group_count` - How many groups to create; must be positive
/// * `count` - How many seed positions to distribute
#[must_use]
pub fn serpentine_groups(group_count: usize, count: usize) -> Vec<Vec<usize>> {
    if group_count == 0 {
        return Vec::new();
    }

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); group_count];

    for position in 0..count {
        let row: usize = position / group_count;
        let column: usize = position % group_count;

        let group_index: usize = if row % 2 == 0 {
            column
        } else {
            group_count - 1 - column
        };

        groups[group_index].push(position);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_pair_count_is_n_choose_two() {
        for count in 0..10usize {
            let expected: usize = count * count.saturating_sub(1) / 2;
            assert_eq!(round_robin_pairs(count).len(), expected);
        }
    }

    #[test]
    fn test_round_robin_pairs_are_ordered() {
        let pairs = round_robin_pairs(4);

        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_round_robin_empty_and_single() {
        assert!(round_robin_pairs(0).is_empty());
        assert!(round_robin_pairs(1).is_empty());
    }

    #[test]
    fn test_serpentine_six_into_two_groups() {
        // Seeds 1..6 (indices 0..5): group one takes 1, 4, 5 and group
        // two takes 2, 3, 6.
        let groups = serpentine_groups(2, 6);

        assert_eq!(groups, vec![vec![0, 3, 4], vec![1, 2, 5]]);
    }

    #[test]
    fn test_serpentine_eight_into_three_groups() {
        let groups = serpentine_groups(3, 8);

        assert_eq!(groups[0], vec![0, 5, 6]);
        assert_eq!(groups[1], vec![1, 4, 7]);
        assert_eq!(groups[2], vec![2, 3]);
    }

    #[test]
    fn test_serpentine_covers_every_position_once() {
        let groups = serpentine_groups(4, 13);

        let mut seen: Vec<usize> = groups.into_iter().flatten().collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..13).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_serpentine_zero_groups_is_empty() {
        assert!(serpentine_groups(0, 5).is_empty());
    }
}
