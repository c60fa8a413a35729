//! Round-robin pairing using the circle method.
//!
//! One position stays fixed while the others rotate each round. With an odd
//! number of entries an empty seat is added; whoever faces it sits out that
//! round. The empty seat is never an entry, so it cannot appear in output.

use crate::topology::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A round-robin fixture with its generated id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinMatch<T> {
    /// `RR{round}-{index}`
    pub id: NodeId,
    pub home: T,
    pub away: T,
    /// Zero-based repetition of the full cycle
    pub leg: u32,
}

/// Pairings grouped by round.
///
/// Returns `N - 1` rounds for even `N` and `N` rounds for odd `N`. Fewer than
/// two entries yields no rounds.
///
/// # Example
///
/// ```
/// use tourney::round_robin::rr_rounds;
///
/// let rounds = rr_rounds(&["A", "B", "C"]);
/// assert_eq!(rounds, vec![vec![("B", "C")], vec![("A", "C")], vec![("A", "B")]]);
/// ```
pub fn rr_rounds<T: Clone>(entries: &[T]) -> Vec<Vec<(T, T)>> {
    if entries.len() < 2 {
        return Vec::new();
    }

    let mut seats: Vec<Option<&T>> = entries.iter().map(Some).collect();
    if seats.len() % 2 == 1 {
        seats.push(None);
    }

    let n = seats.len();
    let rounds = n - 1;
    let mut left: Vec<Option<&T>> = seats[..n / 2].to_vec();
    let mut right: VecDeque<Option<&T>> = seats[n / 2..].iter().rev().copied().collect();

    let mut out = Vec::with_capacity(rounds);
    for round in 0..rounds {
        let pairs = left
            .iter()
            .zip(right.iter())
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) => Some(((*a).clone(), (*b).clone())),
                _ => None,
            })
            .collect();
        out.push(pairs);

        if round + 1 == rounds {
            break;
        }

        // left[0] stays put; last of left goes to the back of right,
        // front of right takes the second seat on the left
        if let (Some(from_left), Some(from_right)) = (left.pop(), right.pop_front()) {
            left.insert(1, from_right);
            right.push_back(from_left);
        }
    }

    out
}

/// Every unordered pair exactly once, in round-by-round order.
///
/// No ids are attached at this layer; see [`round_robin_matches`].
pub fn rr_pairs<T: Clone>(entries: &[T]) -> Vec<(T, T)> {
    rr_rounds(entries).into_iter().flatten().collect()
}

/// Full fixture list with ids, repeating the cycle `matches_per_pair` times.
///
/// Even legs keep the circle-method orientation, odd legs swap home and
/// away. Rounds keep counting across legs, so leg 1 of a 4-entry cycle starts
/// at round 4. `matches_per_pair == 0` is treated as 1.
pub fn round_robin_matches<T: Clone>(
    entries: &[T],
    matches_per_pair: u32,
) -> Vec<RoundRobinMatch<T>> {
    let cycle = rr_rounds(entries);
    let legs = matches_per_pair.max(1);
    let cycle_len = cycle.len() as u32;

    let mut out = Vec::new();
    for leg in 0..legs {
        for (round_idx, round) in cycle.iter().enumerate() {
            let round_no = leg * cycle_len + round_idx as u32 + 1;
            for (index, (a, b)) in round.iter().enumerate() {
                let (home, away) = if leg % 2 == 0 {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                };
                out.push(RoundRobinMatch {
                    id: NodeId::round_robin(round_no, index as u32),
                    home,
                    away,
                    leg,
                });
            }
        }
    }
    out
}

/// Distribute seeded entries into `groups` pools, snake order.
///
/// Seed order runs across the pools and back (1-2-3, 6-5-4, ...), which
/// keeps pool strength balanced. `groups == 0` is treated as 1.
pub fn split_into_groups<T: Clone>(entries: &[T], groups: usize) -> Vec<Vec<T>> {
    let groups = groups.max(1);
    let mut pools: Vec<Vec<T>> = vec![Vec::new(); groups];

    for (i, entry) in entries.iter().enumerate() {
        let row = i / groups;
        let col = i % groups;
        let target = if row % 2 == 0 { col } else { groups - 1 - col };
        pools[target].push(entry.clone());
    }

    pools
}
