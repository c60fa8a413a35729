//! Seed lists: bracket placement order, playoff seeding from round-robin
//! pools, and random reshuffles.

use crate::errors::{BracketError, BracketResult};
use rand::SeedableRng;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// A seeded team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeed {
    /// 1-based seed
    pub seed: u32,
    pub team_id: i64,
    pub team_name: String,
}

/// One team's finishing rank within a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub team_id: i64,
    pub team_name: String,
    /// 1-based; ties are expected to be broken upstream
    pub rank: u32,
}

/// Final standings of a round-robin pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub group: String,
    pub rows: Vec<StandingRow>,
}

/// Which pool finishers advance to the playoff bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayoffSelection {
    /// The top `take` (1 to 4) of every pool
    Top { take: u32 },
    /// Everyone, seeded by pool rank
    SeededAll,
}

/// Seed a playoff bracket from pool standings.
///
/// Selected rows are ordered by rank; equal ranks keep pool order, so pool
/// winners come first (pool A's winner, pool B's winner, ...), then the
/// runners-up, and so on. Seeds are renumbered from 1.
///
/// # Errors
///
/// Returns [`BracketError::InvalidConfig`] if `take` is outside `1..=4`.
pub fn seed_from_round_robin(
    groups: &[GroupStanding],
    selection: PlayoffSelection,
) -> BracketResult<Vec<TeamSeed>> {
    let mut picks: Vec<&StandingRow> = match selection {
        PlayoffSelection::SeededAll => groups.iter().flat_map(|g| g.rows.iter()).collect(),
        PlayoffSelection::Top { take } => {
            if !(1..=4).contains(&take) {
                return Err(BracketError::invalid_config(
                    "take",
                    format!("Must be between 1 and 4, got {take}"),
                ));
            }
            groups
                .iter()
                .flat_map(|g| g.rows.iter().filter(move |r| r.rank <= take))
                .collect()
        }
    };

    picks.sort_by_key(|row| row.rank);

    Ok(picks
        .into_iter()
        .enumerate()
        .map(|(i, row)| TeamSeed {
            seed: i as u32 + 1,
            team_id: row.team_id,
            team_name: row.team_name.clone(),
        })
        .collect())
}

/// Standard bracket placement: seed order for the first-round lines.
///
/// Consecutive pairs meet in round one (1 v 8, 4 v 5, 2 v 7, 3 v 6 for a
/// bracket of 8), so the top seeds can only meet late. `size` should be a
/// power of two.
pub fn seed_positions(size: u32) -> Vec<u32> {
    let mut order = vec![1];
    let mut lines = 1u32;
    while lines < size {
        let Some(doubled) = lines.checked_mul(2) else {
            break;
        };
        lines = doubled;
        // every line splits into itself and its mirror seed
        order = order
            .into_iter()
            .flat_map(|top| [top, lines + 1 - top])
            .collect();
    }
    order
}

/// Random reshuffle of a seed list
pub struct SeedShuffler<R = ThreadRng> {
    rng: R,
}

impl SeedShuffler {
    /// Create a shuffler backed by the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for SeedShuffler {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedShuffler<StdRng> {
    /// Create a reproducible shuffler
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: rand::Rng> SeedShuffler<R> {
    /// Shuffle team order and renumber seeds 1..=n
    pub fn shuffle(&mut self, seeds: &[TeamSeed]) -> Vec<TeamSeed> {
        let mut shuffled = seeds.to_vec();
        shuffled.shuffle(&mut self.rng);
        for (i, seed) in shuffled.iter_mut().enumerate() {
            seed.seed = i as u32 + 1;
        }
        shuffled
    }
}
