//! Bracket configuration models.
//!
//! The JSON shape is the one bracket editors store:
//!
//! ```json
//! { "type": "DOUBLE_ELIM", "seeds": 8, "variant": "LB_CAN_WIN", "grandFinalReset": true }
//! ```

use crate::errors::{BracketError, BracketResult};
use crate::round_robin::{RoundRobinMatch, round_robin_matches, split_into_groups};
use crate::schedule::{SchedMatch, elimination_matches, round_robin_sched_matches};
use crate::topology::{
    DoubleElimOptions, DoubleElimTopology, SingleElimTopology, build_double_elim,
    build_single_elim,
};
use serde::{Deserialize, Serialize};

/// Minimum entrants for any bracket
pub const MIN_SEEDS: usize = 2;

/// Maximum entrants for any bracket
pub const MAX_SEEDS: usize = 1024;

/// Maximum legs per round robin pairing
pub const MAX_MATCHES_PER_PAIR: u32 = 4;

/// Double elimination variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoubleElimVariant {
    /// Losers bracket champion plays the winners champion for gold
    LbCanWin,
    /// Losers bracket runs for bronze only
    LbBronzeOnly,
}

impl std::fmt::Display for DoubleElimVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoubleElimVariant::LbCanWin => write!(f, "LB_CAN_WIN"),
            DoubleElimVariant::LbBronzeOnly => write!(f, "LB_BRONZE_ONLY"),
        }
    }
}

/// Single elimination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleElimConfig {
    pub seeds: usize,
    #[serde(default)]
    pub third_place_playoff: bool,
}

/// Double elimination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleElimConfig {
    pub seeds: usize,
    pub variant: DoubleElimVariant,
    #[serde(default)]
    pub grand_final_reset: bool,
}

impl DoubleElimConfig {
    /// Builder flags for this variant
    pub fn options(&self) -> DoubleElimOptions {
        DoubleElimOptions {
            losers_can_win_gold: self.variant == DoubleElimVariant::LbCanWin,
            grand_final_reset: self.grand_final_reset,
        }
    }
}

/// Round-robin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRobinConfig {
    pub seeds: usize,
    /// Number of pools; wins over `teams_per_group` when both are set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams_per_group: Option<usize>,
    /// How many times each pair meets (default: 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches_per_pair: Option<u32>,
}

impl RoundRobinConfig {
    /// Resolved pool count
    pub fn group_count(&self) -> usize {
        match (self.groups, self.teams_per_group) {
            (Some(groups), _) => groups.max(1),
            (None, Some(per_group)) if per_group > 0 => self.seeds.div_ceil(per_group),
            _ => 1,
        }
    }
}

/// Bracket configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BracketConfig {
    SingleElim(SingleElimConfig),
    DoubleElim(DoubleElimConfig),
    RoundRobin(RoundRobinConfig),
}

/// One round-robin pool and its fixtures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinPool {
    pub name: String,
    pub entries: Vec<String>,
    pub fixtures: Vec<RoundRobinMatch<String>>,
}

/// A bracket generated from a [`BracketConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuiltBracket {
    SingleElim {
        seeds: usize,
        topology: SingleElimTopology,
    },
    DoubleElim {
        seeds: usize,
        topology: DoubleElimTopology,
    },
    RoundRobin {
        pools: Vec<RoundRobinPool>,
    },
}

/// Pool names A..Z, then P27, P28, ...
fn pool_name(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("P{}", index + 1),
    }
}

impl BracketConfig {
    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::Serialization`] on malformed JSON and
    /// [`BracketError::InvalidConfig`] if validation fails.
    pub fn from_json(json: &str) -> BracketResult<Self> {
        let config: BracketConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of entrants
    pub fn seeds(&self) -> usize {
        match self {
            BracketConfig::SingleElim(c) => c.seeds,
            BracketConfig::DoubleElim(c) => c.seeds,
            BracketConfig::RoundRobin(c) => c.seeds,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> BracketResult<()> {
        let seeds = self.seeds();
        if seeds < MIN_SEEDS {
            return Err(BracketError::invalid_config(
                "seeds",
                format!("Must be at least {MIN_SEEDS}, got {seeds}"),
            ));
        }
        if seeds > MAX_SEEDS {
            return Err(BracketError::invalid_config(
                "seeds",
                format!("Must be at most {MAX_SEEDS}, got {seeds}"),
            ));
        }

        if let BracketConfig::RoundRobin(rr) = self {
            if rr.groups == Some(0) {
                return Err(BracketError::invalid_config("groups", "Must be at least 1"));
            }
            match rr.teams_per_group {
                Some(per_group) if per_group < 2 => {
                    return Err(BracketError::invalid_config(
                        "teamsPerGroup",
                        format!("Must be at least 2, got {per_group}"),
                    ));
                }
                _ => {}
            }
            match rr.matches_per_pair {
                Some(0) => {
                    return Err(BracketError::invalid_config(
                        "matchesPerPair",
                        "Must be at least 1",
                    ));
                }
                Some(legs) if legs > MAX_MATCHES_PER_PAIR => {
                    return Err(BracketError::invalid_config(
                        "matchesPerPair",
                        format!("Must be at most {MAX_MATCHES_PER_PAIR}, got {legs}"),
                    ));
                }
                _ => {}
            }

            // every pool needs a pair to play
            let groups = rr.group_count();
            if groups > seeds / 2 {
                return Err(BracketError::invalid_config(
                    "groups",
                    format!(
                        "{groups} pools need at least {} seeds, got {seeds}",
                        groups.saturating_mul(2)
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Generate the bracket.
    ///
    /// `entries` names the entrants in seed order; an empty slice uses
    /// `Seed 1..=n`. Only round-robin fixtures carry entry names; elimination
    /// graphs are seed based.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::InvalidConfig`] if validation fails or the
    /// number of entries does not match `seeds`.
    pub fn build(&self, entries: &[String]) -> BracketResult<BuiltBracket> {
        self.validate()?;
        let seeds = self.seeds();
        if !entries.is_empty() && entries.len() != seeds {
            return Err(BracketError::invalid_config(
                "entries",
                format!("Expected {seeds} entries, got {}", entries.len()),
            ));
        }

        let built = match self {
            BracketConfig::SingleElim(c) => BuiltBracket::SingleElim {
                seeds,
                topology: build_single_elim(seeds, c.third_place_playoff),
            },
            BracketConfig::DoubleElim(c) => BuiltBracket::DoubleElim {
                seeds,
                topology: build_double_elim(seeds, c.options()),
            },
            BracketConfig::RoundRobin(c) => {
                let names: Vec<String> = if entries.is_empty() {
                    (1..=seeds).map(|n| format!("Seed {n}")).collect()
                } else {
                    entries.to_vec()
                };
                let legs = c.matches_per_pair.unwrap_or(1);
                let pools = split_into_groups(&names, c.group_count())
                    .into_iter()
                    .enumerate()
                    .map(|(i, pool)| RoundRobinPool {
                        name: pool_name(i),
                        fixtures: round_robin_matches(&pool, legs),
                        entries: pool,
                    })
                    .collect();
                BuiltBracket::RoundRobin { pools }
            }
        };

        log::info!("Built {} bracket for {seeds} seeds", self.kind());
        Ok(built)
    }

    /// Wire name of the bracket type
    pub fn kind(&self) -> &'static str {
        match self {
            BracketConfig::SingleElim(_) => "SINGLE_ELIM",
            BracketConfig::DoubleElim(_) => "DOUBLE_ELIM",
            BracketConfig::RoundRobin(_) => "ROUND_ROBIN",
        }
    }
}

impl BuiltBracket {
    /// Scheduler input with string ids.
    ///
    /// Elimination ids are node labels (`W1-0`). Round-robin ids are
    /// prefixed with the pool name (`A/RR1-0`) when there is more than one
    /// pool.
    pub fn sched_matches(&self) -> Vec<SchedMatch<String>> {
        match self {
            BuiltBracket::SingleElim { seeds, topology } => elimination_matches(topology, *seeds)
                .into_iter()
                .map(|m| m.map_id(|id| id.to_string()))
                .collect(),
            BuiltBracket::DoubleElim { seeds, topology } => elimination_matches(topology, *seeds)
                .into_iter()
                .map(|m| m.map_id(|id| id.to_string()))
                .collect(),
            BuiltBracket::RoundRobin { pools } => {
                let prefixed = pools.len() > 1;
                pools
                    .iter()
                    .flat_map(|pool| {
                        round_robin_sched_matches(&pool.fixtures)
                            .into_iter()
                            .map(move |m| {
                                m.map_id(|id| {
                                    if prefixed {
                                        format!("{}/{id}", pool.name)
                                    } else {
                                        id.to_string()
                                    }
                                })
                            })
                    })
                    .collect()
            }
        }
    }
}
