//! Bracket topology: match nodes and the dependency edges between them.
//!
//! A topology is built once per bracket configuration and never mutated.
//! It carries no participants; it only records which match feeds which.
//!
//! ## Example
//!
//! ```
//! use tourney::topology::{build_single_elim, NodeId, Topology};
//!
//! let topo = build_single_elim(8, true);
//! assert_eq!(topo.r_max, 3);
//! assert_eq!(topo.rounds[2], vec![NodeId::winners(3, 0)]);
//! assert_eq!(topo.dependencies_of(&NodeId::bronze()).len(), 2);
//! ```

pub mod double_elim;
pub mod single_elim;

pub use double_elim::{BronzeAward, DoubleElimOptions, DoubleElimTopology, build_double_elim};
pub use single_elim::{SingleElimTopology, build_single_elim};

use crate::errors::{BracketError, BracketResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of a tournament a match belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bracket {
    #[serde(rename = "W")]
    Winners,
    #[serde(rename = "L")]
    Losers,
    #[serde(rename = "GF")]
    GrandFinal,
    #[serde(rename = "BRONZE")]
    Bronze,
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Bracket {
    /// Label prefix used when formatting node ids
    pub fn prefix(&self) -> &'static str {
        match self {
            Bracket::Winners => "W",
            Bracket::Losers => "L",
            Bracket::GrandFinal => "GF",
            Bracket::Bronze => "BRONZE",
            Bracket::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Identity of a match node.
///
/// `round` is the winners round, the losers stage, the grand final number
/// (1 or 2), or the round-robin round. Grand final and bronze nodes always
/// have `index == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct NodeId {
    pub bracket: Bracket,
    pub round: u32,
    pub index: u32,
}

impl NodeId {
    /// Winners bracket match `W{round}-{index}`
    pub fn winners(round: u32, index: u32) -> Self {
        Self {
            bracket: Bracket::Winners,
            round,
            index,
        }
    }

    /// Losers bracket match `L{stage}-{index}`
    pub fn losers(stage: u32, index: u32) -> Self {
        Self {
            bracket: Bracket::Losers,
            round: stage,
            index,
        }
    }

    /// Grand final `GF-{number}`
    pub fn grand_final(number: u32) -> Self {
        Self {
            bracket: Bracket::GrandFinal,
            round: number,
            index: 0,
        }
    }

    /// The single-elimination third place playoff, `BRONZE-1`
    pub fn bronze() -> Self {
        Self {
            bracket: Bracket::Bronze,
            round: 1,
            index: 0,
        }
    }

    /// Round-robin match `RR{round}-{index}`
    pub fn round_robin(round: u32, index: u32) -> Self {
        Self {
            bracket: Bracket::RoundRobin,
            round,
            index,
        }
    }

    /// Display label, e.g. `W1-0` or `GF-2`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bracket {
            Bracket::GrandFinal | Bracket::Bronze => {
                write!(f, "{}-{}", self.bracket.prefix(), self.round)
            }
            _ => write!(f, "{}{}-{}", self.bracket.prefix(), self.round, self.index),
        }
    }
}

impl FromStr for NodeId {
    type Err = BracketError;

    fn from_str(label: &str) -> BracketResult<Self> {
        let invalid = || BracketError::InvalidNodeLabel(label.to_string());

        if let Some(number) = label.strip_prefix("BRONZE-") {
            let round = number.parse().map_err(|_| invalid())?;
            return Ok(Self {
                bracket: Bracket::Bronze,
                round,
                index: 0,
            });
        }
        if let Some(number) = label.strip_prefix("GF-") {
            return Ok(NodeId::grand_final(number.parse().map_err(|_| invalid())?));
        }

        // Order matters: "RR" before the single-letter prefixes
        let (bracket, rest) = if let Some(rest) = label.strip_prefix("RR") {
            (Bracket::RoundRobin, rest)
        } else if let Some(rest) = label.strip_prefix('W') {
            (Bracket::Winners, rest)
        } else if let Some(rest) = label.strip_prefix('L') {
            (Bracket::Losers, rest)
        } else {
            return Err(invalid());
        };

        let (round, index) = rest.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            bracket,
            round: round.parse().map_err(|_| invalid())?,
            index: index.parse().map_err(|_| invalid())?,
        })
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = BracketError;

    fn try_from(label: String) -> BracketResult<Self> {
        label.parse()
    }
}

/// What travels along an edge: the winner or the loser of `from`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Winner,
    Loser,
}

/// Directed dependency: `from` must complete before `to` can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    /// Winner of `from` advances into `to`
    pub fn winner(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Winner,
        }
    }

    /// Loser of `from` drops into `to`
    pub fn loser(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Loser,
        }
    }
}

/// Read access shared by the single and double elimination graphs
pub trait Topology {
    /// Every match node, in build order
    fn matches(&self) -> &[NodeId];

    /// Every dependency edge, in build order
    fn edges(&self) -> &[Edge];

    /// Matches that must complete before `node`, in edge order
    fn dependencies_of(&self, node: &NodeId) -> Vec<NodeId> {
        self.edges()
            .iter()
            .filter(|edge| edge.to == *node)
            .map(|edge| edge.from)
            .collect()
    }

    /// Edges leaving `node`
    fn successors_of(&self, node: &NodeId) -> Vec<Edge> {
        self.edges()
            .iter()
            .filter(|edge| edge.from == *node)
            .copied()
            .collect()
    }

    /// Matches nothing depends on (final, bronze, grand final)
    fn terminal_nodes(&self) -> Vec<NodeId> {
        self.matches()
            .iter()
            .filter(|node| !self.edges().iter().any(|edge| edge.from == **node))
            .copied()
            .collect()
    }
}

/// Bracket size padded with byes: the smallest power of two >= `seeds`
pub fn bracket_size(seeds: usize) -> usize {
    seeds.max(1).next_power_of_two()
}
