//! Single elimination bracket graph.

use super::{Edge, NodeId, Topology, bracket_size};
use serde::{Deserialize, Serialize};

/// Single elimination topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleElimTopology {
    /// All nodes: rounds flattened, then bronze if present
    pub matches: Vec<NodeId>,
    /// Winners rounds; `rounds[r - 1]` holds round `r`
    pub rounds: Vec<Vec<NodeId>>,
    /// Dependency edges
    pub edges: Vec<Edge>,
    /// Number of rounds, `log2` of the padded bracket size
    pub r_max: u32,
    /// Third place playoff node, fed by both semifinal losers
    pub bronze: Option<NodeId>,
}

impl SingleElimTopology {
    /// The final, or `None` for a degenerate (0 or 1 seed) bracket
    pub fn final_match(&self) -> Option<NodeId> {
        self.rounds.last().and_then(|round| round.first()).copied()
    }

    /// Semifinal nodes (empty when there are fewer than two rounds)
    pub fn semifinals(&self) -> &[NodeId] {
        if self.r_max >= 2 {
            &self.rounds[self.r_max as usize - 2]
        } else {
            &[]
        }
    }
}

impl Topology for SingleElimTopology {
    fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Build a single elimination graph for `seeds` entrants.
///
/// The bracket is padded to the next power of two; byes are not placed here,
/// only node ids and edges. Node `idx` of one round feeds node `idx / 2` of
/// the next. With `with_bronze` and at least two rounds, `BRONZE-1` is fed by
/// the losers of both semifinals.
///
/// Zero or one seed yields an empty graph with `r_max == 0`.
pub fn build_single_elim(seeds: usize, with_bronze: bool) -> SingleElimTopology {
    let p2 = bracket_size(seeds);
    let r_max = p2.trailing_zeros();

    let mut rounds: Vec<Vec<NodeId>> = Vec::with_capacity(r_max as usize);
    let mut edges = Vec::with_capacity(p2);

    for round in 1..=r_max {
        let size = p2 >> round;
        let current: Vec<NodeId> = (0..size as u32)
            .map(|index| NodeId::winners(round, index))
            .collect();

        if let Some(prev) = rounds.last() {
            for (idx, from) in prev.iter().enumerate() {
                edges.push(Edge::winner(*from, current[idx / 2]));
            }
        }
        rounds.push(current);
    }

    let mut bronze = None;
    if with_bronze && r_max >= 2 {
        let node = NodeId::bronze();
        for semi in &rounds[r_max as usize - 2] {
            edges.push(Edge::loser(*semi, node));
        }
        bronze = Some(node);
    }

    let mut matches: Vec<NodeId> = rounds.iter().flatten().copied().collect();
    matches.extend(bronze);

    log::debug!(
        "Built single elimination topology: seeds={}, rounds={}, nodes={}, edges={}",
        seeds,
        r_max,
        matches.len(),
        edges.len()
    );

    SingleElimTopology {
        matches,
        rounds,
        edges,
        r_max,
        bronze,
    }
}
