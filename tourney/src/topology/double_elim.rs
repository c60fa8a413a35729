//! Double elimination bracket graph.
//!
//! The winners bracket is the single elimination graph without bronze. The
//! losers bracket is built in stage pairs: a minor stage (odd number) takes
//! the losers of a winners round, and the following major stage (even
//! number) takes the minor winners plus the losers of the next winners round.
//! Stage sizes halve per pair, starting at a quarter of the bracket size:
//!
//! | bracket size | losers stages (nodes per stage) |
//! |---|---|
//! | 4  | L1, L2 (1, 1) |
//! | 8  | L1..L4 (2, 2, 1, 1) |
//! | 16 | L1..L6 (4, 4, 2, 2, 1, 1) |

use super::{Edge, EdgeKind, NodeId, Topology, bracket_size, build_single_elim};
use serde::{Deserialize, Serialize};

/// Double elimination variant flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleElimOptions {
    /// The losers bracket champion crosses over into a grand final
    pub losers_can_win_gold: bool,
    /// Chain a second grand final (bracket reset)
    #[serde(default)]
    pub grand_final_reset: bool,
}

impl Default for DoubleElimOptions {
    fn default() -> Self {
        Self {
            losers_can_win_gold: true,
            grand_final_reset: false,
        }
    }
}

/// Double elimination topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubleElimTopology {
    /// Winners nodes, then losers stages flattened, then grand finals
    pub matches: Vec<NodeId>,
    /// Winners rounds; `wb_rounds[r - 1]` holds round `r`
    pub wb_rounds: Vec<Vec<NodeId>>,
    /// Losers stages; `lb_stages[s - 1]` holds stage `s`
    pub lb_stages: Vec<Vec<NodeId>>,
    /// `GF-1`, and `GF-2` on reset; empty when losers cannot win gold
    pub gf: Vec<NodeId>,
    /// Winners edges, then losers edges, then grand final edges
    pub edges: Vec<Edge>,
}

/// Who takes bronze in a double elimination bracket.
///
/// This is a display convention applied by the caller; the graph has no
/// bronze node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeAward {
    /// The losers bracket final
    pub node: NodeId,
    /// Whether the winner or the loser of `node` is awarded bronze
    pub recipient: EdgeKind,
}

impl DoubleElimTopology {
    /// The winners bracket final
    pub fn wb_final(&self) -> Option<NodeId> {
        self.wb_rounds.last().and_then(|round| round.first()).copied()
    }

    /// The losers bracket final (last node of the last stage)
    pub fn lb_final(&self) -> Option<NodeId> {
        self.lb_stages.last().and_then(|stage| stage.first()).copied()
    }

    /// Bronze convention for this bracket.
    ///
    /// With a grand final crossover the loser of the losers final is third;
    /// in the bronze-only variant the losers final winner takes bronze.
    pub fn bronze_award(&self, losers_can_win_gold: bool) -> Option<BronzeAward> {
        let node = self.lb_final()?;
        let recipient = if losers_can_win_gold {
            EdgeKind::Loser
        } else {
            EdgeKind::Winner
        };
        Some(BronzeAward { node, recipient })
    }
}

impl Topology for DoubleElimTopology {
    fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Build a double elimination graph for `seeds` entrants.
///
/// Losers wiring per stage pair `(s, s + 1)` with `r = (s + 1) / 2`:
/// - loser of winners round `r` node `idx` → `L{s}-{idx / 2}`
/// - winner of `L{s}-{i}` → `L{s+1}-{i}`
/// - loser of winners round `r + 1` node `i` → `L{s+1}-{i}`
///
/// The grand final exists only when `losers_can_win_gold`; `GF-1` is fed by
/// the winners final and the losers final.
pub fn build_double_elim(seeds: usize, options: DoubleElimOptions) -> DoubleElimTopology {
    let wb = build_single_elim(seeds, false);
    let p2 = bracket_size(seeds);

    let mut lb_stages: Vec<Vec<NodeId>> = Vec::new();
    let mut lb_edges = Vec::new();

    let mut count = (p2 / 4) as u32;
    let mut stage = 1u32;
    while count >= 1 {
        let minor: Vec<NodeId> = (0..count).map(|i| NodeId::losers(stage, i)).collect();
        let major: Vec<NodeId> = (0..count).map(|i| NodeId::losers(stage + 1, i)).collect();

        let r = ((stage + 1) / 2) as usize;
        if let Some(wr) = wb.rounds.get(r - 1) {
            for (idx, from) in wr.iter().enumerate() {
                if let Some(to) = minor.get(idx / 2) {
                    lb_edges.push(Edge::loser(*from, *to));
                }
            }
        }

        for (from, to) in minor.iter().zip(&major) {
            lb_edges.push(Edge::winner(*from, *to));
        }

        if let Some(wr_next) = wb.rounds.get(r) {
            for (from, to) in wr_next.iter().zip(&major) {
                lb_edges.push(Edge::loser(*from, *to));
            }
        }

        lb_stages.push(minor);
        lb_stages.push(major);

        if count == 1 {
            break;
        }
        stage += 2;
        count /= 2;
    }

    let mut gf = Vec::new();
    let mut gf_edges = Vec::new();
    if options.losers_can_win_gold {
        if let Some(wb_final) = wb.final_match() {
            let gf1 = NodeId::grand_final(1);
            gf.push(gf1);
            gf_edges.push(Edge::winner(wb_final, gf1));

            if let Some(lb_final) = lb_stages.last().and_then(|s| s.first()) {
                gf_edges.push(Edge::winner(*lb_final, gf1));
            }

            if options.grand_final_reset {
                let gf2 = NodeId::grand_final(2);
                gf.push(gf2);
                gf_edges.push(Edge::winner(gf1, gf2));
            }
        }
    }

    let mut matches = wb.matches;
    matches.extend(lb_stages.iter().flatten().copied());
    matches.extend(gf.iter().copied());

    let mut edges = wb.edges;
    edges.extend(lb_edges);
    edges.extend(gf_edges);

    log::debug!(
        "Built double elimination topology: seeds={}, losers stages={}, grand finals={}, nodes={}, edges={}",
        seeds,
        lb_stages.len(),
        gf.len(),
        matches.len(),
        edges.len()
    );

    DoubleElimTopology {
        matches,
        wb_rounds: wb.rounds,
        lb_stages,
        gf,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> DoubleElimOptions {
        DoubleElimOptions {
            losers_can_win_gold: true,
            grand_final_reset: false,
        }
    }

    #[test]
    fn test_stage_counts() {
        for (seeds, expected) in [(2, 0), (3, 2), (4, 2), (8, 4), (16, 6), (32, 8)] {
            let topo = build_double_elim(seeds, standard());
            assert_eq!(topo.lb_stages.len(), expected, "seeds={seeds}");
        }
    }

    #[test]
    fn test_stage_sizes_for_sixteen() {
        let topo = build_double_elim(16, standard());
        let sizes: Vec<usize> = topo.lb_stages.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2, 2, 1, 1]);
    }

    #[test]
    fn test_no_grand_final_without_crossover() {
        let topo = build_double_elim(
            8,
            DoubleElimOptions {
                losers_can_win_gold: false,
                grand_final_reset: true,
            },
        );
        assert!(topo.gf.is_empty());
        assert!(topo.edges.iter().all(|e| e.to.bracket != crate::topology::Bracket::GrandFinal));
    }

    #[test]
    fn test_grand_final_reset() {
        let topo = build_double_elim(
            8,
            DoubleElimOptions {
                losers_can_win_gold: true,
                grand_final_reset: true,
            },
        );
        assert_eq!(topo.gf, vec![NodeId::grand_final(1), NodeId::grand_final(2)]);
        assert!(topo.edges.contains(&Edge::winner(NodeId::grand_final(1), NodeId::grand_final(2))));
        assert_eq!(
            topo.dependencies_of(&NodeId::grand_final(1)),
            vec![NodeId::winners(3, 0), NodeId::losers(4, 0)]
        );
    }

    #[test]
    fn test_two_seeds_grand_final_from_winners_only() {
        let topo = build_double_elim(2, standard());
        assert!(topo.lb_stages.is_empty());
        assert_eq!(topo.gf, vec![NodeId::grand_final(1)]);
        assert_eq!(topo.dependencies_of(&NodeId::grand_final(1)), vec![NodeId::winners(1, 0)]);
    }

    #[test]
    fn test_degenerate_seeds() {
        for seeds in [0, 1] {
            let topo = build_double_elim(seeds, standard());
            assert!(topo.matches.is_empty());
            assert!(topo.edges.is_empty());
            assert!(topo.gf.is_empty());
        }
    }

    #[test]
    fn test_bronze_award_convention() {
        let topo = build_double_elim(8, standard());
        let standard_award = topo.bronze_award(true).unwrap();
        assert_eq!(standard_award.node, NodeId::losers(4, 0));
        assert_eq!(standard_award.recipient, EdgeKind::Loser);

        let bronze_only = topo.bronze_award(false).unwrap();
        assert_eq!(bronze_only.recipient, EdgeKind::Winner);

        assert!(build_double_elim(2, standard()).bronze_award(true).is_none());
    }

    #[test]
    fn test_matches_order() {
        let topo = build_double_elim(4, standard());
        let labels: Vec<String> = topo.matches.iter().map(NodeId::label).collect();
        assert_eq!(labels, vec!["W1-0", "W1-1", "W2-0", "L1-0", "L2-0", "GF-1"]);
    }
}
