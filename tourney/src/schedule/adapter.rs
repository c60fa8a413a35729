//! Translate bracket graphs and round-robin fixtures into scheduler input.
//!
//! Participants beyond the first round are unknown when a bracket is
//! previewed, so later matches get placeholder teams naming the feeding
//! match ("Winner W1-0", "Loser W2-1"). Placeholders are unique per feed, so
//! ordering between rounds comes from the dependency edges.

use super::scheduler::SchedMatch;
use crate::round_robin::RoundRobinMatch;
use crate::seeding::seed_positions;
use crate::topology::{Bracket, Edge, EdgeKind, NodeId, Topology, bracket_size};
use std::collections::{HashMap, HashSet};
use std::fmt;

fn seed_name(seed: u32) -> String {
    format!("Seed {seed}")
}

/// First-round byes: node -> the seed that walks over (if any)
fn first_round_byes<T: Topology + ?Sized>(
    topology: &T,
    seeds: usize,
    positions: &[u32],
) -> HashMap<NodeId, Option<u32>> {
    let is_real = |seed: Option<&u32>| seed.filter(|s| **s as usize <= seeds).copied();

    let mut byes = HashMap::new();
    for node in topology.matches() {
        if node.bracket != Bracket::Winners || node.round != 1 {
            continue;
        }
        let i = node.index as usize;
        let a = is_real(positions.get(2 * i));
        let b = is_real(positions.get(2 * i + 1));
        if a.is_none() || b.is_none() {
            byes.insert(*node, a.or(b));
        }
    }
    byes
}

/// A feed that can never deliver a team: the loser of a bye, or anything out
/// of a match that is never played
fn is_empty_feed(
    edge: &Edge,
    byes: &HashMap<NodeId, Option<u32>>,
    dropped: &HashSet<NodeId>,
) -> bool {
    match byes.get(&edge.from) {
        Some(walker) => edge.kind == EdgeKind::Loser || walker.is_none(),
        None => dropped.contains(&edge.from),
    }
}

/// Scheduling round for an elimination node.
///
/// Winners rounds keep their number, losers stage `s` plays as round `s + 1`,
/// bronze alongside the final, grand finals after everything else.
fn schedule_round(node: &NodeId, winners_last: u32, last: u32) -> u32 {
    match node.bracket {
        Bracket::Winners | Bracket::RoundRobin => node.round,
        Bracket::Losers => node.round + 1,
        Bracket::Bronze => winners_last,
        Bracket::GrandFinal => last + node.round,
    }
}

/// Scheduling matches for a single or double elimination graph.
///
/// First-round teams come from standard seed placement over `seeds`
/// entrants. First-round byes are left out, and so are the dependencies on
/// them; the seed that walks over appears by name in the next round.
/// Losers-bracket matches whose every feed comes out of byes are dropped
/// too, transitively. A match with one empty feed keeps a padded `{id}:k`
/// team in that seat.
pub fn elimination_matches<T: Topology + ?Sized>(topology: &T, seeds: usize) -> Vec<SchedMatch> {
    let positions = seed_positions(bracket_size(seeds) as u32);
    let byes = first_round_byes(topology, seeds, &positions);

    let winners_last = topology
        .matches()
        .iter()
        .filter(|n| n.bracket == Bracket::Winners)
        .map(|n| n.round)
        .max()
        .unwrap_or(0);
    let last = topology
        .matches()
        .iter()
        .filter(|n| n.bracket == Bracket::Losers)
        .map(|n| n.round + 1)
        .max()
        .unwrap_or(0)
        .max(winners_last);

    let mut dropped = HashSet::new();
    let mut out = Vec::with_capacity(topology.matches().len());
    for node in topology.matches() {
        if byes.contains_key(node) {
            continue;
        }

        let teams = if node.bracket == Bracket::Winners && node.round == 1 {
            let i = node.index as usize;
            [seed_name(positions[2 * i]), seed_name(positions[2 * i + 1])]
        } else {
            let incoming: Vec<&Edge> =
                topology.edges().iter().filter(|edge| edge.to == *node).collect();
            let live: Vec<&Edge> = incoming
                .iter()
                .copied()
                .filter(|edge| !is_empty_feed(edge, &byes, &dropped))
                .collect();
            if !incoming.is_empty() && live.is_empty() {
                log::debug!("Dropping {node}: every feed comes out of a bye");
                dropped.insert(*node);
                continue;
            }

            let mut feeders = live
                .into_iter()
                .map(|edge| match (byes.get(&edge.from), edge.kind) {
                    (Some(Some(seed)), EdgeKind::Winner) => seed_name(*seed),
                    (_, EdgeKind::Winner) => format!("Winner {}", edge.from),
                    (_, EdgeKind::Loser) => format!("Loser {}", edge.from),
                });
            let first = feeders.next().unwrap_or_else(|| format!("{node}:0"));
            let second = feeders.next().unwrap_or_else(|| format!("{node}:1"));
            [first, second]
        };

        let deps = topology
            .dependencies_of(node)
            .into_iter()
            .filter(|dep| !byes.contains_key(dep) && !dropped.contains(dep))
            .collect();

        out.push(SchedMatch {
            id: *node,
            teams,
            round: schedule_round(node, winners_last, last),
            bracket: node.bracket,
            deps,
        });
    }

    log::debug!(
        "Adapted {} elimination matches ({} first-round byes, {} empty matches dropped)",
        out.len(),
        byes.len(),
        dropped.len()
    );
    out
}

/// Scheduling matches for round-robin fixtures; no dependencies
pub fn round_robin_sched_matches<T: fmt::Display>(
    fixtures: &[RoundRobinMatch<T>],
) -> Vec<SchedMatch> {
    fixtures
        .iter()
        .map(|fixture| SchedMatch {
            id: fixture.id,
            teams: [fixture.home.to_string(), fixture.away.to_string()],
            round: fixture.id.round,
            bracket: Bracket::RoundRobin,
            deps: Vec::new(),
        })
        .collect()
}
