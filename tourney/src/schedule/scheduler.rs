//! Greedy court scheduler.
//!
//! Matches are taken in ascending round order and each one gets the first
//! free slot (in slot list order) that starts no earlier than:
//! - the latest end of its already placed dependencies, and
//! - the ready time of both teams (previous slot end plus minimum rest).
//!
//! The pass is single and greedy; nothing is revised once placed. Matches
//! that fit nowhere are reported in [`ScheduleOutcome::unassigned`].

use super::slots::Slot;
use crate::errors::{BracketError, BracketResult};
use crate::topology::{Bracket, NodeId};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Team or player identifier at the scheduling layer
pub type EntryId = String;

/// Default minimum rest between two matches of the same team
pub const DEFAULT_MIN_REST_MINUTES: u32 = 20;

/// Scheduling view of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedMatch<M = NodeId> {
    pub id: M,
    pub teams: [EntryId; 2],
    /// Ordering key; lower rounds are placed first
    pub round: u32,
    pub bracket: Bracket,
    /// Matches that must finish before this one starts
    #[serde(default = "Vec::new")]
    pub deps: Vec<M>,
}

impl<M> SchedMatch<M> {
    /// Relabel the match and its dependencies, e.g. to prefix a pool name
    pub fn map_id<N>(self, mut f: impl FnMut(M) -> N) -> SchedMatch<N> {
        SchedMatch {
            id: f(self.id),
            teams: self.teams,
            round: self.round,
            bracket: self.bracket,
            deps: self.deps.into_iter().map(&mut f).collect(),
        }
    }
}

/// Scheduler settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleOptions {
    /// Minimum gap between a team's matches
    pub min_rest_minutes: u32,
    /// Leave a match unplaced when any dependency is unplaced.
    ///
    /// Off by default: an unplaced dependency then imposes no constraint.
    pub require_placed_dependencies: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            min_rest_minutes: DEFAULT_MIN_REST_MINUTES,
            require_placed_dependencies: false,
        }
    }
}

/// Result of a scheduling pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome<M: Eq + Hash = NodeId> {
    /// Match id to slot; no two matches share a slot
    pub assigned: HashMap<M, Slot>,
    /// Matches that found no feasible slot, in processing order
    pub unassigned: Vec<M>,
}

impl<M> ScheduleOutcome<M>
where
    M: Clone + Eq + Hash + fmt::Display,
{
    /// Every requested match got a slot
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Slot of a match, if placed
    pub fn slot_of(&self, id: &M) -> Option<&Slot> {
        self.assigned.get(id)
    }

    /// Assignments ordered by start time, then court
    pub fn in_slot_order(&self) -> Vec<(&M, &Slot)> {
        let mut ordered: Vec<(&M, &Slot)> = self.assigned.iter().collect();
        ordered.sort_by(|a, b| (a.1.start, &a.1.court_id).cmp(&(b.1.start, &b.1.court_id)));
        ordered
    }

    /// Ids of placed matches where a team plays two overlapping windows.
    ///
    /// A greedy pass never produces these; they appear after manual moves
    /// through [`ScheduleOutcome::reassign`]. Returned in `matches` order.
    pub fn conflicts(&self, matches: &[SchedMatch<M>]) -> Vec<M> {
        let placed: Vec<(&SchedMatch<M>, &Slot)> = matches
            .iter()
            .filter_map(|m| self.assigned.get(&m.id).map(|slot| (m, slot)))
            .collect();

        let mut flagged = vec![false; placed.len()];
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                let (a, slot_a) = placed[i];
                let (b, slot_b) = placed[j];
                let shares_team = a.teams.iter().any(|t| b.teams.contains(t));
                if shares_team && slot_a.overlaps(slot_b) {
                    flagged[i] = true;
                    flagged[j] = true;
                }
            }
        }

        placed
            .iter()
            .zip(flagged)
            .filter(|(_, bad)| *bad)
            .map(|((m, _), _)| m.id.clone())
            .collect()
    }

    /// Move a match to `slot` by hand.
    ///
    /// Unplaced matches may be moved in as well. Returns the slot the match
    /// held before, if any.
    ///
    /// # Errors
    ///
    /// - [`BracketError::UnknownMatch`] if the id was never scheduled
    /// - [`BracketError::SlotOccupied`] if another match holds `slot`
    pub fn reassign(&mut self, id: &M, slot: Slot) -> BracketResult<Option<Slot>> {
        let known = self.assigned.contains_key(id) || self.unassigned.contains(id);
        if !known {
            return Err(BracketError::UnknownMatch(id.to_string()));
        }

        if let Some((occupant, _)) = self
            .assigned
            .iter()
            .find(|(other, held)| *other != id && **held == slot)
        {
            return Err(BracketError::SlotOccupied {
                slot: slot.to_string(),
                occupant: occupant.to_string(),
            });
        }

        self.unassigned.retain(|other| other != id);
        Ok(self.assigned.insert(id.clone(), slot))
    }
}

/// Assign matches to slots greedily.
///
/// Ties on `round` keep their input order (the sort is stable). A slot is
/// feasible when it is unused and starts at or after the match's earliest
/// start; the first feasible slot in `slots` order wins. After placement both
/// teams are unavailable until the slot's end plus
/// [`ScheduleOptions::min_rest_minutes`].
///
/// Match ids are expected to be unique.
pub fn schedule<M>(
    matches: &[SchedMatch<M>],
    slots: &[Slot],
    options: &ScheduleOptions,
) -> ScheduleOutcome<M>
where
    M: Clone + Eq + Hash + fmt::Display,
{
    let rest = TimeDelta::minutes(i64::from(options.min_rest_minutes));

    let mut order: Vec<&SchedMatch<M>> = matches.iter().collect();
    order.sort_by_key(|m| m.round);

    let mut assigned: HashMap<M, Slot> = HashMap::with_capacity(matches.len());
    let mut unassigned = Vec::new();
    let mut used = vec![false; slots.len()];
    // Teams without an entry are unconstrained
    let mut team_ready: HashMap<&str, DateTime<Utc>> = HashMap::new();

    for m in order {
        if options.require_placed_dependencies {
            if let Some(missing) = m.deps.iter().find(|dep| !assigned.contains_key(*dep)) {
                log::debug!("Match {} skipped: dependency {} is unplaced", m.id, missing);
                unassigned.push(m.id.clone());
                continue;
            }
        }

        let deps_done = m
            .deps
            .iter()
            .filter_map(|dep| assigned.get(dep))
            .map(|slot| slot.end)
            .max();
        let team_earliest = m
            .teams
            .iter()
            .filter_map(|team| team_ready.get(team.as_str()).copied())
            .max();
        let earliest = deps_done.max(team_earliest);

        let found = slots
            .iter()
            .enumerate()
            .find(|(idx, slot)| !used[*idx] && earliest.is_none_or(|at| slot.start >= at));

        match found {
            Some((idx, slot)) => {
                used[idx] = true;
                let ready_at = slot.end + rest;
                for team in &m.teams {
                    team_ready.insert(team.as_str(), ready_at);
                }
                assigned.insert(m.id.clone(), slot.clone());
            }
            None => {
                log::warn!("No feasible slot for match {}", m.id);
                unassigned.push(m.id.clone());
            }
        }
    }

    log::debug!(
        "Scheduled {} of {} matches into {} slots",
        assigned.len(),
        matches.len(),
        slots.len()
    );

    ScheduleOutcome {
        assigned,
        unassigned,
    }
}
