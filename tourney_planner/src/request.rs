//! Plan requests and responses.
//!
//! A request is a bracket configuration plus optional team list; the
//! response carries the generated bracket and its court schedule.

use crate::config::PlannerConfig;
use crate::logging::log_schedule_summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tourney::config::{BracketConfig, BuiltBracket};
use tourney::schedule::{SchedMatch, schedule};
use tourney::seeding::{SeedShuffler, TeamSeed};
use tourney::topology::{Bracket, BronzeAward};
use tourney::{BracketError, DoubleElimVariant};

/// Errors while loading or answering a plan request
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Bracket(#[from] BracketError),
}

/// What to plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub config: BracketConfig,
    /// Seeded teams; when empty, entrants are named `Seed 1..=n`
    #[serde(default)]
    pub teams: Vec<TeamSeed>,
    /// Reshuffle the seeds with this RNG seed before building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<u64>,
}

impl PlanRequest {
    /// Parse a request and validate its bracket configuration
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let request: PlanRequest = serde_json::from_str(json).map_err(BracketError::from)?;
        request.config.validate()?;
        Ok(request)
    }

    /// Read a request from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, PlanError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

/// One scheduled match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub match_id: String,
    pub bracket: Bracket,
    pub round: u32,
    pub teams: [String; 2],
    pub court_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Generated bracket and schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Seeds as used, after any shuffle
    pub seeds: Vec<TeamSeed>,
    pub bracket: BuiltBracket,
    /// Who takes bronze in a double elimination bracket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bronze: Option<BronzeAward>,
    pub slots_available: usize,
    /// Placed matches by start time, then court
    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<String>,
    /// Matches where a team is double booked
    pub conflicts: Vec<String>,
}

impl PlanResponse {
    /// Serialize for output
    pub fn to_json(&self, pretty: bool) -> Result<String, PlanError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        Ok(json.map_err(BracketError::from)?)
    }
}

/// Replace `Seed n` placeholders with team names
fn name_seeds(matches: &mut [SchedMatch<String>], seeds: &[TeamSeed]) {
    for team in matches.iter_mut().flat_map(|m| m.teams.iter_mut()) {
        let named = team
            .strip_prefix("Seed ")
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(|n| seeds.iter().find(|s| s.seed == n));
        if let Some(seed) = named {
            *team = seed.team_name.clone();
        }
    }
}

/// Build the bracket, lay out the slot grid and schedule every match
///
/// # Errors
///
/// Returns [`PlanError::Bracket`] if the team list does not fit the
/// configuration.
pub fn plan(request: &PlanRequest, config: &PlannerConfig) -> Result<PlanResponse, PlanError> {
    let mut seeds = request.teams.clone();
    seeds.sort_by_key(|s| s.seed);
    if let Some(rng_seed) = request.shuffle {
        seeds = SeedShuffler::from_seed(rng_seed).shuffle(&seeds);
        log::info!("Shuffled {} seeds", seeds.len());
    }

    let entries: Vec<String> = seeds.iter().map(|s| s.team_name.clone()).collect();
    let bracket = request.config.build(&entries)?;

    let mut matches = bracket.sched_matches();
    name_seeds(&mut matches, &seeds);

    let slots = config.slots.build();
    let outcome = schedule(&matches, &slots, &config.schedule);
    let conflicts = outcome.conflicts(&matches);
    log_schedule_summary(matches.len(), outcome.assigned.len(), conflicts.len());

    let assignments = outcome
        .in_slot_order()
        .into_iter()
        .filter_map(|(id, slot)| {
            matches.iter().find(|m| &m.id == id).map(|m| Assignment {
                match_id: id.clone(),
                bracket: m.bracket,
                round: m.round,
                teams: m.teams.clone(),
                court_id: slot.court_id.clone(),
                start: slot.start,
                end: slot.end,
            })
        })
        .collect();

    let bronze = match (&request.config, &bracket) {
        (BracketConfig::DoubleElim(de), BuiltBracket::DoubleElim { topology, .. }) => {
            topology.bronze_award(de.variant == DoubleElimVariant::LbCanWin)
        }
        _ => None,
    };

    Ok(PlanResponse {
        seeds,
        bracket,
        bronze,
        slots_available: slots.len(),
        assignments,
        unassigned: outcome.unassigned,
        conflicts,
    })
}
