//! # Tourney
//!
//! Bracket generation and court scheduling for amateur sports tournaments.
//!
//! Brackets are modelled as dependency graphs: every match is a node with a
//! typed id (`W2-1`, `L3-0`, `GF-1`, `BRONZE-1`, `RR4-2`) and edges record
//! whose winner or loser plays where. The scheduler then places matches onto
//! a grid of court time slots so that no match starts before its feeding
//! matches end and no team plays without a minimum rest.
//!
//! Everything here is pure computation; no I/O.
//!
//! ## Core Modules
//!
//! - [`topology`]: single and double elimination graphs
//! - [`round_robin`]: circle-method pairings and pools
//! - [`schedule`]: court slots, the greedy scheduler, bracket adapters
//! - [`seeding`]: bracket placement order and playoff seeding
//! - [`config`]: bracket configuration as stored by editors
//!
//! ## Example
//!
//! ```
//! use tourney::config::BracketConfig;
//! use tourney::schedule::{schedule, ScheduleOptions, SlotPlan};
//!
//! let config = BracketConfig::from_json(r#"{"type":"SINGLE_ELIM","seeds":8}"#).unwrap();
//! let matches = config.build(&[]).unwrap().sched_matches();
//! let outcome = schedule(&matches, &SlotPlan::default().build(), &ScheduleOptions::default());
//! assert!(outcome.is_complete());
//! ```

pub mod config;
pub mod errors;
pub mod round_robin;
pub mod schedule;
pub mod seeding;
pub mod topology;

pub use config::{BracketConfig, BuiltBracket, DoubleElimVariant};
pub use errors::{BracketError, BracketResult};
pub use round_robin::{RoundRobinMatch, round_robin_matches, rr_pairs, rr_rounds};
pub use schedule::{
    Court, SchedMatch, ScheduleOptions, ScheduleOutcome, Slot, SlotPlan, build_slots, schedule,
};
pub use seeding::{PlayoffSelection, SeedShuffler, TeamSeed, seed_from_round_robin};
pub use topology::{
    Bracket, DoubleElimOptions, Edge, EdgeKind, NodeId, Topology, build_double_elim,
    build_single_elim,
};
