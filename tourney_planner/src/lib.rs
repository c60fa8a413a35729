//! Internal modules for the tournament planner.
//!
//! This library provides configuration loading, logging setup and the
//! request/response layer used by the tourney_planner binary.

pub mod config;
pub mod logging;
pub mod request;
