//! Structured logging configuration.
//!
//! Log output goes to stderr so that the plan printed on stdout stays valid
//! JSON. `log` records from the `tourney` library are forwarded into the
//! same subscriber.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,tourney=warn";

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var, e.g.
/// `RUST_LOG=tourney=debug` to trace bracket building and slot placement.
///
/// # Example
///
/// ```no_run
/// use tourney_planner::logging;
///
/// logging::init();
/// tracing::info!("Planner starting");
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log the outcome of a scheduling pass
pub fn log_schedule_summary(matches: usize, assigned: usize, conflicts: usize) {
    let unassigned = matches.saturating_sub(assigned);
    if unassigned > 0 {
        tracing::warn!(
            matches = matches,
            assigned = assigned,
            unassigned = unassigned,
            "SCHEDULE: Not every match found a slot"
        );
    } else {
        tracing::info!(
            matches = matches,
            assigned = assigned,
            conflicts = conflicts,
            "Schedule complete"
        );
    }
}
