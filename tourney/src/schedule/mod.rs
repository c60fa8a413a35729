//! Court scheduling.
//!
//! [`slots`] builds the court/time grid, [`scheduler`] places matches into
//! it, and [`adapter`] turns brackets and fixtures into scheduler input.

pub mod adapter;
pub mod scheduler;
pub mod slots;

pub use adapter::{elimination_matches, round_robin_sched_matches};
pub use scheduler::{
    DEFAULT_MIN_REST_MINUTES, EntryId, SchedMatch, ScheduleOptions, ScheduleOutcome, schedule,
};
pub use slots::{Court, Slot, SlotPlan, build_slots};
