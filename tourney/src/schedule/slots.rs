//! Court time slots.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A court that can host one match at a time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Court {
    pub id: String,
    pub name: String,
}

impl Court {
    /// Create a court; the name defaults to the id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Numbered courts `C1..=Cn`
    pub fn numbered(count: usize) -> Vec<Court> {
        (1..=count)
            .map(|n| Court {
                id: format!("C{n}"),
                name: format!("Court {n}"),
            })
            .collect()
    }
}

/// A bookable window on one court
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub court_id: String,
}

impl Slot {
    /// Whether the two windows share any instant (touching ends do not overlap)
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            self.court_id,
            self.start.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// Generate `slots_per_court` consecutive windows on every court.
///
/// Each window lasts `match_minutes`; the next one starts `buffer_minutes`
/// after it ends. Output is court-major: all of the first court's slots,
/// then the second court's, and so on. A court's run stops early once its
/// windows would pass the last representable time.
pub fn build_slots(
    courts: &[Court],
    start: DateTime<Utc>,
    match_minutes: u32,
    buffer_minutes: u32,
    slots_per_court: usize,
) -> Vec<Slot> {
    let match_len = TimeDelta::minutes(i64::from(match_minutes));
    let buffer = TimeDelta::minutes(i64::from(buffer_minutes));

    let mut out = Vec::new();
    for court in courts {
        let mut next = Some(start);
        for built in 0..slots_per_court {
            let window = next.and_then(|t| t.checked_add_signed(match_len).map(|end| (t, end)));
            let Some((t, end)) = window else {
                log::warn!(
                    "Court {} stops after {built} of {slots_per_court} slots: time out of range",
                    court.id
                );
                break;
            };
            out.push(Slot {
                start: t,
                end,
                court_id: court.id.clone(),
            });
            next = end.checked_add_signed(buffer);
        }
    }
    out
}

/// Slot grid parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPlan {
    pub courts: Vec<Court>,
    pub start: DateTime<Utc>,
    pub match_minutes: u32,
    pub buffer_minutes: u32,
    pub slots_per_court: usize,
}

impl Default for SlotPlan {
    /// Four courts, 15 minute matches, 5 minute buffer, 12 slots each,
    /// starting at the Unix epoch
    fn default() -> Self {
        Self {
            courts: Court::numbered(4),
            start: DateTime::<Utc>::UNIX_EPOCH,
            match_minutes: 15,
            buffer_minutes: 5,
            slots_per_court: 12,
        }
    }
}

impl SlotPlan {
    /// Generate the slot grid
    pub fn build(&self) -> Vec<Slot> {
        build_slots(
            &self.courts,
            self.start,
            self.match_minutes,
            self.buffer_minutes,
            self.slots_per_court,
        )
    }
}
