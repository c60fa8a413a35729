/// Property-based tests for the greedy scheduler using proptest
///
/// Random match sets are scheduled into random slot grids; every produced
/// assignment must respect slot exclusivity, team rest and dependencies.
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use tourney::schedule::{Court, SchedMatch, ScheduleOptions, Slot, build_slots, schedule};
use tourney::topology::Bracket;

const TEAMS: [&str; 6] = ["Ants", "Bees", "Crows", "Dingos", "Eels", "Foxes"];

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

// Matches with random teams and rounds; deps only point at strictly lower
// rounds, the way bracket graphs are shaped
fn matches_strategy() -> impl Strategy<Value = Vec<SchedMatch<String>>> {
    prop::collection::vec(
        (0usize..6, 1usize..6, 1u32..5, prop::collection::vec(any::<prop::sample::Index>(), 0..3)),
        1..25,
    )
    .prop_map(|raw| {
        let rounds: Vec<u32> = raw.iter().map(|r| r.2).collect();
        raw.iter()
            .enumerate()
            .map(|(i, (a, offset, round, picks))| {
                let lower: Vec<usize> = (0..i).filter(|&j| rounds[j] < *round).collect();
                let mut deps: Vec<String> = if lower.is_empty() {
                    Vec::new()
                } else {
                    picks.iter().map(|p| format!("m{}", lower[p.index(lower.len())])).collect()
                };
                deps.sort();
                deps.dedup();
                SchedMatch {
                    id: format!("m{i}"),
                    teams: [TEAMS[*a].to_string(), TEAMS[(a + offset) % 6].to_string()],
                    round: *round,
                    bracket: Bracket::Winners,
                    deps,
                }
            })
            .collect()
    })
}

fn grid_strategy() -> impl Strategy<Value = (Vec<Slot>, u32)> {
    (1usize..4, 5u32..40, 0u32..15, 1usize..12, 0u32..40).prop_map(
        |(courts, match_minutes, buffer, per_court, rest)| {
            let courts = Court::numbered(courts);
            let slots = build_slots(&courts, start(), match_minutes, buffer, per_court);
            (slots, rest)
        },
    )
}

proptest! {
    #[test]
    fn test_every_match_accounted_for(matches in matches_strategy(), (slots, rest) in grid_strategy()) {
        let options = ScheduleOptions { min_rest_minutes: rest, ..Default::default() };
        let out = schedule(&matches, &slots, &options);

        prop_assert_eq!(out.assigned.len() + out.unassigned.len(), matches.len());
        for m in &matches {
            let placed = out.assigned.contains_key(&m.id);
            let skipped = out.unassigned.contains(&m.id);
            prop_assert!(placed != skipped, "{} placed={} skipped={}", m.id, placed, skipped);
        }
    }

    #[test]
    fn test_slots_are_exclusive(matches in matches_strategy(), (slots, rest) in grid_strategy()) {
        let options = ScheduleOptions { min_rest_minutes: rest, ..Default::default() };
        let out = schedule(&matches, &slots, &options);

        let distinct: HashSet<&Slot> = out.assigned.values().collect();
        prop_assert_eq!(distinct.len(), out.assigned.len());
    }

    #[test]
    fn test_rest_between_team_matches(matches in matches_strategy(), (slots, rest) in grid_strategy()) {
        let options = ScheduleOptions { min_rest_minutes: rest, ..Default::default() };
        let out = schedule(&matches, &slots, &options);

        let mut by_team: HashMap<&str, Vec<&Slot>> = HashMap::new();
        for m in &matches {
            if let Some(slot) = out.slot_of(&m.id) {
                for team in &m.teams {
                    by_team.entry(team.as_str()).or_default().push(slot);
                }
            }
        }

        let gap = TimeDelta::minutes(i64::from(rest));
        for (team, mut played) in by_team {
            played.sort_by_key(|slot| slot.start);
            for pair in played.windows(2) {
                prop_assert!(
                    pair[1].start >= pair[0].end + gap,
                    "{} rests too little between {} and {}", team, pair[0], pair[1]
                );
            }
        }
    }

    #[test]
    fn test_dependencies_finish_first(matches in matches_strategy(), (slots, rest) in grid_strategy()) {
        let options = ScheduleOptions { min_rest_minutes: rest, ..Default::default() };
        let out = schedule(&matches, &slots, &options);

        for m in &matches {
            let Some(slot) = out.slot_of(&m.id) else { continue };
            for dep in &m.deps {
                if let Some(dep_slot) = out.slot_of(dep) {
                    prop_assert!(dep_slot.end <= slot.start, "{} starts before {} ends", m.id, dep);
                }
            }
        }
    }

    #[test]
    fn test_strict_mode_never_places_orphans(matches in matches_strategy(), (slots, rest) in grid_strategy()) {
        let options = ScheduleOptions { min_rest_minutes: rest, require_placed_dependencies: true };
        let out = schedule(&matches, &slots, &options);

        for m in &matches {
            if out.assigned.contains_key(&m.id) {
                prop_assert!(m.deps.iter().all(|dep| out.assigned.contains_key(dep)));
            }
        }
    }
}
