//! Integration tests for bracket configuration through to a court schedule
//!
//! These tests drive the public API the way a planner does: parse a
//! configuration, build the bracket, schedule it and inspect the result.

#[cfg(test)]
mod schedule_tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use tourney::config::{BracketConfig, BuiltBracket};
    use tourney::schedule::{Court, ScheduleOptions, SlotPlan, schedule};
    use tourney::seeding::{
        GroupStanding, PlayoffSelection, StandingRow, seed_from_round_robin,
    };

    fn plan(courts: usize, slots_per_court: usize) -> SlotPlan {
        SlotPlan {
            courts: Court::numbered(courts),
            start: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            match_minutes: 15,
            buffer_minutes: 5,
            slots_per_court,
        }
    }

    fn start_of(outcome: &tourney::ScheduleOutcome<String>, id: &str) -> DateTime<Utc> {
        outcome.slot_of(&id.to_string()).unwrap().start
    }

    #[test]
    fn test_double_elim_schedules_in_dependency_order() {
        let config = BracketConfig::from_json(
            r#"{"type":"DOUBLE_ELIM","seeds":8,"variant":"LB_CAN_WIN","grandFinalReset":true}"#,
        )
        .unwrap();
        let matches = config.build(&[]).unwrap().sched_matches();
        assert_eq!(matches.len(), 7 + 6 + 2);

        let outcome = schedule(&matches, &plan(4, 24).build(), &ScheduleOptions::default());
        assert!(outcome.is_complete(), "unplaced: {:?}", outcome.unassigned);
        assert!(outcome.conflicts(&matches).is_empty());

        for m in &matches {
            let slot = outcome.slot_of(&m.id).unwrap();
            for dep in &m.deps {
                assert!(outcome.slot_of(dep).unwrap().end <= slot.start, "{} before {}", m.id, dep);
            }
        }
        assert!(start_of(&outcome, "GF-2") > start_of(&outcome, "GF-1"));
        assert!(start_of(&outcome, "GF-1") > start_of(&outcome, "L4-0"));
    }

    #[test]
    fn test_single_elim_with_byes() {
        let config =
            BracketConfig::from_json(r#"{"type":"SINGLE_ELIM","seeds":6,"thirdPlacePlayoff":true}"#)
                .unwrap();
        let matches = config.build(&[]).unwrap().sched_matches();

        // 8 nodes minus the two first-round byes
        assert_eq!(matches.len(), 6);
        assert!(matches.iter().all(|m| m.id != "W1-0" && m.id != "W1-2"));

        let outcome = schedule(&matches, &plan(2, 6).build(), &ScheduleOptions::default());
        assert!(outcome.is_complete());

        // Seed 1 waits for nothing but plays no earlier than W1-1's end
        let w2_0 = outcome.slot_of(&"W2-0".to_string()).unwrap();
        let w1_1 = outcome.slot_of(&"W1-1".to_string()).unwrap();
        assert!(w2_0.start >= w1_1.end);
    }

    #[test]
    fn test_round_robin_pools_share_courts() {
        let config = BracketConfig::from_json(
            r#"{"type":"ROUND_ROBIN","seeds":8,"groups":2,"matchesPerPair":1}"#,
        )
        .unwrap();
        let built = config.build(&[]).unwrap();
        let BuiltBracket::RoundRobin { pools } = &built else {
            panic!("expected round robin");
        };
        assert_eq!(pools.len(), 2);

        let matches = built.sched_matches();
        assert_eq!(matches.len(), 12);

        let options = ScheduleOptions {
            min_rest_minutes: 10,
            ..Default::default()
        };
        let outcome = schedule(&matches, &plan(2, 12).build(), &options);
        assert!(outcome.is_complete());
        assert!(outcome.conflicts(&matches).is_empty());

        // The 10 minute rest keeps a team off back-to-back windows
        for m in &matches {
            let slot = outcome.slot_of(&m.id).unwrap();
            for other in &matches {
                if other.id == m.id || !m.teams.iter().any(|t| other.teams.contains(t)) {
                    continue;
                }
                let other_slot = outcome.slot_of(&other.id).unwrap();
                if other_slot.start > slot.start {
                    assert!(other_slot.start >= slot.end + TimeDelta::minutes(10));
                }
            }
        }
    }

    #[test]
    fn test_too_few_slots_reports_unassigned() {
        let config = BracketConfig::from_json(r#"{"type":"SINGLE_ELIM","seeds":16}"#).unwrap();
        let matches = config.build(&[]).unwrap().sched_matches();

        let outcome = schedule(&matches, &plan(1, 5).build(), &ScheduleOptions::default());
        assert_eq!(outcome.assigned.len(), 5);
        assert_eq!(outcome.unassigned.len(), 10);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_playoff_from_pools() {
        let standings = vec![
            GroupStanding {
                group: "A".to_string(),
                rows: (1..=4)
                    .map(|rank| StandingRow {
                        team_id: i64::from(rank),
                        team_name: format!("A{rank}"),
                        rank,
                    })
                    .collect(),
            },
            GroupStanding {
                group: "B".to_string(),
                rows: (1..=4)
                    .map(|rank| StandingRow {
                        team_id: 10 + i64::from(rank),
                        team_name: format!("B{rank}"),
                        rank,
                    })
                    .collect(),
            },
        ];

        let seeds = seed_from_round_robin(&standings, PlayoffSelection::Top { take: 2 }).unwrap();
        let names: Vec<&str> = seeds.iter().map(|s| s.team_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "B1", "A2", "B2"]);

        let config = BracketConfig::from_json(&format!(
            r#"{{"type":"SINGLE_ELIM","seeds":{}}}"#,
            seeds.len()
        ))
        .unwrap();
        let matches = config.build(&[]).unwrap().sched_matches();
        assert_eq!(matches.len(), 3);
        // 1 v 4 and 2 v 3: pool winners meet runners-up from the other pool
        assert_eq!(matches[0].teams, ["Seed 1".to_string(), "Seed 4".to_string()]);
        assert_eq!(matches[1].teams, ["Seed 2".to_string(), "Seed 3".to_string()]);
    }
}
