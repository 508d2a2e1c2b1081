//! Tests for the timing calculators
//!
//! Worked examples pin the arithmetic; the rest cover filtering, ranking
//! stability, and the late/clamp edge cases.

use chrono::{DateTime, Utc};

use crate::rally::EnemyRally;
use crate::roster::{Actor, Timing};

use super::error::PlanError;
use super::{SAFETY_MARGIN_SECS, launch_schedule, rally_schedule};

/// Fixed reference instant for deterministic math.
fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn plus(base: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    base + chrono::Duration::seconds(secs)
}

/// Rally with the given total lead, already started at `started`.
fn started_rally(lead_minutes: u32, lead_seconds: u32, started: DateTime<Utc>) -> EnemyRally {
    let mut rally = EnemyRally::new("North Keep", lead_minutes, lead_seconds, 1);
    rally.started_at = Some(started);
    rally
}

fn refs(actors: &[Actor]) -> Vec<&Actor> {
    actors.iter().collect()
}

#[test]
fn launch_worked_example() {
    let actors = [
        Actor::travel("A", 10, 1),
        Actor::travel("B", 15, 1),
        Actor::travel("C", 20, 1),
    ];

    let schedule = launch_schedule(&refs(&actors), None, t0()).unwrap();

    assert_eq!(schedule.total_duration, 20);
    assert_eq!(schedule.reference_time, t0());
    assert!(schedule.target_arrival.is_none());

    let by_rank: Vec<(&str, u32, usize)> = schedule
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.fire_offset, e.rank))
        .collect();
    assert_eq!(by_rank, vec![("C", 0, 1), ("B", 5, 2), ("A", 10, 3)]);

    // Every travel actor lands at reference_time + total_duration.
    for entry in &schedule.entries {
        let travel = entry.timing.travel_seconds().unwrap();
        assert_eq!(entry.fire_offset + travel, schedule.total_duration);
        assert!(!entry.late);
    }
}

#[test]
fn launch_is_stable_under_input_permutation() {
    let forward = [
        Actor::travel("A", 10, 1),
        Actor::travel("B", 15, 1),
        Actor::travel("C", 20, 1),
    ];
    let shuffled = [
        Actor::travel("C", 20, 1),
        Actor::travel("A", 10, 1),
        Actor::travel("B", 15, 1),
    ];

    let a = launch_schedule(&refs(&forward), None, t0()).unwrap();
    let b = launch_schedule(&refs(&shuffled), None, t0()).unwrap();
    assert_eq!(a.entries, b.entries);
}

#[test]
fn launch_breaks_offset_ties_by_name() {
    let actors = [
        Actor::travel("Zed", 10, 1),
        Actor::travel("Amy", 10, 1),
        Actor::travel("Mia", 25, 1),
    ];

    let schedule = launch_schedule(&refs(&actors), None, t0()).unwrap();
    let names: Vec<&str> = schedule.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Mia", "Amy", "Zed"]);
    assert_eq!(schedule.entries[1].fire_offset, 15);
    assert_eq!(schedule.entries[2].fire_offset, 15);
}

#[test]
fn launch_single_actor_fires_immediately() {
    let actors = [Actor::travel("Solo", 42, 1)];
    let schedule = launch_schedule(&refs(&actors), None, t0()).unwrap();
    assert_eq!(schedule.total_duration, 42);
    assert_eq!(schedule.entries[0].fire_offset, 0);
    assert_eq!(schedule.entries[0].rank, 1);
}

#[test]
fn launch_filters_by_attack_group() {
    let actors = [
        Actor::travel("A", 10, 1),
        Actor::travel("B", 15, 2),
        Actor::travel("C", 20, 2),
    ];

    let schedule = launch_schedule(&refs(&actors), Some(2), t0()).unwrap();
    assert_eq!(schedule.total_duration, 20);
    assert_eq!(schedule.entries.len(), 2);
    assert_eq!(schedule.entries[0].name, "C");
    assert_eq!(schedule.entries[1].name, "B");
}

#[test]
fn launch_reports_empty_and_missing_group() {
    assert_eq!(launch_schedule(&[], None, t0()).unwrap_err(), PlanError::EmptyRoster);

    let actors = [Actor::travel("A", 10, 1)];
    assert_eq!(
        launch_schedule(&refs(&actors), Some(3), t0()).unwrap_err(),
        PlanError::GroupNotFound { group: 3 }
    );
}

#[test]
fn launch_rejects_pinned_actors() {
    let actors = [Actor::travel("A", 10, 1), Actor::pinned("P", 30, 1)];
    assert_eq!(
        launch_schedule(&refs(&actors), None, t0()).unwrap_err(),
        PlanError::PinnedActor {
            name: "P".to_string()
        }
    );
}

#[test]
fn rally_worked_example() {
    // Lead 2:10 = 130 s; actor D travels 30 s; asked at the start instant.
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::travel("D", 30, 1)];

    let schedule = rally_schedule(&rally, &refs(&actors), None, t0()).unwrap();

    assert_eq!(schedule.target_arrival, Some(plus(t0(), 130)));
    assert_eq!(
        schedule.our_fire_instant,
        Some(plus(t0(), 130 - i64::from(SAFETY_MARGIN_SECS)))
    );
    assert_eq!(schedule.entries[0].fire_offset, 98);
    assert!(!schedule.entries[0].late);
    assert_eq!(schedule.total_duration, 130);
}

#[test]
fn rally_offsets_count_from_now_not_rally_start() {
    // Same plan asked 40 s after the rally started.
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::travel("D", 30, 1)];
    let now = plus(t0(), 40);

    let schedule = rally_schedule(&rally, &refs(&actors), None, now).unwrap();
    assert_eq!(schedule.entries[0].fire_offset, 58);
    assert_eq!(schedule.total_duration, 90);
}

#[test]
fn rally_rounds_fractional_waits_up() {
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::travel("D", 30, 1)];
    let now = t0() + chrono::Duration::milliseconds(500);

    let schedule = rally_schedule(&rally, &refs(&actors), None, now).unwrap();
    // 97.5 s remaining rounds up so we never fire early.
    assert_eq!(schedule.entries[0].fire_offset, 98);
}

#[test]
fn rally_pinned_actor_fires_at_offset_from_rally_start() {
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::pinned("P", 45, 1)];
    let now = plus(t0(), 10);

    let schedule = rally_schedule(&rally, &refs(&actors), None, now).unwrap();
    assert_eq!(schedule.entries[0].fire_offset, 35);
    assert!(!schedule.entries[0].late);
}

#[test]
fn rally_clamps_past_triggers_to_zero_and_marks_late() {
    // Travel 200 s against a 130 s lead: the window is already gone.
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::travel("Slow", 200, 1), Actor::travel("Quick", 30, 1)];

    let schedule = rally_schedule(&rally, &refs(&actors), None, t0()).unwrap();

    let slow = schedule.entries.iter().find(|e| e.name == "Slow").unwrap();
    assert_eq!(slow.fire_offset, 0);
    assert!(slow.late);
    assert_eq!(slow.rank, 1);

    let quick = schedule.entries.iter().find(|e| e.name == "Quick").unwrap();
    assert!(!quick.late);

    let late_names: Vec<&str> = schedule.late_entries().map(|e| e.name.as_str()).collect();
    assert_eq!(late_names, vec!["Slow"]);
}

#[test]
fn rally_total_duration_covers_the_largest_offset() {
    // A pinned send beyond the arrival stretches the countdown past it.
    let rally = started_rally(2, 10, t0());
    let actors = [Actor::pinned("P", 300, 1)];

    let schedule = rally_schedule(&rally, &refs(&actors), None, t0()).unwrap();
    assert_eq!(schedule.entries[0].fire_offset, 300);
    assert_eq!(schedule.total_duration, 300);
}

#[test]
fn rally_requires_a_started_rally() {
    let rally = EnemyRally::new("North Keep", 2, 10, 1);
    let actors = [Actor::travel("D", 30, 1)];

    assert_eq!(
        rally_schedule(&rally, &refs(&actors), None, t0()).unwrap_err(),
        PlanError::RallyNotStarted {
            name: "North Keep".to_string()
        }
    );
}

#[test]
fn rally_reports_empty_and_missing_group() {
    let rally = started_rally(2, 10, t0());
    assert_eq!(
        rally_schedule(&rally, &[], None, t0()).unwrap_err(),
        PlanError::EmptyRoster
    );

    let actors = [Actor::travel("D", 30, 1)];
    assert_eq!(
        rally_schedule(&rally, &refs(&actors), Some(7), t0()).unwrap_err(),
        PlanError::GroupNotFound { group: 7 }
    );
}

#[test]
fn rally_mixed_timing_sorts_by_offset_then_name() {
    let rally = started_rally(2, 10, t0());
    let actors = [
        Actor::travel("Far", 98, 1),  // trigger at T0+30
        Actor::pinned("Pin", 30, 1),  // trigger at T0+30
        Actor::travel("Near", 8, 1),  // trigger at T0+120
    ];

    let schedule = rally_schedule(&rally, &refs(&actors), None, t0()).unwrap();
    let order: Vec<(&str, u32)> = schedule
        .entries
        .iter()
        .map(|e| (e.name.as_str(), e.fire_offset))
        .collect();
    assert_eq!(order, vec![("Far", 30), ("Pin", 30), ("Near", 120)]);
    assert_eq!(schedule.entries[1].timing, Timing::Pinned(30));
}
