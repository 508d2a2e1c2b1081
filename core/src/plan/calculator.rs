//! Timing calculators
//!
//! Two variants over the same output shape:
//!
//! - [`launch_schedule`]: we pick the arrival instant. The slowest actor
//!   starts immediately and everyone else is delayed so all actions land
//!   together (`fire_offset = max_travel − travel`).
//! - [`rally_schedule`]: the adversary picks the arrival instant. Travel
//!   actors are timed to land a fixed safety margin before it; pinned actors
//!   fire at their absolute offset from the rally start.

use chrono::{DateTime, Utc};

use crate::rally::EnemyRally;
use crate::roster::{Actor, Timing};

use super::error::PlanError;
use super::schedule::{ScheduleEntry, SynchronizedSchedule};

/// Seconds before the adversary's arrival that our strikes should land.
pub const SAFETY_MARGIN_SECS: u32 = 2;

/// Compute a synchronize-arrival schedule over travel actors.
///
/// Fails with [`PlanError::EmptyRoster`] when `actors` is empty before
/// filtering and [`PlanError::GroupNotFound`] when `group` has no members.
/// Pinned actors cannot be synchronized this way and are rejected.
pub fn launch_schedule(
    actors: &[&Actor],
    group: Option<u32>,
    now: DateTime<Utc>,
) -> Result<SynchronizedSchedule, PlanError> {
    let pool = filter_pool(actors, group)?;

    let mut travels: Vec<(&Actor, u32)> = Vec::with_capacity(pool.len());
    let mut max_travel = 0;
    for actor in pool {
        match actor.timing {
            Timing::Travel(secs) => {
                max_travel = max_travel.max(secs);
                travels.push((actor, secs));
            }
            Timing::Pinned(_) => {
                return Err(PlanError::PinnedActor {
                    name: actor.name.clone(),
                });
            }
        }
    }

    let mut entries: Vec<ScheduleEntry> = travels
        .into_iter()
        .map(|(actor, travel)| ScheduleEntry {
            name: actor.name.clone(),
            timing: actor.timing,
            fire_offset: max_travel - travel,
            rank: 0,
            late: false,
        })
        .collect();
    rank_entries(&mut entries);

    Ok(SynchronizedSchedule {
        entries,
        total_duration: max_travel,
        reference_time: now,
        target_arrival: None,
        our_fire_instant: None,
    })
}

/// Compute a deadline-driven schedule against a started rally.
///
/// Travel actors land [`SAFETY_MARGIN_SECS`] before the adversary arrives;
/// pinned actors trigger at their absolute offset from the rally start. A
/// trigger instant already past clamps to offset 0 and marks the entry late.
pub fn rally_schedule(
    rally: &EnemyRally,
    actors: &[&Actor],
    group: Option<u32>,
    now: DateTime<Utc>,
) -> Result<SynchronizedSchedule, PlanError> {
    let started_at = rally.started_at.ok_or_else(|| PlanError::RallyNotStarted {
        name: rally.name.clone(),
    })?;
    let pool = filter_pool(actors, group)?;

    let target_arrival = started_at + chrono::Duration::seconds(i64::from(rally.total_lead_secs()));
    let our_fire_instant =
        target_arrival - chrono::Duration::seconds(i64::from(SAFETY_MARGIN_SECS));

    let mut entries: Vec<ScheduleEntry> = pool
        .iter()
        .map(|actor| {
            let trigger_instant = match actor.timing {
                Timing::Travel(secs) => our_fire_instant - chrono::Duration::seconds(i64::from(secs)),
                Timing::Pinned(offset) => started_at + chrono::Duration::seconds(i64::from(offset)),
            };
            let (fire_offset, late) = secs_until_ceil(now, trigger_instant);
            ScheduleEntry {
                name: actor.name.clone(),
                timing: actor.timing,
                fire_offset,
                rank: 0,
                late,
            }
        })
        .collect();
    rank_entries(&mut entries);

    let max_offset = entries.iter().map(|e| e.fire_offset).max().unwrap_or(0);
    let (until_arrival, _) = secs_until_ceil(now, target_arrival);
    let total_duration = until_arrival.max(max_offset);

    Ok(SynchronizedSchedule {
        entries,
        total_duration,
        reference_time: now,
        target_arrival: Some(target_arrival),
        our_fire_instant: Some(our_fire_instant),
    })
}

fn filter_pool<'a>(actors: &[&'a Actor], group: Option<u32>) -> Result<Vec<&'a Actor>, PlanError> {
    if actors.is_empty() {
        return Err(PlanError::EmptyRoster);
    }
    match group {
        Some(group) => {
            let pool: Vec<&Actor> = actors
                .iter()
                .copied()
                .filter(|actor| actor.attack_group == group)
                .collect();
            if pool.is_empty() {
                return Err(PlanError::GroupNotFound { group });
            }
            Ok(pool)
        }
        None => Ok(actors.to_vec()),
    }
}

/// Sort by `(fire_offset, name)` and assign 1-based ranks.
fn rank_entries(entries: &mut [ScheduleEntry]) {
    entries.sort_by(|a, b| {
        a.fire_offset
            .cmp(&b.fire_offset)
            .then_with(|| a.name.cmp(&b.name))
    });
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
}

/// Whole seconds from `now` to `instant`, rounded up; instants already past
/// clamp to 0 and report late.
fn secs_until_ceil(now: DateTime<Utc>, instant: DateTime<Utc>) -> (u32, bool) {
    let millis = (instant - now).num_milliseconds();
    if millis < 0 {
        return (0, true);
    }
    ((millis as u64).div_ceil(1000) as u32, false)
}
