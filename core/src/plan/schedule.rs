//! Computed schedules (calculator output)

use chrono::{DateTime, Utc};

use crate::roster::Timing;

/// One actor's slot in a synchronized schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub name: String,

    /// Timing record the offset was derived from (kept for display).
    pub timing: Timing,

    /// Seconds from schedule start until this actor triggers.
    pub fire_offset: u32,

    /// 1-based position when sorted by `(fire_offset, name)`.
    pub rank: usize,

    /// The naive trigger instant was already past when the schedule was
    /// computed; the entry fires immediately but the missed window is
    /// reportable.
    pub late: bool,
}

/// Output of the timing calculators.
///
/// Entries are sorted by `(fire_offset, name)` with ranks 1..N assigned in
/// that order, so two schedules built from the same actors in any input
/// order compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynchronizedSchedule {
    pub entries: Vec<ScheduleEntry>,

    /// Maximum fire offset; for rally plans, the seconds until the
    /// adversary's arrival.
    pub total_duration: u32,

    /// Instant the plan was computed; offsets count from here.
    pub reference_time: DateTime<Utc>,

    // ─── Rally plans only ───────────────────────────────────────────────────
    /// When the adversary lands.
    pub target_arrival: Option<DateTime<Utc>>,

    /// When our strikes land (the safety margin before the adversary).
    pub our_fire_instant: Option<DateTime<Utc>>,
}

impl SynchronizedSchedule {
    /// Entries that missed their trigger window.
    pub fn late_entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(|entry| entry.late)
    }
}

/// Actors sharing one fire offset, narrated as a single announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementGroup {
    pub fire_offset: u32,

    /// Member names in rank order.
    pub members: Vec<String>,
}
