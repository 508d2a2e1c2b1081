//! Timing plan system
//!
//! This module provides:
//! - **Calculators**: Pure functions that turn actor timing data into a
//!   synchronized schedule (launch variant and deadline-driven rally variant)
//! - **Schedules**: The computed per-actor fire offsets with ranks
//! - **Grouping**: Clustering of entries that share a fire offset so they
//!   are narrated together
//!
//! Calculators take `now` as an argument and never read the clock or touch
//! I/O, so they are safe to call from anywhere and trivial to test.

mod calculator;
mod grouping;
mod schedule;

pub mod error;

#[cfg(test)]
mod calculator_tests;

pub use calculator::{SAFETY_MARGIN_SECS, launch_schedule, rally_schedule};
pub use error::PlanError;
pub use grouping::group_by_fire_offset;
pub use schedule::{AnnouncementGroup, ScheduleEntry, SynchronizedSchedule};
