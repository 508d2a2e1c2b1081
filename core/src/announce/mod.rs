//! Announcement system
//!
//! This module provides:
//! - **Fingerprints**: order-independent content addresses for announcements
//! - **Scripts**: the timed lines a countdown run delivers
//! - **Cache**: at-most-one render per fingerprint, with optional eviction

mod cache;
mod fingerprint;
mod script;


pub use cache::{AnnouncementCache, CachePolicy};
pub use fingerprint::{
    Fingerprint, LINE_PIPELINE_TAG, SCHEDULE_PIPELINE_TAG, line_fingerprint, schedule_fingerprint,
};
pub use script::{
    CountdownScript, LineKind, ScriptLine, arrival_announcement, launch_script, rally_script,
};
