//! Content fingerprints for rendered announcements
//!
//! A fingerprint is a SHA-256 over a JSON-encoded normalized payload. The
//! payload always carries a pipeline version tag plus every environment
//! parameter that changes rendered output (voice, speech rate, platform),
//! so a voice change can never serve a stale render.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::plan::SynchronizedSchedule;
use crate::settings::VoiceSettings;

/// Version tag for whole-schedule narration renders. Bump when the
/// narration script or rendering pipeline changes shape.
pub const SCHEDULE_PIPELINE_TAG: &str = "sync-v5";

/// Version tag for single-line renders.
pub const LINE_PIPELINE_TAG: &str = "line-v1";

/// Stable cache key: lowercase hex SHA-256 of a normalized payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize)]
struct EntryKey<'a> {
    t: u32,
    name: &'a str,
}

#[derive(Serialize)]
struct SchedulePayload<'a> {
    v: &'static str,
    voice: &'a str,
    rate: u32,
    platform: &'a str,
    entries: Vec<EntryKey<'a>>,
}

#[derive(Serialize)]
struct LinePayload<'a> {
    v: &'static str,
    voice: &'a str,
    rate: u32,
    platform: &'a str,
    text: &'a str,
}

/// Fingerprint a whole schedule (used for narration/intro lines).
///
/// Entries are normalized by sorting on `(fire_offset, name)`, so two
/// logically identical schedules built from any actor input order produce
/// the same fingerprint.
pub fn schedule_fingerprint(
    schedule: &SynchronizedSchedule,
    voice: &VoiceSettings,
) -> Fingerprint {
    let mut entries: Vec<EntryKey> = schedule
        .entries
        .iter()
        .map(|entry| EntryKey {
            t: entry.fire_offset,
            name: entry.name.as_str(),
        })
        .collect();
    entries.sort_by(|a, b| a.t.cmp(&b.t).then_with(|| a.name.cmp(b.name)));

    digest(&SchedulePayload {
        v: SCHEDULE_PIPELINE_TAG,
        voice: &voice.voice,
        rate: voice.rate_wpm,
        platform: &voice.platform_tag,
        entries,
    })
}

/// Fingerprint one announcement line by its exact text.
pub fn line_fingerprint(text: &str, voice: &VoiceSettings) -> Fingerprint {
    digest(&LinePayload {
        v: LINE_PIPELINE_TAG,
        voice: &voice.voice,
        rate: voice.rate_wpm,
        platform: &voice.platform_tag,
        text,
    })
}

fn digest<T: Serialize>(payload: &T) -> Fingerprint {
    let bytes = serde_json::to_vec(payload).expect("fingerprint payload serializes");
    Fingerprint(hex::encode(Sha256::digest(bytes)))
}
