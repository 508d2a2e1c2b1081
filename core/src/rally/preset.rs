//! Saved rally presets

use chrono::{DateTime, Utc};

use crate::roster::ActorSpec;

use super::enemy::lead_secs;

/// A rally plus the actor list it expects, saved under a slot id so the
/// whole configuration can be reloaded in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RallyPreset {
    /// Unique slot id on the board.
    pub slot: String,

    /// Name the rally is tracked under when loaded.
    pub rally_name: String,

    pub muster_minutes: u32,
    pub march_seconds: u32,

    /// Group the loaded actors and rally are assigned to.
    pub attack_group: u32,

    /// Actors to (re)register when the preset loads.
    pub actors: Vec<ActorSpec>,

    pub saved_at: DateTime<Utc>,
}

impl RallyPreset {
    /// Lead time the preset's rally will have once loaded.
    pub fn total_lead_secs(&self) -> u32 {
        u32::try_from(lead_secs(self.muster_minutes, self.march_seconds)).unwrap_or(u32::MAX)
    }
}
