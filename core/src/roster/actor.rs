//! Actor records (participants in a coordinated action)

use chrono::{DateTime, Utc};

use super::input::format_duration;

/// Attack group assigned when the operator doesn't pick one.
pub const DEFAULT_ATTACK_GROUP: u32 = 1;

/// How an actor participates in timing calculations.
///
/// Exactly one of:
/// - `Travel`: seconds until the actor's action lands once triggered. The
///   calculator derives the trigger offset so all travel actors land together.
/// - `Pinned`: fixed offset in seconds from the reference start at which the
///   actor must trigger, regardless of anyone else's travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Travel(u32),
    Pinned(u32),
}

impl Timing {
    /// Travel seconds, or `None` for pinned actors.
    pub fn travel_seconds(&self) -> Option<u32> {
        match self {
            Timing::Travel(secs) => Some(*secs),
            Timing::Pinned(_) => None,
        }
    }

    /// Short display form: "25s travel" or "11:02 send".
    pub fn display(&self) -> String {
        match self {
            Timing::Travel(secs) => format!("{secs}s travel"),
            Timing::Pinned(offset) => format!("{} send", format_duration(*offset)),
        }
    }
}

/// One participant in a synchronized action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Unique display name; registration is an upsert keyed by this.
    pub name: String,

    /// Travel time or pinned send offset.
    pub timing: Timing,

    /// Partition key; scheduling only mixes actors within one group.
    pub attack_group: u32,

    /// Preset slot this actor was loaded from (set by preset loading so a
    /// reload can clear its own prior registrations).
    pub preset_slot: Option<String>,

    /// When the actor was registered.
    pub registered_at: DateTime<Utc>,
}

impl Actor {
    /// Travel actor: lands `seconds` after its trigger.
    pub fn travel(name: impl Into<String>, seconds: u32, attack_group: u32) -> Self {
        Self::new(name, Timing::Travel(seconds), attack_group)
    }

    /// Pinned actor: triggers exactly `offset_secs` after the reference start.
    pub fn pinned(name: impl Into<String>, offset_secs: u32, attack_group: u32) -> Self {
        Self::new(name, Timing::Pinned(offset_secs), attack_group)
    }

    pub fn new(name: impl Into<String>, timing: Timing, attack_group: u32) -> Self {
        Self {
            name: name.into(),
            timing,
            attack_group,
            preset_slot: None,
            registered_at: Utc::now(),
        }
    }
}

/// Name plus timing as entered by an operator, before group assignment.
///
/// Rally presets store these so loading a preset can (re)register the
/// same actors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSpec {
    pub name: String,
    pub timing: Timing,
}
