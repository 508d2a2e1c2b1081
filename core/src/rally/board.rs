//! Owned rally registry and preset storage

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::roster::{Actor, ActorSpec, DEFAULT_ATTACK_GROUP, Roster};

use super::enemy::{EnemyRally, lead_secs};
use super::error::RallyError;
use super::preset::RallyPreset;

/// Registry of enemy rallies keyed by unique name, plus saved presets
/// keyed by slot id.
#[derive(Debug, Default)]
pub struct RallyBoard {
    rallies: HashMap<String, EnemyRally>,
    presets: HashMap<String, RallyPreset>,
}

impl RallyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Rally management ───────────────────────────────────────────────────

    /// Track a new rally. Durations are validated here so the board never
    /// holds a rally that cannot arrive.
    pub fn track(
        &mut self,
        name: &str,
        muster_minutes: u32,
        march_seconds: u32,
        attack_group: u32,
    ) -> Result<&EnemyRally, RallyError> {
        validate_rally_name(name)?;
        validate_durations(muster_minutes, march_seconds)?;
        if self.rallies.contains_key(name) {
            return Err(RallyError::AlreadyTracked {
                name: name.to_string(),
            });
        }

        let rally = EnemyRally::new(name, muster_minutes, march_seconds, attack_group);
        Ok(self.rallies.entry(name.to_string()).or_insert(rally))
    }

    /// Change a rally's durations and optionally its attack group.
    pub fn update(
        &mut self,
        name: &str,
        muster_minutes: u32,
        march_seconds: u32,
        attack_group: Option<u32>,
    ) -> Result<(), RallyError> {
        validate_durations(muster_minutes, march_seconds)?;
        let rally = self.rallies.get_mut(name).ok_or_else(|| rally_not_found(name))?;
        rally.muster_minutes = muster_minutes;
        rally.march_seconds = march_seconds;
        if let Some(group) = attack_group {
            rally.attack_group = group;
        }
        Ok(())
    }

    /// Stop tracking one rally, returning the removed record.
    pub fn remove(&mut self, name: &str) -> Result<EnemyRally, RallyError> {
        self.rallies.remove(name).ok_or_else(|| rally_not_found(name))
    }

    /// Drop every rally. Returns how many were removed. Presets survive.
    pub fn clear(&mut self) -> usize {
        let removed = self.rallies.len();
        self.rallies.clear();
        removed
    }

    pub fn get(&self, name: &str) -> Option<&EnemyRally> {
        self.rallies.get(name)
    }

    pub fn len(&self) -> usize {
        self.rallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rallies.is_empty()
    }

    /// All rallies sorted by name.
    pub fn all(&self) -> Vec<&EnemyRally> {
        let mut rallies: Vec<&EnemyRally> = self.rallies.values().collect();
        rallies.sort_by(|a, b| a.name.cmp(&b.name));
        rallies
    }

    /// One attack group's rallies, sorted by name.
    pub fn by_group(&self, group: u32) -> Vec<&EnemyRally> {
        let mut rallies: Vec<&EnemyRally> = self
            .rallies
            .values()
            .filter(|rally| rally.attack_group == group)
            .collect();
        rallies.sort_by(|a, b| a.name.cmp(&b.name));
        rallies
    }

    /// Distinct attack groups in ascending order.
    pub fn attack_groups(&self) -> Vec<u32> {
        let mut groups: Vec<u32> = self.rallies.values().map(|r| r.attack_group).collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    /// Begin a rally's countdown (`Pending → Active`). Returns the updated
    /// record.
    pub fn start(&mut self, name: &str, now: DateTime<Utc>) -> Result<EnemyRally, RallyError> {
        let rally = self.rallies.get_mut(name).ok_or_else(|| rally_not_found(name))?;
        if rally.started_at.is_some() {
            return Err(RallyError::AlreadyStarted {
                name: name.to_string(),
            });
        }
        rally.started_at = Some(now);
        Ok(rally.clone())
    }

    /// Whole seconds until the named rally arrives; `None` until started.
    pub fn time_until_arrival(
        &self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<u32>, RallyError> {
        let rally = self.rallies.get(name).ok_or_else(|| rally_not_found(name))?;
        Ok(rally.time_until_arrival(now))
    }

    // ─── Presets ────────────────────────────────────────────────────────────

    /// Save (or overwrite) a preset under `slot`.
    pub fn save_preset(
        &mut self,
        slot: &str,
        rally_name: &str,
        muster_minutes: u32,
        march_seconds: u32,
        actors: Vec<ActorSpec>,
    ) -> Result<(), RallyError> {
        if slot.trim().is_empty() {
            return Err(RallyError::EmptyField {
                field: "preset slot",
            });
        }
        validate_rally_name(rally_name)?;
        validate_durations(muster_minutes, march_seconds)?;
        if actors.is_empty() {
            return Err(RallyError::EmptyPreset);
        }

        let preset = RallyPreset {
            slot: slot.to_string(),
            rally_name: rally_name.to_string(),
            muster_minutes,
            march_seconds,
            attack_group: DEFAULT_ATTACK_GROUP,
            actors,
            saved_at: Utc::now(),
        };
        self.presets.insert(slot.to_string(), preset);
        Ok(())
    }

    pub fn preset(&self, slot: &str) -> Option<&RallyPreset> {
        self.presets.get(slot)
    }

    pub fn has_preset(&self, slot: &str) -> bool {
        self.presets.contains_key(slot)
    }

    /// All presets sorted by slot id.
    pub fn presets(&self) -> Vec<&RallyPreset> {
        let mut presets: Vec<&RallyPreset> = self.presets.values().collect();
        presets.sort_by(|a, b| a.slot.cmp(&b.slot));
        presets
    }

    pub fn delete_preset(&mut self, slot: &str) -> Result<RallyPreset, RallyError> {
        self.presets
            .remove(slot)
            .ok_or_else(|| RallyError::PresetNotFound {
                slot: slot.to_string(),
            })
    }

    /// Load a preset: clear the actors a previous load of this slot put on
    /// the roster, register the preset's actors, and track its rally fresh
    /// (replacing any rally under the same name). Returns the rally name.
    pub fn load_preset(&mut self, slot: &str, roster: &mut Roster) -> Result<String, RallyError> {
        let preset = self
            .presets
            .get(slot)
            .cloned()
            .ok_or_else(|| RallyError::PresetNotFound {
                slot: slot.to_string(),
            })?;

        roster.clear_slot(slot);
        for spec in &preset.actors {
            let mut actor = Actor::new(spec.name.clone(), spec.timing, preset.attack_group);
            actor.preset_slot = Some(slot.to_string());
            roster.register(actor);
        }

        let rally = EnemyRally::new(
            preset.rally_name.clone(),
            preset.muster_minutes,
            preset.march_seconds,
            preset.attack_group,
        );
        self.rallies.insert(preset.rally_name.clone(), rally);

        Ok(preset.rally_name)
    }
}

fn rally_not_found(name: &str) -> RallyError {
    RallyError::RallyNotFound {
        name: name.to_string(),
    }
}

fn validate_rally_name(name: &str) -> Result<(), RallyError> {
    if name.trim().is_empty() {
        return Err(RallyError::EmptyField {
            field: "rally name",
        });
    }
    Ok(())
}

fn validate_durations(muster_minutes: u32, march_seconds: u32) -> Result<(), RallyError> {
    if muster_minutes == 0 {
        return Err(RallyError::NonPositiveDuration {
            field: "muster duration",
        });
    }
    if march_seconds == 0 {
        return Err(RallyError::NonPositiveDuration {
            field: "march duration",
        });
    }
    if lead_secs(muster_minutes, march_seconds) > u64::from(u32::MAX) {
        return Err(RallyError::LeadOutOfRange);
    }
    Ok(())
}
