//! Owned in-memory actor registry
//!
//! An explicit store instance rather than a global: callers own a `Roster`
//! and pass it where needed, so independent engine instances never share
//! state by accident.

use std::collections::HashMap;

use super::actor::{Actor, Timing};
use super::error::RosterError;

/// Registry of actors keyed by unique name.
#[derive(Debug, Default)]
pub struct Roster {
    actors: HashMap<String, Actor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert by name. Returns the replaced actor, if any.
    pub fn register(&mut self, actor: Actor) -> Option<Actor> {
        self.actors.insert(actor.name.clone(), actor)
    }

    /// Change an actor's timing and optionally its attack group.
    pub fn update(
        &mut self,
        name: &str,
        timing: Timing,
        attack_group: Option<u32>,
    ) -> Result<(), RosterError> {
        let actor = self.actors.get_mut(name).ok_or_else(|| not_found(name))?;
        actor.timing = timing;
        if let Some(group) = attack_group {
            actor.attack_group = group;
        }
        Ok(())
    }

    /// Remove one actor, returning the removed record.
    pub fn remove(&mut self, name: &str) -> Result<Actor, RosterError> {
        self.actors.remove(name).ok_or_else(|| not_found(name))
    }

    /// Remove everything. Returns how many actors were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.actors.len();
        self.actors.clear();
        removed
    }

    /// Remove one attack group's actors. Returns how many were dropped.
    pub fn clear_group(&mut self, group: u32) -> usize {
        let before = self.actors.len();
        self.actors.retain(|_, actor| actor.attack_group != group);
        before - self.actors.len()
    }

    /// Remove actors loaded from the given preset slot. Returns the count.
    pub fn clear_slot(&mut self, slot: &str) -> usize {
        let before = self.actors.len();
        self.actors
            .retain(|_, actor| actor.preset_slot.as_deref() != Some(slot));
        before - self.actors.len()
    }

    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actors.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// All actors sorted by name, so iteration order is deterministic.
    pub fn all(&self) -> Vec<&Actor> {
        let mut actors: Vec<&Actor> = self.actors.values().collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name));
        actors
    }

    /// One attack group's actors, sorted by name.
    pub fn by_group(&self, group: u32) -> Vec<&Actor> {
        let mut actors: Vec<&Actor> = self
            .actors
            .values()
            .filter(|actor| actor.attack_group == group)
            .collect();
        actors.sort_by(|a, b| a.name.cmp(&b.name));
        actors
    }

    /// Distinct attack groups in ascending order.
    pub fn attack_groups(&self) -> Vec<u32> {
        let mut groups: Vec<u32> = self.actors.values().map(|a| a.attack_group).collect();
        groups.sort_unstable();
        groups.dedup();
        groups
    }

    pub fn count_in_group(&self, group: u32) -> usize {
        self.actors
            .values()
            .filter(|actor| actor.attack_group == group)
            .count()
    }
}

fn not_found(name: &str) -> RosterError {
    RosterError::ActorNotFound {
        name: name.to_string(),
    }
}
