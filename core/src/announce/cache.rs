//! Content-addressed artifact cache

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::output::{AudioArtifact, RenderError};

use super::fingerprint::Fingerprint;

/// Retention policy for rendered announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Keep every rendered artifact for the process lifetime.
    Unbounded,
    /// Evict the oldest artifacts once the cache holds more than this many.
    MaxEntries(usize),
}

/// One fingerprint's render state. The cell collapses concurrent renders;
/// the flag keeps an artifact from being counted twice by eviction.
struct Slot {
    cell: OnceCell<AudioArtifact>,
    recorded: AtomicBool,
}

impl Slot {
    fn new() -> Self {
        Slot {
            cell: OnceCell::new(),
            recorded: AtomicBool::new(false),
        }
    }
}

/// Rendered-announcement cache keyed by content fingerprint.
///
/// Lookups for different fingerprints never contend; concurrent lookups
/// for the same fingerprint collapse into a single render. Failed renders
/// leave nothing behind, so the next lookup retries.
pub struct AnnouncementCache {
    slots: DashMap<Fingerprint, Arc<Slot>>,
    policy: CachePolicy,
    /// Insertion order, oldest first. Only maintained under `MaxEntries`.
    arrival_order: Mutex<VecDeque<Fingerprint>>,
}

impl AnnouncementCache {
    pub fn new(policy: CachePolicy) -> Self {
        AnnouncementCache {
            slots: DashMap::new(),
            policy,
            arrival_order: Mutex::new(VecDeque::new()),
        }
    }

    /// Return the cached artifact for `fingerprint`, rendering it with
    /// `render` if absent or no longer deliverable.
    pub async fn get_or_render<F, Fut>(
        &self,
        fingerprint: &Fingerprint,
        render: F,
    ) -> Result<AudioArtifact, RenderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AudioArtifact, RenderError>>,
    {
        // A cached file artifact whose backing file is gone gets dropped
        // here so the lookup below starts from a fresh cell.
        self.slots.remove_if(fingerprint, |_, slot| {
            matches!(slot.cell.get(), Some(artifact) if !artifact.resolves())
        });

        let slot = self
            .slots
            .entry(fingerprint.clone())
            .or_insert_with(|| Arc::new(Slot::new()))
            .clone();

        let artifact = slot.cell.get_or_try_init(render).await?.clone();

        if !slot.recorded.swap(true, Ordering::SeqCst) {
            self.note_insertion(fingerprint);
        }

        Ok(artifact)
    }

    /// Number of rendered artifacts currently held.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.value().cell.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a rendered artifact exists for this fingerprint.
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.slots
            .get(fingerprint)
            .is_some_and(|slot| slot.cell.initialized())
    }

    /// Drop every cached artifact.
    pub fn clear(&self) {
        self.slots.clear();
        if let Ok(mut order) = self.arrival_order.lock() {
            order.clear();
        }
    }

    fn note_insertion(&self, fingerprint: &Fingerprint) {
        let CachePolicy::MaxEntries(max) = self.policy else {
            return;
        };
        let Ok(mut order) = self.arrival_order.lock() else {
            return;
        };

        // A re-render after staleness keeps one queue entry, at the back.
        order.retain(|f| f != fingerprint);
        order.push_back(fingerprint.clone());

        while order.len() > max {
            if let Some(oldest) = order.pop_front() {
                self.slots.remove(&oldest);
                debug!(fingerprint = oldest.as_str(), "Evicted cached announcement");
            }
        }
    }
}
