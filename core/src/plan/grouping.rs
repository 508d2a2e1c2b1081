//! Fire-offset grouping

use std::collections::BTreeMap;

use super::schedule::{AnnouncementGroup, ScheduleEntry};

/// Partition entries into announcement groups by exact fire offset.
///
/// Groups come back in ascending offset order; members within a group keep
/// rank order. Regrouping a flattened grouping reproduces it.
pub fn group_by_fire_offset(entries: &[ScheduleEntry]) -> Vec<AnnouncementGroup> {
    let mut buckets: BTreeMap<u32, Vec<&ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.fire_offset).or_default().push(entry);
    }

    buckets
        .into_iter()
        .map(|(fire_offset, mut members)| {
            members.sort_by_key(|entry| entry.rank);
            AnnouncementGroup {
                fire_offset,
                members: members.into_iter().map(|e| e.name.clone()).collect(),
            }
        })
        .collect()
}
