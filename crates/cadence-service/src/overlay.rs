//! Applies per-occurrence overrides to generated occurrence starts.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};

use crate::model::{Event, EventId, Occurrence, OccurrenceOverride, OverrideKey};

/// Overrides keyed by `(event_id, original_start)`, built once per materialization.
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex {
    entries: HashMap<OverrideKey, OccurrenceOverride>,
}

impl OverrideIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record unless its key is already present. The first record wins.
    pub fn insert(&mut self, record: OccurrenceOverride) {
        match self.entries.entry(record.key()) {
            Entry::Occupied(existing) => {
                tracing::warn!(
                    event_id = %record.event_id,
                    original_start = %record.original_start,
                    kept = %existing.get().id,
                    dropped = %record.id,
                    "Duplicate override for occurrence"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    #[must_use]
    pub fn get(&self, event_id: EventId, original_start: DateTime<Utc>) -> Option<&OccurrenceOverride> {
        self.entries.get(&(event_id, original_start))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<OccurrenceOverride> for OverrideIndex {
    fn from_iter<I: IntoIterator<Item = OccurrenceOverride>>(iter: I) -> Self {
        let mut index = Self::new();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

/// ## Summary
/// Turns generated starts into visible occurrences.
///
/// Cancelled occurrences are dropped. Rescheduled ones take the override's
/// start and end, each independently, and keep their original start.
#[must_use]
pub fn resolve(
    event: &Event,
    starts: &[DateTime<Utc>],
    index: &OverrideIndex,
) -> Vec<Occurrence> {
    let duration = event.duration();
    let is_recurring = event.is_recurring();

    starts
        .iter()
        .filter_map(|&original_start| {
            let generated_end = original_start + duration;
            let Some(record) = index.get(event.id, original_start) else {
                return Some(Occurrence {
                    event_id: event.id,
                    original_start,
                    displayed_start: original_start,
                    displayed_end: generated_end,
                    is_recurring,
                });
            };

            if record.is_cancelled {
                tracing::trace!(event_id = %event.id, %original_start, "Occurrence cancelled");
                return None;
            }

            tracing::trace!(event_id = %event.id, %original_start, "Occurrence rescheduled");
            Some(Occurrence {
                event_id: event.id,
                original_start,
                displayed_start: record.new_start.unwrap_or(original_start),
                displayed_end: record.new_end.unwrap_or(generated_end),
                is_recurring,
            })
        })
        .collect()
}
