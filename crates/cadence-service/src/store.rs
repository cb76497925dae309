//! Persistence seams for events and overrides, plus an in-memory store.

use std::collections::HashSet;

use crate::error::ServiceResult;
use crate::model::{Event, EventId, OccurrenceOverride};

/// Result of an override write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Read access to stored events.
pub trait EventSource {
    /// ## Summary
    /// Returns all events in storage order.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn events(&self) -> ServiceResult<Vec<Event>>;

    /// ## Summary
    /// Returns a single event by id.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn event(&self, id: EventId) -> ServiceResult<Option<Event>>;
}

/// Read and write access to occurrence overrides.
pub trait OverrideStore {
    /// ## Summary
    /// Loads every override belonging to one of `event_ids` in a single batch.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be read.
    fn overrides_for(&self, event_ids: &[EventId]) -> ServiceResult<Vec<OccurrenceOverride>>;

    /// ## Summary
    /// Inserts `record`, or updates the record already stored under its key.
    ///
    /// An update keeps the stored id and `created_at`.
    ///
    /// ## Errors
    /// Returns an error if the backing store cannot be written.
    fn upsert_override(&mut self, record: OccurrenceOverride) -> ServiceResult<UpsertOutcome>;
}

/// Vector-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    events: Vec<Event>,
    overrides: Vec<OccurrenceOverride>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parts(events: Vec<Event>, overrides: Vec<OccurrenceOverride>) -> Self {
        Self { events, overrides }
    }

    /// Adds an event, replacing any event with the same id in place.
    pub fn insert_event(&mut self, event: Event) {
        if let Some(existing) = self.events.iter_mut().find(|e| e.id == event.id) {
            *existing = event;
        } else {
            self.events.push(event);
        }
    }

    #[must_use]
    pub fn event_list(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn override_list(&self) -> &[OccurrenceOverride] {
        &self.overrides
    }
}

impl EventSource for InMemoryStore {
    fn events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        Ok(self.events.iter().find(|e| e.id == id).cloned())
    }
}

impl OverrideStore for InMemoryStore {
    fn overrides_for(&self, event_ids: &[EventId]) -> ServiceResult<Vec<OccurrenceOverride>> {
        let wanted: HashSet<EventId> = event_ids.iter().copied().collect();
        Ok(self
            .overrides
            .iter()
            .filter(|o| wanted.contains(&o.event_id))
            .cloned()
            .collect())
    }

    fn upsert_override(&mut self, record: OccurrenceOverride) -> ServiceResult<UpsertOutcome> {
        let key = record.key();
        if let Some(existing) = self.overrides.iter_mut().find(|o| o.key() == key) {
            merge_into(existing, &record);
            return Ok(UpsertOutcome::Updated);
        }
        self.overrides.push(record);
        Ok(UpsertOutcome::Created)
    }
}

/// Copies the mutable fields of `incoming` onto `existing`.
fn merge_into(existing: &mut OccurrenceOverride, incoming: &OccurrenceOverride) {
    existing.new_start = incoming.new_start;
    existing.new_end = incoming.new_end;
    existing.is_cancelled = incoming.is_cancelled;
    existing.updated_at = existing.updated_at.max(incoming.updated_at);
}
