//! Materialization of visible occurrences across a set of events.

use cadence_core::types::OccurrenceOrder;
use chrono::{DateTime, Utc};

use crate::error::ServiceResult;
use crate::model::{Event, EventId, Occurrence};
use crate::overlay::{OverrideIndex, resolve};
use crate::recurrence::generate;
use crate::store::{EventSource, OverrideStore};

/// Runs generation and overlay for every event in a query window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarMaterializer {
    order: OccurrenceOrder,
}

impl CalendarMaterializer {
    #[must_use]
    pub fn new(order: OccurrenceOrder) -> Self {
        Self { order }
    }

    #[must_use]
    pub fn order(&self) -> OccurrenceOrder {
        self.order
    }

    /// ## Summary
    /// Expands each event, applies overrides from `index`, and orders the result.
    ///
    /// Events are expected to be validated.
    #[must_use]
    #[tracing::instrument(
        skip_all,
        fields(events = events.len(), overrides = index.len(), %window_start, %window_end, order = %self.order)
    )]
    pub fn materialize(
        &self,
        events: &[Event],
        index: &OverrideIndex,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<Occurrence> {
        let mut occurrences: Vec<Occurrence> = events
            .iter()
            .flat_map(|event| {
                let starts = generate(event, window_start, window_end);
                resolve(event, &starts, index)
            })
            .collect();

        if self.order == OccurrenceOrder::Chronological {
            occurrences.sort_by_key(|o| (o.displayed_start, o.event_id, o.original_start));
        }

        tracing::debug!(count = occurrences.len(), "Materialized occurrences");
        occurrences
    }

    /// ## Summary
    /// Loads events and their overrides in one batch each, then materializes.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    #[tracing::instrument(skip_all, fields(%window_start, %window_end))]
    pub fn materialize_from_store<S>(
        &self,
        store: &S,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Occurrence>>
    where
        S: EventSource + OverrideStore,
    {
        let events = store.events()?;
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let index: OverrideIndex = store.overrides_for(&ids)?.into_iter().collect();

        Ok(self.materialize(&events, &index, window_start, window_end))
    }
}
