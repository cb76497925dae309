//! JSON listing of visible occurrences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::boundary::format_timestamp;
use crate::error::ServiceResult;
use crate::model::{Event, EventId, Occurrence};

/// One visible occurrence as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub is_recurring: bool,
    pub original_start: String,
    pub timezone: String,
}

/// ## Summary
/// Pairs each occurrence with its event's details, keeping occurrence order.
///
/// Occurrences whose event is not in `events` are skipped.
#[must_use]
pub fn build_listing(events: &[Event], occurrences: &[Occurrence]) -> Vec<ListingEntry> {
    let by_id: HashMap<EventId, &Event> = events.iter().map(|e| (e.id, e)).collect();

    occurrences
        .iter()
        .filter_map(|occ| {
            let Some(event) = by_id.get(&occ.event_id) else {
                tracing::warn!(event_id = %occ.event_id, "Occurrence without event, skipping");
                return None;
            };
            Some(ListingEntry {
                id: event.id,
                title: event.title.clone(),
                description: event.description.clone(),
                start: format_timestamp(occ.displayed_start),
                end: format_timestamp(occ.displayed_end),
                is_recurring: occ.is_recurring,
                original_start: format_timestamp(occ.original_start),
                timezone: event.timezone.name().to_string(),
            })
        })
        .collect()
}

/// ## Summary
/// Renders a listing as pretty-printed JSON.
///
/// ## Errors
/// Returns `ServiceError::Json` if serialization fails.
pub fn listing_json(entries: &[ListingEntry]) -> ServiceResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
