//! Writes of per-occurrence overrides.

use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Event, OccurrenceOverride};
use crate::recurrence::generate;
use crate::store::{OverrideStore, UpsertOutcome};

/// Rejects a start the event does not generate.
fn ensure_occurrence(event: &Event, original_start: DateTime<Utc>) -> ServiceResult<()> {
    if generate(event, original_start, original_start).contains(&original_start) {
        Ok(())
    } else {
        Err(ServiceError::NotAnOccurrence {
            event_id: event.id,
            original_start,
        })
    }
}

/// ## Summary
/// Cancels one occurrence of `event`. Repeated calls leave a single record.
///
/// ## Errors
/// Returns `ServiceError::NotAnOccurrence` if `original_start` is not generated
/// by the event, or a store error if the write fails.
#[tracing::instrument(skip_all, fields(event_id = %event.id, %original_start))]
pub fn cancel_occurrence<S: OverrideStore>(
    store: &mut S,
    event: &Event,
    original_start: DateTime<Utc>,
) -> ServiceResult<UpsertOutcome> {
    ensure_occurrence(event, original_start)?;

    let outcome = store.upsert_override(OccurrenceOverride::cancellation(
        event.id,
        original_start,
        Utc::now(),
    ))?;
    tracing::info!(?outcome, "Occurrence cancelled");
    Ok(outcome)
}

/// ## Summary
/// Moves one occurrence of `event` to `[new_start, new_end]`, clearing any cancellation.
///
/// ## Errors
/// Returns `ServiceError::EndBeforeStart` unless `new_end > new_start`,
/// `ServiceError::NotAnOccurrence` if `original_start` is not generated by the
/// event, or a store error if the write fails.
#[tracing::instrument(
    skip_all,
    fields(event_id = %event.id, %original_start, %new_start, %new_end)
)]
pub fn reschedule_occurrence<S: OverrideStore>(
    store: &mut S,
    event: &Event,
    original_start: DateTime<Utc>,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
) -> ServiceResult<UpsertOutcome> {
    if new_end <= new_start {
        return Err(ServiceError::EndBeforeStart);
    }
    ensure_occurrence(event, original_start)?;

    let outcome = store.upsert_override(OccurrenceOverride::reschedule(
        event.id,
        original_start,
        Some(new_start),
        Some(new_end),
        Utc::now(),
    ))?;
    tracing::info!(?outcome, "Occurrence rescheduled");
    Ok(outcome)
}
