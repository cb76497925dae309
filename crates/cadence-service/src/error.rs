use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::EventId;
use crate::recurrence::RuleError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    RfcError(#[from] cadence_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),

    #[error("End must be after start")]
    EndBeforeStart,

    #[error("Invalid weekday code: {0}")]
    InvalidWeekdayCode(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(u32),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{original_start} is not an occurrence of event {event_id}")]
    NotAnOccurrence {
        event_id: EventId,
        original_start: DateTime<Utc>,
    },

    #[error("Store error: {0}")]
    Store(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
