//! Events, occurrence overrides and materialized occurrences.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::recurrence::{Frequency, RecurrenceRule};

/// Identifier of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar event, optionally recurring.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Carried verbatim; timestamps are always UTC.
    pub timezone: Tz,
    pub recurring: bool,
    pub rule: RecurrenceRule,
}

impl Event {
    /// Creates a non-recurring event in UTC with an empty description.
    #[must_use]
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            start,
            end,
            timezone: Tz::UTC,
            recurring: false,
            rule: RecurrenceRule::default(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Attaches a rule and marks the event recurring.
    #[must_use]
    pub fn with_rule(mut self, rule: RecurrenceRule) -> Self {
        self.rule = rule;
        self.recurring = true;
        self
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Frequency to expand with, `None` for a single occurrence.
    #[must_use]
    pub fn recurrence_frequency(&self) -> Option<Frequency> {
        if self.recurring {
            self.rule.frequency
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence_frequency().is_some()
    }

    /// ## Summary
    /// Checks the event before any occurrence is generated from it.
    ///
    /// ## Errors
    /// Returns `ServiceError::EndBeforeStart` unless `end > start`, and
    /// `ServiceError::Rule` if a recurring event's rule is invalid.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.end <= self.start {
            return Err(ServiceError::EndBeforeStart);
        }
        if self.recurring {
            self.rule.validate()?;
        }
        Ok(())
    }
}

/// Key of an override: the event and the start its occurrence would have had.
pub type OverrideKey = (EventId, DateTime<Utc>);

/// Exception record for one generated occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceOverride {
    pub id: Uuid,
    pub event_id: EventId,
    pub original_start: DateTime<Utc>,
    pub new_start: Option<DateTime<Utc>>,
    pub new_end: Option<DateTime<Utc>>,
    pub is_cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OccurrenceOverride {
    fn blank(event_id: EventId, original_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_id,
            original_start,
            new_start: None,
            new_end: None,
            is_cancelled: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn cancellation(event_id: EventId, original_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            is_cancelled: true,
            ..Self::blank(event_id, original_start, now)
        }
    }

    #[must_use]
    pub fn reschedule(
        event_id: EventId,
        original_start: DateTime<Utc>,
        new_start: Option<DateTime<Utc>>,
        new_end: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            new_start,
            new_end,
            ..Self::blank(event_id, original_start, now)
        }
    }

    #[must_use]
    pub fn key(&self) -> OverrideKey {
        (self.event_id, self.original_start)
    }
}

/// A visible occurrence after overlay. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub event_id: EventId,
    pub original_start: DateTime<Utc>,
    pub displayed_start: DateTime<Utc>,
    pub displayed_end: DateTime<Utc>,
    pub is_recurring: bool,
}
