//! Wire records and their conversion into validated domain types.
//!
//! Timestamps travel as ISO-8601 strings, weekday sets as comma-separated
//! two-letter codes and the nth-weekday pattern's weekday as an index with
//! 0 = Monday. Everything is parsed once here.

use std::num::NonZeroU32;

use cadence_rfc::rfc::ical::core::{parse_weekday_code, weekday_code};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Event, EventId, OccurrenceOverride};
use crate::recurrence::{Frequency, RecurrenceRule, WeekdaySet};

/// Naive layouts accepted after RFC 3339; they are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Stored or submitted form of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_day: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_week: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_weekday: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

/// Stored form of an occurrence override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub event_id: EventId,
    pub original_start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_end: Option<String>,
    #[serde(default)]
    pub is_cancelled: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// ## Summary
/// Parses an ISO-8601 timestamp. Offsets are converted to UTC; naive values
/// and bare dates are read as UTC.
///
/// ## Errors
/// Returns `ServiceError::InvalidTimestamp` if no accepted layout matches.
pub fn parse_timestamp(value: &str) -> ServiceResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ServiceError::InvalidTimestamp(value.to_string()))
}

/// Renders a timestamp as RFC 3339 with a `Z` suffix. Fractional seconds are
/// kept when present so the text parses back to the same instant.
#[must_use]
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// ## Summary
/// Parses comma-separated weekday codes (`MO,WE,FR`). Blank entries are skipped.
///
/// ## Errors
/// Returns `ServiceError::InvalidWeekdayCode` for the first unknown code.
pub fn parse_weekdays(value: &str) -> ServiceResult<WeekdaySet> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| {
            parse_weekday_code(code)
                .ok_or_else(|| ServiceError::InvalidWeekdayCode(code.to_string()))
        })
        .collect()
}

/// Renders a weekday set as comma-separated codes, Monday first.
#[must_use]
pub fn format_weekdays(days: WeekdaySet) -> String {
    days.iter()
        .map(weekday_code)
        .collect::<Vec<_>>()
        .join(",")
}

/// ## Summary
/// Maps a weekday index (0 = Monday .. 6 = Sunday) to a weekday.
///
/// ## Errors
/// Returns `ServiceError::InvalidWeekdayCode` for indexes above 6.
pub fn weekday_from_index(index: u8) -> ServiceResult<Weekday> {
    Weekday::try_from(index)
        .ok()
        .ok_or_else(|| ServiceError::InvalidWeekdayCode(index.to_string()))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "weekday indexes are 0..=6"
)]
fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

/// ## Summary
/// Parses a frequency name (`DAILY`, `WEEKLY`, `MONTHLY`, `YEARLY`).
///
/// ## Errors
/// Returns `ServiceError::InvalidFrequency` for anything else.
pub fn parse_frequency(value: &str) -> ServiceResult<Frequency> {
    Frequency::parse(value.trim()).ok_or_else(|| ServiceError::InvalidFrequency(value.to_string()))
}

/// ## Summary
/// Parses an IANA timezone name.
///
/// ## Errors
/// Returns `ServiceError::UnknownTimezone` if the name is not in the tz database.
pub fn parse_timezone(value: &str) -> ServiceResult<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .ok()
        .ok_or_else(|| ServiceError::UnknownTimezone(value.to_string()))
}

fn parse_interval(value: Option<u32>) -> ServiceResult<NonZeroU32> {
    value.map_or(Ok(NonZeroU32::MIN), |n| {
        NonZeroU32::new(n).ok_or(ServiceError::InvalidInterval(n))
    })
}

/// Treats empty strings like absent values.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_optional_timestamp(value: Option<&str>) -> ServiceResult<Option<DateTime<Utc>>> {
    present(value).map(parse_timestamp).transpose()
}

impl TryFrom<EventRecord> for Event {
    type Error = ServiceError;

    fn try_from(record: EventRecord) -> ServiceResult<Self> {
        let rule = RecurrenceRule {
            frequency: present(record.frequency.as_deref())
                .map(parse_frequency)
                .transpose()?,
            interval: parse_interval(record.interval)?,
            weekdays: present(record.weekdays.as_deref())
                .map(parse_weekdays)
                .transpose()?
                .unwrap_or_default(),
            month_day: record.month_day,
            month_week: record.month_week,
            month_weekday: record.month_weekday.map(weekday_from_index).transpose()?,
            until: parse_optional_timestamp(record.until.as_deref())?,
        };

        let event = Event {
            id: record.id,
            title: record.title,
            description: record.description,
            start: parse_timestamp(&record.start)?,
            end: parse_timestamp(&record.end)?,
            timezone: present(record.timezone.as_deref())
                .map(parse_timezone)
                .transpose()?
                .unwrap_or(Tz::UTC),
            recurring: record.is_recurring,
            rule,
        };

        event.validate()?;
        tracing::trace!(event_id = %event.id, recurring = event.recurring, "Event record accepted");
        Ok(event)
    }
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        let rule = &event.rule;
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            start: format_timestamp(event.start),
            end: format_timestamp(event.end),
            timezone: Some(event.timezone.name().to_string()),
            is_recurring: event.recurring,
            frequency: rule.frequency.map(|f| f.as_str().to_string()),
            interval: Some(rule.interval.get()),
            weekdays: (!rule.weekdays.is_empty()).then(|| format_weekdays(rule.weekdays)),
            month_day: rule.month_day,
            month_week: rule.month_week,
            month_weekday: rule.month_weekday.map(weekday_index),
            until: rule.until.map(format_timestamp),
        }
    }
}

impl TryFrom<OverrideRecord> for OccurrenceOverride {
    type Error = ServiceError;

    fn try_from(record: OverrideRecord) -> ServiceResult<Self> {
        Ok(Self {
            id: record.id,
            event_id: record.event_id,
            original_start: parse_timestamp(&record.original_start)?,
            new_start: parse_optional_timestamp(record.new_start.as_deref())?,
            new_end: parse_optional_timestamp(record.new_end.as_deref())?,
            is_cancelled: record.is_cancelled,
            created_at: parse_timestamp(&record.created_at)?,
            updated_at: parse_timestamp(&record.updated_at)?,
        })
    }
}

impl From<&OccurrenceOverride> for OverrideRecord {
    fn from(record: &OccurrenceOverride) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            original_start: format_timestamp(record.original_start),
            new_start: record.new_start.map(format_timestamp),
            new_end: record.new_end.map(format_timestamp),
            is_cancelled: record.is_cancelled,
            created_at: format_timestamp(record.created_at),
            updated_at: format_timestamp(record.updated_at),
        }
    }
}
