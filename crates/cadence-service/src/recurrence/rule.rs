//! Recurrence rule value type and its validation.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc, Weekday};
use thiserror::Error;

use super::WeekdaySet;

pub use cadence_rfc::rfc::ical::core::Frequency;

/// Reasons a recurring event's rule cannot be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Recurring event has no frequency")]
    MissingFrequency,

    #[error("Weekly recurrence requires at least one weekday")]
    MissingWeekdays,

    #[error("Monthly recurrence requires a day of month or an nth weekday")]
    MissingMonthlyPattern,

    #[error("Day of month {0} is outside 1..=31")]
    MonthDayOutOfRange(u8),

    #[error("Week of month {0} is outside -5..=-1 and 1..=5")]
    MonthWeekOutOfRange(i8),
}

/// Which day a monthly rule lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyPattern {
    /// Fixed day of the month. Days past 28 are clamped to 28.
    DayOfMonth(u8),
    /// Nth weekday of the month; negative weeks count from the end (`-1` = last).
    NthWeekday { week: i8, weekday: Weekday },
}

impl MonthlyPattern {
    /// Day actually used for a `DayOfMonth` pattern.
    #[must_use]
    pub fn effective_day(day: u8) -> u8 {
        day.min(28)
    }
}

/// Recurrence configuration embedded in an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Option<Frequency>,
    pub interval: NonZeroU32,
    pub weekdays: WeekdaySet,
    pub month_day: Option<u8>,
    pub month_week: Option<i8>,
    pub month_weekday: Option<Weekday>,
    /// Inclusive upper bound for generated starts.
    pub until: Option<DateTime<Utc>>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            frequency: None,
            interval: NonZeroU32::MIN,
            weekdays: WeekdaySet::EMPTY,
            month_day: None,
            month_week: None,
            month_weekday: None,
            until: None,
        }
    }
}

impl RecurrenceRule {
    #[must_use]
    pub fn with_frequency(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::with_frequency(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly(weekdays: WeekdaySet) -> Self {
        Self {
            weekdays,
            ..Self::with_frequency(Frequency::Weekly)
        }
    }

    #[must_use]
    pub fn monthly_on_day(day: u8) -> Self {
        Self {
            month_day: Some(day),
            ..Self::with_frequency(Frequency::Monthly)
        }
    }

    #[must_use]
    pub fn monthly_on_nth(week: i8, weekday: Weekday) -> Self {
        Self {
            month_week: Some(week),
            month_weekday: Some(weekday),
            ..Self::with_frequency(Frequency::Monthly)
        }
    }

    #[must_use]
    pub fn yearly() -> Self {
        Self::with_frequency(Frequency::Yearly)
    }

    #[must_use]
    pub fn with_interval(mut self, interval: NonZeroU32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// ## Summary
    /// Resolves the monthly pattern. A day of month wins over an nth weekday.
    #[must_use]
    pub fn monthly_pattern(&self) -> Option<MonthlyPattern> {
        if let Some(day) = self.month_day {
            return Some(MonthlyPattern::DayOfMonth(day));
        }
        match (self.month_week, self.month_weekday) {
            (Some(week), Some(weekday)) => Some(MonthlyPattern::NthWeekday { week, weekday }),
            _ => None,
        }
    }

    /// ## Summary
    /// Checks the rule of a recurring event before it is expanded.
    ///
    /// ## Errors
    /// Returns the first `RuleError` that applies, checking frequency, then the
    /// pattern the frequency requires, then value ranges.
    pub fn validate(&self) -> Result<(), RuleError> {
        let Some(frequency) = self.frequency else {
            return Err(RuleError::MissingFrequency);
        };

        match frequency {
            Frequency::Weekly if self.weekdays.is_empty() => {
                return Err(RuleError::MissingWeekdays);
            }
            Frequency::Monthly if self.monthly_pattern().is_none() => {
                return Err(RuleError::MissingMonthlyPattern);
            }
            _ => {}
        }

        if let Some(day) = self.month_day.filter(|day| !(1..=31).contains(day)) {
            return Err(RuleError::MonthDayOutOfRange(day));
        }
        if let Some(week) = self
            .month_week
            .filter(|week| *week == 0 || !(-5..=5).contains(week))
        {
            return Err(RuleError::MonthWeekOutOfRange(week));
        }

        Ok(())
    }
}
