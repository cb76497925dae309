//! DATE-TIME values (RFC 5545 §3.3.5).

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Utc};

use crate::error::{RfcError, RfcResult};

/// How a DATE-TIME is anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTimeForm {
    /// Wall-clock time with no zone, e.g. `19980118T230000`.
    Floating,
    /// Absolute instant, written with a trailing `Z`.
    Utc,
    /// Wall-clock time in a named zone, written with a `TZID` parameter.
    Zoned { tzid: String },
}

/// A DATE-TIME value at whole-second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    pub local: NaiveDateTime,
    pub form: DateTimeForm,
}

impl DateTime {
    /// ## Summary
    /// UTC DATE-TIME for `instant`. Sub-second precision is dropped.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the year cannot be written as four digits.
    pub fn from_chrono(instant: &chrono::DateTime<Utc>) -> RfcResult<Self> {
        Self::checked(instant.naive_utc(), DateTimeForm::Utc)
    }

    /// ## Summary
    /// Floating DATE-TIME for a wall-clock time.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the year cannot be written as four digits.
    pub fn floating(local: NaiveDateTime) -> RfcResult<Self> {
        Self::checked(local, DateTimeForm::Floating)
    }

    /// ## Summary
    /// DATE-TIME for a wall-clock time in the zone `tzid`.
    ///
    /// ## Errors
    /// Returns `RfcError::ValidationError` if the year cannot be written as four digits.
    pub fn zoned(local: NaiveDateTime, tzid: impl Into<String>) -> RfcResult<Self> {
        Self::checked(local, DateTimeForm::Zoned { tzid: tzid.into() })
    }

    fn checked(local: NaiveDateTime, form: DateTimeForm) -> RfcResult<Self> {
        if !(0..=9999).contains(&local.year()) {
            return Err(RfcError::ValidationError(format!(
                "year {} out of range",
                local.year()
            )));
        }
        Ok(Self { local, form })
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.form == DateTimeForm::Utc
    }

    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Floating | DateTimeForm::Utc => None,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format("%Y%m%dT%H%M%S"))?;
        if self.is_utc() {
            f.write_str("Z")?;
        }
        Ok(())
    }
}
