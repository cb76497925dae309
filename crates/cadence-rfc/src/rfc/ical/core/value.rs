//! iCalendar value types (RFC 5545 §3.3).

use super::{DateTime, RRule};

/// Property value.
///
/// The rendered string is kept separately on the property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// DATE-TIME value.
    DateTime(DateTime),
    /// RECUR value (recurrence rule).
    Recur(Box<RRule>),
    /// TEXT value (unescaped).
    Text(String),
}

impl Value {
    /// Returns the text if this is a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the rule if this is a RECUR value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(rrule) => Some(rrule),
            _ => None,
        }
    }
}
