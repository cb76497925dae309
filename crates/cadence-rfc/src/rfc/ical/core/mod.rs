//! iCalendar core models (RFC 5545).
//!
//! These types cover what calendar export needs:
//! - Deterministic serialization: canonical ordering for stable output
//! - Type safety: recurrence parts and date-times are typed, not strings

mod component;
mod datetime;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use parameter::Parameter;
pub use property::Property;
pub use rrule::{Frequency, RRule, WeekdayNum, parse_weekday_code, weekday_code};
pub use value::Value;
