//! iCalendar (RFC 5545) model and serializer used for calendar export.

pub mod error;
pub mod rfc;
