//! Recurrence expansion and overlay engine.
//!
//! - `recurrence`: rule validation and occurrence generation
//! - `overlay`: per-occurrence cancellations and reschedules
//! - `materialize`: generation plus overlay across many events
//! - `store` / `command`: persistence seams and override writes
//! - `boundary`, `listing`, `export`: wire records, JSON listing and iCalendar output

pub mod boundary;
pub mod command;
pub mod error;
pub mod export;
pub mod listing;
pub mod materialize;
pub mod model;
pub mod overlay;
pub mod recurrence;
pub mod store;
