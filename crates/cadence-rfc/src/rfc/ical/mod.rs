//! iCalendar (RFC 5545) support.
//!
//! - `core`: component, property and value types
//! - `build`: escaping, folding and canonical serialization

pub mod build;
pub mod core;

#[cfg(test)]
mod tests;
