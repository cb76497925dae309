//! Shared configuration, constants and error types for the Cadence workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
