//! Command line surface of the `cadence` binary.

use std::path::PathBuf;

use cadence_core::config::Settings;
use cadence_service::boundary::parse_timestamp;
use cadence_service::command::{cancel_occurrence, reschedule_occurrence};
use cadence_service::error::ServiceError;
use cadence_service::export::{ExportSettings, export_calendar, export_event};
use cadence_service::listing::{build_listing, listing_json};
use cadence_service::materialize::CalendarMaterializer;
use cadence_service::model::{Event, EventId};
use cadence_service::store::{EventSource, UpsertOutcome};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::error::{AppError, AppResult};
use crate::store::JsonFileStore;

#[derive(Debug, Parser)]
#[command(name = "cadence", version, about = "Recurring event expansion and calendar export")]
pub struct Cli {
    /// Store file, overriding `store.path` from settings
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print visible occurrences in a window as JSON
    List {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Export visible occurrences in a window as an iCalendar document
    Export {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export one event with its recurrence rule
    ExportEvent {
        #[arg(long)]
        id: u64,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Cancel one occurrence of an event
    Cancel {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        original_start: String,
    },
    /// Move one occurrence of an event
    Reschedule {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        original_start: String,
        #[arg(long)]
        new_start: String,
        #[arg(long)]
        new_end: String,
    },
}

impl Cli {
    /// Store path from the flag, falling back to settings.
    #[must_use]
    pub fn store_path(&self, settings: &Settings) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| settings.store.path.clone())
    }
}

fn window(start: &str, end: &str) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    if end < start {
        return Err(ServiceError::EndBeforeStart.into());
    }
    Ok((start, end))
}

fn find_event(store: &JsonFileStore, id: u64) -> AppResult<Event> {
    store
        .event(EventId(id))?
        .ok_or_else(|| ServiceError::NotFound(format!("event {id}")).into())
}

fn deliver(text: String, out: Option<PathBuf>) -> AppResult<String> {
    let Some(path) = out else {
        return Ok(text);
    };
    std::fs::write(&path, &text).map_err(|source| AppError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(format!("Wrote {}", path.display()))
}

fn acknowledge(action: &str, outcome: UpsertOutcome) -> String {
    match outcome {
        UpsertOutcome::Created => format!("{action} (new override)"),
        UpsertOutcome::Updated => format!("{action} (override updated)"),
    }
}

/// ## Summary
/// Executes `command` against `store` and returns the text to print.
///
/// ## Errors
/// Returns an error if an argument fails to parse, the event is unknown,
/// the command is rejected, or output cannot be written.
#[tracing::instrument(skip_all, fields(command = ?command))]
pub fn run(command: Command, store: &mut JsonFileStore, settings: &Settings) -> AppResult<String> {
    let materializer = CalendarMaterializer::new(settings.calendar.order);

    match command {
        Command::List { start, end } => {
            let (start, end) = window(&start, &end)?;
            let occurrences = materializer.materialize_from_store(store, start, end)?;
            let entries = build_listing(&store.events()?, &occurrences);
            Ok(listing_json(&entries)?)
        }
        Command::Export { start, end, out } => {
            let (start, end) = window(&start, &end)?;
            let occurrences = materializer.materialize_from_store(store, start, end)?;
            let export = ExportSettings::from_config(&settings.calendar, Utc::now());
            let text = export_calendar(&store.events()?, &occurrences, &export)?;
            deliver(text, out)
        }
        Command::ExportEvent { id, out } => {
            let event = find_event(store, id)?;
            let export = ExportSettings::from_config(&settings.calendar, Utc::now());
            deliver(export_event(&event, &export)?, out)
        }
        Command::Cancel { id, original_start } => {
            let event = find_event(store, id)?;
            let outcome = cancel_occurrence(store, &event, parse_timestamp(&original_start)?)?;
            Ok(acknowledge("Cancelled", outcome))
        }
        Command::Reschedule {
            id,
            original_start,
            new_start,
            new_end,
        } => {
            let event = find_event(store, id)?;
            let outcome = reschedule_occurrence(
                store,
                &event,
                parse_timestamp(&original_start)?,
                parse_timestamp(&new_start)?,
                parse_timestamp(&new_end)?,
            )?;
            Ok(acknowledge("Rescheduled", outcome))
        }
    }
}
