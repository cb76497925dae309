//! JSON document persistence for events and overrides.

use std::path::{Path, PathBuf};

use cadence_service::boundary::{EventRecord, OverrideRecord};
use cadence_service::error::{ServiceError, ServiceResult};
use cadence_service::model::{Event, EventId, OccurrenceOverride};
use cadence_service::store::{EventSource, InMemoryStore, OverrideStore, UpsertOutcome};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    events: Vec<EventRecord>,
    #[serde(default)]
    overrides: Vec<OverrideRecord>,
}

/// Store backed by a single JSON file, rewritten after every override upsert.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl JsonFileStore {
    /// ## Summary
    /// Loads the store at `path`. A missing file yields an empty store.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read, is not a store document,
    /// or holds a record that fails validation.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let document = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str::<StoreDocument>(&text).map_err(|source| {
                AppError::Document {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Store file not found, starting empty");
                StoreDocument::default()
            }
            Err(source) => return Err(AppError::Io { path, source }),
        };

        let events = document
            .events
            .into_iter()
            .map(Event::try_from)
            .collect::<ServiceResult<Vec<_>>>()?;
        let overrides = document
            .overrides
            .into_iter()
            .map(OccurrenceOverride::try_from)
            .collect::<ServiceResult<Vec<_>>>()?;

        tracing::debug!(
            events = events.len(),
            overrides = overrides.len(),
            "Store loaded"
        );

        Ok(Self {
            path,
            inner: InMemoryStore::from_parts(events, overrides),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds or replaces an event in memory. Call [`Self::save`] to persist it.
    pub fn insert_event(&mut self, event: Event) {
        self.inner.insert_event(event);
    }

    /// ## Summary
    /// Writes the current events and overrides back to the store file.
    ///
    /// ## Errors
    /// Returns an error if the document cannot be serialized or written.
    pub fn save(&self) -> AppResult<()> {
        let document = StoreDocument {
            events: self.inner.event_list().iter().map(EventRecord::from).collect(),
            overrides: self
                .inner
                .override_list()
                .iter()
                .map(OverrideRecord::from)
                .collect(),
        };
        let text = serde_json::to_string_pretty(&document).map_err(|source| AppError::Document {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, text).map_err(|source| AppError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "Store saved");
        Ok(())
    }
}

impl EventSource for JsonFileStore {
    fn events(&self) -> ServiceResult<Vec<Event>> {
        self.inner.events()
    }

    fn event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        self.inner.event(id)
    }
}

impl OverrideStore for JsonFileStore {
    fn overrides_for(&self, event_ids: &[EventId]) -> ServiceResult<Vec<OccurrenceOverride>> {
        self.inner.overrides_for(event_ids)
    }

    fn upsert_override(&mut self, record: OccurrenceOverride) -> ServiceResult<UpsertOutcome> {
        let outcome = self.inner.upsert_override(record)?;
        self.save()
            .map_err(|err| ServiceError::Store(err.to_string()))?;
        Ok(outcome)
    }
}
