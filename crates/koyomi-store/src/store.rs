//! Storage backends for the raw event list.
//!
//! The original system persisted the full event array wholesale on every
//! change; the [`EventStore`] trait keeps that contract while letting the
//! backend be injected (in-memory for tests, a JSON file in production).

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use koyomi_core::model::Event;

use crate::error::StoreResult;

/// Wholesale load/save of the stored event list.
pub trait EventStore {
    /// Loads every stored event.
    ///
    /// ## Errors
    /// Returns an error if the backing storage cannot be read or decoded.
    fn load(&self) -> StoreResult<Vec<Event>>;

    /// Replaces the stored event list.
    ///
    /// ## Errors
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, events: &[Event]) -> StoreResult<()>;
}

/// Ephemeral in-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<Vec<Event>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with events.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Event>> {
        let guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, events: &[Event]) -> StoreResult<()> {
        let mut guard = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = events.to_vec();
        Ok(())
    }
}

/// JSON-file backend: one array of event records at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    /// A missing file reads as an empty list (first run).
    fn load(&self) -> StoreResult<Vec<Event>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no event file yet, starting empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes through a sibling temp file and renames over the target, so
    /// a failed write never truncates the existing list.
    fn save(&self, events: &[Event]) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(events)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = events.len(), "saved event list");
        Ok(())
    }
}
