//! Mutation entry points over an injected storage backend.
//!
//! Every mutation loads the full list, applies the change, and persists
//! wholesale before returning, mirroring the original system's
//! save-on-every-change behavior.

use chrono::NaiveDate;

use koyomi_core::model::{Event, EventDraft, EventId};

use crate::error::{StoreError, StoreResult};
use crate::store::EventStore;

/// How far a deletion reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// Remove exactly the record with the given id.
    Single,
    /// Remove the whole series: the root event and every stored record
    /// linked to it through `parent_id`. Invoked on a stored instance,
    /// resolves to that instance's parent first.
    Series,
}

/// Event persistence service consumed by the presentation layer.
#[derive(Debug)]
pub struct EventService<S> {
    store: S,
}

impl<S: EventStore> EventService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// ## Summary
    /// Returns every stored event.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be read.
    pub fn list(&self) -> StoreResult<Vec<Event>> {
        self.store.load()
    }

    /// ## Summary
    /// Stores a new event under a freshly generated id.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be read or written.
    pub fn create(&self, draft: EventDraft) -> StoreResult<EventId> {
        let id = EventId::new();
        let mut events = self.store.load()?;
        events.push(draft.into_event(id));
        self.store.save(&events)?;
        tracing::debug!(%id, "created event");
        Ok(id)
    }

    /// ## Summary
    /// Replaces a stored event wholesale, matched by id.
    ///
    /// ## Errors
    /// `NotFound` if no record carries the event's id; otherwise fails on
    /// storage errors.
    pub fn update(&self, event: Event) -> StoreResult<()> {
        let mut events = self.store.load()?;
        let slot = events
            .iter_mut()
            .find(|stored| stored.id == event.id)
            .ok_or_else(|| StoreError::NotFound(event.id.to_string()))?;
        *slot = event;
        self.store.save(&events)?;
        Ok(())
    }

    /// ## Summary
    /// Deletes an event record, or its whole series.
    ///
    /// With [`DeleteScope::Single`], only the record with the given id is
    /// removed. Ephemeral generated occurrences are never stored, so
    /// single-deleting one that was never materialized reports `NotFound`
    /// rather than silently succeeding.
    ///
    /// ## Errors
    /// `NotFound` if the id matches no stored record; otherwise fails on
    /// storage errors.
    pub fn delete(&self, id: EventId, scope: DeleteScope) -> StoreResult<()> {
        let mut events = self.store.load()?;
        let target = events
            .iter()
            .find(|event| event.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        match scope {
            DeleteScope::Single => {
                events.retain(|event| event.id != id);
            }
            DeleteScope::Series => {
                let root = target.parent_id.unwrap_or(id);
                events.retain(|event| event.id != root && event.parent_id != Some(root));
            }
        }

        self.store.save(&events)?;
        tracing::debug!(%id, ?scope, "deleted event");
        Ok(())
    }

    /// ## Summary
    /// Reschedules an event to a new anchor date, leaving every other
    /// field untouched (drag-to-reschedule).
    ///
    /// ## Errors
    /// `NotFound` if the id matches no stored record; otherwise fails on
    /// storage errors.
    pub fn move_event(&self, id: EventId, date: NaiveDate) -> StoreResult<()> {
        let mut events = self.store.load()?;
        let slot = events
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        slot.date = date;
        self.store.save(&events)?;
        tracing::debug!(%id, %date, "moved event");
        Ok(())
    }

    /// ## Summary
    /// Returns the stored events whose time interval overlaps the
    /// candidate's on the same day, excluding the candidate's own record.
    ///
    /// Advisory only: it is checked at creation/edit time and never
    /// enforced against data created out-of-band.
    ///
    /// ## Errors
    /// Fails if the backing store cannot be read.
    pub fn conflicts(&self, candidate: &Event) -> StoreResult<Vec<Event>> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .filter(|stored| {
                stored.id != candidate.id && koyomi_engine::has_conflict(stored, candidate)
            })
            .collect())
    }
}
