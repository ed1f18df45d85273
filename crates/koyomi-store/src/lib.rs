//! Event persistence: storage backends behind the [`EventStore`] seam and
//! the [`EventService`] mutation entry points on top.

pub mod error;
pub mod service;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use service::{DeleteScope, EventService};
pub use store::{EventStore, JsonFileStore, MemoryStore};
