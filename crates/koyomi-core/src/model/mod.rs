//! Domain model for stored calendar events.

mod event;
mod recurrence;
mod time;

pub use event::{Category, Event, EventDraft, EventId};
pub use recurrence::{Frequency, Recurrence};
pub use time::{TimeOfDay, WeekdaySet};
