//! Pure calendar computations: month grid construction, recurrence
//! expansion, and time-conflict detection.
//!
//! Nothing in this crate performs I/O or holds state. Every function is
//! deterministic given its inputs; "today" is always an explicit
//! parameter, never read from the system clock.

pub mod conflict;
pub mod expand;
pub mod grid;

pub use conflict::has_conflict;
pub use expand::{DayView, MonthData, Occurrence, OccurrenceKind, WeekView, expand_occurrences, month_data};
pub use grid::{Day, MonthWindow, Week, build_window};
