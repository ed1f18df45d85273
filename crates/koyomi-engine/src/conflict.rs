//! Advisory time-conflict detection between same-day events.

use koyomi_core::model::{Event, TimeOfDay};

/// Duration assumed for events with a start time but no end time, in
/// minutes. Applies to conflict comparison only; stored records are never
/// mutated.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// ## Summary
/// Whether two events occupy overlapping time on the same calendar day.
///
/// Intervals are half-open `[start, end)`: an event ending exactly when
/// another starts does not conflict. Events without a start time (all-day
/// events) never conflict, and neither do events on different dates. The
/// check is symmetric.
#[must_use]
pub fn has_conflict(a: &Event, b: &Event) -> bool {
    let (Some(a_start), Some(b_start)) = (a.time, b.time) else {
        return false;
    };
    if a.date != b.date {
        return false;
    }

    let (a_start, a_end) = span(a_start, a.end_time);
    let (b_start, b_end) = span(b_start, b.end_time);

    // An explicit end at or before the start is an empty interval and
    // overlaps nothing.
    if a_end <= a_start || b_end <= b_start {
        return false;
    }

    a_start < b_end && b_start < a_end
}

/// Occupied minute interval of an event. The default duration may extend
/// past midnight arithmetically; comparison stays within one date, so no
/// wrap-around is applied.
fn span(start: TimeOfDay, end: Option<TimeOfDay>) -> (u32, u32) {
    let start = u32::from(start.minutes_from_midnight());
    let end = end.map_or(start + DEFAULT_DURATION_MINUTES, |time| {
        u32::from(time.minutes_from_midnight())
    });
    (start, end)
}
