//! Recurrence expansion over a date window.
//!
//! Turns the stored event list into the concrete occurrences visible
//! within an inclusive `[start, end]` window, and buckets them onto the
//! month grid. Expansion is recomputed from scratch on every call; the
//! output never aliases the input records.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use koyomi_core::model::{Event, EventId, Frequency, Recurrence, WeekdaySet};

use crate::grid::{Day, MonthWindow, build_window};

/// Identity of a concrete occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum OccurrenceKind {
    /// The stored event itself, appearing on its anchor date.
    Original,
    /// An instance generated from the parent's recurrence rule.
    Generated {
        parent: EventId,
        /// 1-based position in the generation sequence. Advances for every
        /// computed step, including instances discarded for falling before
        /// the window start, so it is stable across window changes.
        sequence: u32,
    },
}

/// A concrete, dated appearance of an event on the calendar.
///
/// Freshly allocated on every expansion; generated instances carry the
/// parent's fields with only the date replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub event: Event,
    pub kind: OccurrenceKind,
}

impl Occurrence {
    /// The calendar day this occurrence falls on.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.event.date
    }

    /// Identifier unique within the parent's series: the stored id for
    /// originals, `"{parent}-{sequence}"` for generated instances.
    #[must_use]
    pub fn instance_id(&self) -> String {
        match self.kind {
            OccurrenceKind::Original => self.event.id.to_string(),
            OccurrenceKind::Generated { parent, sequence } => format!("{parent}-{sequence}"),
        }
    }
}

/// ## Summary
/// Expands every event into the occurrences whose dates fall inside the
/// inclusive `[start, end]` window.
///
/// Originals are emitted unchanged when their anchor date is in the
/// window; recurring rules additionally generate instances strictly after
/// the anchor, bounded by the window end, the rule's own end date, and
/// the rule's occurrence count.
#[must_use]
pub fn expand_occurrences(events: &[Event], start: NaiveDate, end: NaiveDate) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();

    for event in events {
        if event.date >= start && event.date <= end {
            occurrences.push(Occurrence {
                event: event.clone(),
                kind: OccurrenceKind::Original,
            });
        }

        if event.recurrence.is_recurring() {
            generate_instances(event, start, end, &mut occurrences);
        }
    }

    occurrences
}

/// Generates recurring instances of one event into `out`.
///
/// The stepping loop checks the window-end bound on every iteration, so a
/// rule with neither `end_date` nor `occurrences` still terminates.
/// Instances stepped to before the window start are counted but not
/// emitted; stepping continues from them.
fn generate_instances(
    event: &Event,
    window_start: NaiveDate,
    window_end: NaiveDate,
    out: &mut Vec<Occurrence>,
) {
    let rule = &event.recurrence;

    // Generation never starts from an anchor past the window.
    if event.date > window_end {
        return;
    }

    // The tighter of window end and rule end bounds generation entirely.
    let bound = rule
        .end_date
        .map_or(window_end, |rule_end| rule_end.min(window_end));

    let mut current = event.date;
    let mut generated: u32 = 0;

    loop {
        if rule.occurrences.is_some_and(|max| generated >= max) {
            break;
        }
        let Some(next) = next_occurrence(current, rule) else {
            break;
        };
        if next > bound {
            break;
        }

        generated += 1;
        if next >= window_start {
            let mut instance = event.clone();
            instance.date = next;
            instance.parent_id = Some(event.id);
            out.push(Occurrence {
                event: instance,
                kind: OccurrenceKind::Generated {
                    parent: event.id,
                    sequence: generated,
                },
            });
        }
        current = next;
    }

    tracing::trace!(
        event = %event.id,
        frequency = ?rule.frequency,
        generated,
        "expanded recurring event"
    );
}

/// The next occurrence date strictly after `date` under `rule`.
///
/// Returns `None` for non-recurring rules and on calendar overflow.
fn next_occurrence(date: NaiveDate, rule: &Recurrence) -> Option<NaiveDate> {
    let interval = rule.effective_interval();

    match rule.frequency {
        Frequency::Daily | Frequency::Custom => date.checked_add_days(Days::new(u64::from(interval))),
        Frequency::Weekly => {
            if rule.weekdays.is_empty() {
                date.checked_add_days(Days::new(7 * u64::from(interval)))
            } else {
                next_matching_weekday(date, rule.weekdays)
            }
        }
        // chrono clamps the day of month to the last valid day of the
        // target month (Jan 31 + 1 month = Feb 28/29). Later steps start
        // from the clamped date; the anchor day never resurfaces.
        Frequency::Monthly => date.checked_add_months(Months::new(interval)),
        Frequency::None => None,
    }
}

/// First date strictly after `date` whose weekday is in `set`.
///
/// The caller guarantees `set` is non-empty, so scanning the next seven
/// days always finds a match.
fn next_matching_weekday(date: NaiveDate, set: WeekdaySet) -> Option<NaiveDate> {
    let mut next = date.succ_opt()?;
    for _ in 0..7 {
        if set.contains_weekday(next.weekday()) {
            return Some(next);
        }
        next = next.succ_opt()?;
    }
    None
}

/// A grid cell together with the occurrences falling on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub day: Day,
    pub occurrences: Vec<Occurrence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub days: Vec<DayView>,
}

/// A fully assembled month: the grid window with occurrences attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub weeks: Vec<WeekView>,
}

/// ## Summary
/// Builds the month grid for `reference` and attaches every visible
/// occurrence to its day cell by exact date match.
///
/// Within a day, all-day occurrences sort first, then by start time, then
/// by title.
#[must_use]
pub fn month_data(reference: NaiveDate, today: NaiveDate, events: &[Event]) -> MonthData {
    let window = build_window(reference, today);
    let mut occurrences = expand_occurrences(events, window.first, window.last);

    occurrences.sort_by(|a, b| {
        a.date()
            .cmp(&b.date())
            .then_with(|| a.event.time.cmp(&b.event.time))
            .then_with(|| a.event.title.cmp(&b.event.title))
    });

    let MonthWindow {
        year,
        month,
        first,
        last,
        weeks,
    } = window;

    let mut remaining = occurrences.into_iter().peekable();
    let weeks = weeks
        .into_iter()
        .map(|week| WeekView {
            days: week
                .days
                .into_iter()
                .map(|day| {
                    let mut bucket = Vec::new();
                    while remaining.peek().is_some_and(|occ| occ.date() == day.date) {
                        // Occurrences are sorted by date and the grid walks
                        // dates in order, so the head always belongs here.
                        if let Some(occ) = remaining.next() {
                            bucket.push(occ);
                        }
                    }
                    DayView {
                        day,
                        occurrences: bucket,
                    }
                })
                .collect(),
        })
        .collect();

    MonthData {
        year,
        month,
        first,
        last,
        weeks,
    }
}
