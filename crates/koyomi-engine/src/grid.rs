//! Month grid window construction.
//!
//! The visible window for a month is the month itself expanded outward to
//! whole Sunday-to-Saturday weeks, so the grid always holds a multiple of
//! seven days with no gaps or duplicates.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// Whether the date belongs to the reference month (padding days from
    /// adjacent months carry `false`).
    pub in_month: bool,
    pub is_today: bool,
}

/// A Sunday-to-Saturday row of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: [Day; 7],
}

/// The full visible window for one reference month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// First visible date (the Sunday on or before the first of the month).
    pub first: NaiveDate,
    /// Last visible date (the Saturday on or after the last of the month).
    pub last: NaiveDate,
    pub weeks: Vec<Week>,
}

/// ## Summary
/// Builds the visible grid window for the month containing `reference`.
///
/// Deterministic given `(reference, today)`; the caller supplies the
/// current real-world date rather than this function reading a clock.
#[must_use]
pub fn build_window(reference: NaiveDate, today: NaiveDate) -> MonthWindow {
    // Day 1 exists in every month.
    let month_start = reference.with_day(1).unwrap_or(reference);
    let month_end = last_day_of_month(month_start);

    let first = month_start
        .checked_sub_days(Days::new(u64::from(
            month_start.weekday().num_days_from_sunday(),
        )))
        .unwrap_or(month_start);
    let last = month_end
        .checked_add_days(Days::new(u64::from(
            6 - month_end.weekday().num_days_from_sunday(),
        )))
        .unwrap_or(month_end);

    let days: Vec<Day> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| Day {
            date,
            in_month: date.year() == month_start.year() && date.month() == month_start.month(),
            is_today: date == today,
        })
        .collect();

    let mut weeks = Vec::with_capacity(days.len() / 7);
    for chunk in days.chunks_exact(7) {
        if let Ok(days) = <[Day; 7]>::try_from(chunk) {
            weeks.push(Week { days });
        }
    }

    MonthWindow {
        year: month_start.year(),
        month: month_start.month(),
        first,
        last,
        weeks,
    }
}

/// Last calendar day of the month containing `month_start`.
fn last_day_of_month(month_start: NaiveDate) -> NaiveDate {
    month_start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(month_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn march_2024_pads_to_six_full_weeks() {
        // March 2024 starts on a Friday and ends on a Sunday.
        let window = build_window(date(2024, 3, 15), date(2024, 3, 15));

        assert_eq!(window.first, date(2024, 2, 25));
        assert_eq!(window.last, date(2024, 4, 6));
        assert_eq!(window.weeks.len(), 6);
        assert!(!window.weeks[0].days[0].in_month);
        assert!(window.weeks[0].days[5].in_month); // March 1st
    }

    #[test_log::test]
    fn perfectly_aligned_month_has_no_padding() {
        // February 2026 starts on a Sunday and spans exactly four weeks.
        let window = build_window(date(2026, 2, 10), date(2026, 2, 1));

        assert_eq!(window.first, date(2026, 2, 1));
        assert_eq!(window.last, date(2026, 2, 28));
        assert_eq!(window.weeks.len(), 4);
        assert!(
            window
                .weeks
                .iter()
                .flat_map(|week| week.days.iter())
                .all(|day| day.in_month)
        );
    }

    #[test_log::test]
    fn weeks_run_sunday_to_saturday_without_gaps() {
        for reference in [date(2024, 1, 1), date(2024, 2, 29), date(2031, 12, 31)] {
            let window = build_window(reference, reference);
            let days: Vec<Day> = window
                .weeks
                .iter()
                .flat_map(|week| week.days.iter().copied())
                .collect();

            assert_eq!(days.len() % 7, 0);
            assert_eq!(days[0].date.weekday(), chrono::Weekday::Sun);
            for pair in days.windows(2) {
                assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
            }

            let unique: HashSet<NaiveDate> = days.iter().map(|day| day.date).collect();
            assert_eq!(unique.len(), days.len());

            let in_month = days.iter().filter(|day| day.in_month).count();
            let month_len = (last(reference) - first(reference)).num_days() + 1;
            assert_eq!(i64::try_from(in_month).unwrap(), month_len);
        }
    }

    fn first(reference: NaiveDate) -> NaiveDate {
        reference.with_day(1).unwrap()
    }

    fn last(reference: NaiveDate) -> NaiveDate {
        last_day_of_month(first(reference))
    }

    #[test_log::test]
    fn every_day_of_reference_month_appears_exactly_once() {
        let reference = date(2025, 7, 4);
        let window = build_window(reference, reference);
        let in_month: Vec<NaiveDate> = window
            .weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|day| day.in_month)
            .map(|day| day.date)
            .collect();

        let expected: Vec<NaiveDate> = first(reference)
            .iter_days()
            .take_while(|d| *d <= last(reference))
            .collect();
        assert_eq!(in_month, expected);
    }

    #[test_log::test]
    fn today_is_marked_only_when_visible() {
        let window = build_window(date(2024, 3, 1), date(2024, 3, 15));
        let marked: Vec<NaiveDate> = window
            .weeks
            .iter()
            .flat_map(|week| week.days.iter())
            .filter(|day| day.is_today)
            .map(|day| day.date)
            .collect();
        assert_eq!(marked, vec![date(2024, 3, 15)]);

        let elsewhere = build_window(date(2024, 3, 1), date(2030, 1, 1));
        assert!(
            elsewhere
                .weeks
                .iter()
                .flat_map(|week| week.days.iter())
                .all(|day| !day.is_today)
        );
    }
}
