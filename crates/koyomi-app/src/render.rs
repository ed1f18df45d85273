//! Plain-text rendering of an assembled month.

use std::fmt::Write as _;

use chrono::NaiveDate;
use koyomi_engine::{DayView, MonthData, Occurrence};

const WEEKDAY_HEADER: &str = "  Sun  Mon  Tue  Wed  Thu  Fri  Sat";

/// Formats the month grid followed by a per-day agenda of the visible
/// occurrences belonging to the reference month.
#[must_use]
pub fn render_month(data: &MonthData) -> String {
    let mut out = String::new();

    let title = NaiveDate::from_ymd_opt(data.year, data.month, 1)
        .map_or_else(|| format!("{}-{:02}", data.year, data.month), |first| {
            first.format("%B %Y").to_string()
        });
    let width = WEEKDAY_HEADER.len();
    let _ = writeln!(out, "{title:^width$}");
    let _ = writeln!(out, "{WEEKDAY_HEADER}");

    for week in &data.weeks {
        for view in &week.days {
            out.push_str(&cell(view));
        }
        out.push('\n');
    }

    let mut agenda = String::new();
    for view in data.weeks.iter().flat_map(|week| week.days.iter()) {
        if !view.day.in_month {
            continue;
        }
        for occurrence in &view.occurrences {
            let _ = writeln!(
                agenda,
                "{}  {:<13}  {} ({})",
                view.day.date.format("%b %d"),
                time_label(occurrence),
                occurrence.event.title,
                occurrence.event.category,
            );
        }
    }
    if !agenda.is_empty() {
        out.push('\n');
        out.push_str(&agenda);
    }

    out
}

/// One five-column grid cell: day number, `*` when occurrences are
/// attached, brackets around today.
fn cell(view: &DayView) -> String {
    let number = view.day.date.format("%e").to_string();
    let mark = if view.occurrences.is_empty() { ' ' } else { '*' };
    if view.day.is_today {
        format!("[{number}{mark}]")
    } else {
        format!(" {number}{mark} ")
    }
}

fn time_label(occurrence: &Occurrence) -> String {
    match (occurrence.event.time, occurrence.event.end_time) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(start), None) => start.to_string(),
        _ => "all-day".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koyomi_core::model::Event;
    use koyomi_engine::month_data;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn renders_header_and_marks() {
        let event = Event::new("Dentist", date(2024, 3, 14))
            .with_time("14:00".parse().unwrap())
            .with_end_time("15:00".parse().unwrap());
        let rendered = render_month(&month_data(date(2024, 3, 1), date(2024, 3, 14), &[event]));

        assert!(rendered.contains("March 2024"));
        assert!(rendered.contains("Sun  Mon"));
        // Today carries both the occurrence mark and the brackets.
        assert!(rendered.contains("[14*]"));
        assert!(rendered.contains("Mar 14  14:00-15:00    Dentist (other)"));
    }

    #[test_log::test]
    fn all_day_events_are_labelled() {
        let event = Event::new("Offsite", date(2024, 3, 7));
        let rendered = render_month(&month_data(date(2024, 3, 1), date(2024, 3, 1), &[event]));
        assert!(rendered.contains("all-day"));
    }

    #[test_log::test]
    fn agenda_skips_padding_days() {
        // Feb 25 2024 is visible in March's window but belongs to February.
        let event = Event::new("Hidden", date(2024, 2, 25));
        let rendered = render_month(&month_data(date(2024, 3, 1), date(2024, 3, 1), &[event]));
        assert!(!rendered.contains("Hidden"));
        // The grid still marks the padding cell.
        assert!(rendered.contains("25*"));
    }
}
