//! Stored event records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Recurrence, TimeOfDay};

/// Opaque identifier of a stored event, stable for the record's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Presentation category, opaque to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Meeting,
    Reminder,
    #[default]
    Other,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Meeting => "meeting",
            Self::Reminder => "reminder",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored calendar event.
///
/// Immutable once created; edits replace the record wholesale. `date` is
/// the anchor date of the event (the original occurrence for recurring
/// events). Both time fields absent means an all-day event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Present only on stored instance records of a recurring series;
    /// absent on originals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EventId>,
}

impl Event {
    /// Creates an event with a fresh id and no time, recurrence, or parent.
    #[must_use]
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: EventId::new(),
            title: title.into(),
            date,
            time: None,
            end_time: None,
            description: String::new(),
            category: Category::default(),
            recurrence: Recurrence::none(),
            parent_id: None,
        }
    }

    /// Sets the start time.
    #[must_use]
    pub const fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = Some(time);
        self
    }

    /// Sets the end time.
    #[must_use]
    pub const fn with_end_time(mut self, end_time: TimeOfDay) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Sets the recurrence rule.
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Sets the presentation category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

/// Event payload without identity, as submitted at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub recurrence: Recurrence,
}

impl EventDraft {
    /// Materializes the draft as a stored event under the given id.
    #[must_use]
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            end_time: self.end_time,
            description: self.description,
            category: self.category,
            recurrence: self.recurrence,
            parent_id: None,
        }
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        Self {
            title: event.title,
            date: event.date,
            time: event.time,
            end_time: event.end_time,
            description: event.description,
            category: event.category,
            recurrence: event.recurrence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn stored_format_uses_camel_case_fields() {
        let event = Event::new("Standup", date(2024, 3, 4))
            .with_time("09:00".parse().unwrap())
            .with_end_time("09:15".parse().unwrap())
            .with_category(Category::Meeting);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2024-03-04");
        assert_eq!(json["time"], "09:00");
        assert_eq!(json["endTime"], "09:15");
        assert_eq!(json["category"], "meeting");
        assert_eq!(json["recurrence"]["type"], "none");
        // Absent on originals, not serialized as null.
        assert!(json.get("parentId").is_none());
    }

    #[test_log::test]
    fn stored_format_round_trip() {
        let json = r#"{
            "id": "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8",
            "title": "Gym",
            "date": "2024-01-15",
            "time": "18:00",
            "endTime": null,
            "description": "leg day",
            "category": "personal",
            "recurrence": {"type": "weekly", "interval": 1, "weekdays": [1, 4]}
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Gym");
        assert_eq!(event.end_time, None);
        assert_eq!(event.category, Category::Personal);
        assert!(event.recurrence.weekdays.contains(4));
        assert_eq!(event.parent_id, None);

        let back: Event = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back, event);
    }

    #[test_log::test]
    fn draft_materializes_without_parent() {
        let draft = EventDraft {
            title: "Review".into(),
            date: date(2024, 2, 1),
            time: None,
            end_time: None,
            description: String::new(),
            category: Category::Work,
            recurrence: Recurrence::none(),
        };
        let id = EventId::new();
        let event = draft.into_event(id);
        assert_eq!(event.id, id);
        assert_eq!(event.parent_id, None);
    }
}
