//! Recurrence rules embedded in stored events.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::WeekdaySet;

/// How an event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    /// Repeats every `interval` days.
    Custom,
}

/// Recurrence rule carried by every event (default: no recurrence).
///
/// Serialized in the stored event format: `type`, `interval`, `weekdays`,
/// `endDate`, `occurrences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    #[serde(rename = "type", default)]
    pub frequency: Frequency,

    /// Step size: days for daily/custom, weeks for weekly, months for
    /// monthly. Absent, zero, and negative wire values all read as 1.
    #[serde(default = "default_interval", deserialize_with = "clamped_interval")]
    pub interval: u32,

    /// For weekly rules: generate on these weekdays instead of stepping
    /// by whole weeks. An empty set behaves as if absent.
    #[serde(default)]
    pub weekdays: WeekdaySet,

    /// Inclusive date bound; no instances are generated past it.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Maximum number of generated instances, excluding the original.
    /// Negative wire values read as a cap of zero.
    #[serde(default, deserialize_with = "clamped_occurrences")]
    pub occurrences: Option<u32>,
}

impl Recurrence {
    /// A rule that never repeats.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            frequency: Frequency::None,
            interval: 1,
            weekdays: WeekdaySet::EMPTY,
            end_date: None,
            occurrences: None,
        }
    }

    /// The stepping interval, never less than 1.
    #[must_use]
    pub const fn effective_interval(&self) -> u32 {
        if self.interval == 0 { 1 } else { self.interval }
    }

    /// Whether the rule generates any instances at all.
    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.frequency != Frequency::None
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::none()
    }
}

const fn default_interval() -> u32 {
    1
}

/// Reads the stored interval, clamping missing, zero, and negative values
/// to the default of 1.
fn clamped_interval<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| u32::try_from(value).ok())
        .filter(|&value| value > 0)
        .unwrap_or(1))
}

/// Reads the stored occurrence cap, mapping negative wire values to a cap
/// of zero instead of failing the whole list's deserialization.
fn clamped_occurrences<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.map(|value| u32::try_from(value).unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn default_rule_does_not_recur() {
        let rule = Recurrence::default();
        assert_eq!(rule.frequency, Frequency::None);
        assert!(!rule.is_recurring());
        assert_eq!(rule.effective_interval(), 1);
    }

    #[test_log::test]
    fn interval_clamps_to_one() {
        for json in [
            r#"{"type":"daily"}"#,
            r#"{"type":"daily","interval":0}"#,
            r#"{"type":"daily","interval":-2}"#,
            r#"{"type":"daily","interval":null}"#,
        ] {
            let rule: Recurrence = serde_json::from_str(json).unwrap();
            assert_eq!(rule.effective_interval(), 1, "for {json}");
        }
    }

    #[test_log::test]
    fn negative_occurrences_read_as_zero_cap() {
        // A single malformed record must not poison the stored list.
        let rule: Recurrence =
            serde_json::from_str(r#"{"type":"daily","occurrences":-1}"#).unwrap();
        assert_eq!(rule.occurrences, Some(0));

        let rule: Recurrence =
            serde_json::from_str(r#"{"type":"daily","occurrences":0}"#).unwrap();
        assert_eq!(rule.occurrences, Some(0));

        let rule: Recurrence =
            serde_json::from_str(r#"{"type":"daily","occurrences":null}"#).unwrap();
        assert_eq!(rule.occurrences, None);

        let rule: Recurrence = serde_json::from_str(r#"{"type":"daily"}"#).unwrap();
        assert_eq!(rule.occurrences, None);
    }

    #[test_log::test]
    fn stored_format_round_trip() {
        let json = r#"{"type":"weekly","interval":2,"weekdays":[1,3,5],"endDate":"2024-06-30","occurrences":10}"#;
        let rule: Recurrence = serde_json::from_str(json).unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.interval, 2);
        assert!(rule.weekdays.contains(3));
        assert_eq!(rule.end_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(rule.occurrences, Some(10));

        let back: Recurrence = serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();
        assert_eq!(back, rule);
    }
}
