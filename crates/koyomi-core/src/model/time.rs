//! Minute-precision time-of-day and weekday-set value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Time of day with minute precision.
///
/// Stored as minutes from midnight. Parses from and serializes to the
/// `"HH:MM"` 24-hour wire format used by the stored event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a time of day from hour and minute components.
    ///
    /// ## Errors
    /// Returns a validation error if the hour is not in `0..24` or the
    /// minute is not in `0..60`.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, CoreError> {
        if hour >= 24 || minute >= 60 {
            return Err(CoreError::ValidationError(format!(
                "time out of range: {hour:02}:{minute:02}"
            )));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Returns minutes elapsed since midnight (always `< 1440`).
    #[must_use]
    pub const fn minutes_from_midnight(self) -> u16 {
        self.minutes
    }

    /// Returns the hour component (0-23).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "minutes is bounded below 1440, so the hour always fits in u8"
    )]
    pub const fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// Returns the minute component (0-59).
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a remainder modulo 60 always fits in u8"
    )]
    pub const fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CoreError::ParseError(format!("invalid time of day: {s:?}"));

        let (hour, minute) = s.split_once(':').ok_or_else(parse_err)?;
        let hour: u8 = hour.parse().map_err(|_unused| parse_err())?;
        let minute: u8 = minute.parse().map_err(|_unused| parse_err())?;

        Self::from_hm(hour, minute).map_err(|_unused| parse_err())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Set of weekdays, indexed 0-6 with Sunday as 0.
///
/// Stored as a bitmask and serialized as a sequence of indices, matching
/// the stored recurrence format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates a set from weekday indices (0 = Sunday .. 6 = Saturday).
    ///
    /// ## Errors
    /// Returns a validation error if any index is greater than 6.
    pub fn from_indices(indices: &[u8]) -> Result<Self, CoreError> {
        let mut set = Self::EMPTY;
        for &index in indices {
            if index > 6 {
                return Err(CoreError::ValidationError(format!(
                    "weekday index out of range: {index}"
                )));
            }
            set.bits |= 1 << index;
        }
        Ok(set)
    }

    /// Whether the given weekday index (0 = Sunday) is in the set.
    #[must_use]
    pub const fn contains(self, index: u8) -> bool {
        index <= 6 && self.bits & (1 << index) != 0
    }

    /// Whether the given chrono weekday is in the set.
    #[must_use]
    pub fn contains_weekday(self, weekday: chrono::Weekday) -> bool {
        u8::try_from(weekday.num_days_from_sunday()).is_ok_and(|index| self.contains(index))
    }

    /// Whether the set contains no weekdays.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Number of weekdays in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.bits.count_ones()
    }

    /// Weekday indices in ascending order.
    #[must_use]
    pub fn indices(self) -> Vec<u8> {
        (0..=6).filter(|&index| self.contains(index)).collect()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = CoreError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_indices(&value)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(value: WeekdaySet) -> Self {
        value.indices()
    }
}
