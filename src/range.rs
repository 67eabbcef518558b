use std::iter::FusedIterator;
use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{FARVARDIN, JalaliDate, JalaliError, MIN_DAY, RANGE_SEPARATOR, prelude::*};

/// Inclusive range of Jalali dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct JalaliDateRange {
    start: JalaliDate,
    end:   JalaliDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: JalaliDate, end: JalaliDate },

    /// Error parsing date component.
    #[error(transparent)]
    Date(#[from] JalaliError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl JalaliDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: JalaliDate, end: JalaliDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a whole month.
    ///
    /// # Errors
    /// Returns `RangeError::Date` if the year or month is invalid.
    pub fn month(year: i32, month: u8) -> Result<Self, RangeError> {
        let first = JalaliDate::new(year, month, 1)?;
        Self::new(first, first.last_day_of_month())
    }

    /// A range covering a whole year.
    ///
    /// # Errors
    /// Returns `RangeError::Date` if the year is out of range.
    pub fn year(year: i32) -> Result<Self, RangeError> {
        let first = JalaliDate::new(year, FARVARDIN, MIN_DAY)?;
        let last = JalaliDate::from_year_day(year, first.length_of_year())?;
        Self::new(first, last)
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> JalaliDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> JalaliDate {
        self.end
    }

    /// Returns the start and end dates as a tuple
    pub const fn dates(&self) -> (JalaliDate, JalaliDate) {
        (self.start, self.end)
    }

    /// Checks if a date falls within this range (both ends inclusive)
    pub fn contains(&self, date: &JalaliDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> u32 {
        // both ends lie in the supported years, so the span fits
        u32::try_from(self.start.days_until(&self.end) + 1).unwrap_or(u32::MAX)
    }

    /// Every date from start to end.
    pub fn iter(&self) -> Days {
        Days {
            next:      self.start.to_epoch_day(),
            next_back: self.end.to_epoch_day(),
        }
    }
}

/// Iterator over the days of a [`JalaliDateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next:      i64,
    next_back: i64,
}

impl Iterator for Days {
    type Item = JalaliDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.next_back {
            return None;
        }
        let date = JalaliDate::from_epoch_day(self.next).ok()?;
        self.next += 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.next_back - self.next + 1).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Days {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.next > self.next_back {
            return None;
        }
        let date = JalaliDate::from_epoch_day(self.next_back).ok()?;
        self.next_back -= 1;
        Some(date)
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

impl IntoIterator for JalaliDateRange {
    type Item = JalaliDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &JalaliDateRange {
    type Item = JalaliDate;
    type IntoIter = Days;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for JalaliDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found: {s}"))
                })?;

                let start = start_str.trim().parse::<JalaliDate>()?;
                let end = end_str.trim().parse::<JalaliDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for JalaliDateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JalaliDateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start).then_with(|| self.end.cmp(&other.end))
    }
}

impl Serialize for JalaliDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for JalaliDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
