use crate::consts::{
    COMMON_YEAR_DAYS, ESFAND, ESFAND_DAYS, ESFAND_DAYS_LEAP, FIRST_HALF_MONTH_DAYS,
    LEAP_YEAR_DAYS, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, NON_LEAP_CORRECTION, SHAHRIVAR,
    SECOND_HALF_MONTH_DAYS,
};
use crate::JalaliError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A Jalali year guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1..=3000)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's within `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `JalaliError::YearOutOfRange` if the value is outside the supported span.
    pub fn new(value: i32) -> Result<Self, JalaliError> {
        Self::from_i64(i64::from(value))
    }

    /// Same as [`Year::new`] for widened results of arithmetic.
    pub(crate) fn from_i64(value: i64) -> Result<Self, JalaliError> {
        if value < i64::from(MIN_YEAR) || value > i64::from(MAX_YEAR) {
            return Err(JalaliError::YearOutOfRange { year: value });
        }
        u16::try_from(value)
            .ok()
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(JalaliError::YearOutOfRange { year: value })
    }

    /// Returns the year value as i32
    #[inline]
    pub const fn get(self) -> i32 {
        self.0.get() as i32
    }

    /// Whether this year has 366 days
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<i32> for Year {
    type Error = JalaliError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, JalaliError> {
        let non_zero = NonZeroU8::new(value).ok_or(JalaliError::InvalidMonth { month: value })?;
        if value > MAX_MONTH {
            return Err(JalaliError::InvalidMonth { month: value });
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = JalaliError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day-of-month value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and fits the given month
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, JalaliError> {
        let max_day = month_length(year.get(), month);
        let invalid = || JalaliError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
            max_day,
        };

        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > max_day {
            return Err(invalid());
        }

        Ok(Self(non_zero))
    }

    /// Clamps `value` into `1..=month length`, e.g. day 31 of Mehr becomes 30.
    pub(crate) fn clamped(value: u8, year: Year, month: Month) -> Self {
        let value = value.clamp(MIN_DAY, month_length(year.get(), month));
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = JalaliError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate the month length without year/month context
        if value < MIN_DAY || value > FIRST_HALF_MONTH_DAYS {
            return Err(JalaliError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
                max_day: FIRST_HALF_MONTH_DAYS,
            });
        }
        NonZeroU8::new(value)
            .map(Self)
            .ok_or(JalaliError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
                max_day: FIRST_HALF_MONTH_DAYS,
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Leap-year oracle and month-length table

/// Whether `year` appears in [`NON_LEAP_CORRECTION`].
pub const fn is_non_leap_correction(year: i32) -> bool {
    let mut i = 0;
    while i < NON_LEAP_CORRECTION.len() {
        if NON_LEAP_CORRECTION[i] == year {
            return true;
        }
        i += 1;
    }
    false
}

/// Whether the Jalali `year` has 366 days.
///
/// 33-year arithmetic rule with the [`NON_LEAP_CORRECTION`] overrides. Total
/// over `i32`; only `MIN_YEAR..=MAX_YEAR` is verified against the calendar.
pub const fn is_leap_year(year: i32) -> bool {
    if year >= NON_LEAP_CORRECTION[0] && is_non_leap_correction(year) {
        return false;
    }
    if year > NON_LEAP_CORRECTION[0] && is_non_leap_correction(year - 1) {
        return true;
    }

    (25 * year as i64 + 11).rem_euclid(33) < 8
}

/// Number of days in the given month.
///
/// # Errors
/// Returns `JalaliError::InvalidMonth` if `month` is not in 1..=12.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, JalaliError> {
    Ok(month_length(year, Month::new(month)?))
}

pub(crate) const fn month_length(year: i32, month: Month) -> u8 {
    match month.get() {
        m if m <= SHAHRIVAR => FIRST_HALF_MONTH_DAYS,
        m if m < ESFAND => SECOND_HALF_MONTH_DAYS,
        _ if is_leap_year(year) => ESFAND_DAYS_LEAP,
        _ => ESFAND_DAYS,
    }
}

/// Number of days in the given year (365 or 366).
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        LEAP_YEAR_DAYS
    } else {
        COMMON_YEAR_DAYS
    }
}
