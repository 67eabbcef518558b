//! Epoch-day converter shared by the Gregorian and Jalali calendars.
//!
//! Every conversion routes through the epoch day (days since 1970-01-01), so
//! a calendar only needs one pair of functions to and from that coordinate.

use chrono::{Datelike, NaiveDate};

use crate::consts::{
    FIRST_HALF_DAYS, FIRST_HALF_MONTH_DAYS, JALALI_EPOCH_DAY, LEAP_CYCLE_DAYS, LEAP_CYCLE_YEARS,
    MAX_YEAR, MEHR, MIN_YEAR, NON_LEAP_CORRECTION, SECOND_HALF_MONTH_DAYS, UNIX_EPOCH_DAYS_FROM_CE,
};
use crate::types::{Day, Month, Year, is_non_leap_correction};
use crate::JalaliError;

/// Epoch day of 1 Farvardin `MIN_YEAR`.
pub const MIN_EPOCH_DAY: i64 = year_start_epoch_day(MIN_YEAR as i64);

/// Epoch day of the last day of `MAX_YEAR`.
pub const MAX_EPOCH_DAY: i64 = year_start_epoch_day(MAX_YEAR as i64 + 1) - 1;

/// Days from 1 Farvardin 1 to 1 Farvardin `year`.
const fn days_before_year(year: i64) -> i64 {
    let mut days = 365 * (year - 1) + (8 * year + 21).div_euclid(LEAP_CYCLE_YEARS);
    // the 33-year rule counted the corrected year as leap; its successor is
    // the real leap year and is only counted from the year after
    if year > NON_LEAP_CORRECTION[0] as i64
        && year - 1 <= MAX_YEAR as i64
        && is_non_leap_correction((year - 1) as i32)
    {
        days -= 1;
    }
    days
}

/// Epoch day of 1 Farvardin `year`.
pub(crate) const fn year_start_epoch_day(year: i64) -> i64 {
    JALALI_EPOCH_DAY + days_before_year(year)
}

/// Days from 1 Farvardin to the first of `month`.
pub(crate) const fn days_before_month(month: u8) -> u16 {
    let m = month as u16;
    if m <= MEHR as u16 {
        (m - 1) * FIRST_HALF_MONTH_DAYS as u16
    } else {
        (m - 1) * SECOND_HALF_MONTH_DAYS as u16 + (MEHR as u16 - 1)
    }
}

/// Splits a 1-based day of year into `(month, day)`.
pub(crate) const fn month_day_from_day_of_year(day_of_year: u16) -> (u8, u8) {
    let zero_based = day_of_year - 1;
    if day_of_year <= FIRST_HALF_DAYS {
        let len = FIRST_HALF_MONTH_DAYS as u16;
        ((zero_based / len + 1) as u8, (zero_based % len + 1) as u8)
    } else {
        let rest = zero_based - FIRST_HALF_DAYS;
        let len = SECOND_HALF_MONTH_DAYS as u16;
        ((rest / len) as u8 + MEHR, (rest % len + 1) as u8)
    }
}

/// Maps an epoch day onto a validated Jalali `(year, month, day)`.
///
/// # Errors
/// Returns `JalaliError::EpochDayOutOfRange` outside `MIN_EPOCH_DAY..=MAX_EPOCH_DAY`.
pub fn jalali_from_epoch_day(epoch_day: i64) -> Result<(Year, Month, Day), JalaliError> {
    if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
        return Err(JalaliError::EpochDayOutOfRange { epoch_day });
    }

    // cycle estimate is off by at most one year either way
    let elapsed = epoch_day - JALALI_EPOCH_DAY;
    let mut year = (LEAP_CYCLE_YEARS * elapsed).div_euclid(LEAP_CYCLE_DAYS) + 1;
    while year_start_epoch_day(year) > epoch_day {
        year -= 1;
    }
    while year_start_epoch_day(year + 1) <= epoch_day {
        year += 1;
    }

    let day_of_year = u16::try_from(epoch_day - year_start_epoch_day(year) + 1)
        .map_err(|_| JalaliError::EpochDayOutOfRange { epoch_day })?;
    let (month, day) = month_day_from_day_of_year(day_of_year);

    let year = Year::from_i64(year)?;
    let month = Month::new(month)?;
    let day = Day::new(day, year, month)?;
    Ok((year, month, day))
}

/// Epoch day of an already validated Jalali date.
pub fn epoch_day_from_jalali(year: Year, month: Month, day: Day) -> i64 {
    year_start_epoch_day(i64::from(year.get()))
        + i64::from(days_before_month(month.get()))
        + i64::from(day.get())
        - 1
}

/// Epoch day of a proleptic Gregorian date.
pub fn epoch_day_from_gregorian(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}

/// Proleptic Gregorian date of an epoch day.
///
/// # Errors
/// Returns `JalaliError::EpochDayOutOfRange` past chrono's representable dates.
pub fn gregorian_from_epoch_day(epoch_day: i64) -> Result<NaiveDate, JalaliError> {
    epoch_day
        .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(|days| i32::try_from(days).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or(JalaliError::EpochDayOutOfRange { epoch_day })
}

/// The calendars that share the epoch-day coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calendar {
    /// Proleptic Gregorian
    Gregorian,
    /// Solar Hijri
    Jalali,
}

impl Calendar {
    /// Epoch day of `(year, month, day)` in this calendar.
    ///
    /// # Errors
    /// Returns a validation error when the triple is not a date of this calendar.
    pub fn to_epoch_day(self, year: i32, month: u8, day: u8) -> Result<i64, JalaliError> {
        match self {
            Self::Gregorian => NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
                .map(epoch_day_from_gregorian)
                .ok_or_else(|| {
                    JalaliError::InvalidFormat(format!(
                        "{year:04}-{month:02}-{day:02} is not a Gregorian date"
                    ))
                }),
            Self::Jalali => {
                let year = Year::new(year)?;
                let month = Month::new(month)?;
                let day = Day::new(day, year, month)?;
                Ok(epoch_day_from_jalali(year, month, day))
            }
        }
    }

    /// `(year, month, day)` of an epoch day in this calendar.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the day cannot be represented.
    pub fn from_epoch_day(self, epoch_day: i64) -> Result<(i32, u8, u8), JalaliError> {
        match self {
            Self::Gregorian => {
                let date = gregorian_from_epoch_day(epoch_day)?;
                // month and day always fit in u8
                Ok((date.year(), date.month() as u8, date.day() as u8))
            }
            Self::Jalali => {
                let (year, month, day) = jalali_from_epoch_day(epoch_day)?;
                Ok((year.get(), month.get(), day.get()))
            }
        }
    }

    /// Converts `(year, month, day)` from this calendar into `target`.
    ///
    /// # Errors
    /// Propagates validation failures from either side.
    pub fn convert(
        self,
        target: Self,
        (year, month, day): (i32, u8, u8),
    ) -> Result<(i32, u8, u8), JalaliError> {
        target.from_epoch_day(self.to_epoch_day(year, month, day)?)
    }
}
