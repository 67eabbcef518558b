//! Jalali date value type and calendar-aware arithmetic.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use tracing::{debug, trace};

use crate::consts::{DATE_SEPARATOR, MAX_MONTH, MIN_DAY};
use crate::convert::{
    days_before_month, epoch_day_from_gregorian, epoch_day_from_jalali, jalali_from_epoch_day,
    month_day_from_day_of_year,
};
use crate::prelude::*;
use crate::types::{Day, Month, Year, days_in_year, month_length};
use crate::JalaliError;

/// A date in the Solar Hijri calendar.
///
/// Always valid: `1 <= month <= 12` and `day` fits the month in that year.
/// Ordering is chronological (year, then month, then day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct JalaliDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl JalaliDate {
    /// Creates a date from its fields.
    ///
    /// # Errors
    /// Returns `YearOutOfRange`, `InvalidMonth` or `InvalidDay` for impossible dates.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, JalaliError> {
        Self::validate(year, month, day).inspect_err(|err| {
            debug!(year, month, day, %err, "rejected Jalali date");
        })
    }

    fn validate(year: i32, month: u8, day: u8) -> Result<Self, JalaliError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already validated components.
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidDay` if `day` does not fit the month.
    pub fn from_typed(year: Year, month: Month, day: Day) -> Result<Self, JalaliError> {
        let day = Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from a year and a 1-based day of year.
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidDayOfYear` if the day is 0 or past the end of the year.
    pub fn from_year_day(year: i32, day_of_year: u16) -> Result<Self, JalaliError> {
        let typed = Year::new(year)?;
        let max_day_of_year = days_in_year(year);
        if day_of_year == 0 || day_of_year > max_day_of_year {
            return Err(JalaliError::InvalidDayOfYear {
                year,
                day_of_year,
                max_day_of_year,
            });
        }
        let (month, day) = month_day_from_day_of_year(day_of_year);
        let month = Month::new(month)?;
        let day = Day::new(day, typed, month)?;
        Ok(Self { year: typed, month, day })
    }

    /// Maps an epoch day (days since 1970-01-01) onto the Jalali calendar.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self, JalaliError> {
        let (year, month, day) = jalali_from_epoch_day(epoch_day)?;
        Ok(Self { year, month, day })
    }

    /// Days since 1970-01-01.
    pub fn to_epoch_day(&self) -> i64 {
        epoch_day_from_jalali(self.year, self.month, self.day)
    }

    /// Converts a proleptic Gregorian date.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, JalaliError> {
        Self::from_epoch_day(epoch_day_from_gregorian(date))
    }

    /// The proleptic Gregorian date of the same day.
    pub fn to_gregorian(&self) -> NaiveDate {
        // 1970-01-01; the supported years stay far inside chrono's range
        NaiveDate::default() + TimeDelta::days(self.to_epoch_day())
    }

    /// Today's date in the system time zone.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now() -> Result<Self, JalaliError> {
        Self::from_datetime(&Local::now())
    }

    /// Today's date in the given time zone.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now_in<Tz: TimeZone>(tz: &Tz) -> Result<Self, JalaliError> {
        Self::from_datetime(&Utc::now().with_timezone(tz))
    }

    /// The local date of a zoned instant.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, JalaliError> {
        Self::from_gregorian(datetime.date_naive())
    }

    /// Returns the year
    pub const fn year(&self) -> i32 {
        self.year.get()
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of month (1..=31)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Day of year (1..=366)
    pub const fn day_of_year(&self) -> u16 {
        days_before_month(self.month.get()) + self.day.get() as u16
    }

    /// Day of the week, shared with the Gregorian calendar.
    pub fn weekday(&self) -> Weekday {
        self.to_gregorian().weekday()
    }

    /// Whether this date's year has a 30-day Esfand.
    pub const fn is_leap_year(&self) -> bool {
        self.year.is_leap()
    }

    /// Days in this date's month.
    pub const fn length_of_month(&self) -> u8 {
        month_length(self.year.get(), self.month)
    }

    /// Days in this date's year, 365 or 366.
    pub const fn length_of_year(&self) -> u16 {
        days_in_year(self.year.get())
    }

    /// Whole days from `self` to `other` (negative if `other` is earlier).
    pub fn days_until(&self, other: &Self) -> i64 {
        other.to_epoch_day() - self.to_epoch_day()
    }

    /// Day 1 of the same month.
    pub fn first_day_of_month(&self) -> Self {
        Self {
            day: Day::clamped(MIN_DAY, self.year, self.month),
            ..*self
        }
    }

    /// Last day of the same month.
    pub fn last_day_of_month(&self) -> Self {
        Self {
            day: Day::clamped(u8::MAX, self.year, self.month),
            ..*self
        }
    }
}

// --- arithmetic ---

impl JalaliDate {
    /// Adds `days`, crossing month and year boundaries through the epoch day.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the result leaves the supported years.
    pub fn plus_days(&self, days: i64) -> Result<Self, JalaliError> {
        Self::from_epoch_day(self.to_epoch_day().saturating_add(days))
    }

    /// Subtracts `days`.
    ///
    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn minus_days(&self, days: i64) -> Result<Self, JalaliError> {
        self.plus_days(days.saturating_neg())
    }

    /// Adds `weeks` seven-day weeks.
    ///
    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, JalaliError> {
        self.plus_days(weeks.saturating_mul(7))
    }

    /// Subtracts `weeks` seven-day weeks.
    ///
    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, JalaliError> {
        self.plus_weeks(weeks.saturating_neg())
    }

    /// Adds `months`, normalizing the year and clamping the day to the
    /// last day of the target month.
    ///
    /// # Errors
    /// Returns `JalaliError::YearOutOfRange` if the target year is unsupported.
    pub fn plus_months(&self, months: i64) -> Result<Self, JalaliError> {
        let per_year = i64::from(MAX_MONTH);
        let total = (i64::from(self.year()) * per_year + i64::from(self.month()) - 1)
            .saturating_add(months);
        let year = Year::from_i64(total.div_euclid(per_year))?;
        let month = u8::try_from(total.rem_euclid(per_year) + 1)
            .map_err(|_| JalaliError::InvalidMonth { month: 0 })?;
        Ok(self.with_fields(year, Month::new(month)?))
    }

    /// Subtracts `months`.
    ///
    /// # Errors
    /// Same as [`JalaliDate::plus_months`].
    pub fn minus_months(&self, months: i64) -> Result<Self, JalaliError> {
        self.plus_months(months.saturating_neg())
    }

    /// Adds `years`, turning Esfand 30 into Esfand 29 when the target year is not leap.
    ///
    /// # Errors
    /// Returns `JalaliError::YearOutOfRange` if the target year is unsupported.
    pub fn plus_years(&self, years: i64) -> Result<Self, JalaliError> {
        let target = i64::from(self.year()).saturating_add(years);
        Ok(self.with_fields(Year::from_i64(target)?, self.month))
    }

    /// Subtracts `years`.
    ///
    /// # Errors
    /// Same as [`JalaliDate::plus_years`].
    pub fn minus_years(&self, years: i64) -> Result<Self, JalaliError> {
        self.plus_years(years.saturating_neg())
    }

    /// Same month and day in `year`, clamping Esfand 30 when needed.
    ///
    /// # Errors
    /// Returns `JalaliError::YearOutOfRange` if `year` is unsupported.
    pub fn with_year(&self, year: i32) -> Result<Self, JalaliError> {
        Ok(self.with_fields(Year::new(year)?, self.month))
    }

    /// Same year and day in `month`, clamping the day to the month length.
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidMonth` if `month` is not in 1..=12.
    pub fn with_month(&self, month: u8) -> Result<Self, JalaliError> {
        Ok(self.with_fields(self.year, Month::new(month)?))
    }

    /// Same year and month with another day; the day is validated, not clamped.
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidDay` if `day` does not fit the month.
    pub fn with_day(&self, day: u8) -> Result<Self, JalaliError> {
        Self::new(self.year(), self.month(), day)
    }

    fn with_fields(&self, year: Year, month: Month) -> Self {
        let day = Day::clamped(self.day(), year, month);
        if day != self.day {
            trace!(from = %self, year = year.get(), month = month.get(), day = day.get(), "clamped day to month end");
        }
        Self { year, month, day }
    }
}

impl TryFrom<NaiveDate> for JalaliDate {
    type Error = JalaliError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(date)
    }
}

impl From<JalaliDate> for NaiveDate {
    fn from(date: JalaliDate) -> Self {
        date.to_gregorian()
    }
}

impl TryFrom<(i32, u8, u8)> for JalaliDate {
    type Error = JalaliError;

    fn try_from((year, month, day): (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl From<JalaliDate> for (i32, u8, u8) {
    fn from(date: JalaliDate) -> Self {
        (date.year(), date.month(), date.day())
    }
}

impl FromStr for JalaliDate {
    type Err = JalaliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(JalaliError::EmptyInput);
        }

        // YYYY-MM-DD
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => Self::new(parse_year(year)?, parse_u8(month)?, parse_u8(day)?),
            _ => Err(JalaliError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {s}"
            ))),
        }
    }
}

/// Helper to parse a year with better error messages
pub(crate) fn parse_year(s: &str) -> Result<i32, JalaliError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JalaliError::InvalidFormat(s.to_owned()));
    }
    s.parse::<i32>()
        .map_err(|_| JalaliError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
pub(crate) fn parse_u8(s: &str) -> Result<u8, JalaliError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JalaliError::InvalidFormat(s.to_owned()));
    }
    s.parse::<u8>()
        .map_err(|_| JalaliError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for JalaliDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_valid() {
        let d = JalaliDate::new(1402, 1, 1).unwrap();
        assert_eq!(d.year(), 1402);
        assert_eq!(d.month(), 1);
        assert_eq!(d.day(), 1);
        assert_eq!(d.day_of_year(), 1);
    }

    #[test]
    fn test_new_invalid() {
        assert!(matches!(
            JalaliDate::new(1402, 13, 1),
            Err(JalaliError::InvalidMonth { month: 13 })
        ));
        assert!(matches!(
            JalaliDate::new(1402, 7, 31),
            Err(JalaliError::InvalidDay { max_day: 30, .. })
        ));
        assert!(matches!(
            JalaliDate::new(0, 1, 1),
            Err(JalaliError::YearOutOfRange { year: 0 })
        ));
    }

    #[test]
    fn test_esfand_30_only_in_leap_years() {
        assert!(JalaliDate::new(1403, 12, 30).is_ok());
        let err = JalaliDate::new(1402, 12, 30).unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_from_year_day() {
        assert_eq!(JalaliDate::from_year_day(1402, 1).unwrap(), date(1402, 1, 1));
        assert_eq!(JalaliDate::from_year_day(1402, 187).unwrap(), date(1402, 7, 1));
        assert_eq!(JalaliDate::from_year_day(1403, 366).unwrap(), date(1403, 12, 30));
        assert!(matches!(
            JalaliDate::from_year_day(1402, 366),
            Err(JalaliError::InvalidDayOfYear { max_day_of_year: 365, .. })
        ));
        assert!(JalaliDate::from_year_day(1402, 0).is_err());
    }

    #[test]
    fn test_gregorian_conversion() {
        let g = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        let j = JalaliDate::from_gregorian(g).unwrap();
        assert_eq!(j, date(1403, 1, 1));
        assert_eq!(j.to_gregorian(), g);
        assert_eq!(NaiveDate::from(date(1348, 10, 11)), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(
            JalaliDate::try_from(NaiveDate::from_ymd_opt(2025, 5, 3).unwrap()).unwrap(),
            date(1404, 2, 13)
        );
    }

    #[test]
    fn test_gregorian_out_of_range() {
        let before = NaiveDate::from_ymd_opt(600, 1, 1).unwrap();
        assert!(matches!(
            JalaliDate::from_gregorian(before),
            Err(JalaliError::EpochDayOutOfRange { .. })
        ));
    }

    #[test]
    fn test_epoch_day() {
        assert_eq!(date(1348, 10, 11).to_epoch_day(), 0);
        assert_eq!(JalaliDate::from_epoch_day(0).unwrap(), date(1348, 10, 11));
        assert_eq!(JalaliDate::from_epoch_day(-1).unwrap(), date(1348, 10, 10));
    }

    #[test]
    fn test_now_round_trips() {
        let today = JalaliDate::now_in(&Utc).unwrap();
        assert_eq!(JalaliDate::from_epoch_day(today.to_epoch_day()).unwrap(), today);
        assert!(JalaliDate::now().is_ok());
    }

    #[test]
    fn test_weekday() {
        // 1970-01-01 and 1403-01-01 (2024-03-20)
        assert_eq!(date(1348, 10, 11).weekday(), Weekday::Thu);
        assert_eq!(date(1403, 1, 1).weekday(), Weekday::Wed);
        for epoch_day in -400..400 {
            let d = JalaliDate::from_epoch_day(epoch_day).unwrap();
            assert_eq!(d.weekday(), d.to_gregorian().weekday());
        }
    }

    #[test]
    fn test_lengths() {
        assert_eq!(date(1402, 6, 1).length_of_month(), 31);
        assert_eq!(date(1402, 7, 1).length_of_month(), 30);
        assert_eq!(date(1402, 12, 1).length_of_month(), 29);
        assert_eq!(date(1403, 12, 1).length_of_month(), 30);
        assert_eq!(date(1402, 1, 1).length_of_year(), 365);
        assert!(date(1403, 1, 1).is_leap_year());
    }

    #[test]
    fn test_plus_days_crosses_year() {
        assert_eq!(date(1401, 12, 29).plus_days(1).unwrap(), date(1402, 1, 1));
        assert_eq!(date(1402, 1, 1).minus_days(1).unwrap(), date(1401, 12, 29));
        assert_eq!(date(1403, 12, 29).plus_days(1).unwrap(), date(1403, 12, 30));
        assert_eq!(date(1402, 6, 31).plus_days(1).unwrap(), date(1402, 7, 1));
        assert_eq!(date(1402, 1, 1).plus_days(365).unwrap(), date(1403, 1, 1));
        assert_eq!(date(1403, 1, 1).plus_days(366).unwrap(), date(1404, 1, 1));
        assert_eq!(date(1402, 1, 1).plus_weeks(2).unwrap(), date(1402, 1, 15));
        assert_eq!(date(1402, 1, 15).minus_weeks(2).unwrap(), date(1402, 1, 1));
    }

    #[test]
    fn test_plus_days_out_of_range() {
        assert!(date(3000, 12, 30).plus_days(1).is_err());
        assert!(date(1, 1, 1).minus_days(1).is_err());
        assert!(date(1402, 1, 1).plus_days(i64::MAX).is_err());
        assert!(date(1402, 1, 1).minus_days(i64::MIN).is_err());
    }

    #[test]
    fn test_plus_months_clamps_day() {
        struct TestCase {
            start:    (i32, u8, u8),
            months:   i64,
            expected: (i32, u8, u8),
        }

        let cases = [
            TestCase { start: (1401, 6, 31), months: 1, expected: (1401, 7, 30) },
            TestCase { start: (1401, 12, 29), months: 1, expected: (1402, 1, 29) },
            TestCase { start: (1402, 1, 31), months: 11, expected: (1402, 12, 29) },
            TestCase { start: (1403, 1, 31), months: 11, expected: (1403, 12, 30) },
            TestCase { start: (1402, 1, 15), months: -1, expected: (1401, 12, 15) },
            TestCase { start: (1402, 5, 10), months: -17, expected: (1400, 12, 10) },
            TestCase { start: (1402, 5, 10), months: 24, expected: (1404, 5, 10) },
            TestCase { start: (1402, 5, 10), months: 0, expected: (1402, 5, 10) },
        ];

        for case in &cases {
            let (y, m, d) = case.start;
            let got = date(y, m, d).plus_months(case.months).unwrap();
            assert_eq!(
                <(i32, u8, u8)>::from(got),
                case.expected,
                "{y}-{m}-{d} plus {} months",
                case.months
            );
        }
        assert_eq!(date(1402, 2, 10).minus_months(2).unwrap(), date(1401, 12, 10));
    }

    #[test]
    fn test_plus_months_out_of_range() {
        assert!(matches!(
            date(3000, 12, 1).plus_months(1),
            Err(JalaliError::YearOutOfRange { year: 3001 })
        ));
        assert!(date(1, 1, 1).minus_months(1).is_err());
        assert!(date(1402, 1, 1).plus_months(i64::MAX).is_err());
    }

    #[test]
    fn test_plus_years() {
        assert_eq!(date(1403, 12, 30).plus_years(1).unwrap(), date(1404, 12, 29));
        assert_eq!(date(1403, 12, 30).minus_years(4).unwrap(), date(1399, 12, 30));
        assert_eq!(date(1402, 6, 31).plus_years(10).unwrap(), date(1412, 6, 31));
        assert!(date(2990, 1, 1).plus_years(11).is_err());
    }

    #[test]
    fn test_adjusters() {
        let d = date(1402, 6, 31);
        assert_eq!(d.with_month(7).unwrap(), date(1402, 7, 30));
        assert_eq!(d.with_year(1300).unwrap(), date(1300, 6, 31));
        assert_eq!(d.with_day(5).unwrap(), date(1402, 6, 5));
        assert!(date(1402, 7, 1).with_day(31).is_err());
        assert!(d.with_month(0).is_err());
        assert_eq!(d.first_day_of_month(), date(1402, 6, 1));
        assert_eq!(date(1403, 12, 3).last_day_of_month(), date(1403, 12, 30));
        assert_eq!(date(1402, 12, 3).last_day_of_month(), date(1402, 12, 29));
    }

    #[test]
    fn test_days_until() {
        assert_eq!(date(1402, 1, 1).days_until(&date(1403, 1, 1)), 365);
        assert_eq!(date(1403, 1, 1).days_until(&date(1402, 1, 1)), -365);
    }

    #[test]
    fn test_ordering() {
        assert!(date(1401, 12, 29) < date(1402, 1, 1));
        assert!(date(1402, 1, 31) < date(1402, 2, 1));
        assert!(date(1402, 2, 1) < date(1402, 2, 2));
        assert_eq!(date(1402, 2, 2), date(1402, 2, 2));
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(date(1402, 1, 5).to_string(), "1402-01-05");
        assert_eq!(date(12, 1, 5).to_string(), "0012-01-05");
        assert_eq!(" 1402-01-05 ".parse::<JalaliDate>().unwrap(), date(1402, 1, 5));
        assert_eq!("1402-1-5".parse::<JalaliDate>().unwrap(), date(1402, 1, 5));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<JalaliDate>(), Err(JalaliError::EmptyInput)));
        assert!(matches!("1402-01".parse::<JalaliDate>(), Err(JalaliError::InvalidFormat(_))));
        assert!(matches!("1402/01/05".parse::<JalaliDate>(), Err(JalaliError::InvalidFormat(_))));
        assert!(matches!("14o2-01-05".parse::<JalaliDate>(), Err(JalaliError::InvalidFormat(_))));
        assert!(matches!("1402-+1-05".parse::<JalaliDate>(), Err(JalaliError::InvalidFormat(_))));
        assert!(matches!(
            "1402-12-30".parse::<JalaliDate>(),
            Err(JalaliError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_serde() {
        let d = date(1402, 7, 15);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"1402-07-15\"");

        let parsed: JalaliDate = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
        assert!(serde_json::from_str::<JalaliDate>("\"1402-12-30\"").is_err());
    }

    #[test]
    fn test_tuple_conversions() {
        let d = JalaliDate::try_from((1402, 3, 4)).unwrap();
        assert_eq!(<(i32, u8, u8)>::from(d), (1402, 3, 4));
        assert!(JalaliDate::try_from((1402, 0, 4)).is_err());
    }
}
