//! Jalali date paired with a time of day.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

use crate::consts::{
    FRACTION_SEPARATOR, MAX_NANOSECOND, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE,
    NANOS_PER_SECOND, TIME_DESIGNATOR, TIME_SEPARATOR,
};
use crate::date::parse_u8;
use crate::zoned::ZonedJalaliDateTime;
use crate::{JalaliDate, JalaliError};

/// A Jalali date with a wall-clock time and no zone.
///
/// Leap seconds are not represented: the nanosecond field is always below one
/// second. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDateTime {
    date: JalaliDate,
    time: NaiveTime,
}

fn make_time(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Result<NaiveTime, JalaliError> {
    let invalid = JalaliError::InvalidTime {
        hour,
        minute,
        second,
        nanosecond,
    };
    if nanosecond > MAX_NANOSECOND {
        return Err(invalid);
    }
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanosecond).ok_or(invalid)
}

impl JalaliDateTime {
    /// Pairs a date with a time of day.
    ///
    /// # Errors
    /// Returns `JalaliError::InvalidTime` for a leap-second time.
    pub fn new(date: JalaliDate, time: NaiveTime) -> Result<Self, JalaliError> {
        if time.nanosecond() > MAX_NANOSECOND {
            return Err(JalaliError::InvalidTime {
                hour: time.hour(),
                minute: time.minute(),
                second: time.second(),
                nanosecond: time.nanosecond(),
            });
        }
        Ok(Self { date, time })
    }

    /// # Errors
    /// Returns `JalaliError::InvalidTime` if a field is out of range.
    pub fn from_date_hms(
        date: JalaliDate,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, JalaliError> {
        Ok(Self {
            date,
            time: make_time(hour, minute, second, 0)?,
        })
    }

    /// # Errors
    /// Returns the date or time validation error for impossible fields.
    pub fn from_ymd_hms(
        year: i32,
        month: u8,
        day: u8,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, JalaliError> {
        Self::from_ymd_hms_nano(year, month, day, hour, minute, second, 0)
    }

    /// # Errors
    /// Returns the date or time validation error for impossible fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms_nano(
        year: i32,
        month: u8,
        day: u8,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> Result<Self, JalaliError> {
        Ok(Self {
            date: JalaliDate::new(year, month, day)?,
            time: make_time(hour, minute, second, nanosecond)?,
        })
    }

    /// Converts a proleptic Gregorian date-time.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years and
    /// `JalaliError::InvalidTime` for a leap second.
    pub fn from_gregorian(datetime: NaiveDateTime) -> Result<Self, JalaliError> {
        Self::new(JalaliDate::from_gregorian(datetime.date())?, datetime.time())
    }

    /// The same wall-clock fields on the Gregorian calendar.
    pub fn to_gregorian(&self) -> NaiveDateTime {
        self.date.to_gregorian().and_time(self.time)
    }

    /// Current wall-clock time in the system time zone.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now() -> Result<Self, JalaliError> {
        Self::from_datetime(&Local::now())
    }

    /// Current wall-clock time in `tz`.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now_in<Tz: TimeZone>(tz: &Tz) -> Result<Self, JalaliError> {
        Self::from_datetime(&Utc::now().with_timezone(tz))
    }

    /// Local wall-clock fields of a zoned instant.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, JalaliError> {
        Self::from_gregorian(datetime.naive_local())
    }

    /// Returns the date part
    pub const fn date(&self) -> JalaliDate {
        self.date
    }

    /// Returns the time of day
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the year
    pub const fn year(&self) -> i32 {
        self.date.year()
    }

    /// Returns the month (1..=12)
    pub const fn month(&self) -> u8 {
        self.date.month()
    }

    /// Returns the day of month
    pub const fn day(&self) -> u8 {
        self.date.day()
    }

    /// Attaches a fixed UTC offset without touching the fields.
    pub const fn at_offset(&self, offset: FixedOffset) -> ZonedJalaliDateTime {
        ZonedJalaliDateTime::new(*self, offset)
    }

    /// Attaches the offset `tz` uses at this wall-clock time.
    ///
    /// # Errors
    /// See [`ZonedJalaliDateTime::of`].
    pub fn at_zone<Tz: TimeZone>(&self, tz: &Tz) -> Result<ZonedJalaliDateTime, JalaliError> {
        ZonedJalaliDateTime::of(*self, tz)
    }
}

// --- arithmetic ---

impl JalaliDateTime {
    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn plus_days(&self, days: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.plus_days(days)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn minus_days(&self, days: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.minus_days(days)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.plus_weeks(weeks)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_days`].
    pub fn minus_weeks(&self, weeks: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.minus_weeks(weeks)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_months`].
    pub fn plus_months(&self, months: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.plus_months(months)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_months`].
    pub fn minus_months(&self, months: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.minus_months(months)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_years`].
    pub fn plus_years(&self, years: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.plus_years(years)?))
    }

    /// # Errors
    /// Same as [`JalaliDate::plus_years`].
    pub fn minus_years(&self, years: i64) -> Result<Self, JalaliError> {
        Ok(self.with_date(self.date.minus_years(years)?))
    }

    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the carry leaves the supported years.
    pub fn plus_hours(&self, hours: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(i128::from(hours) * NANOS_PER_HOUR)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn minus_hours(&self, hours: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(-i128::from(hours) * NANOS_PER_HOUR)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn plus_minutes(&self, minutes: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(i128::from(minutes) * NANOS_PER_MINUTE)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn minus_minutes(&self, minutes: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(-i128::from(minutes) * NANOS_PER_MINUTE)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(i128::from(seconds) * NANOS_PER_SECOND)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn minus_seconds(&self, seconds: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(-i128::from(seconds) * NANOS_PER_SECOND)
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(i128::from(nanos))
    }

    /// # Errors
    /// Same as [`JalaliDateTime::plus_hours`].
    pub fn minus_nanos(&self, nanos: i64) -> Result<Self, JalaliError> {
        self.plus_wide_nanos(-i128::from(nanos))
    }

    const fn with_date(&self, date: JalaliDate) -> Self {
        Self {
            date,
            time: self.time,
        }
    }

    /// Shifts the time of day, carrying whole days into the date.
    fn plus_wide_nanos(&self, delta: i128) -> Result<Self, JalaliError> {
        let of_day = i128::from(self.time.num_seconds_from_midnight()) * NANOS_PER_SECOND
            + i128::from(self.time.nanosecond());
        let total = of_day + delta;

        // any carry that does not fit i64 is rejected by plus_days
        let carry = i64::try_from(total.div_euclid(NANOS_PER_DAY)).unwrap_or(i64::MAX);
        let rest = total.rem_euclid(NANOS_PER_DAY);

        let seconds = u32::try_from(rest / NANOS_PER_SECOND).unwrap_or_default();
        let nanos = u32::try_from(rest % NANOS_PER_SECOND).unwrap_or_default();
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).ok_or(
            JalaliError::InvalidTime {
                hour: seconds / 3600,
                minute: seconds / 60 % 60,
                second: seconds % 60,
                nanosecond: nanos,
            },
        )?;

        Ok(Self {
            date: self.date.plus_days(carry)?,
            time,
        })
    }
}

impl Timelike for JalaliDateTime {
    fn hour(&self) -> u32 {
        self.time.hour()
    }

    fn minute(&self) -> u32 {
        self.time.minute()
    }

    fn second(&self) -> u32 {
        self.time.second()
    }

    fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }

    fn with_hour(&self, hour: u32) -> Option<Self> {
        self.time.with_hour(hour).map(|time| Self { time, ..*self })
    }

    fn with_minute(&self, min: u32) -> Option<Self> {
        self.time.with_minute(min).map(|time| Self { time, ..*self })
    }

    fn with_second(&self, sec: u32) -> Option<Self> {
        self.time.with_second(sec).map(|time| Self { time, ..*self })
    }

    fn with_nanosecond(&self, nano: u32) -> Option<Self> {
        if nano > MAX_NANOSECOND {
            return None;
        }
        self.time.with_nanosecond(nano).map(|time| Self { time, ..*self })
    }
}

impl From<JalaliDateTime> for NaiveDateTime {
    fn from(datetime: JalaliDateTime) -> Self {
        datetime.to_gregorian()
    }
}

impl TryFrom<NaiveDateTime> for JalaliDateTime {
    type Error = JalaliError;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_gregorian(datetime)
    }
}

impl fmt::Display for JalaliDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TIME_DESIGNATOR}{:02}{TIME_SEPARATOR}{:02}{TIME_SEPARATOR}{:02}",
            self.date,
            self.hour(),
            self.minute(),
            self.second()
        )?;
        if self.nanosecond() != 0 {
            write!(f, "{FRACTION_SEPARATOR}{:09}", self.nanosecond())?;
        }
        Ok(())
    }
}

impl FromStr for JalaliDateTime {
    type Err = JalaliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(JalaliError::EmptyInput);
        }

        let (date, time) = trimmed.split_once(TIME_DESIGNATOR).ok_or_else(|| {
            JalaliError::InvalidFormat(format!(
                "No time designator found (expected '{TIME_DESIGNATOR}'): {s}"
            ))
        })?;
        let date = date.parse::<JalaliDate>()?;

        let (clock, fraction) = match time.split_once(FRACTION_SEPARATOR) {
            Some((clock, fraction)) => (clock, Some(fraction)),
            None => (time, None),
        };
        let parts: Vec<&str> = clock.split(TIME_SEPARATOR).collect();
        let [hour, minute, second] = parts.as_slice() else {
            return Err(JalaliError::InvalidFormat(format!(
                "expected HH{TIME_SEPARATOR}MM{TIME_SEPARATOR}SS, found {time}"
            )));
        };
        let nanosecond = fraction.map_or(Ok(0), parse_fraction)?;

        Ok(Self {
            date,
            time: make_time(
                u32::from(parse_u8(hour)?),
                u32::from(parse_u8(minute)?),
                u32::from(parse_u8(second)?),
                nanosecond,
            )?,
        })
    }
}

/// Parses 1 to 9 fractional digits into nanoseconds.
fn parse_fraction(s: &str) -> Result<u32, JalaliError> {
    if s.is_empty() || s.len() > 9 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JalaliError::InvalidFormat(s.to_owned()));
    }
    let digits: u32 = s
        .parse()
        .map_err(|_| JalaliError::InvalidFormat(s.to_owned()))?;
    // s.len() <= 9
    Ok(digits * 10u32.pow(9 - s.len() as u32))
}

impl serde::Serialize for JalaliDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for JalaliDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
