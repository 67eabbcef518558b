//! Jalali date-time with a UTC offset.
//!
//! The offset rides along with the wall-clock fields. Calendar arithmetic
//! never consults it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Timelike, Utc};
use tracing::debug;

use crate::consts::{TIME_DESIGNATOR, TIME_SEPARATOR};
use crate::date::parse_u8;
use crate::{JalaliDate, JalaliDateTime, JalaliError};

/// A [`JalaliDateTime`] at a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZonedJalaliDateTime {
    date_time: JalaliDateTime,
    offset:    FixedOffset,
}

fn offset_seconds(offset: FixedOffset) -> TimeDelta {
    TimeDelta::seconds(i64::from(offset.local_minus_utc()))
}

/// Offset in force just before the transition that skips `local`.
///
/// Across a forward jump from `before` to `after`, the instant `local - after`
/// reads `before` and `local - before` reads `after`. A gap always raises the
/// offset, so the smaller reading is the one before the jump.
fn offset_before_gap<Tz: TimeZone>(local: &NaiveDateTime, tz: &Tz) -> FixedOffset {
    let guess = tz.offset_from_utc_datetime(local).fix();
    let first = tz.offset_from_utc_datetime(&(*local - offset_seconds(guess))).fix();
    let second = tz.offset_from_utc_datetime(&(*local - offset_seconds(first))).fix();
    if first.local_minus_utc() <= second.local_minus_utc() {
        first
    } else {
        second
    }
}

impl ZonedJalaliDateTime {
    /// Pairs wall-clock fields with an offset as given.
    pub const fn new(date_time: JalaliDateTime, offset: FixedOffset) -> Self {
        Self { date_time, offset }
    }

    /// Places `date_time` in `tz`.
    ///
    /// Ambiguous wall-clock times take the earlier offset. Times skipped by a
    /// transition move forward by the length of the gap, using the offset in
    /// force before it.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the gap shift leaves the supported years.
    pub fn of<Tz: TimeZone>(date_time: JalaliDateTime, tz: &Tz) -> Result<Self, JalaliError> {
        let local = date_time.to_gregorian();
        if let Some(offset) = tz.offset_from_local_datetime(&local).earliest() {
            return Ok(Self::new(date_time, offset.fix()));
        }

        let before = offset_before_gap(&local, tz);
        let shifted = tz.from_utc_datetime(&(local - offset_seconds(before)));
        debug!(%date_time, shifted = %shifted.naive_local(), "local time falls in a zone gap");
        Self::from_datetime(&shifted)
    }

    /// Wall-clock fields and offset of a chrono instant.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` outside the supported years.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, JalaliError> {
        Ok(Self::new(
            JalaliDateTime::from_datetime(datetime)?,
            datetime.offset().fix(),
        ))
    }

    /// The same instant as a chrono date-time.
    pub fn to_datetime(&self) -> DateTime<FixedOffset> {
        let utc = self.date_time.to_gregorian() - offset_seconds(self.offset);
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }

    /// Current time in the system time zone.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now() -> Result<Self, JalaliError> {
        Self::from_datetime(&Local::now())
    }

    /// Current time in `tz`.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the clock is outside the supported years.
    pub fn now_in<Tz: TimeZone>(tz: &Tz) -> Result<Self, JalaliError> {
        Self::from_datetime(&Utc::now().with_timezone(tz))
    }

    /// The same instant seen from `tz`.
    ///
    /// # Errors
    /// Returns `JalaliError::EpochDayOutOfRange` if the local date leaves the supported years.
    pub fn with_zone_same_instant<Tz: TimeZone>(&self, tz: &Tz) -> Result<Self, JalaliError> {
        Self::from_datetime(&self.to_datetime().with_timezone(tz))
    }

    /// Same wall-clock fields at another offset.
    pub const fn with_offset(&self, offset: FixedOffset) -> Self {
        Self::new(self.date_time, offset)
    }

    /// Returns the wall-clock fields without the offset
    pub const fn date_time(&self) -> JalaliDateTime {
        self.date_time
    }

    /// Returns the local date
    pub const fn date(&self) -> JalaliDate {
        self.date_time.date()
    }

    /// Returns the offset from UTC
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the local year
    pub const fn year(&self) -> i32 {
        self.date_time.year()
    }

    /// Returns the local month (1..=12)
    pub const fn month(&self) -> u8 {
        self.date_time.month()
    }

    /// Returns the local day of month
    pub const fn day(&self) -> u8 {
        self.date_time.day()
    }
}

/// Local-field arithmetic; the offset is carried through unchanged.
macro_rules! delegate_arithmetic {
    ($($name:ident),* $(,)?) => {
        impl ZonedJalaliDateTime {
            $(
                #[doc = concat!("[`JalaliDateTime::", stringify!($name), "`] on the local fields.")]
                ///
                /// # Errors
                /// Returns the underlying range error.
                pub fn $name(&self, amount: i64) -> Result<Self, JalaliError> {
                    Ok(Self::new(self.date_time.$name(amount)?, self.offset))
                }
            )*
        }
    };
}

delegate_arithmetic!(
    plus_days,
    minus_days,
    plus_weeks,
    minus_weeks,
    plus_months,
    minus_months,
    plus_years,
    minus_years,
    plus_hours,
    minus_hours,
    plus_minutes,
    minus_minutes,
    plus_seconds,
    minus_seconds,
    plus_nanos,
    minus_nanos,
);

impl Timelike for ZonedJalaliDateTime {
    fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    fn minute(&self) -> u32 {
        self.date_time.minute()
    }

    fn second(&self) -> u32 {
        self.date_time.second()
    }

    fn nanosecond(&self) -> u32 {
        self.date_time.nanosecond()
    }

    fn with_hour(&self, hour: u32) -> Option<Self> {
        self.date_time.with_hour(hour).map(|dt| self.with_date_time(dt))
    }

    fn with_minute(&self, min: u32) -> Option<Self> {
        self.date_time.with_minute(min).map(|dt| self.with_date_time(dt))
    }

    fn with_second(&self, sec: u32) -> Option<Self> {
        self.date_time.with_second(sec).map(|dt| self.with_date_time(dt))
    }

    fn with_nanosecond(&self, nano: u32) -> Option<Self> {
        self.date_time.with_nanosecond(nano).map(|dt| self.with_date_time(dt))
    }
}

impl ZonedJalaliDateTime {
    const fn with_date_time(&self, date_time: JalaliDateTime) -> Self {
        Self::new(date_time, self.offset)
    }
}

impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for ZonedJalaliDateTime {
    type Error = JalaliError;

    fn try_from(datetime: DateTime<Tz>) -> Result<Self, Self::Error> {
        Self::from_datetime(&datetime)
    }
}

impl From<ZonedJalaliDateTime> for DateTime<FixedOffset> {
    fn from(zoned: ZonedJalaliDateTime) -> Self {
        zoned.to_datetime()
    }
}

impl fmt::Display for ZonedJalaliDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date_time, self.offset)
    }
}

impl FromStr for ZonedJalaliDateTime {
    type Err = JalaliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(JalaliError::EmptyInput);
        }

        // the offset sign can only appear after the time designator
        let time_start = trimmed.find(TIME_DESIGNATOR).ok_or_else(|| {
            JalaliError::InvalidFormat(format!(
                "No time designator found (expected '{TIME_DESIGNATOR}'): {s}"
            ))
        })?;
        let split = trimmed[time_start..]
            .find(['+', '-', 'Z'])
            .map(|pos| time_start + pos)
            .ok_or_else(|| JalaliError::InvalidFormat(format!("No UTC offset found: {s}")))?;

        let date_time = trimmed[..split].parse::<JalaliDateTime>()?;
        let offset = parse_offset(&trimmed[split..])?;
        Ok(Self::new(date_time, offset))
    }
}

/// Parses `Z`, `+HH:MM[:SS]` or `+HHMM[SS]`.
fn parse_offset(s: &str) -> Result<FixedOffset, JalaliError> {
    let invalid = || JalaliError::InvalidFormat(format!("Invalid UTC offset: {s}"));
    if s == "Z" {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match s.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let fields: Vec<&str> = if rest.contains(TIME_SEPARATOR) {
        rest.split(TIME_SEPARATOR).collect()
    } else if rest.is_ascii() && matches!(rest.len(), 4 | 6) {
        (0..rest.len()).step_by(2).map(|i| &rest[i..i + 2]).collect()
    } else {
        return Err(invalid());
    };

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m] => (*h, *m, None),
        [h, m, sec] => (*h, *m, Some(*sec)),
        _ => return Err(invalid()),
    };
    if [Some(hours), Some(minutes), seconds].into_iter().flatten().any(|f| f.len() != 2) {
        return Err(invalid());
    }

    let hours = i32::from(parse_u8(hours)?);
    let minutes = i32::from(parse_u8(minutes)?);
    let seconds = seconds.map_or(Ok(0), parse_u8).map(i32::from)?;
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds)).ok_or_else(invalid)
}

impl serde::Serialize for ZonedJalaliDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ZonedJalaliDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
