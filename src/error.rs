//! Error types for the jalali_date crate.

use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_YEAR};

/// Broad category of a [`JalaliError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter is outside its syntactic domain (month 13, hour 24, bad text).
    InvalidArgument,
    /// The year/month/day combination breaks the calendar rules.
    InvalidDate,
    /// A year or epoch day lies outside the supported span.
    OutOfRange,
}

/// Error type for all fallible operations on Jalali dates and times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JalaliError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1-{})", MAX_MONTH)]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number is zero or exceeds the length of the month.
    #[error("invalid day {day} for {year}-{month:02} (max {max_day})")]
    InvalidDay {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u8,
        /// The invalid day number that was provided.
        day: u8,
        /// The last valid day of that month.
        max_day: u8,
    },

    /// Returned when a day-of-year value is zero or exceeds the length of the year.
    #[error("invalid day of year {day_of_year} for year {year} (max {max_day_of_year})")]
    InvalidDayOfYear {
        /// Year of the rejected date.
        year: i32,
        /// The invalid day-of-year value.
        day_of_year: u16,
        /// Days in that year.
        max_day_of_year: u16,
    },

    /// Returned when a time-of-day field is out of range.
    #[error("invalid time {hour:02}:{minute:02}:{second:02}.{nanosecond:09}")]
    InvalidTime {
        /// Hour as given, valid in 0..=23.
        hour: u32,
        /// Minute as given, valid in 0..=59.
        minute: u32,
        /// Second as given, valid in 0..=59.
        second: u32,
        /// Nanosecond as given, valid in 0..=999_999_999.
        nanosecond: u32,
    },

    /// Returned when a year (given directly or produced by arithmetic) is unsupported.
    #[error("year {year} is out of range (must be {}-{})", MIN_YEAR, MAX_YEAR)]
    YearOutOfRange {
        /// The rejected year, widened so arithmetic overflow can be reported.
        year: i64,
    },

    /// Returned when an epoch day maps outside the supported years.
    #[error("epoch day {epoch_day} is out of range")]
    EpochDayOutOfRange {
        /// The rejected epoch day.
        epoch_day: i64,
    },

    /// Returned when text does not match the expected layout.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Returned when parsing an empty string.
    #[error("empty input")]
    EmptyInput,
}

impl JalaliError {
    /// Maps this error onto its [`ErrorKind`].
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMonth { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidFormat(_)
            | Self::EmptyInput => ErrorKind::InvalidArgument,
            Self::InvalidDay { .. } | Self::InvalidDayOfYear { .. } => ErrorKind::InvalidDate,
            Self::YearOutOfRange { .. } | Self::EpochDayOutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// True for calendar violations, including the out-of-range sub-case.
    pub const fn is_invalid_date(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidDate | ErrorKind::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_month() {
        let err = JalaliError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1-12)");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(!err.is_invalid_date());
    }

    #[test]
    fn error_invalid_day() {
        let err = JalaliError::InvalidDay {
            year: 1402,
            month: 12,
            day: 30,
            max_day: 29,
        };
        assert_eq!(err.to_string(), "invalid day 30 for 1402-12 (max 29)");
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
        assert!(err.is_invalid_date());
    }

    #[test]
    fn error_out_of_range_is_invalid_date() {
        let err = JalaliError::YearOutOfRange { year: 3001 };
        assert_eq!(err.to_string(), "year 3001 is out of range (must be 1-3000)");
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(err.is_invalid_date());

        let err = JalaliError::EpochDayOutOfRange { epoch_day: i64::MAX };
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn error_invalid_time() {
        let err = JalaliError::InvalidTime {
            hour: 24,
            minute: 0,
            second: 0,
            nanosecond: 0,
        };
        assert_eq!(err.to_string(), "invalid time 24:00:00.000000000");
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<JalaliError>();
    }
}
