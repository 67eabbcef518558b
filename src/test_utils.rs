//! Shorthand constructors for unit tests.

use crate::{JalaliDate, JalaliDateRange, JalaliDateTime};

pub fn date(year: i32, month: u8, day: u8) -> JalaliDate {
    JalaliDate::new(year, month, day).expect("valid test date")
}

pub fn datetime(year: i32, month: u8, day: u8, hour: u32, minute: u32, second: u32) -> JalaliDateTime {
    JalaliDateTime::from_ymd_hms(year, month, day, hour, minute, second).expect("valid test date-time")
}

pub fn range(start: (i32, u8, u8), end: (i32, u8, u8)) -> JalaliDateRange {
    JalaliDateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).expect("valid test range")
}
