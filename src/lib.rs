//! Solar Hijri (Jalali) calendar dates backed by a shared epoch-day count.
//!
//! Every date converts through the number of days since 1970-01-01, so Jalali
//! and proleptic Gregorian dates round-trip exactly over years 1 to 3000 AP.
//!
//! ```
//! use chrono::NaiveDate;
//! use jalali_date::JalaliDate;
//!
//! let nowruz = JalaliDate::new(1403, 1, 1)?;
//! assert_eq!(nowruz.to_gregorian(), NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
//! assert_eq!(nowruz.minus_days(1)?.to_string(), "1402-12-29");
//! # Ok::<(), jalali_date::JalaliError>(())
//! ```

mod consts;
mod convert;
mod date;
mod datetime;
mod error;
mod prelude;
mod range;
mod types;
mod zoned;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use convert::{
    Calendar, MAX_EPOCH_DAY, MIN_EPOCH_DAY, epoch_day_from_gregorian, epoch_day_from_jalali,
    gregorian_from_epoch_day, jalali_from_epoch_day,
};
pub use date::JalaliDate;
pub use datetime::JalaliDateTime;
pub use error::{ErrorKind, JalaliError};
pub use range::{Days, JalaliDateRange, RangeError};
pub use types::{Day, Month, Year, days_in_month, days_in_year, is_leap_year, is_non_leap_correction};
pub use zoned::ZonedJalaliDateTime;
