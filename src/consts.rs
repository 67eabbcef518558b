/// Minimum supported Jalali year (inclusive), the first year of the calendar
pub const MIN_YEAR: i32 = 1;

/// Maximum supported Jalali year (inclusive), the end of the verified leap table
pub const MAX_YEAR: i32 = 3000;

/// Maximum valid month (Esfand)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for Farvardin
pub const FARVARDIN: u8 = 1;
/// Month number for Shahrivar, the last 31-day month
pub const SHAHRIVAR: u8 = 6;
/// Month number for Mehr, the first 30-day month
pub const MEHR: u8 = 7;
/// Month number for Esfand
pub const ESFAND: u8 = 12;

/// Days in months 1..=6
pub const FIRST_HALF_MONTH_DAYS: u8 = 31;
/// Days in months 7..=11
pub const SECOND_HALF_MONTH_DAYS: u8 = 30;
/// Days in Esfand for common years
pub const ESFAND_DAYS: u8 = 29;
/// Days in Esfand for leap years
pub const ESFAND_DAYS_LEAP: u8 = 30;

/// Day of year of the last day of Shahrivar
pub const FIRST_HALF_DAYS: u16 = 186;

/// Days in a common year
pub const COMMON_YEAR_DAYS: u16 = 365;
/// Days in a leap year
pub const LEAP_YEAR_DAYS: u16 = 366;

/// Epoch day (days since 1970-01-01) of 1 Farvardin 1
pub const JALALI_EPOCH_DAY: i64 = -492_268;

/// `num_days_from_ce` of 1970-01-01 in the proleptic Gregorian calendar
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Length of the arithmetic intercalation cycle
pub(crate) const LEAP_CYCLE_YEARS: i64 = 33;
/// Days in one 33-year cycle (8 leap years)
pub(crate) const LEAP_CYCLE_DAYS: i64 = 12_053;

/// Years that are not leap while the 33-year rule marks them as leap.
///
/// The year following each entry is leap, although the 33-year rule says it is
/// not. Matches the astronomical calendar on the 52.5°E meridian from 1178 AP
/// to 3000 AP; taken from ICU4X `calendrical_calculations::persian`.
pub const NON_LEAP_CORRECTION: [i32; 78] = [
    1502, 1601, 1634, 1667, 1700, 1733, 1766, 1799, 1832, 1865, 1898, 1931, 1964, 1997, 2030, 2059,
    2063, 2096, 2129, 2158, 2162, 2191, 2195, 2224, 2228, 2257, 2261, 2290, 2294, 2323, 2327, 2356,
    2360, 2389, 2393, 2422, 2426, 2455, 2459, 2488, 2492, 2521, 2525, 2554, 2558, 2587, 2591, 2620,
    2624, 2653, 2657, 2686, 2690, 2719, 2723, 2748, 2752, 2756, 2781, 2785, 2789, 2818, 2822, 2847,
    2851, 2855, 2880, 2884, 2888, 2913, 2917, 2921, 2946, 2950, 2954, 2979, 2983, 2987,
];

pub(crate) const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
pub(crate) const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// Largest valid nanosecond field (leap seconds are not represented)
pub const MAX_NANOSECOND: u32 = 999_999_999;

/// Date component separator (ISO 8601 style)
pub const DATE_SEPARATOR: char = '-';
/// Separator between date and time
pub const TIME_DESIGNATOR: char = 'T';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Separator before the fractional second
pub const FRACTION_SEPARATOR: char = '.';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
