/// Minimum supported year (inclusive)
pub const MIN_YEAR: i32 = -999_999;
/// Maximum supported year (inclusive)
pub const MAX_YEAR: i32 = 999_999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days before the first of each month in a non-leap year (index 0 unused).
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in one full 400 year Gregorian cycle.
pub const DAYS_PER_CYCLE: i64 = 146_097;
/// Days from 0000-01-01 to 1970-01-01.
pub const DAYS_0000_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

/// Epoch day of `-999999-01-01`.
pub const MIN_EPOCH_DAY: i64 = -365_961_662;
/// Epoch day of `+999999-12-31`.
pub const MAX_EPOCH_DAY: i64 = 364_522_971;

/// Largest integer every operation in this crate treats as exact (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;
/// Smallest integer every operation in this crate treats as exact.
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_MICRO: i64 = 1_000;
pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
