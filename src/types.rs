use crate::consts::{
    CENTURY_CYCLE, DAYS_BEFORE_MONTH, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
};
use crate::field::{ChronoField, TemporalAccessor};
use crate::prelude::*;
use crate::DateTimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Builds a `NonZeroU8` in const context. Only used for constants.
const fn nz(value: u8) -> NonZeroU8 {
    match NonZeroU8::new(value) {
        Some(v) => v,
        None => panic!("zero is not a valid month or day"),
    }
}

/// A proleptic year guaranteed to be in the range `MIN_YEAR..=MAX_YEAR`.
/// Year 0 is 1 BCE, year -1 is 2 BCE and so on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize,
)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(i32);

impl Year {
    pub const MIN: Self = Self(MIN_YEAR);
    pub const MAX: Self = Self(MAX_YEAR);

    /// Creates a new Year, validating that it's within `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` for years outside the supported range.
    pub fn new(value: i32) -> Result<Self, DateTimeError> {
        ChronoField::Year.check_valid_int_value(i64::from(value))?;
        Ok(Self(value))
    }

    pub(crate) const fn new_unchecked(value: i32) -> Self {
        debug_assert!(MIN_YEAR <= value && value <= MAX_YEAR);
        Self(value)
    }

    /// Returns the year value as i32
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.0)
    }

    /// Number of days in this year, 365 or 366.
    #[inline]
    pub const fn length(self) -> u16 {
        if self.is_leap() { 366 } else { 365 }
    }
}

impl TryFrom<i32> for Year {
    type Error = DateTimeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TemporalAccessor for Year {
    fn is_supported(&self, field: ChronoField) -> bool {
        matches!(field, ChronoField::Year | ChronoField::YearOfEra | ChronoField::Era)
    }

    fn get_long(&self, field: ChronoField) -> Result<i64, DateTimeError> {
        let year = i64::from(self.0);
        match field {
            ChronoField::Year => Ok(year),
            ChronoField::YearOfEra => Ok(if year < 1 { 1 - year } else { year }),
            ChronoField::Era => Ok(i64::from(year >= 1)),
            other => Err(DateTimeError::UnsupportedField(other)),
        }
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub const JANUARY: Self = Self(nz(1));
    pub const FEBRUARY: Self = Self(nz(2));
    pub const MARCH: Self = Self(nz(3));
    pub const APRIL: Self = Self(nz(4));
    pub const MAY: Self = Self(nz(5));
    pub const JUNE: Self = Self(nz(6));
    pub const JULY: Self = Self(nz(7));
    pub const AUGUST: Self = Self(nz(8));
    pub const SEPTEMBER: Self = Self(nz(9));
    pub const OCTOBER: Self = Self(nz(10));
    pub const NOVEMBER: Self = Self(nz(11));
    pub const DECEMBER: Self = Self(nz(12));

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, DateTimeError> {
        ChronoField::MonthOfYear.check_valid_int_value(i64::from(value))?;
        NonZeroU8::new(value)
            .map(Self)
            .ok_or_else(|| ChronoField::MonthOfYear.out_of_range(i64::from(value)))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Length of this month in days.
    #[inline]
    pub const fn length(self, leap_year: bool) -> u8 {
        let month = self.get();
        if month == FEBRUARY && leap_year {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[month as usize]
        }
    }

    /// Day of year (1-based) of the first day of this month.
    #[inline]
    pub const fn first_day_of_year(self, leap_year: bool) -> u16 {
        let month = self.get();
        let leap = if leap_year && month > FEBRUARY { 1 } else { 0 };
        DAYS_BEFORE_MONTH[month as usize] + 1 + leap
    }

    /// The month `months` after this one, wrapping around the year.
    pub const fn plus(self, months: i64) -> Self {
        let index = crate::math::floor_mod(self.get() as i64 - 1 + months % 12, 12);
        // floor_mod keeps index in 0..12
        Self(nz(index as u8 + 1))
    }
}

impl TryFrom<u8> for Month {
    type Error = DateTimeError;

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

impl TemporalAccessor for Month {
    fn is_supported(&self, field: ChronoField) -> bool {
        field == ChronoField::MonthOfYear
    }

    fn get_long(&self, field: ChronoField) -> Result<i64, DateTimeError> {
        match field {
            ChronoField::MonthOfYear => Ok(i64::from(Month::get(*self))),
            other => Err(DateTimeError::UnsupportedField(other)),
        }
    }
}

/// A day-of-month value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub(crate) const FIRST: Self = Self(nz(MIN_DAY));
    pub(crate) const LAST_OF_DECEMBER: Self = Self(nz(31));

    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if the value is outside 1..=31 and
    /// `DateTimeError::InvalidDate` if the month is shorter than `value`.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateTimeError> {
        let non_zero = Self::try_from(value)?;
        if value > month.length(year.is_leap()) {
            return Err(DateTimeError::InvalidDate {
                year: year.get(),
                month: month.get(),
                day: value,
            });
        }
        Ok(non_zero)
    }

    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(nz(value))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateTimeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against a month without year/month context
        ChronoField::DayOfMonth.check_valid_int_value(i64::from(value))?;
        NonZeroU8::new(value)
            .map(Self)
            .ok_or_else(|| ChronoField::DayOfMonth.out_of_range(i64::from(value)))
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

// Helper functions

/// ISO leap year rule, valid for the whole proleptic range including negative years.
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(0).is_ok());
        assert!(Year::new(-1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(MIN_YEAR).is_ok());
        assert!(Year::new(MAX_YEAR).is_ok());
    }

    #[test]
    fn test_year_new_out_of_range() {
        let err = Year::new(MAX_YEAR + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert!(matches!(
            err,
            DateTimeError::FieldOutOfRange {
                field: ChronoField::Year,
                value: 1_000_000,
                ..
            }
        ));
        assert!(Year::new(i32::MIN).is_err());
    }

    #[test]
    fn test_year_length() {
        assert_eq!(Year::new(2007).unwrap().length(), 365);
        assert_eq!(Year::new(2008).unwrap().length(), 366);
        assert_eq!(Year::new(-4).unwrap().length(), 366);
    }

    #[test]
    fn test_year_into_i32_and_display() {
        let year = Year::new(-42).unwrap();
        let value: i32 = year.into();
        assert_eq!(value, -42);
        assert_eq!(year.to_string(), "-42");
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);

        assert!(serde_json::from_str::<Year>("1000000").is_err());
    }

    #[test]
    fn test_year_temporal_accessor() {
        let year = Year::new(0).unwrap();
        assert_eq!(year.get_long(ChronoField::Year).unwrap(), 0);
        assert_eq!(year.get_long(ChronoField::YearOfEra).unwrap(), 1);
        assert_eq!(year.get_long(ChronoField::Era).unwrap(), 0);
        assert!(!year.is_supported(ChronoField::MonthOfYear));
        assert!(matches!(
            year.get_long(ChronoField::MonthOfYear),
            Err(DateTimeError::UnsupportedField(ChronoField::MonthOfYear))
        ));
    }

    #[test]
    fn test_month_new_valid() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        for m in [0, 13, 255] {
            let err = Month::new(m).unwrap_err();
            assert!(matches!(
                err,
                DateTimeError::FieldOutOfRange {
                    field: ChronoField::MonthOfYear,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_month_constants() {
        assert_eq!(Month::JANUARY.get(), 1);
        assert_eq!(Month::JULY.get(), 7);
        assert_eq!(Month::DECEMBER.get(), 12);
        assert_eq!(Month::new(7).unwrap(), Month::JULY);
    }

    #[test]
    fn test_month_length() {
        assert_eq!(Month::FEBRUARY.length(false), 28);
        assert_eq!(Month::FEBRUARY.length(true), 29);
        assert_eq!(Month::APRIL.length(true), 30);
        assert_eq!(Month::DECEMBER.length(false), 31);
    }

    #[test]
    fn test_month_first_day_of_year() {
        assert_eq!(Month::JANUARY.first_day_of_year(true), 1);
        assert_eq!(Month::FEBRUARY.first_day_of_year(true), 32);
        assert_eq!(Month::MARCH.first_day_of_year(false), 60);
        assert_eq!(Month::MARCH.first_day_of_year(true), 61);
        assert_eq!(Month::DECEMBER.first_day_of_year(false), 335);
        assert_eq!(Month::DECEMBER.first_day_of_year(true), 336);
    }

    #[test]
    fn test_month_plus() {
        assert_eq!(Month::JANUARY.plus(1), Month::FEBRUARY);
        assert_eq!(Month::DECEMBER.plus(1), Month::JANUARY);
        assert_eq!(Month::JANUARY.plus(-1), Month::DECEMBER);
        assert_eq!(Month::MARCH.plus(25), Month::APRIL);
        assert_eq!(Month::MARCH.plus(-26), Month::JANUARY);
    }

    #[test]
    fn test_month_temporal_accessor() {
        struct TestCase {
            field:    ChronoField,
            expected: Result<i64, DateTimeError>,
        }

        let cases = [
            TestCase {
                field:    ChronoField::MonthOfYear,
                expected: Ok(7),
            },
            TestCase {
                field:    ChronoField::DayOfMonth,
                expected: Err(DateTimeError::UnsupportedField(ChronoField::DayOfMonth)),
            },
            TestCase {
                field:    ChronoField::Year,
                expected: Err(DateTimeError::UnsupportedField(ChronoField::Year)),
            },
        ];

        for case in &cases {
            assert_eq!(Month::JULY.get_long(case.field), case.expected, "{}", case.field);
        }
        assert!(Month::JULY.is_supported(ChronoField::MonthOfYear));
        assert_eq!(TemporalAccessor::get(&Month::DECEMBER, ChronoField::MonthOfYear), Ok(12));
        assert_eq!(Month::DECEMBER.get(), 12);
    }

    #[test]
    fn test_month_serde() {
        let month = Month::new(8).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "8");

        let parsed: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, parsed);
        assert!(serde_json::from_str::<Month>("13").is_err());
    }

    #[test]
    fn test_day_new_valid() {
        let y2023 = Year::new(2023).unwrap();
        let y2024 = Year::new(2024).unwrap();

        // January - 31 days
        assert!(Day::new(1, y2024, Month::JANUARY).is_ok());
        assert!(Day::new(31, y2024, Month::JANUARY).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, y2023, Month::FEBRUARY).is_ok());
        assert!(Day::new(29, y2023, Month::FEBRUARY).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, y2024, Month::FEBRUARY).is_ok());
        assert!(Day::new(30, y2024, Month::FEBRUARY).is_err());

        // April - 30 days
        assert!(Day::new(30, y2024, Month::APRIL).is_ok());
        assert!(Day::new(31, y2024, Month::APRIL).is_err());
    }

    #[test]
    fn test_day_new_invalid() {
        let year = Year::new(2024).unwrap();
        assert!(matches!(
            Day::new(0, year, Month::JANUARY),
            Err(DateTimeError::FieldOutOfRange {
                field: ChronoField::DayOfMonth,
                value: 0,
                ..
            })
        ));
        assert!(matches!(
            Day::new(32, year, Month::JANUARY),
            Err(DateTimeError::FieldOutOfRange {
                field: ChronoField::DayOfMonth,
                value: 32,
                ..
            })
        ));
        assert_eq!(
            Day::new(31, year, Month::APRIL),
            Err(DateTimeError::InvalidDate {
                year: 2024,
                month: 4,
                day: 31
            })
        );
    }

    #[test]
    fn test_day_try_from_u8() {
        // Valid day (context-free validation)
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
        let result: Result<Day, _> = 32.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_day_serde() {
        let day = Day::new(15, Year::new(2024).unwrap(), Month::AUGUST).unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "15");

        let parsed: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(day, parsed);
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2021,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        1500,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        1600,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        0,
                is_leap:     true,
                description: "year zero is divisible by 400",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "negative, divisible by 4",
            },
            TestCase {
                year:        -100,
                is_leap:     false,
                description: "negative century not divisible by 400",
            },
            TestCase {
                year:        -400,
                is_leap:     true,
                description: "negative, divisible by 400",
            },
            TestCase {
                year:        -1,
                is_leap:     false,
                description: "negative, not divisible by 4",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_all_months_have_valid_days() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
    }
}
