//! Field and unit vocabulary shared by the value types.
//!
//! Both enums are closed and carry no references to the value types, so
//! `LocalDate` and `Duration` can depend on them without any ordering concerns.

use crate::consts::{
    MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR, NANOS_PER_MILLI, NANOS_PER_SECOND,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::math::int_cast;
use crate::prelude::*;
use crate::{DateTimeError, Duration, LocalDate};

/// The inclusive range of values a field may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{min} - {max}")]
pub struct ValueRange {
    min: i64,
    max: i64,
}

impl ValueRange {
    pub const fn of(min: i64, max: i64) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    pub const fn min(&self) -> i64 {
        self.min
    }

    pub const fn max(&self) -> i64 {
        self.max
    }

    #[inline]
    pub const fn is_valid_value(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// True when every value in the range fits in an `i32`.
    pub const fn is_int_value(&self) -> bool {
        self.min >= i32::MIN as i64 && self.max <= i32::MAX as i64
    }
}

/// A field of date or time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ChronoField {
    NanoOfSecond,
    MilliOfSecond,
    SecondOfMinute,
    MinuteOfHour,
    HourOfDay,
    /// ISO day of week, Monday = 1 through Sunday = 7.
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    /// Days since 1970-01-01.
    EpochDay,
    MonthOfYear,
    /// Months since year 0, i.e. `year * 12 + month - 1`.
    ProlepticMonth,
    YearOfEra,
    Year,
    /// 0 before the common era, 1 within it.
    Era,
}

impl ChronoField {
    pub const fn range(self) -> ValueRange {
        match self {
            Self::NanoOfSecond => ValueRange::of(0, NANOS_PER_SECOND - 1),
            Self::MilliOfSecond => ValueRange::of(0, 999),
            Self::SecondOfMinute | Self::MinuteOfHour => ValueRange::of(0, 59),
            Self::HourOfDay => ValueRange::of(0, 23),
            Self::DayOfWeek => ValueRange::of(1, 7),
            Self::DayOfMonth => ValueRange::of(1, 31),
            Self::DayOfYear => ValueRange::of(1, 366),
            Self::EpochDay => ValueRange::of(MIN_EPOCH_DAY, MAX_EPOCH_DAY),
            Self::MonthOfYear => ValueRange::of(1, 12),
            Self::ProlepticMonth => {
                ValueRange::of(MIN_YEAR as i64 * 12, MAX_YEAR as i64 * 12 + 11)
            }
            Self::YearOfEra => ValueRange::of(1, MAX_YEAR as i64 + 1),
            Self::Year => ValueRange::of(MIN_YEAR as i64, MAX_YEAR as i64),
            Self::Era => ValueRange::of(0, 1),
        }
    }

    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::DayOfWeek
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::EpochDay
                | Self::MonthOfYear
                | Self::ProlepticMonth
                | Self::YearOfEra
                | Self::Year
                | Self::Era
        )
    }

    pub const fn is_time_based(self) -> bool {
        !self.is_date_based()
    }

    pub(crate) fn out_of_range(self, value: i64) -> DateTimeError {
        let range = self.range();
        DateTimeError::FieldOutOfRange {
            field: self,
            value,
            min: range.min,
            max: range.max,
        }
    }

    /// Checks that `value` is valid for this field.
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if it is not.
    pub fn check_valid_value(self, value: i64) -> Result<i64, DateTimeError> {
        if self.range().is_valid_value(value) {
            Ok(value)
        } else {
            Err(self.out_of_range(value))
        }
    }

    /// Checks that `value` is valid for this field and narrows it to `i32`.
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if it is not valid.
    pub fn check_valid_int_value(self, value: i64) -> Result<i32, DateTimeError> {
        debug_assert!(self.range().is_int_value(), "{self} is not an int field");
        let value = self.check_valid_value(value)?;
        Ok(int_cast(value)?)
    }
}

/// A unit of time, ordered from the shortest to the longest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ChronoUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
}

/// Average Gregorian year, 365.2425 days.
const SECONDS_PER_YEAR: i64 = 31_556_952;

impl ChronoUnit {
    /// The length of this unit. Units from `Days` up are estimates, and `Eras`
    /// saturates at [`Duration::MAX`].
    pub const fn duration(self) -> Duration {
        match self {
            Self::Nanos => Duration::of_nanos(1),
            Self::Micros => Duration::of_nanos(1_000),
            Self::Millis => Duration::of_nanos(NANOS_PER_MILLI),
            Self::Seconds => Duration::of_safe_seconds(1),
            Self::Minutes => Duration::of_safe_seconds(SECONDS_PER_MINUTE),
            Self::Hours => Duration::of_safe_seconds(SECONDS_PER_HOUR),
            Self::HalfDays => Duration::of_safe_seconds(SECONDS_PER_DAY / 2),
            Self::Days => Duration::of_safe_seconds(SECONDS_PER_DAY),
            Self::Weeks => Duration::of_safe_seconds(7 * SECONDS_PER_DAY),
            Self::Months => Duration::of_safe_seconds(SECONDS_PER_YEAR / 12),
            Self::Years => Duration::of_safe_seconds(SECONDS_PER_YEAR),
            Self::Decades => Duration::of_safe_seconds(SECONDS_PER_YEAR * 10),
            Self::Centuries => Duration::of_safe_seconds(SECONDS_PER_YEAR * 100),
            Self::Millennia => Duration::of_safe_seconds(SECONDS_PER_YEAR * 1_000),
            // A billion years does not fit the safe range.
            Self::Eras | Self::Forever => Duration::MAX,
        }
    }

    /// Days and longer vary with daylight saving and calendar rules.
    pub const fn is_duration_estimated(self) -> bool {
        self as u8 >= Self::Days as u8
    }

    pub const fn is_date_based(self) -> bool {
        self as u8 >= Self::Days as u8 && !matches!(self, Self::Forever)
    }

    pub const fn is_time_based(self) -> bool {
        (self as u8) < Self::Days as u8
    }
}

/// Read access to the fields of a temporal value.
pub trait TemporalAccessor {
    fn is_supported(&self, field: ChronoField) -> bool;

    /// # Errors
    /// Returns `DateTimeError::UnsupportedField` for fields this value does not carry.
    fn get_long(&self, field: ChronoField) -> Result<i64, DateTimeError>;

    /// Like [`get_long`](Self::get_long), narrowed to `i32`.
    ///
    /// # Errors
    /// Also fails with an overflow if the value does not fit.
    fn get(&self, field: ChronoField) -> Result<i32, DateTimeError> {
        Ok(int_cast(self.get_long(field)?)?)
    }

    /// [`get_long`](Self::get_long) for a possibly absent field.
    ///
    /// # Errors
    /// Returns `DateTimeError::NullInput` when `field` is `None`.
    fn get_field(&self, field: Option<ChronoField>) -> Result<i64, DateTimeError> {
        let field = field.ok_or(DateTimeError::NullInput { name: "field" })?;
        self.get_long(field)
    }

    /// The calendar date this value represents, if it represents one.
    fn query_local_date(&self) -> Option<LocalDate> {
        None
    }
}
