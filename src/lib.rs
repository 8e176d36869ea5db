//! Proleptic-Gregorian dates and normalized durations.
//!
//! [`LocalDate`] is an immutable `(year, month, day)` value convertible to and
//! from a linear epoch-day count. [`Duration`] is an immutable
//! `(seconds, nanos)` span whose nanosecond part is always in
//! `0..1_000_000_000`. All arithmetic is exact over the 53 bit safe integer
//! range and fails with a typed error instead of wrapping.
//!
//! ```
//! use isochron::{Duration, LocalDate};
//!
//! let date = LocalDate::of(2008, 7, 5)?;
//! assert_eq!(date.to_string(), "2008-07-05");
//! assert_eq!(LocalDate::of_epoch_day(date.to_epoch_day())?, date);
//!
//! let half = Duration::of_millis(-500)?;
//! assert_eq!((half.seconds(), half.nano()), (-1, 500_000_000));
//! # Ok::<(), isochron::DateTimeError>(())
//! ```

#[macro_use]
mod logging;

mod consts;
mod date;
mod duration;
mod field;
mod iso;
pub mod math;
mod prelude;
mod types;

pub use consts::*;
pub use date::LocalDate;
pub use duration::Duration;
pub use field::{ChronoField, ChronoUnit, TemporalAccessor, ValueRange};
pub use math::ArithmeticError;
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;

/// The broad category of a [`DateTimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// A required argument was absent.
    NullInput,
    /// A value outside its calendar range, an invalid field combination or
    /// a value of the wrong kind.
    InvalidField,
    /// A field or unit that exists but cannot be computed for this value.
    UnsupportedField,
    /// Text that does not match the ISO grammar or names an invalid date.
    Parse,
    /// An exact integer result that does not fit the supported range.
    Overflow,
}

/// Error type for every fallible date and duration operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateTimeError {
    #[error("{name} must not be null")]
    NullInput { name: &'static str },

    #[error("Invalid value for {field} (valid values {min} - {max}): {value}")]
    FieldOutOfRange {
        field: ChronoField,
        value: i64,
        min:   i64,
        max:   i64,
    },

    /// Each field is in range but the combination is not a calendar date.
    #[error("Invalid date: day {day} does not exist in {year}-{month:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    #[error("Unable to obtain {expected} from the given value")]
    TypeMismatch { expected: &'static str },

    #[error("Unsupported field: {0}")]
    UnsupportedField(ChronoField),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(ChronoUnit),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Overflow(#[from] ArithmeticError),
}

impl DateTimeError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NullInput { .. } => ErrorKind::NullInput,
            Self::FieldOutOfRange { .. } | Self::InvalidDate { .. } | Self::TypeMismatch { .. } => {
                ErrorKind::InvalidField
            }
            Self::UnsupportedField(_) | Self::UnsupportedUnit(_) => ErrorKind::UnsupportedField,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Overflow(_) => ErrorKind::Overflow,
        }
    }
}

/// Why a piece of text was rejected by the ISO date parser.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseReason {
    #[display(fmt = "expected a digit")]
    ExpectedDigit,
    #[display(fmt = "expected '{}'", "_0")]
    ExpectedChar(char),
    #[display(fmt = "year with {digits} digits needs a sign exactly when longer than 4 digits")]
    YearWidth { digits: usize },
    #[display(fmt = "year -0000 is not allowed")]
    NegativeZeroYear,
    #[display(fmt = "unexpected trailing text")]
    TrailingText,
    #[display(fmt = "{}", "_0")]
    Invalid(Box<DateTimeError>),
}

/// Text could not be parsed as a date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Text '{text}' could not be parsed at index {index}: {reason}")]
pub struct ParseError {
    text:   String,
    index:  usize,
    reason: ParseReason,
}

impl ParseError {
    pub(crate) fn new(text: &str, index: usize, reason: ParseReason) -> Self {
        Self {
            text: text.to_owned(),
            index,
            reason,
        }
    }

    /// The rejected input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset at which parsing failed.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn reason(&self) -> &ParseReason {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        struct TestCase {
            error: DateTimeError,
            kind:  ErrorKind,
        }

        let cases = [
            TestCase {
                error: DateTimeError::NullInput { name: "text" },
                kind:  ErrorKind::NullInput,
            },
            TestCase {
                error: ChronoField::MonthOfYear.out_of_range(13),
                kind:  ErrorKind::InvalidField,
            },
            TestCase {
                error: DateTimeError::InvalidDate {
                    year:  2007,
                    month: 2,
                    day:   29,
                },
                kind:  ErrorKind::InvalidField,
            },
            TestCase {
                error: DateTimeError::TypeMismatch {
                    expected: "LocalDate",
                },
                kind:  ErrorKind::InvalidField,
            },
            TestCase {
                error: DateTimeError::UnsupportedField(ChronoField::HourOfDay),
                kind:  ErrorKind::UnsupportedField,
            },
            TestCase {
                error: DateTimeError::UnsupportedUnit(ChronoUnit::Months),
                kind:  ErrorKind::UnsupportedField,
            },
            TestCase {
                error: ParseError::new("x", 0, ParseReason::ExpectedDigit).into(),
                kind:  ErrorKind::Parse,
            },
            TestCase {
                error: ArithmeticError::IntCast { value: 1 << 40 }.into(),
                kind:  ErrorKind::Overflow,
            },
        ];

        for case in &cases {
            assert_eq!(case.error.kind(), case.kind, "{}", case.error);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = DateTimeError::InvalidDate {
            year:  2007,
            month: 2,
            day:   29,
        };
        assert_eq!(err.to_string(), "Invalid date: day 29 does not exist in 2007-02");

        let err = ParseError::new("2008/07/05", 4, ParseReason::ExpectedChar('-'));
        assert_eq!(err.text(), "2008/07/05");
        assert_eq!(err.index(), 4);
        assert_eq!(
            err.to_string(),
            "Text '2008/07/05' could not be parsed at index 4: expected '-'"
        );
    }

    #[test]
    fn test_invalid_reason_displays_cause() {
        let cause = DateTimeError::InvalidDate {
            year:  2008,
            month: 6,
            day:   31,
        };
        let reason = ParseReason::Invalid(Box::new(cause.clone()));
        assert_eq!(reason.to_string(), cause.to_string());
    }
}
