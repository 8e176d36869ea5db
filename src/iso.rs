//! The canonical ISO-8601 extended calendar date form, `YYYY-MM-DD`.
//!
//! Years outside `0..=9999` carry a sign: `-0001-01-02`, `+10000-01-01`.
//! The parser accepts exactly what the printer produces.

use crate::consts::DATE_SEPARATOR;
use crate::field::ChronoField;
use crate::{DateTimeError, LocalDate, ParseError, ParseReason};
use std::fmt;

/// Minimum number of year digits; shorter years are zero-padded.
const YEAR_PAD_WIDTH: usize = 4;
/// Longest year digit run the parser will consume.
const MAX_YEAR_DIGITS: usize = 10;

pub(crate) fn write_local_date(f: &mut fmt::Formatter<'_>, date: &LocalDate) -> fmt::Result {
    let year = date.year();
    if year > 9999 {
        write!(f, "+{year}")?;
    } else if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())?;
    } else {
        write!(f, "{year:04}")?;
    }
    write!(
        f,
        "{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
        date.month_value(),
        date.day_of_month()
    )
}

pub(crate) fn parse_local_date(text: &str) -> Result<LocalDate, ParseError> {
    let result = Parser::new(text).local_date();
    result.map_err(|err| {
        trace!("rejected date text: {err}");
        err
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Sign {
    Plus,
    Minus,
}

struct Parser<'a> {
    text:  &'a str,
    bytes: &'a [u8],
    pos:   usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn local_date(&mut self) -> Result<LocalDate, ParseError> {
        let year = self.year()?;
        self.separator()?;
        let month = self.two_digits()?;
        self.separator()?;
        let day = self.two_digits()?;
        if self.pos != self.bytes.len() {
            return Err(self.error(ParseReason::TrailingText));
        }
        LocalDate::of(year, month, day).map_err(|err| self.invalid(err))
    }

    fn year(&mut self) -> Result<i32, ParseError> {
        let sign = match self.peek() {
            Some(b'+') => Some(Sign::Plus),
            Some(b'-') => Some(Sign::Minus),
            _ => None,
        };
        if sign.is_some() {
            self.pos += 1;
        }

        let start = self.pos;
        let (value, digits) = self.digit_run(MAX_YEAR_DIGITS)?;
        let width_error = || ParseError::new(self.text, start, ParseReason::YearWidth { digits });
        if digits < YEAR_PAD_WIDTH {
            return Err(width_error());
        }
        match sign {
            None if digits > YEAR_PAD_WIDTH => return Err(width_error()),
            Some(Sign::Plus) if digits <= YEAR_PAD_WIDTH => return Err(width_error()),
            Some(Sign::Minus) if value == 0 => {
                return Err(ParseError::new(self.text, start, ParseReason::NegativeZeroYear));
            }
            _ => {}
        }

        let value = if sign == Some(Sign::Minus) { -value } else { value };
        ChronoField::Year
            .check_valid_int_value(value)
            .map_err(|err| self.invalid(err))
    }

    /// Reads up to `max` ASCII digits, requiring at least one.
    fn digit_run(&mut self, max: usize) -> Result<(i64, usize), ParseError> {
        let mut value: i64 = 0;
        let mut digits = 0;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            if digits == max {
                return Err(self.error(ParseReason::YearWidth { digits: digits + 1 }));
            }
            value = value * 10 + i64::from(digit - b'0');
            digits += 1;
            self.pos += 1;
        }
        if digits == 0 {
            return Err(self.error(ParseReason::ExpectedDigit));
        }
        Ok((value, digits))
    }

    fn two_digits(&mut self) -> Result<u8, ParseError> {
        let mut value = 0;
        for _ in 0..2 {
            match self.peek() {
                Some(digit) if digit.is_ascii_digit() => {
                    value = value * 10 + (digit - b'0');
                    self.pos += 1;
                }
                _ => return Err(self.error(ParseReason::ExpectedDigit)),
            }
        }
        Ok(value)
    }

    fn separator(&mut self) -> Result<(), ParseError> {
        if self.peek() == Some(DATE_SEPARATOR as u8) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(ParseReason::ExpectedChar(DATE_SEPARATOR)))
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, reason: ParseReason) -> ParseError {
        ParseError::new(self.text, self.pos, reason)
    }

    /// Well-formed text naming a value outside the calendar.
    fn invalid(&self, err: DateTimeError) -> ParseError {
        ParseError::new(self.text, 0, ParseReason::Invalid(Box::new(err)))
    }
}
