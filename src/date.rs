use crate::consts::{DAYS_0000_TO_1970, DAYS_PER_CYCLE, FEBRUARY, MAX_EPOCH_DAY, MIN_EPOCH_DAY};
use crate::field::{ChronoField, TemporalAccessor};
use crate::math::{floor_div, floor_mod, int_cast, safe_add, safe_subtract};
use crate::types::{Day, Month, Year};
use crate::{DateTimeError, iso};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A date in the proleptic Gregorian calendar, without time or zone.
///
/// Every value is a valid calendar date between [`LocalDate::MIN`] and
/// [`LocalDate::MAX`]. Ordering is chronological, i.e. lexicographic on
/// `(year, month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl LocalDate {
    /// `-999999-01-01`
    pub const MIN: Self = Self::new_unchecked(Year::MIN, Month::JANUARY, Day::FIRST);
    /// `+999999-12-31`
    pub const MAX: Self = Self::new_unchecked(Year::MAX, Month::DECEMBER, Day::LAST_OF_DECEMBER);
    /// `1970-01-01`, epoch day zero.
    pub const EPOCH: Self = Self::new_unchecked(Year::new_unchecked(1970), Month::JANUARY, Day::FIRST);

    const fn new_unchecked(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Creates a date from year, month and day-of-month.
    ///
    /// The year is validated first, then the month, then the day against the
    /// length of that month.
    ///
    /// # Errors
    /// Returns an `InvalidField` kind error if any field is out of range or the
    /// day does not exist in that month.
    pub fn of(year: i32, month: u8, day: u8) -> Result<Self, DateTimeError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Like [`of`](Self::of) with an already validated month.
    ///
    /// # Errors
    /// Returns an `InvalidField` kind error for a bad year or day.
    pub fn of_month(year: i32, month: Month, day: u8) -> Result<Self, DateTimeError> {
        let year = Year::new(year)?;
        let day = Day::new(day, year, month)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Creates a date from a year and a day-of-year (1-based).
    ///
    /// # Errors
    /// Returns an `InvalidField` kind error if the year is out of range or the
    /// day-of-year is outside `1..=365` (`1..=366` in leap years).
    pub fn of_year_day(year: i32, day_of_year: u16) -> Result<Self, DateTimeError> {
        let year = Year::new(year)?;
        ChronoField::DayOfYear.check_valid_value(i64::from(day_of_year))?;
        let leap = year.is_leap();
        if day_of_year == 366 && !leap {
            return Err(DateTimeError::FieldOutOfRange {
                field: ChronoField::DayOfYear,
                value: 366,
                min:   1,
                max:   365,
            });
        }

        // Guess from a 31-day month, then step back at most once.
        let mut month = Month::new((((day_of_year - 1) / 31) + 1) as u8)?;
        let month_end = month.first_day_of_year(leap) + u16::from(month.length(leap)) - 1;
        if day_of_year > month_end {
            month = month.plus(1);
        }
        let day = day_of_year - month.first_day_of_year(leap) + 1;
        debug_assert!((1..=31).contains(&day));
        Ok(Self::new_unchecked(year, month, Day::new_unchecked(day as u8)))
    }

    /// Creates a date from a count of days since 1970-01-01.
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if `epoch_day` is outside
    /// `MIN.to_epoch_day()..=MAX.to_epoch_day()`.
    pub fn of_epoch_day(epoch_day: i64) -> Result<Self, DateTimeError> {
        ChronoField::EpochDay.check_valid_value(epoch_day).map_err(|err| {
            debug!("epoch day {epoch_day} outside the supported range");
            err
        })?;

        // Shift to a year starting on March 1st of year 0, so the leap day
        // is the last day of the shifted year.
        let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
        let mut adjust = 0;
        if zero_day < 0 {
            let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
            adjust = adjust_cycles * 400;
            zero_day -= adjust_cycles * DAYS_PER_CYCLE;
        }
        let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
        let mut doy_est = zero_day - days_before_march_year(year_est);
        if doy_est < 0 {
            year_est -= 1;
            doy_est = zero_day - days_before_march_year(year_est);
        }
        year_est += adjust;

        // Month and day within the March-based year.
        let march_month0 = (doy_est * 5 + 2) / 153;
        let month = (march_month0 + 2) % 12 + 1;
        let day = doy_est - (march_month0 * 306 + 5) / 10 + 1;
        year_est += march_month0 / 10;

        debug_assert!((1..=12).contains(&month) && (1..=31).contains(&day));
        let year = Year::new(int_cast(year_est)?)?;
        let month = Month::new(month as u8)?;
        let day = Day::new(day as u8, year, month)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Parses the canonical ISO-8601 form produced by `Display`.
    ///
    /// `None` is rejected with a `NullInput` error; every other failure is a
    /// `Parse` error, including well-formed text naming a date that does not
    /// exist such as `2008-06-31`.
    ///
    /// # Errors
    /// Returns `DateTimeError::NullInput` or `DateTimeError::Parse`.
    pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> Result<Self, DateTimeError> {
        let text = text.into().ok_or(DateTimeError::NullInput { name: "text" })?;
        Ok(iso::parse_local_date(text)?)
    }

    /// Obtains a date from any value carrying an epoch day.
    ///
    /// # Errors
    /// Returns `NullInput` for `None` and `TypeMismatch` for values that do
    /// not represent a date.
    pub fn from_temporal(temporal: Option<&dyn TemporalAccessor>) -> Result<Self, DateTimeError> {
        let temporal = temporal.ok_or(DateTimeError::NullInput { name: "temporal" })?;
        if let Some(date) = temporal.query_local_date() {
            return Ok(date);
        }
        if !temporal.is_supported(ChronoField::EpochDay) {
            return Err(DateTimeError::TypeMismatch {
                expected: "LocalDate",
            });
        }
        Self::of_epoch_day(temporal.get_long(ChronoField::EpochDay)?)
    }

    /// Number of days since 1970-01-01, negative before it.
    pub const fn to_epoch_day(&self) -> i64 {
        let y = self.year.get() as i64;
        let m = self.month.get() as i64;
        let mut total = 365 * y;
        if y >= 0 {
            total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
        } else {
            total -= y / -4 - y / -100 + y / -400;
        }
        total += (367 * m - 362) / 12;
        total += self.day.get() as i64 - 1;
        if m > FEBRUARY as i64 {
            total -= 1;
            if !self.is_leap_year() {
                total -= 1;
            }
        }
        total - DAYS_0000_TO_1970
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year.get()
    }

    #[inline]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[inline]
    pub const fn month_value(&self) -> u8 {
        self.month.get()
    }

    #[inline]
    pub const fn day_of_month(&self) -> u8 {
        self.day.get()
    }

    pub const fn day_of_year(&self) -> u16 {
        self.month.first_day_of_year(self.is_leap_year()) + self.day.get() as u16 - 1
    }

    /// ISO day of week, Monday = 1 through Sunday = 7.
    pub const fn day_of_week(&self) -> u8 {
        // 1970-01-01 was a Thursday
        (floor_mod(self.to_epoch_day() + 3, 7) + 1) as u8
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        self.year.is_leap()
    }

    pub const fn length_of_month(&self) -> u8 {
        self.month.length(self.is_leap_year())
    }

    pub const fn length_of_year(&self) -> u16 {
        self.year.length()
    }

    pub fn is_supported(&self, field: ChronoField) -> bool {
        field.is_date_based()
    }

    /// Value of `field` as an `i64`.
    ///
    /// # Errors
    /// Returns `DateTimeError::UnsupportedField` for time-of-day fields.
    pub fn get_long(&self, field: ChronoField) -> Result<i64, DateTimeError> {
        let year = i64::from(self.year());
        let value = match field {
            ChronoField::DayOfWeek => i64::from(self.day_of_week()),
            ChronoField::DayOfMonth => i64::from(self.day_of_month()),
            ChronoField::DayOfYear => i64::from(self.day_of_year()),
            ChronoField::EpochDay => self.to_epoch_day(),
            ChronoField::MonthOfYear => i64::from(self.month_value()),
            ChronoField::ProlepticMonth => year * 12 + i64::from(self.month_value()) - 1,
            ChronoField::YearOfEra => {
                if year >= 1 {
                    year
                } else {
                    1 - year
                }
            }
            ChronoField::Year => year,
            ChronoField::Era => i64::from(year >= 1),
            ChronoField::NanoOfSecond
            | ChronoField::MilliOfSecond
            | ChronoField::SecondOfMinute
            | ChronoField::MinuteOfHour
            | ChronoField::HourOfDay => return Err(DateTimeError::UnsupportedField(field)),
        };
        Ok(value)
    }

    /// Value of `field` as an `i32`.
    ///
    /// # Errors
    /// Returns `DateTimeError::UnsupportedField` for time-of-day fields.
    pub fn get(&self, field: ChronoField) -> Result<i32, DateTimeError> {
        Ok(int_cast(self.get_long(field)?)?)
    }

    /// Returns a copy with the year changed, clamping Feb 29 to Feb 28.
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if `year` is out of range.
    pub fn with_year(&self, year: i32) -> Result<Self, DateTimeError> {
        if year == self.year() {
            return Ok(*self);
        }
        Ok(resolve_previous_valid(Year::new(year)?, self.month, self.day))
    }

    /// Returns a copy with the month changed, clamping the day to its length.
    ///
    /// # Errors
    /// Returns `DateTimeError::FieldOutOfRange` if `month` is out of range.
    pub fn with_month(&self, month: u8) -> Result<Self, DateTimeError> {
        if month == self.month_value() {
            return Ok(*self);
        }
        Ok(resolve_previous_valid(self.year, Month::new(month)?, self.day))
    }

    /// # Errors
    /// Returns an `InvalidField` kind error if the day does not exist in this month.
    pub fn with_day_of_month(&self, day: u8) -> Result<Self, DateTimeError> {
        if day == self.day_of_month() {
            return Ok(*self);
        }
        Self::of_month(self.year(), self.month, day)
    }

    /// # Errors
    /// Returns an `InvalidField` kind error if the day does not exist in this year.
    pub fn with_day_of_year(&self, day_of_year: u16) -> Result<Self, DateTimeError> {
        if day_of_year == self.day_of_year() {
            return Ok(*self);
        }
        Self::of_year_day(self.year(), day_of_year)
    }

    /// # Errors
    /// Fails when the result is outside `MIN..=MAX` or the addition overflows.
    pub fn plus_days(&self, days: i64) -> Result<Self, DateTimeError> {
        if days == 0 {
            return Ok(*self);
        }
        Self::of_epoch_day(safe_add(self.to_epoch_day(), days)?)
    }

    /// # Errors
    /// Fails when the result is outside `MIN..=MAX` or the subtraction overflows.
    pub fn minus_days(&self, days: i64) -> Result<Self, DateTimeError> {
        if days == 0 {
            return Ok(*self);
        }
        Self::of_epoch_day(safe_subtract(self.to_epoch_day(), days)?)
    }

    /// Adds months, clamping the day to the length of the resulting month.
    ///
    /// # Errors
    /// Fails when the resulting year is out of range or the addition overflows.
    pub fn plus_months(&self, months: i64) -> Result<Self, DateTimeError> {
        if months == 0 {
            return Ok(*self);
        }
        let month_count = i64::from(self.year()) * 12 + i64::from(self.month_value()) - 1;
        let calc_months = safe_add(month_count, months)?;
        let year = floor_div(calc_months, 12);
        let year = Year::new(int_cast(year)?)?;
        let month = Month::JANUARY.plus(floor_mod(calc_months, 12));
        Ok(resolve_previous_valid(year, month, self.day))
    }

    /// Adds years, clamping Feb 29 to Feb 28 in non-leap years.
    ///
    /// # Errors
    /// Fails when the resulting year is out of range.
    pub fn plus_years(&self, years: i64) -> Result<Self, DateTimeError> {
        if years == 0 {
            return Ok(*self);
        }
        let year = safe_add(i64::from(self.year()), years)?;
        let year = ChronoField::Year.check_valid_int_value(year)?;
        self.with_year(year)
    }

    #[inline]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    #[inline]
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }

    /// Compares against an arbitrary temporal value.
    ///
    /// The plain `Ord` impl covers date-to-date comparison; this is for
    /// callers holding a possibly absent, dynamically typed value.
    ///
    /// # Errors
    /// Returns `NullInput` for `None` and `TypeMismatch` when `other` is not a date.
    pub fn compare_to(&self, other: Option<&dyn TemporalAccessor>) -> Result<Ordering, DateTimeError> {
        let other = other.ok_or(DateTimeError::NullInput { name: "other" })?;
        let other = other.query_local_date().ok_or(DateTimeError::TypeMismatch {
            expected: "LocalDate",
        })?;
        Ok(self.cmp(&other))
    }
}

/// Days from March 1st of year 0 to March 1st of `year`, for `year >= 0`.
const fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}

fn resolve_previous_valid(year: Year, month: Month, day: Day) -> LocalDate {
    let length = month.length(year.is_leap());
    let day = if day.get() > length {
        Day::new_unchecked(length)
    } else {
        day
    };
    LocalDate::new_unchecked(year, month, day)
}

impl TemporalAccessor for LocalDate {
    fn is_supported(&self, field: ChronoField) -> bool {
        Self::is_supported(self, field)
    }

    fn get_long(&self, field: ChronoField) -> Result<i64, DateTimeError> {
        Self::get_long(self, field)
    }

    fn query_local_date(&self) -> Option<LocalDate> {
        Some(*self)
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        iso::write_local_date(f, self)
    }
}

impl FromStr for LocalDate {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for LocalDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for LocalDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for LocalDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let span = MAX_EPOCH_DAY - MIN_EPOCH_DAY + 1;
        let epoch_day = MIN_EPOCH_DAY + i64::arbitrary(g).rem_euclid(span);
        Self::of_epoch_day(epoch_day).unwrap()
    }
}
