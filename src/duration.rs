use crate::consts::{
    MAX_SAFE_INTEGER, MICROS_PER_SECOND, MILLIS_PER_SECOND, MIN_SAFE_INTEGER, NANOS_PER_MICRO,
    NANOS_PER_MILLI, NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::field::ChronoUnit;
use crate::math::{
    ArithmeticError, floor_div, floor_mod, is_safe, safe_add, safe_multiply, safe_subtract,
    verify_safe,
};
use crate::DateTimeError;
use serde::{Deserialize, Serialize};

/// A span of time held as whole seconds plus a nanosecond remainder.
///
/// The pair is normalized once, at construction: `nano()` is always in
/// `0..1_000_000_000` and carries the same sign convention as
/// [`floor_mod`], so `-0.5s` is `(-1, 500_000_000)`. Equality, ordering and
/// hashing all work on the normalized pair. The seconds part never leaves
/// `MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDuration", into = "RawDuration")]
pub struct Duration {
    seconds: i64,
    nanos:   i32,
}

impl Duration {
    pub const ZERO: Self = Self::from_parts(0, 0);
    /// The longest representable duration.
    pub const MAX: Self = Self::from_parts(MAX_SAFE_INTEGER, NANOS_PER_SECOND - 1);
    /// The most negative representable duration.
    pub const MIN: Self = Self::from_parts(MIN_SAFE_INTEGER, 0);

    /// `nanos` must already be in `0..NANOS_PER_SECOND`.
    #[allow(clippy::cast_possible_truncation)]
    const fn from_parts(seconds: i64, nanos: i64) -> Self {
        debug_assert!(0 <= nanos && nanos < NANOS_PER_SECOND);
        Self {
            seconds,
            nanos: nanos as i32,
        }
    }

    /// `seconds` must already be in the safe range.
    pub(crate) const fn of_safe_seconds(seconds: i64) -> Self {
        debug_assert!(is_safe(seconds));
        Self::from_parts(seconds, 0)
    }

    /// # Errors
    /// Returns `ArithmeticError::Unsafe` if `seconds` is outside the safe range.
    pub fn of_seconds(seconds: i64) -> Result<Self, ArithmeticError> {
        Self::of_seconds_adjusted(seconds, 0)
    }

    /// Normalizes any nanosecond adjustment, negative or larger than a second,
    /// into the seconds part.
    ///
    /// # Errors
    /// Returns `ArithmeticError` if the carried seconds overflow.
    pub fn of_seconds_adjusted(
        seconds: i64,
        nano_adjustment: i64,
    ) -> Result<Self, ArithmeticError> {
        let secs = safe_add(seconds, floor_div(nano_adjustment, NANOS_PER_SECOND))
            .inspect_err(log_overflow)?;
        Ok(Self::from_parts(secs, floor_mod(nano_adjustment, NANOS_PER_SECOND)))
    }

    /// # Errors
    /// Returns `ArithmeticError::Unsafe` if `millis` is outside the safe range.
    pub fn of_millis(millis: i64) -> Result<Self, ArithmeticError> {
        let millis = verify_safe(millis).inspect_err(log_overflow)?;
        Ok(Self::from_parts(
            floor_div(millis, MILLIS_PER_SECOND),
            floor_mod(millis, MILLIS_PER_SECOND) * NANOS_PER_MILLI,
        ))
    }

    /// Any `i64` count of nanoseconds is a little under 300 years, so this
    /// cannot leave the safe range.
    pub const fn of_nanos(nanos: i64) -> Self {
        Self::from_parts(
            floor_div(nanos, NANOS_PER_SECOND),
            floor_mod(nanos, NANOS_PER_SECOND),
        )
    }

    /// # Errors
    /// Returns `ArithmeticError` if the number of seconds overflows.
    pub fn of_minutes(minutes: i64) -> Result<Self, ArithmeticError> {
        Self::of_scaled_seconds(minutes, SECONDS_PER_MINUTE)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the number of seconds overflows.
    pub fn of_hours(hours: i64) -> Result<Self, ArithmeticError> {
        Self::of_scaled_seconds(hours, SECONDS_PER_HOUR)
    }

    /// Standard 24 hour days.
    ///
    /// # Errors
    /// Returns `ArithmeticError` if the number of seconds overflows.
    pub fn of_days(days: i64) -> Result<Self, ArithmeticError> {
        Self::of_scaled_seconds(days, SECONDS_PER_DAY)
    }

    fn of_scaled_seconds(amount: i64, seconds_per_unit: i64) -> Result<Self, ArithmeticError> {
        safe_multiply(amount, seconds_per_unit)
            .map(Self::of_safe_seconds)
            .inspect_err(log_overflow)
    }

    /// `amount` of `unit`. `Days` count as exactly 24 hours; longer units have
    /// no exact length and are rejected.
    ///
    /// # Errors
    /// Returns `DateTimeError::UnsupportedUnit` for estimated units other than
    /// `Days`, or an overflow error.
    pub fn of(amount: i64, unit: ChronoUnit) -> Result<Self, DateTimeError> {
        Self::ZERO.plus(amount, unit)
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanoseconds within the second, always in `0..1_000_000_000`.
    pub const fn nano(&self) -> i32 {
        self.nanos
    }

    pub const fn is_zero(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// # Errors
    /// Returns `DateTimeError::UnsupportedUnit` for estimated units other than
    /// `Days`, or an overflow error.
    pub fn plus(&self, amount: i64, unit: ChronoUnit) -> Result<Self, DateTimeError> {
        if unit == ChronoUnit::Days {
            return Ok(self.plus_seconds(safe_multiply(amount, SECONDS_PER_DAY)?)?);
        }
        if unit.is_duration_estimated() {
            return Err(DateTimeError::UnsupportedUnit(unit));
        }
        if amount == 0 {
            return Ok(*self);
        }
        let duration = match unit {
            ChronoUnit::Nanos => self.plus_nanos(amount)?,
            ChronoUnit::Micros => self
                .plus_seconds(floor_div(amount, MICROS_PER_SECOND))?
                .plus_nanos(floor_mod(amount, MICROS_PER_SECOND) * NANOS_PER_MICRO)?,
            ChronoUnit::Millis => self.plus_millis(amount)?,
            ChronoUnit::Seconds => self.plus_seconds(amount)?,
            _ => self.plus_seconds(safe_multiply(unit.duration().seconds, amount)?)?,
        };
        Ok(duration)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn checked_add(&self, other: Self) -> Result<Self, ArithmeticError> {
        self.plus_seconds_and_nanos(other.seconds, i64::from(other.nanos))
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn checked_sub(&self, other: Self) -> Result<Self, ArithmeticError> {
        let seconds = safe_subtract(0, other.seconds).inspect_err(log_overflow)?;
        self.plus_seconds_and_nanos(seconds, -i64::from(other.nanos))
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, ArithmeticError> {
        self.plus_seconds_and_nanos(seconds, 0)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn plus_millis(&self, millis: i64) -> Result<Self, ArithmeticError> {
        self.plus_seconds_and_nanos(
            floor_div(millis, MILLIS_PER_SECOND),
            floor_mod(millis, MILLIS_PER_SECOND) * NANOS_PER_MILLI,
        )
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, ArithmeticError> {
        self.plus_seconds_and_nanos(0, nanos)
    }

    fn plus_seconds_and_nanos(&self, seconds: i64, nanos: i64) -> Result<Self, ArithmeticError> {
        if seconds == 0 && nanos == 0 {
            return Ok(*self);
        }
        let secs = safe_add(self.seconds, seconds)
            .and_then(|secs| safe_add(secs, nanos / NANOS_PER_SECOND))
            .inspect_err(log_overflow)?;
        Self::of_seconds_adjusted(secs, i64::from(self.nanos) + nanos % NANOS_PER_SECOND)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn checked_mul(&self, scalar: i64) -> Result<Self, ArithmeticError> {
        match scalar {
            0 => return Ok(Self::ZERO),
            1 => return Ok(*self),
            _ => {}
        }
        let overflow = ArithmeticError::Multiply {
            lhs: self.seconds,
            rhs: scalar,
        };
        let total = self
            .total_nanos()
            .checked_mul(i128::from(scalar))
            .ok_or(overflow)?;
        let seconds = i64::try_from(total.div_euclid(i128::from(NANOS_PER_SECOND)))
            .ok()
            .filter(|&seconds| is_safe(seconds))
            .ok_or(overflow)
            .inspect_err(log_overflow)?;
        #[allow(clippy::cast_possible_truncation)]
        let nanos = total.rem_euclid(i128::from(NANOS_PER_SECOND)) as i64;
        Ok(Self::from_parts(seconds, nanos))
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn negated(&self) -> Result<Self, ArithmeticError> {
        self.checked_mul(-1)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn abs(&self) -> Result<Self, ArithmeticError> {
        if self.is_negative() { self.negated() } else { Ok(*self) }
    }

    /// Whole milliseconds, truncating any finer precision.
    ///
    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn to_millis(&self) -> Result<i64, ArithmeticError> {
        let millis = safe_multiply(self.seconds, MILLIS_PER_SECOND)?;
        safe_add(millis, i64::from(self.nanos) / NANOS_PER_MILLI)
    }

    /// # Errors
    /// Returns `ArithmeticError` if the result overflows.
    pub fn to_nanos(&self) -> Result<i64, ArithmeticError> {
        let nanos = safe_multiply(self.seconds, NANOS_PER_SECOND)?;
        safe_add(nanos, i64::from(self.nanos))
    }

    fn total_nanos(&self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }
}

fn log_overflow(_err: &ArithmeticError) {
    trace!("duration overflow: {_err}");
}

impl Default for Duration {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Wire form of a `Duration`. Deserialization re-normalizes the pair.
#[derive(Serialize, Deserialize)]
struct RawDuration {
    seconds: i64,
    nanos:   i64,
}

impl From<Duration> for RawDuration {
    fn from(duration: Duration) -> Self {
        Self {
            seconds: duration.seconds,
            nanos:   i64::from(duration.nanos),
        }
    }
}

impl TryFrom<RawDuration> for Duration {
    type Error = ArithmeticError;

    fn try_from(raw: RawDuration) -> Result<Self, Self::Error> {
        Self::of_seconds_adjusted(raw.seconds, raw.nanos)
    }
}
