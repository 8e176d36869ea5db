//! Overflow-safe integer primitives.
//!
//! Every value handled here must stay inside `MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER`
//! (the 53 bit range). Anything that would leave that range is reported as an
//! [`ArithmeticError`] rather than wrapping or saturating.

use crate::consts::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};

/// Failure of an exact integer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ArithmeticError {
    /// An operand was already outside the safe integer range.
    #[error("{value} is outside the safe integer range")]
    Unsafe { value: i64 },

    #[error("overflow computing {lhs} + {rhs}")]
    Add { lhs: i64, rhs: i64 },

    #[error("overflow computing {lhs} - {rhs}")]
    Subtract { lhs: i64, rhs: i64 },

    #[error("overflow computing {lhs} * {rhs}")]
    Multiply { lhs: i64, rhs: i64 },

    /// A value did not fit when narrowed to 32 bits.
    #[error("{value} does not fit in a 32-bit integer")]
    IntCast { value: i64 },
}

/// Returns true when `value` lies in the safe integer range.
#[inline]
pub const fn is_safe(value: i64) -> bool {
    MIN_SAFE_INTEGER <= value && value <= MAX_SAFE_INTEGER
}

pub(crate) fn verify_safe(value: i64) -> Result<i64, ArithmeticError> {
    if is_safe(value) {
        Ok(value)
    } else {
        Err(ArithmeticError::Unsafe { value })
    }
}

/// Exact `a + b`.
///
/// # Errors
/// Returns `ArithmeticError` if an operand or the sum is outside the safe range.
pub fn safe_add(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    verify_safe(a)?;
    verify_safe(b)?;
    let sum = a + b;
    if is_safe(sum) {
        Ok(sum)
    } else {
        Err(ArithmeticError::Add { lhs: a, rhs: b })
    }
}

/// Exact `a - b`.
///
/// # Errors
/// Returns `ArithmeticError` if an operand or the difference is outside the safe range.
pub fn safe_subtract(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    verify_safe(a)?;
    verify_safe(b)?;
    let difference = a - b;
    if is_safe(difference) {
        Ok(difference)
    } else {
        Err(ArithmeticError::Subtract { lhs: a, rhs: b })
    }
}

/// Exact `a * b`.
///
/// # Errors
/// Returns `ArithmeticError` if an operand or the product is outside the safe range.
pub fn safe_multiply(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    verify_safe(a)?;
    verify_safe(b)?;
    match a.checked_mul(b) {
        Some(product) if is_safe(product) => Ok(product),
        _ => Err(ArithmeticError::Multiply { lhs: a, rhs: b }),
    }
}

/// Division rounding toward negative infinity.
///
/// # Panics
/// Panics if `y` is zero.
#[inline]
pub const fn floor_div(x: i64, y: i64) -> i64 {
    let q = x / y;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        q - 1
    } else {
        q
    }
}

/// Remainder matching [`floor_div`]: zero or the same sign as `y`.
///
/// # Panics
/// Panics if `y` is zero.
#[inline]
pub const fn floor_mod(x: i64, y: i64) -> i64 {
    let r = x % y;
    if r != 0 && ((r < 0) != (y < 0)) {
        r + y
    } else {
        r
    }
}

/// Narrows `value` to `i32`.
///
/// # Errors
/// Returns `ArithmeticError::IntCast` if the value does not fit.
pub fn int_cast(value: i64) -> Result<i32, ArithmeticError> {
    i32::try_from(value).map_err(|_| ArithmeticError::IntCast { value })
}
