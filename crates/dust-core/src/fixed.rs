//! Truncating fixed-point arithmetic over `u128` amounts.
//!
//! Every ratio in the engine is `value * numerator / denominator`, truncated
//! toward zero. The product is formed in 256 bits: an 18-decimal allocation
//! times a 10^18-scaled index delta routinely exceeds `u128::MAX` before the
//! division brings it back into range.

use primitive_types::U256;

use crate::error::ArithmeticError;

pub use crate::constants::REWARD_INDEX_PRECISION;

/// `value * numerator / denominator`, truncated.
///
/// Fails with [`ArithmeticError::DivisionByZero`] on a zero denominator and
/// [`ArithmeticError::Overflow`] when the quotient does not fit in `u128`.
pub fn mul_div(value: u128, numerator: u128, denominator: u128) -> Result<u128, ArithmeticError> {
    if denominator == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    let product = U256::from(value)
        .checked_mul(U256::from(numerator))
        .ok_or(ArithmeticError::Overflow)?;
    let quotient = product / U256::from(denominator);
    if quotient > U256::from(u128::MAX) {
        return Err(ArithmeticError::Overflow);
    }
    Ok(quotient.as_u128())
}

/// `value * elapsed / duration` for time fractions. Saturates at `value`
/// once `elapsed >= duration`.
pub fn linear_fraction(value: u128, elapsed: u64, duration: u64) -> Result<u128, ArithmeticError> {
    if duration == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    if elapsed >= duration {
        return Ok(value);
    }
    mul_div(value, elapsed as u128, duration as u128)
}

/// Scale `value` by an index delta expressed in [`REWARD_INDEX_PRECISION`] units.
pub fn apply_index(value: u128, index_delta: u128) -> Result<u128, ArithmeticError> {
    mul_div(value, index_delta, REWARD_INDEX_PRECISION)
}

/// Overflow-checked sum.
pub fn checked_sum<I: IntoIterator<Item = u128>>(values: I) -> Result<u128, ArithmeticError> {
    values
        .into_iter()
        .try_fold(0u128, |acc, v| acc.checked_add(v))
        .ok_or(ArithmeticError::Overflow)
}

/// Widen an unsigned amount into a signed delta.
pub fn to_signed(value: u128) -> Result<i128, ArithmeticError> {
    i128::try_from(value).map_err(|_| ArithmeticError::Overflow)
}

/// `a - b` as a signed delta. Negative when `b > a`.
pub fn signed_diff(a: u128, b: u128) -> Result<i128, ArithmeticError> {
    to_signed(a)?
        .checked_sub(to_signed(b)?)
        .ok_or(ArithmeticError::Overflow)
}
