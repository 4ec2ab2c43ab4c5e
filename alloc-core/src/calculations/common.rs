//! Shared money helpers for the limit engine and breakdown calculator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a dollar amount to whole cents, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use alloc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(23000.004)), dec!(23000.00));
/// assert_eq!(round_half_up(dec!(1234.565)), dec!(1234.57));
/// assert_eq!(round_half_up(dec!(-1234.565)), dec!(-1234.57));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value`, or zero when `value` is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use alloc_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-0.01)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(12.50)), dec!(12.50));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
