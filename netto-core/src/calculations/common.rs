//! Common rounding helpers for salary calculations.
//!
//! German tax amounts are truncated to whole euros, while displayed
//! currency values are rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Nudge added before truncating so values like `1034.9999999999` that stem
/// from inexact inputs land on the intended euro.
pub const FLOOR_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// Truncates an amount to whole euros, after adding [`FLOOR_EPSILON`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netto_core::calculations::common::floor_euro;
///
/// assert_eq!(floor_euro(dec!(3360.84)), dec!(3360));
/// assert_eq!(floor_euro(dec!(1034.9999999995)), dec!(1035));
/// assert_eq!(floor_euro(dec!(0)), dec!(0));
/// ```
pub fn floor_euro(value: Decimal) -> Decimal {
    (value + FLOOR_EPSILON).floor()
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netto_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2108.916666)), dec!(2108.92));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
