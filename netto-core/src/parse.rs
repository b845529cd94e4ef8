//! Lenient decimal parsing for user-entered amounts.
//!
//! Amounts arrive as form strings, CSV cells or JSON values. German input
//! uses `,` as the decimal separator, so both `3700,50` and `3700.50` are
//! accepted.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Number;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid decimal '{input}'")]
pub struct ParseDecimalError {
    input: String,
}

/// Trims whitespace and maps a decimal comma to a decimal point.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// Parses a normalized string. Finite values beyond the range of
/// [`Decimal`] saturate to [`Decimal::MAX`] or [`Decimal::MIN`]; values too
/// small to represent become 0.
fn parse_normalized(normalized: &str) -> Option<Decimal> {
    Decimal::from_str(normalized)
        .or_else(|_| Decimal::from_scientific(normalized))
        .ok()
        .or_else(|| saturate(normalized.parse::<f64>().ok()?))
}

fn saturate(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() < 1.0 {
        return Some(Decimal::try_from(value).unwrap_or(Decimal::ZERO));
    }
    Decimal::try_from(value).ok().or(Some(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }))
}

/// Parses a string into a [`Decimal`], accepting `,` or `.` as separator.
///
/// Empty or whitespace-only input is treated as 0.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use netto_core::parse::parse_decimal;
///
/// assert_eq!(parse_decimal("3700,50").unwrap(), dec!(3700.50));
/// assert_eq!(parse_decimal(" 0.5 ").unwrap(), dec!(0.5));
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_normalized(&normalized).ok_or_else(|| ParseDecimalError {
        input: s.to_string(),
    })
}

/// Parses a string into a [`Decimal`], falling back to 0 when it is not a number.
pub fn coerce_decimal(s: &str) -> Decimal {
    parse_decimal(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "{e}, using 0");
        Decimal::ZERO
    })
}

/// Converts a JSON number into a [`Decimal`] from its exact textual form.
///
/// Out-of-range magnitudes saturate like [`parse_decimal`].
pub fn decimal_from_json_number(n: &Number) -> Decimal {
    if let Some(i) = n.as_i64() {
        return Decimal::from(i);
    }
    parse_normalized(&n.to_string())
        .or_else(|| n.as_f64().and_then(saturate))
        .unwrap_or(Decimal::ZERO)
}
