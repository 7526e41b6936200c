//! Reusable field validators
//!
//! A validator receives the field name and the filtered raw value (`None`
//! when the form did not carry the field) and returns the message to report.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse a form value as an exact decimal number
///
/// Accepts plain (`19.99`) and scientific (`1.5e2`) notation. Digit
/// separators (`1_000`) are not numbers.
pub fn coerce_decimal(raw: &str) -> Option<Decimal> {
    if raw.contains('_') {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Validator: field is present and not blank
pub fn required(
    message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: value coerces to a number strictly greater than zero
///
/// A missing or blank value coerces to zero and fails with `message`;
/// a value that is not a number at all fails with `invalid_message`.
pub fn positive_number(
    message: &'static str,
    invalid_message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| {
        let raw = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Err(message.to_string()),
        };
        match coerce_decimal(raw) {
            Some(num) if num > Decimal::ZERO => Ok(()),
            Some(_) => Err(message.to_string()),
            None => Err(invalid_message.to_string()),
        }
    }
}

/// Validator: value × `scale` still fits in an `i64`
///
/// Non-numeric values pass through (another validator reports them).
pub fn fits_minor_units(
    scale: i64,
    message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| {
        let Some(num) = value.and_then(coerce_decimal) else {
            return Ok(());
        };
        match num.checked_mul(Decimal::from(scale)) {
            Some(scaled) if scaled.round() <= Decimal::from(i64::MAX) => Ok(()),
            _ => Err(message.to_string()),
        }
    }
}

/// Validator: value × `scale`, rounded half away from zero, is at least 1
///
/// Rejects positive amounts that would be stored as zero minor units.
/// Non-numeric values pass through.
pub fn at_least_one_minor_unit(
    scale: i64,
    message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| {
        let Some(num) = value.and_then(coerce_decimal) else {
            return Ok(());
        };
        match num.checked_mul(Decimal::from(scale)) {
            Some(scaled)
                if scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                    < Decimal::ONE =>
            {
                Err(message.to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Validator: value must be one of the allowed literals
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: Option<&str>| match value {
        Some(v) if allowed.contains(&v) => Ok(()),
        _ => Err(message.to_string()),
    }
}
