//! # Numeric Coercion Policy
//!
//! Form fields arrive as text. The historical behavior was to silently
//! clamp anything unparseable to a default (1 for quantity, 0 for price
//! and discount) rather than reject it. That policy is kept, but made an
//! explicit, documented, testable choice:
//!
//! - `parse_quantity` / `parse_price` / `parse_discount_percent` return a
//!   typed `Result` so callers that want to surface bad input can.
//! - the `*_or_default` companions apply the lenient policy and are what
//!   the form layer actually calls.
//!
//! Discount input is additionally clamped into [0, 100] percent even when
//! it parses, so a typo like "150" cannot produce a negative line total.

use thiserror::Error;

use crate::money::Money;

/// A text field that failed numeric coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} is not a number: '{input}'")]
    NotANumber { field: &'static str, input: String },
}

fn parse_f64(field: &'static str, input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty { field });
    }
    // Accept the decimal comma that local keyboards produce.
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::NotANumber {
            field,
            input: input.to_string(),
        }),
    }
}

/// Parses a quantity field. Fractional input is rounded to the nearest
/// whole unit. Negative quantities are NOT rejected here (boundary's job).
pub fn parse_quantity(input: &str) -> Result<i64, ParseError> {
    parse_f64("quantity", input).map(|v| v.round() as i64)
}

/// Lenient policy: unparseable quantity coerces to 1.
pub fn parse_quantity_or_default(input: &str) -> i64 {
    parse_quantity(input).unwrap_or(1)
}

/// Parses a price field into Money, rounding to the smallest unit.
pub fn parse_price(input: &str) -> Result<Money, ParseError> {
    parse_f64("price", input).map(|v| Money::from_units(v.round() as i64))
}

/// Lenient policy: unparseable price coerces to 0.
pub fn parse_price_or_default(input: &str) -> Money {
    parse_price(input).unwrap_or(Money::zero())
}

/// Parses a discount percentage into basis points, clamped to [0, 100]%.
pub fn parse_discount_percent(input: &str) -> Result<u32, ParseError> {
    parse_f64("discount", input).map(|v| {
        let clamped = v.clamp(0.0, 100.0);
        (clamped * 100.0).round() as u32
    })
}

/// Lenient policy: unparseable discount coerces to 0.
pub fn parse_discount_percent_or_default(input: &str) -> u32 {
    parse_discount_percent(input).unwrap_or(0)
}
