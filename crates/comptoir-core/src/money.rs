//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:   0.1 + 0.2 = 0.30000000000000004   WRONG
//!
//! Our solution: i64 in the smallest currency unit. The store, the ledgers
//! and the API all use integer units; only the UI formats for display.
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::money::Money;
//!
//! let price = Money::from_units(5000);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.units(), 10_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: overpayment produces a negative balance, which is a
///   permitted state, so the type must represent negative values.
/// - **Single-field tuple struct**: zero-cost abstraction over i64, with
///   transparent serde (stored records carry plain integers).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from smallest-unit integer amount.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in smallest currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let unit_price = Money::from_units(5000);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 15_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Rounding
    /// Integer math with half-up rounding on the discount amount:
    /// `(amount * bps + 5000) / 10000`. i128 intermediates prevent
    /// overflow on large documents.
    ///
    /// ## Example
    /// ```rust
    /// use comptoir_core::money::Money;
    ///
    /// let subtotal = Money::from_units(10_000);
    /// assert_eq!(subtotal.apply_percentage_discount(1000).units(), 9_000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10_000;
        Money(self.0 - discount_amount as i64)
    }
}

/// Display implementation for logs and debugging.
///
/// UI-facing formatting (thousands separators, currency symbol placement)
/// is the frontend's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} F", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(5000);
        assert_eq!(money.units(), 5000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(400);

        assert_eq!((a + b).units(), 1400);
        assert_eq!((a - b).units(), 600);
        assert_eq!((a * 3).units(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(5000);
        assert_eq!(unit_price.multiply_quantity(2).units(), 10_000);
    }

    #[test]
    fn test_percentage_discount() {
        let subtotal = Money::from_units(10_000);
        assert_eq!(subtotal.apply_percentage_discount(1000).units(), 9000);
        // 0% and 100% bounds
        assert_eq!(subtotal.apply_percentage_discount(0).units(), 10_000);
        assert_eq!(subtotal.apply_percentage_discount(10_000).units(), 0);
    }

    #[test]
    fn test_discount_rounding_half_up() {
        // 333 at 5% = 16.65 -> discount rounds to 17
        let amount = Money::from_units(333);
        assert_eq!(amount.apply_percentage_discount(500).units(), 333 - 17);
    }

    #[test]
    fn test_negative_balance_representable() {
        let balance = Money::from_units(10_000) - Money::from_units(12_000);
        assert!(balance.is_negative());
        assert_eq!(balance.abs().units(), 2000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|u| Money::from_units(*u))
            .sum();
        assert_eq!(total.units(), 600);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(2500)), "2500 F");
        assert_eq!(format!("{}", Money::from_units(-500)), "-500 F");
    }
}
