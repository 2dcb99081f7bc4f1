//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    99999 + 49999 = 149998 cents = 1499.98 exactly                      │
//! │                                                                         │
//! │  Decimal prices from the API are converted to cents ONCE, at the       │
//! │  boundary, and converted back only for display.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crm_core::money::Money;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let price = Money::from_decimal(Decimal::from_str("999.99").unwrap()).unwrap();
//! assert_eq!(price.cents(), 99_999);
//! assert_eq!(price.to_decimal().to_string(), "999.99");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► Order.total_amount_cents (sum at creation)
///        │                          │
///        └──► GraphQL `price`       └──► GraphQL `totalAmount`
///             (Decimal scalar)           (Decimal scalar)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use crm_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount to Money, rounding to whole cents.
    ///
    /// Rounding uses `Decimal::round_dp` (round half to even).
    /// Returns `None` when the amount does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use crm_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::from_decimal(Decimal::new(12345, 3)).unwrap(); // 12.345
    /// assert_eq!(m.cents(), 1234);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let cents = amount.round_dp(2).checked_mul(Decimal::from(100))?;
        cents.to_i64().map(Money)
    }

    /// Returns the amount as a two-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// Money has no `Add` impl; all sums go through here.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, returning `None` if any partial sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as a plain two-place decimal (`1499.98`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(dec("999.99")).unwrap().cents(), 99_999);
        assert_eq!(Money::from_decimal(dec("5")).unwrap().cents(), 500);
        assert_eq!(Money::from_decimal(dec("-1.50")).unwrap().cents(), -150);
        assert_eq!(Money::from_decimal(dec("0.004")).unwrap().cents(), 0);
    }

    #[test]
    fn test_from_decimal_rounds_half_to_even() {
        assert_eq!(Money::from_decimal(dec("0.125")).unwrap().cents(), 12);
        assert_eq!(Money::from_decimal(dec("0.135")).unwrap().cents(), 14);
    }

    #[test]
    fn test_from_decimal_overflow() {
        assert!(Money::from_decimal(Decimal::MAX).is_none());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(149_998).to_decimal(), dec("1499.98"));
        assert_eq!(Money::from_cents(500).to_decimal(), dec("5.00"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_sum_is_exact() {
        let prices = [Money::from_cents(99_999), Money::from_cents(49_999)];
        let total = Money::checked_sum(prices).unwrap();
        assert_eq!(total.cents(), 149_998);
        assert_eq!(total.to_decimal(), dec("1499.98"));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_sum_overflow() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(half.checked_add(half), None);
        assert_eq!(Money::checked_sum([half, half, Money::from_cents(-5)]), None);
        assert_eq!(
            Money::from_cents(i64::MAX - 1).checked_add(Money::from_cents(1)),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::zero().is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }
}
