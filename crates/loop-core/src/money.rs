//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Whole Rupees
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listings are priced in whole Pakistani Rupees (PKR 1,500, PKR 2,500). │
//! │  The API stores and returns integers; there is no paisa component.     │
//! │                                                                         │
//! │  So Money is an i64 count of rupees:                                   │
//! │    price 1500 + price 2500 = 4000     (exact, no float drift)          │
//! │    4000 rupees - 10 points × 100      = 3000                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use loop_core::money::Money;
//!
//! let price = Money::from_rupees(1500);
//! let total = price + Money::from_rupees(2500);
//! assert_eq!(total.rupees(), 4000);
//! assert_eq!(total.to_string(), "PKR 4,000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Currency code printed by [`Money`]'s `Display` implementation.
pub const CURRENCY_CODE: &str = "PKR";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole rupees.
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction never has to special-case underflow in
///   intermediate values; negatives are rejected at the boundary instead
/// - **Single field tuple struct**: Serializes as a plain JSON number, which
///   is what the commerce API sends (`"price": 1500`)
///
/// ## Where Money is Used
/// ```text
/// CartItem.price ──► LineItem.unit_price ──► PricingResult.original_total
///                                                   │
///                             rewards discount ─────┤
///                                                   ▼
///                                  PricingResult.discounted_total
///                                                   │
///                                                   ▼
///                                  OrderRequest.total_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::money::Money;
    ///
    /// let price = Money::from_rupees(2500);
    /// assert_eq!(price.rupees(), 2500);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees)
    }

    /// Returns the amount in rupees.
    #[inline]
    pub const fn rupees(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, clamping at `i64::MAX` instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::money::Money;
    ///
    /// let big = Money::from_rupees(i64::MAX);
    /// assert_eq!(big.saturating_add(Money::from_rupees(1)), big);
    /// ```
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts two amounts, clamping at `i64::MIN` instead of overflowing.
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Multiplies by a count, clamping instead of overflowing.
    ///
    /// Used to turn a reward point balance into its rupee value.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::money::Money;
    ///
    /// let per_point = Money::from_rupees(100);
    /// assert_eq!(per_point.saturating_mul(10).rupees(), 1000);
    /// ```
    #[inline]
    pub const fn saturating_mul(self, count: i64) -> Self {
        Money(self.0.saturating_mul(count))
    }

    /// Formats the amount with thousands separators, without the currency code.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1234567).grouped(), "1,234,567");
    /// assert_eq!(Money::from_rupees(-1500).grouped(), "-1,500");
    /// assert_eq!(Money::from_rupees(999).grouped(), "999");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            out.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display matches the storefront's price labels: `PKR 1,500`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", CURRENCY_CODE, self.grouped())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

/// Summing saturates so a pathological cart can never wrap around.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(1500);
        assert_eq!(money.rupees(), 1500);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(1500).to_string(), "PKR 1,500");
        assert_eq!(Money::from_rupees(0).to_string(), "PKR 0");
        assert_eq!(Money::from_rupees(100).to_string(), "PKR 100");
        assert_eq!(Money::from_rupees(1000000).to_string(), "PKR 1,000,000");
        assert_eq!(Money::from_rupees(-2500).to_string(), "PKR -2,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(1000);
        let b = Money::from_rupees(500);

        assert_eq!((a + b).rupees(), 1500);
        assert_eq!((a - b).rupees(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_rupees(200);
        assert_eq!(c.rupees(), 1300);
    }

    #[test]
    fn test_sum_saturates() {
        let total: Money = [Money::from_rupees(i64::MAX), Money::from_rupees(10)]
            .iter()
            .sum();
        assert_eq!(total.rupees(), i64::MAX);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_saturating_mul() {
        assert_eq!(Money::from_rupees(100).saturating_mul(7).rupees(), 700);
        assert_eq!(
            Money::from_rupees(i64::MAX).saturating_mul(2).rupees(),
            i64::MAX
        );
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_rupees(-100);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_rupees(2500)).unwrap();
        assert_eq!(json, "2500");

        let back: Money = serde_json::from_str("1500").unwrap();
        assert_eq!(back, Money::from_rupees(1500));
    }
}
