//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Units                                            │
//! │    This currency has no sub-unit, so one i64 unit is one peso.          │
//! │    Percentage discounts round half-up with pure integer math,           │
//! │    and the one-unit drift that can produce is explicit and tested.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aroma_core::money::Money;
//!
//! // Create from whole units (the only constructor)
//! let price = Money::from_units(12_500);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                         // 25,000
//! let total = price + Money::from_units(500);      // 13,000
//!
//! // NEVER do this:
//! // let bad = Money::from_float(125.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates (refunds, corrections)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, serializes as a plain JSON number
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  ProductSnapshot.retail_price ──► CartLine.unit_price ──► line_total    │
/// │                                                                         │
/// │  Cart.subtotal ──► order discount ──► Cart.total ──► Settlement         │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    ///
    /// let price = Money::from_units(12_500);
    /// assert_eq!(price.units(), 12_500);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.units(), 0);
    /// assert!(zero.is_zero());
    /// ```
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates a whole-number percentage of this amount, rounding half-up.
    ///
    /// ## Implementation
    /// We use integer math: `(units * pct + 50) / 100`
    /// The +50 provides rounding (50/100 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    ///
    /// let price = Money::from_units(12_500);
    ///
    /// // 10% of 12,500 = 1,250
    /// assert_eq!(price.percent_of(10).units(), 1_250);
    ///
    /// // 15% of 90 = 13.5 → rounds half-up to 14
    /// assert_eq!(Money::from_units(90).percent_of(15).units(), 14);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Line: 3 × $10.000 with 10% discount
    ///      │
    ///      ▼
    /// unit_price.percent_of(10) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Discount per unit: $1.000 → line total $27.000
    /// ```
    pub fn percent_of(&self, pct: i64) -> Money {
        // Use i128 to prevent overflow on large amounts
        let amount = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::from_units(amount as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    ///
    /// let unit_price = Money::from_units(2_990);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.units(), 8_970);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Subtracts another amount, clamping the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    ///
    /// let total = Money::from_units(10_000);
    /// let tendered = Money::from_units(12_000);
    ///
    /// // Amount due never goes negative
    /// assert_eq!(total.minus_clamped(tendered), Money::zero());
    /// // Change due is the mirror image
    /// assert_eq!(tendered.minus_clamped(total).units(), 2_000);
    /// ```
    #[inline]
    pub const fn minus_clamped(&self, other: Self) -> Self {
        let diff = self.0.saturating_sub(other.0);
        Money(if diff < 0 { 0 } else { diff })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}", sign, thousands(self.0.unsigned_abs()))
    }
}

/// Groups digits in threes for display: 1250000 → "1,250,000".
fn thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        groups.push(n % 1000);
        n /= 1000;
        if n == 0 {
            break;
        }
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (line totals, tender amounts).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(12_500);
        assert_eq!(money.units(), 12_500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_units(12_500)), "$12,500");
        assert_eq!(format!("{}", Money::from_units(500)), "$500");
        assert_eq!(format!("{}", Money::from_units(-1_250)), "-$1,250");
        assert_eq!(format!("{}", Money::from_units(0)), "$0");
        assert_eq!(format!("{}", Money::from_units(1_000_000)), "$1,000,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1_500);
        assert_eq!((a - b).units(), 500);
        let result: Money = a * 3;
        assert_eq!(result.units(), 3_000);
    }

    #[test]
    fn test_percent_of_basic() {
        // 10% of 10,000 = 1,000
        let amount = Money::from_units(10_000);
        assert_eq!(amount.percent_of(10).units(), 1_000);
        assert_eq!(amount.percent_of(0).units(), 0);
        assert_eq!(amount.percent_of(100).units(), 10_000);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 15% of 90 = 13.5 → 14
        assert_eq!(Money::from_units(90).percent_of(15).units(), 14);
        // 33% of 100 = 33
        assert_eq!(Money::from_units(100).percent_of(33).units(), 33);
        // 5% of 49 = 2.45 → 2
        assert_eq!(Money::from_units(49).percent_of(5).units(), 2);
    }

    #[test]
    fn test_percent_of_large_amounts_no_overflow() {
        // Close to the practical ceiling of a single sale; i128 intermediate
        // keeps the multiply from overflowing i64.
        let amount = Money::from_units(9_000_000_000_000);
        assert_eq!(amount.percent_of(50).units(), 4_500_000_000_000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_units(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_units(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_units(2_990);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.units(), 8_970);
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_units(6_000),
            Money::from_units(4_000),
            Money::from_units(500),
        ];
        let total: Money = amounts.iter().copied().sum();
        assert_eq!(total.units(), 10_500);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_ordering_for_clamps() {
        // amount_due / change_due derivations rely on Ord
        let total = Money::from_units(4_300);
        let tendered = Money::from_units(5_000);
        assert_eq!((total - tendered).max(Money::zero()), Money::zero());
        assert_eq!((tendered - total).max(Money::zero()).units(), 700);
    }

    #[test]
    fn test_minus_clamped() {
        let total = Money::from_units(4_300);
        let tendered = Money::from_units(5_000);
        assert_eq!(total.minus_clamped(tendered), Money::zero());
        assert_eq!(tendered.minus_clamped(total).units(), 700);
        assert_eq!(total.minus_clamped(total), Money::zero());
        assert_eq!(total.minus_clamped(Money::zero()), total);
    }
}
