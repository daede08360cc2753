//! # Domain Types
//!
//! Core domain types used throughout Aroma POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductSnapshot │   │    Discount     │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  kind           │   │  method         │       │
//! │  │  retail_price   │   │  value          │   │  amount         │       │
//! │  │  wholesale_price│   │                 │   │                 │       │
//! │  │  stock_available│   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    SaleMode     │   │  DiscountType   │   │  TenderMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Retail         │   │  Percentage     │   │  Cash           │       │
//! │  │  Wholesale      │   │  Fixed          │   │  DebitCard      │       │
//! │  └─────────────────┘   └─────────────────┘   │  CreditCard     │       │
//! │                                              │  Transfer       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Product data is FROZEN into the cart at add time. The stock level and both
//! price tiers captured in [`ProductSnapshot`] are trusted for the rest of the
//! session; the backend re-checks stock at checkout.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Sale Mode
// =============================================================================

/// Order-wide pricing tier.
///
/// ## Behavior
/// The mode is a property of the ORDER, not of a line. Switching it
/// re-derives every line's unit price from the snapshot prices; discounts
/// are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleMode {
    /// Walk-in pricing (default for a fresh cart).
    #[default]
    Retail,
    /// Bulk-buyer pricing.
    Wholesale,
}

// =============================================================================
// Discounts
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Whole percent off the base amount (0-100).
    #[default]
    Percentage,
    /// Whole currency units off the base amount.
    Fixed,
}

/// A discount as stored on a cart line or on the order.
///
/// ## Invariants
/// - `value >= 0`
/// - Percentage: `value <= 100`
/// - Fixed: `value` never exceeds the base it was validated against at
///   store time. The base can shrink afterwards (sale-mode switch, line
///   removal), so the EFFECTIVE amount is re-clamped at derivation time by
///   [`Discount::amount_off`] and stored state is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub kind: DiscountType,
    pub value: i64,
}

impl Discount {
    /// The empty discount: 0%.
    ///
    /// New cart lines and fresh carts start here.
    #[inline]
    pub const fn none() -> Self {
        Discount {
            kind: DiscountType::Percentage,
            value: 0,
        }
    }

    /// Checks whether the discount has any effect.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.value == 0
    }

    /// The effective amount taken off `base`.
    ///
    /// For percentage discounts this is `base × value%` (half-up rounding).
    /// For fixed discounts the stored value is capped at `base`, so the
    /// result can never push a total below zero.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    /// use aroma_core::types::{Discount, DiscountType};
    ///
    /// let ten_pct = Discount { kind: DiscountType::Percentage, value: 10 };
    /// assert_eq!(ten_pct.amount_off(Money::from_units(10_000)).units(), 1_000);
    ///
    /// let fixed = Discount { kind: DiscountType::Fixed, value: 5_000 };
    /// // Base dropped below the stored value: effect is capped at the base.
    /// assert_eq!(fixed.amount_off(Money::from_units(4_000)).units(), 4_000);
    /// ```
    pub fn amount_off(&self, base: Money) -> Money {
        match self.kind {
            DiscountType::Percentage => base.percent_of(self.value),
            DiscountType::Fixed => Money::from_units(self.value).min(base),
        }
    }

    /// Builds a discount from raw input, clamping into the valid range.
    ///
    /// `cap` is the largest meaningful fixed amount (the unit price for line
    /// discounts, the subtotal for the order discount); percentages clamp to
    /// 0-100 regardless of `cap`. Returns the discount and whether clamping
    /// changed the requested value.
    ///
    /// ## Example
    /// ```rust
    /// use aroma_core::money::Money;
    /// use aroma_core::types::{Discount, DiscountType};
    ///
    /// let (d, clamped) =
    ///     Discount::clamped(DiscountType::Percentage, 150, Money::from_units(10_000));
    /// assert_eq!(d.value, 100);
    /// assert!(clamped);
    /// ```
    pub fn clamped(kind: DiscountType, value: i64, cap: Money) -> (Self, bool) {
        let max = match kind {
            DiscountType::Percentage => 100,
            DiscountType::Fixed => cap.units().max(0),
        };
        let clamped_value = value.clamp(0, max);
        (
            Discount {
                kind,
                value: clamped_value,
            },
            clamped_value != value,
        )
    }

    /// The largest value accepted for this kind against `cap`.
    pub fn max_value(kind: DiscountType, cap: Money) -> i64 {
        match kind {
            DiscountType::Percentage => 100,
            DiscountType::Fixed => cap.units().max(0),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// Product data as captured from the stock service.
///
/// This is the inbound snapshot the cart freezes at add time: both price
/// tiers travel together so a later sale-mode switch needs no lookup, and
/// `stock_available` is the hard per-line quantity cap for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    /// Backend identifier (opaque string).
    pub product_id: String,

    /// Stock Keeping Unit - business identifier shown to the cashier.
    pub sku: String,

    /// Display name shown in the cart and on the receipt.
    pub name: String,

    /// Unit price in Retail mode.
    pub retail_price: Money,

    /// Unit price in Wholesale mode.
    pub wholesale_price: Money,

    /// Units on hand at snapshot time. Zero or negative means the product
    /// cannot be added.
    pub stock_available: i64,
}

impl ProductSnapshot {
    /// Returns the unit price for the given sale mode.
    #[inline]
    pub fn price_for(&self, mode: SaleMode) -> Money {
        match mode {
            SaleMode::Retail => self.retail_price,
            SaleMode::Wholesale => self.wholesale_price,
        }
    }

    /// Checks if at least one unit can be sold from this snapshot.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_available > 0
    }
}

// =============================================================================
// Tender Method
// =============================================================================

/// How a payment is made.
///
/// Each method can be used AT MOST ONCE per order; a split tender is a set
/// of distinct methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderMethod {
    /// Physical cash. The only method allowed to exceed the amount due
    /// (the excess is returned as change).
    Cash,
    /// Debit card on an external terminal.
    DebitCard,
    /// Credit card on an external terminal.
    CreditCard,
    /// Bank transfer.
    Transfer,
}

impl TenderMethod {
    /// Checks if this method settles in physical cash.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, TenderMethod::Cash)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A single tender towards the current order.
///
/// An order can hold several of these for split tender scenarios, one per
/// [`TenderMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub method: TenderMethod,
    pub amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_mode_default() {
        assert_eq!(SaleMode::default(), SaleMode::Retail);
    }

    #[test]
    fn test_sale_mode_serde_representation() {
        assert_eq!(
            serde_json::to_string(&SaleMode::Wholesale).unwrap(),
            "\"wholesale\""
        );
        assert_eq!(
            serde_json::to_string(&TenderMethod::DebitCard).unwrap(),
            "\"debit_card\""
        );
        assert_eq!(
            serde_json::to_string(&DiscountType::Fixed).unwrap(),
            "\"fixed\""
        );
    }

    #[test]
    fn test_discount_none() {
        let d = Discount::none();
        assert!(d.is_none());
        assert!(d.amount_off(Money::from_units(10_000)).is_zero());
    }

    #[test]
    fn test_percentage_discount_amount() {
        let d = Discount {
            kind: DiscountType::Percentage,
            value: 10,
        };
        assert_eq!(d.amount_off(Money::from_units(10_000)).units(), 1_000);
    }

    #[test]
    fn test_fixed_discount_capped_at_base() {
        let d = Discount {
            kind: DiscountType::Fixed,
            value: 5_000,
        };
        assert_eq!(d.amount_off(Money::from_units(12_500)).units(), 5_000);
        // Base below the stored value: capped, never negative.
        assert_eq!(d.amount_off(Money::from_units(4_000)).units(), 4_000);
    }

    #[test]
    fn test_discount_clamping() {
        let cap = Money::from_units(12_500);

        let (d, clamped) = Discount::clamped(DiscountType::Percentage, 150, cap);
        assert_eq!(d.value, 100);
        assert!(clamped);

        let (d, clamped) = Discount::clamped(DiscountType::Fixed, 20_000, cap);
        assert_eq!(d.value, 12_500);
        assert!(clamped);

        let (d, clamped) = Discount::clamped(DiscountType::Fixed, -5, cap);
        assert_eq!(d.value, 0);
        assert!(clamped);

        let (d, clamped) = Discount::clamped(DiscountType::Percentage, 25, cap);
        assert_eq!(d.value, 25);
        assert!(!clamped);
    }

    #[test]
    fn test_snapshot_price_for_mode() {
        let snapshot = ProductSnapshot {
            product_id: "prod-1".to_string(),
            sku: "LAV-330".to_string(),
            name: "Lavender Oil 330ml".to_string(),
            retail_price: Money::from_units(10_000),
            wholesale_price: Money::from_units(7_500),
            stock_available: 12,
        };
        assert_eq!(snapshot.price_for(SaleMode::Retail).units(), 10_000);
        assert_eq!(snapshot.price_for(SaleMode::Wholesale).units(), 7_500);
        assert!(snapshot.in_stock());
    }

    #[test]
    fn test_tender_method_is_cash() {
        assert!(TenderMethod::Cash.is_cash());
        assert!(!TenderMethod::DebitCard.is_cash());
        assert!(!TenderMethod::CreditCard.is_cash());
        assert!(!TenderMethod::Transfer.is_cash());
    }
}
