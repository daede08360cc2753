//! # Settlement Engine
//!
//! The payment half of the POS: collects split tenders against the order
//! total and decides when checkout becomes possible.
//!
//! ## Settlement Math
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Settlement Math                         │
//! │                                                              │
//! │  tendered     = sum of payment amounts                       │
//! │  amount_due   = max(total - tendered, 0)                     │
//! │  change_due   = max(tendered - total, 0)                     │
//! │  can_checkout = (amount_due == 0)                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike the cart, which clamps and warns, tender entry is all-or-nothing:
//! an invalid payment is rejected outright and the tender list is unchanged.
//!
//! ## Rules
//! - At most one tender per payment method
//! - Non-cash tenders cannot exceed the amount still due (no card change)
//! - Cash may overpay; the surplus comes back as change from the drawer
//!
//! The engine stores only the tender list. Totals come in from the cart on
//! every computation, so a cart edit between tenders is picked up
//! automatically the next time the settlement is read.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{SettlementError, SettlementResult};
use crate::money::Money;
use crate::types::{Payment, TenderMethod};

// =============================================================================
// Settlement View
// =============================================================================

/// How change should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A cash tender is present; change comes from the drawer.
    Cash,
    /// Every tender is electronic. Change cannot be paid out; the cashier
    /// has to adjust the tenders instead.
    NonCash,
}

/// The computed state of a settlement for a given order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    /// The order total being settled.
    pub total: Money,
    /// Sum of all tender amounts.
    pub tendered: Money,
    /// What is still owed. Never negative.
    pub amount_due: Money,
    /// What is owed back. Never negative.
    pub change_due: Money,
    /// True exactly when `amount_due` is zero.
    pub can_checkout: bool,
    /// Present when `change_due` is positive.
    pub change_kind: Option<ChangeKind>,
}

// =============================================================================
// Settlement Engine
// =============================================================================

/// Collects the tenders for the order being built.
///
/// ## Example
/// ```
/// use aroma_core::{Money, SettlementEngine, TenderMethod};
///
/// let total = Money::from_units(10_000);
/// let mut engine = SettlementEngine::new();
///
/// engine.add_payment(total, TenderMethod::Transfer, Money::from_units(6_000)).unwrap();
/// let settlement = engine
///     .add_payment(total, TenderMethod::Cash, Money::from_units(4_000))
///     .unwrap();
///
/// assert!(settlement.can_checkout);
/// assert!(settlement.change_due.is_zero());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementEngine {
    payments: Vec<Payment>,
}

impl SettlementEngine {
    /// Creates an engine with no tenders.
    pub fn new() -> Self {
        SettlementEngine {
            payments: Vec::new(),
        }
    }

    /// The tenders collected so far, in entry order.
    #[inline]
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Checks if no tender has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    /// Checks whether a tender with this method is already present.
    pub fn has_method(&self, method: TenderMethod) -> bool {
        self.payments.iter().any(|p| p.method == method)
    }

    /// Sum of all tender amounts.
    pub fn tendered(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Records a tender against the given order total.
    ///
    /// ## Rejections
    /// - [`SettlementError::NonPositiveAmount`]: zero or negative amount
    /// - [`SettlementError::DuplicateMethod`]: the method already has a tender
    /// - [`SettlementError::ExceedsAmountDue`]: a non-cash amount above what
    ///   is still due, carrying the exact remainder as the suggestion
    ///
    /// A rejected call leaves the tender list untouched.
    pub fn add_payment(
        &mut self,
        order_total: Money,
        method: TenderMethod,
        amount: Money,
    ) -> SettlementResult<Settlement> {
        if !amount.is_positive() {
            return Err(SettlementError::NonPositiveAmount { amount });
        }

        if self.has_method(method) {
            return Err(SettlementError::DuplicateMethod { method });
        }

        if !method.is_cash() {
            let due = order_total.minus_clamped(self.tendered());
            if amount > due {
                return Err(SettlementError::ExceedsAmountDue {
                    method,
                    amount,
                    suggested: due,
                });
            }
        }

        self.payments.push(Payment { method, amount });
        Ok(self.settlement(order_total))
    }

    /// Removes the tender at `index` (entry order) and recomputes.
    pub fn remove_payment(
        &mut self,
        order_total: Money,
        index: usize,
    ) -> SettlementResult<Settlement> {
        if index >= self.payments.len() {
            return Err(SettlementError::NoSuchPayment { index });
        }
        self.payments.remove(index);
        Ok(self.settlement(order_total))
    }

    /// Computes the settlement of the collected tenders against a total.
    pub fn settlement(&self, order_total: Money) -> Settlement {
        let tendered = self.tendered();
        let amount_due = order_total.minus_clamped(tendered);
        let change_due = tendered.minus_clamped(order_total);

        let change_kind = if change_due.is_positive() {
            if self.payments.iter().any(|p| p.method.is_cash()) {
                Some(ChangeKind::Cash)
            } else {
                Some(ChangeKind::NonCash)
            }
        } else {
            None
        };

        Settlement {
            total: order_total,
            tendered,
            amount_due,
            change_due,
            can_checkout: amount_due.is_zero(),
            change_kind,
        }
    }

    /// The amount to pre-fill for the next tender: exactly what is still due.
    pub fn suggested_tender(&self, order_total: Money) -> Money {
        order_total.minus_clamped(self.tendered())
    }

    /// Drops every tender.
    pub fn reset(&mut self) {
        self.payments.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_empty_settlement() {
        let engine = SettlementEngine::new();
        let settlement = engine.settlement(units(10_000));

        assert_eq!(settlement.tendered, Money::zero());
        assert_eq!(settlement.amount_due.units(), 10_000);
        assert!(settlement.change_due.is_zero());
        assert!(!settlement.can_checkout);
        assert_eq!(settlement.change_kind, None);
        assert_eq!(engine.suggested_tender(units(10_000)).units(), 10_000);
    }

    #[test]
    fn test_exact_single_cash() {
        let mut engine = SettlementEngine::new();
        let settlement = engine
            .add_payment(units(43_000), TenderMethod::Cash, units(43_000))
            .unwrap();

        assert!(settlement.can_checkout);
        assert!(settlement.amount_due.is_zero());
        assert!(settlement.change_due.is_zero());
        assert_eq!(settlement.change_kind, None);
    }

    #[test]
    fn test_split_tender_reaches_checkout() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();

        let partial = engine
            .add_payment(total, TenderMethod::Transfer, units(6_000))
            .unwrap();
        assert!(!partial.can_checkout);
        assert_eq!(partial.amount_due.units(), 4_000);
        assert_eq!(engine.suggested_tender(total).units(), 4_000);

        let full = engine
            .add_payment(total, TenderMethod::Cash, units(4_000))
            .unwrap();
        assert!(full.can_checkout);
        assert!(full.change_due.is_zero());
        assert_eq!(engine.payments().len(), 2);
    }

    #[test]
    fn test_cash_overpay_yields_cash_change() {
        let mut engine = SettlementEngine::new();
        let settlement = engine
            .add_payment(units(43_000), TenderMethod::Cash, units(50_000))
            .unwrap();

        assert!(settlement.can_checkout);
        assert_eq!(settlement.change_due.units(), 7_000);
        assert_eq!(settlement.change_kind, Some(ChangeKind::Cash));
    }

    #[test]
    fn test_non_cash_cannot_exceed_due() {
        let mut engine = SettlementEngine::new();
        let err = engine
            .add_payment(units(4_000), TenderMethod::CreditCard, units(5_000))
            .unwrap_err();

        match err {
            SettlementError::ExceedsAmountDue {
                method,
                amount,
                suggested,
            } => {
                assert_eq!(method, TenderMethod::CreditCard);
                assert_eq!(amount.units(), 5_000);
                assert_eq!(suggested.units(), 4_000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(engine.is_empty());
    }

    #[test]
    fn test_non_cash_validated_against_remaining_due() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(total, TenderMethod::Cash, units(7_000))
            .unwrap();

        let err = engine
            .add_payment(total, TenderMethod::DebitCard, units(5_000))
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::ExceedsAmountDue { suggested, .. } if suggested.units() == 3_000
        ));

        let settlement = engine
            .add_payment(total, TenderMethod::DebitCard, units(3_000))
            .unwrap();
        assert!(settlement.can_checkout);
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(total, TenderMethod::Cash, units(2_000))
            .unwrap();

        let err = engine
            .add_payment(total, TenderMethod::Cash, units(3_000))
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::DuplicateMethod {
                method: TenderMethod::Cash
            }
        ));
        assert_eq!(engine.payments().len(), 1);

        // A different method is still welcome.
        assert!(engine
            .add_payment(total, TenderMethod::Transfer, units(3_000))
            .is_ok());
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut engine = SettlementEngine::new();

        assert!(matches!(
            engine.add_payment(units(10_000), TenderMethod::Cash, Money::zero()),
            Err(SettlementError::NonPositiveAmount { .. })
        ));
        assert!(matches!(
            engine.add_payment(units(10_000), TenderMethod::Cash, units(-500)),
            Err(SettlementError::NonPositiveAmount { .. })
        ));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_remove_payment_recomputes() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(total, TenderMethod::Transfer, units(6_000))
            .unwrap();
        engine
            .add_payment(total, TenderMethod::Cash, units(4_000))
            .unwrap();

        let settlement = engine.remove_payment(total, 0).unwrap();

        assert_eq!(engine.payments().len(), 1);
        assert_eq!(engine.payments()[0].method, TenderMethod::Cash);
        assert_eq!(settlement.amount_due.units(), 6_000);
        assert!(!settlement.can_checkout);

        assert!(matches!(
            engine.remove_payment(total, 5),
            Err(SettlementError::NoSuchPayment { index: 5 })
        ));
    }

    #[test]
    fn test_tender_order_does_not_change_outcome() {
        let total = units(10_000);

        let mut cash_first = SettlementEngine::new();
        cash_first
            .add_payment(total, TenderMethod::Cash, units(4_000))
            .unwrap();
        let a = cash_first
            .add_payment(total, TenderMethod::CreditCard, units(6_000))
            .unwrap();

        let mut card_first = SettlementEngine::new();
        card_first
            .add_payment(total, TenderMethod::CreditCard, units(6_000))
            .unwrap();
        let b = card_first
            .add_payment(total, TenderMethod::Cash, units(4_000))
            .unwrap();

        assert_eq!(a, b);
        assert!(a.can_checkout);
    }

    #[test]
    fn test_total_drop_flips_change_kind_to_non_cash() {
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(units(10_000), TenderMethod::Transfer, units(8_000))
            .unwrap();

        // A cart edit shrank the order after the tender went in.
        let settlement = engine.settlement(units(6_000));

        assert_eq!(settlement.change_due.units(), 2_000);
        assert_eq!(settlement.change_kind, Some(ChangeKind::NonCash));
        assert!(settlement.can_checkout);
    }

    #[test]
    fn test_change_kind_cash_when_cash_present() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(total, TenderMethod::Transfer, units(6_000))
            .unwrap();
        engine
            .add_payment(total, TenderMethod::Cash, units(5_000))
            .unwrap();

        let settlement = engine.settlement(total);
        assert_eq!(settlement.change_due.units(), 1_000);
        assert_eq!(settlement.change_kind, Some(ChangeKind::Cash));
    }

    #[test]
    fn test_zero_total_settles_immediately() {
        let engine = SettlementEngine::new();
        let settlement = engine.settlement(Money::zero());

        assert!(settlement.can_checkout);
        assert!(settlement.amount_due.is_zero());
        assert_eq!(engine.suggested_tender(Money::zero()), Money::zero());
    }

    #[test]
    fn test_reset_drops_all_tenders() {
        let total = units(10_000);
        let mut engine = SettlementEngine::new();
        engine
            .add_payment(total, TenderMethod::Cash, units(10_000))
            .unwrap();

        engine.reset();

        assert!(engine.is_empty());
        assert!(!engine.settlement(total).can_checkout);
        // The method is free again after a reset.
        assert!(engine
            .add_payment(total, TenderMethod::Cash, units(10_000))
            .is_ok());
    }
}
