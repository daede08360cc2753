//! # Session View Models
//!
//! Read models the frontend renders. Every session operation returns a
//! fresh [`SessionView`]; the UI never derives money values itself.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SessionView                                      │
//! │                                                                         │
//! │  ┌───────────────────────────┐  ┌───────────────────────────────────┐  │
//! │  │         CartView          │  │          SettlementView           │  │
//! │  │                           │  │                                   │  │
//! │  │  lines: [LineView]        │  │  total / tendered / amountDue     │  │
//! │  │  saleMode, references     │  │  changeDue, changeKind            │  │
//! │  │  subtotal, discount,      │  │  canCheckout, suggestedTender     │  │
//! │  │  total                    │  │  payments: [TenderView]           │  │
//! │  └───────────────────────────┘  └───────────────────────────────────┘  │
//! │                                                                         │
//! │  phase: "building" | "submitting"                                      │
//! │  warning: clamp / stock notice from the last mutation (if any)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All money fields are plain whole-unit integers on the wire; field names
//! are camelCase for the frontend.

use serde::Serialize;

use aroma_core::{
    Cart, CartLine, CartWarning, ChangeKind, DiscountType, Money, Payment, SaleMode,
    SettlementEngine, TenderMethod,
};

use crate::session::{PosSession, SessionPhase};

// =============================================================================
// Cart Views
// =============================================================================

/// One cart line as the UI renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    /// Unit price under the current sale mode, before discount.
    pub unit_price: i64,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    /// Discounted unit price × quantity.
    pub line_total: i64,
    /// Frozen stock cap (the UI greys out + at this quantity).
    pub stock_available: i64,
}

impl LineView {
    fn from_line(line: &CartLine, mode: SaleMode) -> Self {
        LineView {
            product_id: line.product.product_id.clone(),
            sku: line.product.sku.clone(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(mode).units(),
            discount_type: line.discount.kind,
            discount_value: line.discount.value,
            line_total: line.line_total(mode).units(),
            stock_available: line.product.stock_available,
        }
    }
}

/// The full cart as the UI renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub sale_mode: SaleMode,
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: i64,
    /// Stored order-level discount settings.
    pub discount_type: DiscountType,
    pub discount_value: i64,
    /// Effective order-level discount amount.
    pub discount: i64,
    pub total: i64,
    pub customer_ref: Option<String>,
    pub quotation_ref: Option<String>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        CartView {
            lines: cart
                .lines
                .iter()
                .map(|line| LineView::from_line(line, cart.sale_mode))
                .collect(),
            sale_mode: cart.sale_mode,
            line_count: totals.line_count,
            total_quantity: totals.total_quantity,
            subtotal: totals.subtotal.units(),
            discount_type: cart.global_discount.kind,
            discount_value: cart.global_discount.value,
            discount: totals.discount.units(),
            total: totals.total.units(),
            customer_ref: cart.customer_ref.clone(),
            quotation_ref: cart.quotation_ref.clone(),
        }
    }
}

// =============================================================================
// Settlement Views
// =============================================================================

/// One entered tender.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderView {
    pub method: TenderMethod,
    pub amount: i64,
}

impl From<&Payment> for TenderView {
    fn from(payment: &Payment) -> Self {
        TenderView {
            method: payment.method,
            amount: payment.amount.units(),
        }
    }
}

/// The settlement state as the UI renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementView {
    pub total: i64,
    pub tendered: i64,
    pub amount_due: i64,
    pub change_due: i64,
    pub can_checkout: bool,
    pub change_kind: Option<ChangeKind>,
    /// Pre-fill for the next tender input: exactly what is still due.
    pub suggested_tender: i64,
    pub payments: Vec<TenderView>,
}

impl SettlementView {
    fn compute(tenders: &SettlementEngine, order_total: Money) -> Self {
        let settlement = tenders.settlement(order_total);
        SettlementView {
            total: settlement.total.units(),
            tendered: settlement.tendered.units(),
            amount_due: settlement.amount_due.units(),
            change_due: settlement.change_due.units(),
            can_checkout: settlement.can_checkout,
            change_kind: settlement.change_kind,
            suggested_tender: tenders.suggested_tender(order_total).units(),
            payments: tenders.payments().iter().map(TenderView::from).collect(),
        }
    }
}

// =============================================================================
// Session View
// =============================================================================

/// Everything the frontend needs after any session operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub cart: CartView,
    pub settlement: SettlementView,
    pub phase: SessionPhase,
    /// Clamp / stock notice produced by the mutation that built this view.
    pub warning: Option<CartWarning>,
}

impl SessionView {
    pub(crate) fn capture(session: &PosSession, warning: Option<CartWarning>) -> Self {
        let cart = session.cart();
        let total = cart.totals().total;
        SessionView {
            cart: CartView::from(cart),
            settlement: SettlementView::compute(session.tenders(), total),
            phase: session.phase(),
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aroma_core::ProductSnapshot;

    fn test_product(id: &str, retail: i64, wholesale: i64, stock: i64) -> ProductSnapshot {
        ProductSnapshot {
            product_id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Product {}", id),
            retail_price: Money::from_units(retail),
            wholesale_price: Money::from_units(wholesale),
            stock_available: stock,
        }
    }

    #[test]
    fn test_cart_view_mirrors_totals() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 10_000, 7_500, 12)).unwrap();
        cart.set_quantity("1", 2).unwrap();
        cart.set_line_discount("1", DiscountType::Percentage, 10)
            .unwrap();
        cart.set_global_discount(DiscountType::Fixed, 1_000);

        let view = CartView::from(&cart);

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].unit_price, 10_000);
        assert_eq!(view.lines[0].line_total, 18_000);
        assert_eq!(view.subtotal, 18_000);
        assert_eq!(view.discount, 1_000);
        assert_eq!(view.total, 17_000);
    }

    #[test]
    fn test_view_wire_format() {
        let mut cart = Cart::new();
        cart.add_line(&test_product("1", 10_000, 7_500, 12)).unwrap();

        let json = serde_json::to_value(CartView::from(&cart)).unwrap();

        assert_eq!(json["saleMode"], "retail");
        assert_eq!(json["lines"][0]["productId"], "1");
        assert_eq!(json["lines"][0]["unitPrice"], 10_000);
        assert_eq!(json["lineCount"], 1);
        assert!(json["customerRef"].is_null());
    }

    #[test]
    fn test_settlement_view_suggested_tender() {
        let mut tenders = SettlementEngine::new();
        let total = Money::from_units(10_000);
        tenders
            .add_payment(total, TenderMethod::Cash, Money::from_units(6_000))
            .unwrap();

        let view = SettlementView::compute(&tenders, total);

        assert_eq!(view.tendered, 6_000);
        assert_eq!(view.amount_due, 4_000);
        assert_eq!(view.suggested_tender, 4_000);
        assert!(!view.can_checkout);
        assert_eq!(view.payments.len(), 1);
    }
}
