//! # Cart Engine
//!
//! The order-building half of the POS: lines, discounts, sale mode.
//!
//! ## Mutation Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutation Protocol                               │
//! │                                                                         │
//! │  UI Action                 Operation                Outcome             │
//! │  ─────────────             ─────────────            ─────────────       │
//! │  Click product ──────────► add_line() ────────────► qty+1 or new line  │
//! │  Type quantity ──────────► set_quantity() ────────► set / clamp / drop │
//! │  +/- buttons ────────────► adjust_quantity() ─────► delta on current   │
//! │  Click remove ───────────► remove_line() ─────────► line gone (no-op   │
//! │                                                     if already gone)   │
//! │  Edit line discount ─────► set_line_discount() ───► clamp-and-warn     │
//! │  Edit order discount ────► set_global_discount() ─► clamp-and-warn     │
//! │  Toggle price tier ──────► set_sale_mode() ───────► lines re-price     │
//! │                                                                         │
//! │  EVERY mutation recomputes the totals and returns them in a            │
//! │  CartUpdate. Hard failures reject atomically (CartError); recoverable  │
//! │  out-of-range input is clamped and reported as a CartWarning.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`; insertion order is display order
//! - `1 <= quantity <= min(stock_available, MAX_LINE_QUANTITY)` on every line
//! - Line totals and the order total are never negative
//! - The stock snapshot frozen at add time is the cap for the whole session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::{Discount, DiscountType, ProductSnapshot, SaleMode};
use crate::validation::{validate_product_snapshot, validate_quantity, validate_reference};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Design Notes
/// - `product`: frozen copy of the product data at the moment of adding.
///   The cart keeps displaying consistent prices and enforcing the same
///   stock cap even if the backend changes afterwards.
/// - The unit price is NOT stored: it is derived from the snapshot and the
///   order's [`SaleMode`] on every read, so a mode switch re-prices every
///   line without touching any stored state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product data frozen at add time.
    pub product: ProductSnapshot,

    /// Units of this product in the cart.
    pub quantity: i64,

    /// Line discount, applied per unit.
    pub discount: Discount,

    /// When this line was added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: ProductSnapshot, quantity: i64) -> Self {
        CartLine {
            product,
            quantity,
            discount: Discount::none(),
            added_at: Utc::now(),
        }
    }

    /// Unit price under the given sale mode.
    #[inline]
    pub fn unit_price(&self, mode: SaleMode) -> Money {
        self.product.price_for(mode)
    }

    /// Effective discount per unit under the given sale mode.
    pub fn unit_discount(&self, mode: SaleMode) -> Money {
        self.discount.amount_off(self.unit_price(mode))
    }

    /// Unit price after the line discount. Never negative.
    pub fn discounted_unit_price(&self, mode: SaleMode) -> Money {
        self.unit_price(mode) - self.unit_discount(mode)
    }

    /// Line total: discounted unit price × quantity.
    pub fn line_total(&self, mode: SaleMode) -> Money {
        self.discounted_unit_price(mode).multiply_quantity(self.quantity)
    }

    /// The hard quantity ceiling for this line.
    pub fn quantity_cap(&self) -> i64 {
        self.product.stock_available.min(MAX_LINE_QUANTITY)
    }
}

// =============================================================================
// Warnings
// =============================================================================

/// Non-fatal outcomes of a cart mutation.
///
/// A warning means the engine adjusted or refused PART of the request while
/// keeping the cart consistent; the message is meant for the cashier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartWarning {
    /// The product has no stock; nothing was added.
    OutOfStock { name: String },

    /// The line already holds every sellable unit; the increment was refused.
    StockExhausted { name: String, stock_available: i64 },

    /// A requested quantity was reduced to the stock cap.
    QuantityClamped {
        name: String,
        requested: i64,
        max: i64,
    },

    /// A discount value was reduced into its valid range.
    DiscountClamped { requested: i64, max: i64 },
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart totals, recomputed in full on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of quantities over all lines.
    pub total_quantity: i64,
    /// Sum of line totals (line discounts already taken).
    pub subtotal: Money,
    /// Effective order-level discount amount.
    pub discount: Money,
    /// `subtotal - discount`. Never negative.
    pub total: Money,
}

/// The result of a successful cart mutation: fresh totals plus an optional
/// warning describing a clamp or refused increment.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartUpdate {
    pub totals: CartTotals,
    pub warning: Option<CartWarning>,
}

// =============================================================================
// Cart
// =============================================================================

/// The order under construction.
///
/// ## Discount Order
/// Line discounts apply per unit first; the order-level discount then
/// applies to the already-discounted subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in display order.
    pub lines: Vec<CartLine>,

    /// Order-wide pricing tier.
    pub sale_mode: SaleMode,

    /// Order-level discount, applied to the subtotal.
    pub global_discount: Discount,

    /// Optional customer reference carried into the checkout payload.
    pub customer_ref: Option<String>,

    /// Optional quotation reference when the cart was loaded from one.
    pub quotation_ref: Option<String>,

    /// When the cart was created/last cleared.
    pub opened_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart in Retail mode.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            sale_mode: SaleMode::default(),
            global_discount: Discount::none(),
            customer_ref: None,
            quotation_ref: None,
            opened_at: Utc::now(),
        }
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, line discounts already applied.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total(self.sale_mode)).sum()
    }

    /// Finds a line by product id.
    pub fn find_line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.product_id == product_id)
    }

    /// Computes the full derived totals block.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let discount = self.global_discount.amount_off(subtotal);
        CartTotals {
            line_count: self.lines.len(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.product.product_id == product_id)
    }

    fn update(&self, warning: Option<CartWarning>) -> CartUpdate {
        CartUpdate {
            totals: self.totals(),
            warning,
        }
    }

    // =========================================================================
    // Line Mutations
    // =========================================================================

    /// Adds one unit of a product, appending a new line or incrementing an
    /// existing one.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity +1, capped at the frozen stock
    ///   (refused increments warn with [`CartWarning::StockExhausted`])
    /// - Unknown product with stock: new line at quantity 1 with no discount
    /// - Unknown product without stock: nothing happens except an
    ///   [`CartWarning::OutOfStock`] warning
    pub fn add_line(&mut self, product: &ProductSnapshot) -> CartResult<CartUpdate> {
        validate_product_snapshot(product)?;

        if let Some(idx) = self.position(&product.product_id) {
            let cap = self.lines[idx].quantity_cap();
            if self.lines[idx].quantity >= cap {
                let warning = CartWarning::StockExhausted {
                    name: self.lines[idx].product.name.clone(),
                    stock_available: self.lines[idx].product.stock_available,
                };
                return Ok(self.update(Some(warning)));
            }
            self.lines[idx].quantity += 1;
            return Ok(self.update(None));
        }

        if !product.in_stock() {
            let warning = CartWarning::OutOfStock {
                name: product.name.clone(),
            };
            return Ok(self.update(Some(warning)));
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CartError::CartFull {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::new(product.clone(), 1));
        Ok(self.update(None))
    }

    /// Adds a product at an explicit quantity (bulk entry point, used when a
    /// saved quotation is reloaded into the cart).
    ///
    /// Unlike [`Cart::add_line`], a requested quantity above the stock cap
    /// is clamped rather than refused: the quotation may be older than the
    /// current stock level.
    pub fn add_line_with_quantity(
        &mut self,
        product: &ProductSnapshot,
        quantity: i64,
    ) -> CartResult<CartUpdate> {
        validate_product_snapshot(product)?;
        validate_quantity(quantity)?;

        if let Some(idx) = self.position(&product.product_id) {
            let cap = self.lines[idx].quantity_cap();
            let target = self.lines[idx].quantity + quantity;
            if target > cap {
                self.lines[idx].quantity = cap;
                let warning = CartWarning::QuantityClamped {
                    name: self.lines[idx].product.name.clone(),
                    requested: target,
                    max: cap,
                };
                return Ok(self.update(Some(warning)));
            }
            self.lines[idx].quantity = target;
            return Ok(self.update(None));
        }

        if !product.in_stock() {
            let warning = CartWarning::OutOfStock {
                name: product.name.clone(),
            };
            return Ok(self.update(Some(warning)));
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CartError::CartFull {
                max: MAX_CART_LINES,
            });
        }

        let cap = product.stock_available.min(MAX_LINE_QUANTITY);
        if quantity > cap {
            self.lines.push(CartLine::new(product.clone(), cap));
            let warning = CartWarning::QuantityClamped {
                name: product.name.clone(),
                requested: quantity,
                max: cap,
            };
            return Ok(self.update(Some(warning)));
        }

        self.lines.push(CartLine::new(product.clone(), quantity));
        Ok(self.update(None))
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity < 1`: removes the line (equivalent to [`Cart::remove_line`],
    ///   including its idempotence for unknown ids)
    /// - `quantity > cap`: clamps to the cap with a warning
    /// - unknown product with `quantity >= 1`: [`CartError::LineNotFound`]
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<CartUpdate> {
        if quantity < 1 {
            return Ok(self.remove_line(product_id));
        }

        let Some(idx) = self.position(product_id) else {
            return Err(CartError::LineNotFound(product_id.to_string()));
        };

        let cap = self.lines[idx].quantity_cap();
        if quantity > cap {
            self.lines[idx].quantity = cap;
            let warning = CartWarning::QuantityClamped {
                name: self.lines[idx].product.name.clone(),
                requested: quantity,
                max: cap,
            };
            return Ok(self.update(Some(warning)));
        }

        self.lines[idx].quantity = quantity;
        Ok(self.update(None))
    }

    /// Adjusts the quantity of an existing line by a signed delta
    /// (the +/- buttons). Dropping to zero or below removes the line.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> CartResult<CartUpdate> {
        let Some(idx) = self.position(product_id) else {
            return Err(CartError::LineNotFound(product_id.to_string()));
        };

        let target = self.lines[idx].quantity.saturating_add(delta);
        self.set_quantity(product_id, target)
    }

    /// Removes a line by product id.
    ///
    /// Idempotent: removing a line that is not present is a no-op, not an
    /// error.
    pub fn remove_line(&mut self, product_id: &str) -> CartUpdate {
        self.lines.retain(|l| l.product.product_id != product_id);
        self.update(None)
    }

    // =========================================================================
    // Discount Mutations
    // =========================================================================

    /// Sets a line's discount, clamping the value into its valid range
    /// (0-100 for percentages, 0-unit price for fixed amounts).
    ///
    /// Setting a different kind replaces the stored discount outright;
    /// nothing carries over from the previous kind.
    pub fn set_line_discount(
        &mut self,
        product_id: &str,
        kind: DiscountType,
        value: i64,
    ) -> CartResult<CartUpdate> {
        let Some(idx) = self.position(product_id) else {
            return Err(CartError::LineNotFound(product_id.to_string()));
        };

        let cap = self.lines[idx].unit_price(self.sale_mode);
        let (discount, was_clamped) = Discount::clamped(kind, value, cap);
        self.lines[idx].discount = discount;

        let warning = was_clamped.then(|| CartWarning::DiscountClamped {
            requested: value,
            max: Discount::max_value(kind, cap),
        });
        Ok(self.update(warning))
    }

    /// Switches a line's discount kind (the UI type toggle).
    ///
    /// Values don't translate between kinds, so an actual switch starts
    /// over at zero; re-selecting the current kind changes nothing.
    pub fn set_line_discount_type(
        &mut self,
        product_id: &str,
        kind: DiscountType,
    ) -> CartResult<CartUpdate> {
        let Some(idx) = self.position(product_id) else {
            return Err(CartError::LineNotFound(product_id.to_string()));
        };

        if self.lines[idx].discount.kind != kind {
            self.lines[idx].discount = Discount { kind, value: 0 };
        }
        Ok(self.update(None))
    }

    /// Sets the order-level discount, clamped against the current subtotal.
    pub fn set_global_discount(&mut self, kind: DiscountType, value: i64) -> CartUpdate {
        let cap = self.subtotal();
        let (discount, was_clamped) = Discount::clamped(kind, value, cap);
        self.global_discount = discount;

        let warning = was_clamped.then(|| CartWarning::DiscountClamped {
            requested: value,
            max: Discount::max_value(kind, cap),
        });
        self.update(warning)
    }

    /// Switches the order-level discount kind, resetting the value on an
    /// actual change.
    pub fn set_global_discount_type(&mut self, kind: DiscountType) -> CartUpdate {
        if self.global_discount.kind != kind {
            self.global_discount = Discount { kind, value: 0 };
        }
        self.update(None)
    }

    // =========================================================================
    // Order-Level Mutations
    // =========================================================================

    /// Switches the pricing tier for the whole order.
    ///
    /// Unit prices are derived from the frozen snapshots, so every line
    /// re-prices by itself; stored discounts are untouched (a fixed discount
    /// larger than the new unit price is capped at derivation time).
    pub fn set_sale_mode(&mut self, mode: SaleMode) -> CartUpdate {
        self.sale_mode = mode;
        self.update(None)
    }

    /// Attaches or clears the customer reference.
    pub fn set_customer_ref(&mut self, reference: Option<&str>) -> CartResult<CartUpdate> {
        self.customer_ref = validate_reference(reference)?;
        Ok(self.update(None))
    }

    /// Attaches or clears the quotation reference.
    pub fn set_quotation_ref(&mut self, reference: Option<&str>) -> CartResult<CartUpdate> {
        self.quotation_ref = validate_reference(reference)?;
        Ok(self.update(None))
    }

    /// Resets the cart to its initial state: no lines, no discounts, no
    /// references, Retail mode.
    pub fn clear(&mut self) -> CartUpdate {
        *self = Cart::new();
        self.update(None)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
