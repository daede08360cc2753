//! # POS Session
//!
//! One terminal = one [`PosSession`]: the active cart plus the tenders
//! entered against it, moving through a two-phase checkout.
//!
//! ## Phases
//! ```text
//!                    begin_checkout()
//!    ┌────────────┐ ───────────────────► ┌──────────────┐
//!    │  Building  │                      │  Submitting  │
//!    │            │ ◄─────────────────── │              │
//!    └────────────┘  complete_checkout() └──────────────┘
//!          ▲          abort_checkout()
//!          │
//!    every cart / tender mutation requires Building;
//!    while Submitting the session is read-only
//! ```
//!
//! ## Rules
//! - Every mutation returns a fresh [`SessionView`] so the frontend
//!   re-renders from authoritative state, never from its own math.
//! - Mutations while a submission is in flight fail with
//!   [`TerminalError::CheckoutInFlight`] instead of racing the request.
//! - `begin_checkout` refuses an empty cart and an unsettled balance;
//!   the HTTP layer never sees a request that could not post.
//! - A failed submission keeps the built request. Retrying without
//!   touching the cart resubmits the same `clientRequestId`, so the API
//!   can deduplicate; any mutation discards it and the next checkout
//!   builds a fresh one.

use serde::{Deserialize, Serialize};
use tracing::info;

use aroma_client::CreateSaleRequest;
use aroma_core::{
    Cart, CartUpdate, CartWarning, Discount, DiscountType, Money, ProductSnapshot, SaleMode,
    SettlementEngine, TenderMethod,
};

use crate::error::{TerminalError, TerminalResult};
use crate::view::SessionView;

// =============================================================================
// Phase
// =============================================================================

/// Where the session is in the checkout lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Cart and tenders are open for mutation.
    Building,
    /// A sale submission is in flight; the session is locked.
    Submitting,
}

// =============================================================================
// Quotation Recall
// =============================================================================

/// One line of a recalled quotation, with a fresh product snapshot.
///
/// Quotation quantities can be stale against today's stock; loading
/// clamps them like any other add and reports what changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLine {
    pub product: ProductSnapshot,
    pub quantity: i64,
    #[serde(default)]
    pub discount: Option<Discount>,
}

/// Result of loading a quotation into the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLoad {
    pub view: SessionView,
    /// Every clamp or stock notice raised while rebuilding the cart.
    pub warnings: Vec<CartWarning>,
}

// =============================================================================
// Session
// =============================================================================

/// The terminal's live selling state.
#[derive(Debug, Default)]
pub struct PosSession {
    cart: Cart,
    tenders: SettlementEngine,
    phase: SessionPhase,
    /// Request built by the last `begin_checkout`, kept across a failed
    /// attempt so an unchanged retry reuses its `clientRequestId`.
    pending_request: Option<CreateSaleRequest>,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Building
    }
}

impl PosSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn tenders(&self) -> &SettlementEngine {
        &self.tenders
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Current view without mutating anything.
    pub fn view(&self) -> SessionView {
        SessionView::capture(self, None)
    }

    fn view_with(&self, update: CartUpdate) -> SessionView {
        SessionView::capture(self, update.warning)
    }

    fn ensure_building(&self) -> TerminalResult<()> {
        match self.phase {
            SessionPhase::Building => Ok(()),
            SessionPhase::Submitting => Err(TerminalError::CheckoutInFlight),
        }
    }

    /// Gate for every mutation: must be in Building, and whatever request
    /// was staged for checkout no longer matches the session.
    fn begin_mutation(&mut self) -> TerminalResult<()> {
        self.ensure_building()?;
        self.pending_request = None;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cart operations
    // -------------------------------------------------------------------------

    pub fn add_product(&mut self, product: &ProductSnapshot) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.add_line(product)?;
        Ok(self.view_with(update))
    }

    pub fn add_product_with_quantity(
        &mut self,
        product: &ProductSnapshot,
        quantity: i64,
    ) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.add_line_with_quantity(product, quantity)?;
        Ok(self.view_with(update))
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_quantity(product_id, quantity)?;
        Ok(self.view_with(update))
    }

    pub fn adjust_quantity(&mut self, product_id: &str, delta: i64) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.adjust_quantity(product_id, delta)?;
        Ok(self.view_with(update))
    }

    pub fn remove_line(&mut self, product_id: &str) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.remove_line(product_id);
        Ok(self.view_with(update))
    }

    pub fn set_line_discount(
        &mut self,
        product_id: &str,
        kind: DiscountType,
        value: i64,
    ) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_line_discount(product_id, kind, value)?;
        Ok(self.view_with(update))
    }

    pub fn set_line_discount_type(
        &mut self,
        product_id: &str,
        kind: DiscountType,
    ) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_line_discount_type(product_id, kind)?;
        Ok(self.view_with(update))
    }

    pub fn set_global_discount(
        &mut self,
        kind: DiscountType,
        value: i64,
    ) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_global_discount(kind, value);
        Ok(self.view_with(update))
    }

    pub fn set_global_discount_type(&mut self, kind: DiscountType) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_global_discount_type(kind);
        Ok(self.view_with(update))
    }

    pub fn set_sale_mode(&mut self, mode: SaleMode) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_sale_mode(mode);
        Ok(self.view_with(update))
    }

    pub fn set_customer_ref(&mut self, reference: Option<&str>) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_customer_ref(reference)?;
        Ok(self.view_with(update))
    }

    pub fn set_quotation_ref(&mut self, reference: Option<&str>) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let update = self.cart.set_quotation_ref(reference)?;
        Ok(self.view_with(update))
    }

    // -------------------------------------------------------------------------
    // Tender operations
    // -------------------------------------------------------------------------

    pub fn add_payment(&mut self, method: TenderMethod, amount: Money) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let total = self.cart.totals().total;
        self.tenders.add_payment(total, method, amount)?;
        Ok(self.view())
    }

    pub fn remove_payment(&mut self, index: usize) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        let total = self.cart.totals().total;
        self.tenders.remove_payment(total, index)?;
        Ok(self.view())
    }

    // -------------------------------------------------------------------------
    // Reset operations
    // -------------------------------------------------------------------------

    /// Voids the transaction: cart and tenders both reset.
    pub fn clear(&mut self) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        self.cart.clear();
        self.tenders.reset();
        Ok(self.view())
    }

    /// Resets the cart but keeps entered tenders.
    ///
    /// For the restart-the-order flow where the customer's card is
    /// already on file; the kept tenders re-validate against the new
    /// cart at the next settlement read.
    pub fn clear_cart_only(&mut self) -> TerminalResult<SessionView> {
        self.begin_mutation()?;
        self.cart.clear();
        Ok(self.view())
    }

    // -------------------------------------------------------------------------
    // Checkout lifecycle
    // -------------------------------------------------------------------------

    /// Validates the session and locks it for submission.
    ///
    /// Returns the request to post. If a previous attempt failed and
    /// nothing changed since, the same request (and `clientRequestId`)
    /// is handed back for the retry.
    pub fn begin_checkout(&mut self, device_id: &str) -> TerminalResult<CreateSaleRequest> {
        self.ensure_building()?;

        if self.cart.is_empty() {
            return Err(TerminalError::EmptyCart);
        }
        let total = self.cart.totals().total;
        let settlement = self.tenders.settlement(total);
        if !settlement.can_checkout {
            return Err(TerminalError::NotSettled {
                amount_due: settlement.amount_due,
            });
        }

        let request = self
            .pending_request
            .take()
            .unwrap_or_else(|| CreateSaleRequest::build(&self.cart, self.tenders.payments(), device_id));

        self.phase = SessionPhase::Submitting;
        self.pending_request = Some(request.clone());

        info!(
            request_id = %request.client_request_id,
            lines = request.lines.len(),
            total = %total,
            "Checkout started"
        );
        Ok(request)
    }

    /// The sale posted: reset everything for the next customer.
    pub fn complete_checkout(&mut self) -> SessionView {
        self.cart.clear();
        self.tenders.reset();
        self.phase = SessionPhase::Building;
        self.pending_request = None;
        self.view()
    }

    /// The submission failed: unlock with cart and tenders intact.
    pub fn abort_checkout(&mut self) -> SessionView {
        self.phase = SessionPhase::Building;
        self.view()
    }

    // -------------------------------------------------------------------------
    // Quotation recall
    // -------------------------------------------------------------------------

    /// Replaces the session contents with a recalled quotation.
    ///
    /// The current cart and tenders are discarded first. Each line is
    /// re-added against its fresh snapshot, so stale quantities clamp
    /// and sold-out products drop, with every notice collected for the
    /// operator to review.
    pub fn load_quotation(
        &mut self,
        reference: &str,
        sale_mode: SaleMode,
        lines: &[QuotationLine],
    ) -> TerminalResult<QuotationLoad> {
        self.begin_mutation()?;

        self.cart.clear();
        self.tenders.reset();
        self.cart.set_sale_mode(sale_mode);
        self.cart.set_quotation_ref(Some(reference))?;

        let mut warnings = Vec::new();
        for line in lines {
            let update = self.cart.add_line_with_quantity(&line.product, line.quantity)?;
            if let Some(warning) = update.warning {
                warnings.push(warning);
            }
            // A sold-out product never entered the cart; skip its discount.
            if self.cart.find_line(&line.product.product_id).is_none() {
                continue;
            }
            if let Some(discount) = line.discount {
                let update = self.cart.set_line_discount(
                    &line.product.product_id,
                    discount.kind,
                    discount.value,
                )?;
                if let Some(warning) = update.warning {
                    warnings.push(warning);
                }
            }
        }

        info!(
            quotation = reference,
            lines = self.cart.line_count(),
            warnings = warnings.len(),
            "Quotation loaded"
        );
        Ok(QuotationLoad {
            view: self.view(),
            warnings,
        })
    }
}
