//! # Checkout Submission
//!
//! Drives one sale from a settled session to a printed receipt.
//!
//! ## Flow
//! ```text
//!  submit_sale(state, client)
//!       │
//!       │ lock ── begin_checkout() ─ validates, locks the session,
//!       │         and hands back the request + a receipt snapshot
//!       ▼
//!  POST /sales  (no lock held across the await)
//!       │
//!       ├─ Ok ──── lock ── complete_checkout() ─ session reset ─► receipt
//!       │
//!       └─ Err ─── lock ── abort_checkout() ── cart + tenders intact,
//!                          error surfaced for the operator to retry
//! ```
//!
//! The receipt combines what the terminal knew at submission time (lines,
//! tenders, change) with what only the server knows (document number,
//! authoritative totals, timestamp).

use serde::Serialize;
use tracing::{info, warn};

use aroma_client::{CreateSaleResponse, SalesClient};
use aroma_core::{ChangeKind, SaleMode};

use crate::error::TerminalError;
use crate::session::PosSession;
use crate::state::SessionState;
use crate::view::TenderView;

// =============================================================================
// Receipt
// =============================================================================

/// One printed receipt line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    /// Unit price after the line discount.
    pub unit_price: i64,
    pub line_total: i64,
}

/// Everything the receipt printer needs for one completed sale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub sale_id: String,
    pub document_number: String,
    pub store_name: String,
    /// Server timestamp, RFC 3339.
    pub timestamp: String,
    pub sale_mode: SaleMode,
    pub lines: Vec<ReceiptLine>,
    /// Totals as the API recorded them.
    pub subtotal: i64,
    pub discount: i64,
    pub total: i64,
    pub payments: Vec<TenderView>,
    pub change_due: i64,
    pub change_kind: Option<ChangeKind>,
    pub customer_ref: Option<String>,
}

/// Terminal-side half of the receipt, captured under the session lock
/// at submission time so later resets can't touch it.
struct PendingReceipt {
    sale_mode: SaleMode,
    lines: Vec<ReceiptLine>,
    payments: Vec<TenderView>,
    change_due: i64,
    change_kind: Option<ChangeKind>,
    customer_ref: Option<String>,
}

impl PendingReceipt {
    /// Only valid right after `begin_checkout` accepted the session.
    fn capture(session: &PosSession) -> Self {
        let cart = session.cart();
        let mode = cart.sale_mode;
        let settlement = session.tenders().settlement(cart.totals().total);

        PendingReceipt {
            sale_mode: mode,
            lines: cart
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    sku: line.product.sku.clone(),
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.discounted_unit_price(mode).units(),
                    line_total: line.line_total(mode).units(),
                })
                .collect(),
            payments: session.tenders().payments().iter().map(TenderView::from).collect(),
            change_due: settlement.change_due.units(),
            change_kind: settlement.change_kind,
            customer_ref: cart.customer_ref.clone(),
        }
    }

    fn into_receipt(self, response: &CreateSaleResponse, store_name: &str) -> CheckoutReceipt {
        CheckoutReceipt {
            sale_id: response.sale_id.clone(),
            document_number: response.document_number.clone(),
            store_name: store_name.to_string(),
            timestamp: response.created_at.to_rfc3339(),
            sale_mode: self.sale_mode,
            lines: self.lines,
            subtotal: response.subtotal,
            discount: response.discount_total,
            total: response.total,
            payments: self.payments,
            change_due: self.change_due,
            change_kind: self.change_kind,
            customer_ref: self.customer_ref,
        }
    }
}

// =============================================================================
// Submission
// =============================================================================

/// Submits the current session as a sale.
///
/// On success the session resets for the next customer and the receipt
/// is returned. On any failure the session unlocks with cart and tenders
/// intact, so the operator can retry or adjust.
pub async fn submit_sale(
    state: &SessionState,
    client: &SalesClient,
) -> Result<CheckoutReceipt, TerminalError> {
    let (request, pending) = state.with_session_mut(|session| {
        let request = session.begin_checkout(client.device_id())?;
        let pending = PendingReceipt::capture(session);
        Ok::<_, TerminalError>((request, pending))
    })?;

    match client.create_sale(&request).await {
        Ok(response) => {
            let receipt = pending.into_receipt(&response, client.store_name());
            state.with_session_mut(|session| session.complete_checkout());
            info!(
                sale_id = %receipt.sale_id,
                document = %receipt.document_number,
                total = receipt.total,
                "Sale completed"
            );
            Ok(receipt)
        }
        Err(err) => {
            state.with_session_mut(|session| session.abort_checkout());
            warn!(error = %err, "Checkout failed; cart and tenders preserved");
            Err(TerminalError::Api(err))
        }
    }
}
