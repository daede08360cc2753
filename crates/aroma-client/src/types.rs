//! # Wire Types
//!
//! Request and response bodies exchanged with the cloud API.
//!
//! ## Serialization Convention
//! The cloud API speaks camelCase JSON, so every DTO here renames its
//! fields; enum VALUES stay snake_case strings (`"retail"`, `"debit_card"`)
//! to match the shared vocabulary in `aroma-core`.
//!
//! ## Request Assembly
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Submission Payload                             │
//! │                                                                         │
//! │   Cart ─────────────┐                                                  │
//! │   (lines, mode,     │                                                  │
//! │    discounts, refs) ├──► CreateSaleRequest ───► POST /sales            │
//! │   Payments ─────────┤    + clientRequestId (fresh UUID)                │
//! │   Device ID ────────┘    + deviceId                                    │
//! │                                                                         │
//! │   The API re-derives every total itself; the payload carries only      │
//! │   facts (quantities, unit prices, discount settings, tenders).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aroma_core::{Cart, CartLine, DiscountType, Money, Payment, ProductSnapshot, SaleMode, TenderMethod};

// =============================================================================
// Product Lookup
// =============================================================================

/// A product as the cloud API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub sku: String,
    pub name: String,
    /// Retail unit price in whole currency units.
    pub retail_price: i64,
    /// Wholesale unit price in whole currency units.
    pub wholesale_price: i64,
    /// Sellable stock at lookup time.
    pub stock_available: i64,
}

impl From<ProductRecord> for ProductSnapshot {
    fn from(record: ProductRecord) -> Self {
        ProductSnapshot {
            product_id: record.id,
            sku: record.sku,
            name: record.name,
            retail_price: Money::from_units(record.retail_price),
            wholesale_price: Money::from_units(record.wholesale_price),
            stock_available: record.stock_available,
        }
    }
}

// =============================================================================
// Sale Submission
// =============================================================================

/// One cart line flattened for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price actually charged (mode already applied), before discount.
    pub unit_price: i64,
    pub unit_discount_type: DiscountType,
    pub unit_discount_value: i64,
}

impl SaleLine {
    fn from_line(line: &CartLine, mode: SaleMode) -> Self {
        SaleLine {
            product_id: line.product.product_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(mode).units(),
            unit_discount_type: line.discount.kind,
            unit_discount_value: line.discount.value,
        }
    }
}

/// One tender flattened for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderDto {
    pub method: TenderMethod,
    pub amount: i64,
}

impl TenderDto {
    fn from_payment(payment: &Payment) -> Self {
        TenderDto {
            method: payment.method,
            amount: payment.amount.units(),
        }
    }
}

/// The `POST /sales` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    /// Fresh UUID per submission attempt chain. The API deduplicates on it,
    /// so resubmitting after a timeout cannot double-book the sale.
    pub client_request_id: String,

    /// The terminal submitting the sale.
    pub device_id: String,

    pub sale_mode: SaleMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotation_ref: Option<String>,

    pub lines: Vec<SaleLine>,

    /// Order-level discount settings, verbatim from the cart.
    pub discount_type: DiscountType,
    pub discount_value: i64,

    pub payments: Vec<TenderDto>,
}

impl CreateSaleRequest {
    /// Flattens a cart and its tenders into a submission payload.
    pub fn build(cart: &Cart, payments: &[Payment], device_id: &str) -> Self {
        CreateSaleRequest {
            client_request_id: Uuid::new_v4().to_string(),
            device_id: device_id.to_string(),
            sale_mode: cart.sale_mode,
            customer_ref: cart.customer_ref.clone(),
            quotation_ref: cart.quotation_ref.clone(),
            lines: cart
                .lines
                .iter()
                .map(|line| SaleLine::from_line(line, cart.sale_mode))
                .collect(),
            discount_type: cart.global_discount.kind,
            discount_value: cart.global_discount.value,
            payments: payments.iter().map(TenderDto::from_payment).collect(),
        }
    }
}

/// The `POST /sales` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleResponse {
    /// Server-side sale identifier.
    pub sale_id: String,

    /// Fiscal document number assigned by the API (printed on the receipt).
    pub document_number: String,

    /// Totals as the API derived them, in whole currency units.
    pub subtotal: i64,
    pub discount_total: i64,
    pub total: i64,

    pub created_at: DateTime<Utc>,
}
