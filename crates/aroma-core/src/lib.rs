//! # aroma-core: Pure Business Logic for Aroma POS
//!
//! This crate is the **heart** of the Aroma POS terminal. It contains the
//! cart and settlement engines as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aroma POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal UI                                  │   │
//! │  │    Search UI ──► Cart UI ──► Tender UI ──► Receipt UI          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               aroma-terminal (Session Layer)                    │   │
//! │  │    one locked session, view models, checkout orchestration     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aroma-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │   cart    │  │settlement │  │   │
//! │  │   │   Money   │  │ Discount  │  │   Cart    │  │  tenders  │  │   │
//! │  │   │ percents  │  │ Snapshot  │  │ CartLine  │  │  change   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK BUT TIMESTAMPS • PURE MATH    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  aroma-client (HTTP Layer)                      │   │
//! │  │          product lookup + sale submission to the Cloud API     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (ProductSnapshot, Discount, Payment, etc.)
//! - [`cart`] - Cart engine: lines, discounts, sale mode, clamp-and-warn
//! - [`settlement`] - Settlement engine: split tenders, change, checkout gate
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation shared by the engines
//!
//! ## Design Principles
//!
//! 1. **Derived, never stored**: totals, unit prices and discount effects are
//!    recomputed from the stored facts on every read
//! 2. **Integer Money**: all monetary values are whole currency units (i64)
//! 3. **Clamp-and-warn**: cart input out of range is adjusted and reported,
//!    never silently dropped; tender input out of range is rejected outright
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use aroma_core::{Cart, Money, ProductSnapshot, SettlementEngine, TenderMethod};
//!
//! let lavender = ProductSnapshot {
//!     product_id: "prod-1".to_string(),
//!     sku: "LAV-330".to_string(),
//!     name: "Lavender Oil 330ml".to_string(),
//!     retail_price: Money::from_units(10_000),
//!     wholesale_price: Money::from_units(7_500),
//!     stock_available: 12,
//! };
//!
//! let mut cart = Cart::new();
//! let update = cart.add_line(&lavender).unwrap();
//! assert_eq!(update.totals.total.units(), 10_000);
//!
//! let mut tenders = SettlementEngine::new();
//! let settlement = tenders
//!     .add_payment(update.totals.total, TenderMethod::Cash, Money::from_units(10_000))
//!     .unwrap();
//! assert!(settlement.can_checkout);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use aroma_core::Cart` instead of
// `use aroma_core::cart::Cart`

pub use cart::{Cart, CartLine, CartTotals, CartUpdate, CartWarning};
pub use error::{CartError, CartResult, SettlementError, SettlementResult, ValidationError};
pub use money::Money;
pub use settlement::{ChangeKind, Settlement, SettlementEngine};
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single receipt printable. Can be made
/// configurable per store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Stock is usually the tighter cap; this is the backstop when it is not.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of customer / quotation references
pub const MAX_REFERENCE_LEN: usize = 64;
