//! # Error Types
//!
//! Domain-specific error types for aroma-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aroma-core errors (this file)                                          │
//! │  ├── CartError        - Cart engine rejections                          │
//! │  ├── SettlementError  - Tender engine rejections                        │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  aroma-client errors (separate crate)                                   │
//! │  └── ApiError         - Checkout boundary failures                      │
//! │                                                                         │
//! │  aroma-terminal errors (separate crate)                                 │
//! │  └── TerminalError    - What the UI shell sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CartError ─┬─► TerminalError → Frontend        │
//! │                   SettlementError ──┤                                   │
//! │                          ApiError ──┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Rejections are all-or-nothing; clamps are warnings, not errors
//!    (see [`crate::cart::CartWarning`])

use thiserror::Error;

use crate::money::Money;
use crate::types::TenderMethod;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart engine errors.
///
/// These are the failures that reject a mutation outright. Recoverable
/// out-of-range input (oversized quantity, oversized discount) is clamped
/// with a warning instead and never lands here.
#[derive(Debug, Error)]
pub enum CartError {
    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartFull { max: usize },

    /// The targeted line does not exist.
    ///
    /// ## When This Occurs
    /// - `set_quantity` with a positive quantity for an unknown product
    /// - discount edits against a line that was already removed
    ///
    /// Plain removal of an unknown line is NOT an error; it is idempotent.
    #[error("Product {0} is not in the cart")]
    LineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Settlement Error
// =============================================================================

/// Settlement engine errors.
///
/// Every tender mutation is all-or-nothing: a rejected payment leaves the
/// tender list exactly as it was.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Payment amount must be a positive number of whole units.
    #[error("Payment amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Money },

    /// Each tender method can be used at most once per order.
    #[error("A {method:?} payment is already registered for this order")]
    DuplicateMethod { method: TenderMethod },

    /// A non-cash tender cannot exceed the amount still due.
    ///
    /// ## User Workflow
    /// ```text
    /// Amount due: $4.000
    ///      │
    ///      ▼
    /// add_payment(DebitCard, $5.000)
    ///      │
    ///      ▼
    /// ExceedsAmountDue { suggested: $4.000 }
    ///      │
    ///      ▼
    /// UI pre-fills the input with the suggested amount
    /// ```
    #[error("{method:?} payment of {amount} exceeds the {suggested} due")]
    ExceedsAmountDue {
        method: TenderMethod,
        amount: Money,
        /// The largest amount that would have been accepted.
        suggested: Money,
    },

    /// Tender removal targeted a position that does not exist.
    #[error("No payment at position {index}")]
    NoSuchPayment { index: usize },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before engine logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Convenience type alias for Results with SettlementError.
pub type SettlementResult<T> = Result<T, SettlementError>;

// =============================================================================
// Unit Tests
// =============================================================================
