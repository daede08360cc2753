//! # Terminal Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Aroma POS                              │
//! │                                                                         │
//! │  Frontend                         Session Layer                         │
//! │  ────────                         ─────────────                         │
//! │                                                                         │
//! │  session operation                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<SessionView, TerminalError>                              │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Cart rejection? ──── CartError::LineNotFound ────┐             │  │
//! │  │         │                                         │             │  │
//! │  │         ▼                                         ▼             │  │
//! │  │  Tender rejection? ── SettlementError ──────── TerminalError ──►│  │
//! │  │         │                                         ▲             │  │
//! │  │         ▼                                         │             │  │
//! │  │  API failure? ─────── ApiError::Rejected ─────────┘             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──────────────────────────────────────────────────────────────────── │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.message = "Cannot check out: $3,000 still due"                  │
//! │    // e.code = "NOT_SETTLED"                                            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use aroma_client::ApiError;
use aroma_core::{CartError, Money, SettlementError};

/// Result type alias for session operations.
pub type TerminalResult<T> = Result<T, TerminalError>;

/// Everything a session operation can fail with.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Checkout attempted on an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Checkout attempted before the tenders cover the total.
    #[error("Cannot check out: {amount_due} still due")]
    NotSettled { amount_due: Money },

    /// A mutation arrived while a submission is in flight.
    #[error("A checkout is already in progress")]
    CheckoutInFlight,

    /// A cart operation was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A tender operation was rejected.
    #[error(transparent)]
    Settlement(#[from] SettlementError),

    /// The cloud API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// =============================================================================
// Frontend Serialization
// =============================================================================

/// Machine-readable error codes for programmatic handling in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    EmptyCart,
    NotSettled,
    CheckoutInFlight,
    /// Input validation failed
    ValidationError,
    /// Cart operation failed
    CartError,
    /// Tender operation failed
    PaymentError,
    /// Resource not found
    NotFound,
    /// API authorization failed
    Unauthorized,
    /// The API refused the sale; resubmitting reproduces the refusal
    ApiRejected,
    /// The API is unreachable or failing; worth retrying
    ApiUnavailable,
    /// Anything else
    Internal,
}

/// What the frontend receives when a session operation fails.
///
/// ```json
/// {
///   "code": "NOT_SETTLED",
///   "message": "Cannot check out: $3,000 still due"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl TerminalError {
    /// Maps this error to its frontend code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TerminalError::EmptyCart => ErrorCode::EmptyCart,
            TerminalError::NotSettled { .. } => ErrorCode::NotSettled,
            TerminalError::CheckoutInFlight => ErrorCode::CheckoutInFlight,
            TerminalError::Cart(CartError::Validation(_)) => ErrorCode::ValidationError,
            TerminalError::Cart(_) => ErrorCode::CartError,
            TerminalError::Settlement(_) => ErrorCode::PaymentError,
            TerminalError::Api(err) => match err {
                ApiError::Unauthorized => ErrorCode::Unauthorized,
                ApiError::NotFound(_) => ErrorCode::NotFound,
                other if other.is_rejection() => ErrorCode::ApiRejected,
                other if other.is_retryable() => ErrorCode::ApiUnavailable,
                _ => ErrorCode::Internal,
            },
        }
    }

    /// True when resubmitting the same checkout may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TerminalError::Api(err) if err.is_retryable())
    }

    /// Serializable form for the frontend.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TerminalError::EmptyCart.code(), ErrorCode::EmptyCart);
        assert_eq!(
            TerminalError::NotSettled {
                amount_due: Money::from_units(3_000)
            }
            .code(),
            ErrorCode::NotSettled
        );
        assert_eq!(
            TerminalError::CheckoutInFlight.code(),
            ErrorCode::CheckoutInFlight
        );
        assert_eq!(
            TerminalError::Cart(CartError::LineNotFound("p1".into())).code(),
            ErrorCode::CartError
        );
        assert_eq!(
            TerminalError::Api(ApiError::Rejected {
                message: "stock".into()
            })
            .code(),
            ErrorCode::ApiRejected
        );
        assert_eq!(
            TerminalError::Api(ApiError::Timeout).code(),
            ErrorCode::ApiUnavailable
        );
        assert_eq!(
            TerminalError::Api(ApiError::Unauthorized).code(),
            ErrorCode::Unauthorized
        );
    }

    #[test]
    fn test_not_settled_message_carries_amount() {
        let err = TerminalError::NotSettled {
            amount_due: Money::from_units(3_000),
        };
        assert_eq!(err.to_string(), "Cannot check out: $3,000 still due");
    }

    #[test]
    fn test_retryable_passthrough() {
        assert!(TerminalError::Api(ApiError::Timeout).is_retryable());
        assert!(!TerminalError::Api(ApiError::Unauthorized).is_retryable());
        assert!(!TerminalError::EmptyCart.is_retryable());
    }

    #[test]
    fn test_response_serialization() {
        let response = TerminalError::CheckoutInFlight.to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "CHECKOUT_IN_FLIGHT");
        assert_eq!(json["message"], "A checkout is already in progress");
    }
}
