//! # Validation Module
//!
//! Input validation utilities for Aroma POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engines (Rust)                                               │
//! │  ├── THIS MODULE: input rejection (malformed snapshots, bad counts)    │
//! │  └── Engine clamps: out-of-range but recoverable input is clamped      │
//! │      with a warning instead of rejected (discounts, quantities)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend service                                              │
//! │  ├── Stock re-check at checkout                                        │
//! │  └── Authoritative totals and document numbering                       │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use aroma_core::validation::validate_quantity;
//!
//! // Validate a requested quantity before a bulk add
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::ProductSnapshot;
use crate::{MAX_LINE_QUANTITY, MAX_REFERENCE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// Used for EXPLICIT quantity input (bulk adds from a reloaded quotation).
/// In-cart adjustments clamp against the stock cap instead of rejecting.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Snapshot Validators
// =============================================================================

/// Validates an inbound product snapshot before it is frozen into the cart.
///
/// ## Rules
/// - `product_id`, `sku` and `name` must be non-empty
/// - `name` at most 200 characters, `sku` at most 50
/// - Both price tiers must be non-negative (zero allowed: free items)
///
/// Stock is deliberately NOT validated here: zero or negative stock is a
/// legal snapshot state and the cart answers it with an out-of-stock
/// warning rather than a rejection.
pub fn validate_product_snapshot(product: &ProductSnapshot) -> ValidationResult<()> {
    if product.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    let sku = product.sku.trim();
    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }
    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    let name = product.name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    if product.retail_price.is_negative() || product.wholesale_price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Reference Validators
// =============================================================================

/// Validates and normalizes an optional session reference
/// (customer ref, quotation ref).
///
/// ## Rules
/// - Empty or whitespace-only input normalizes to `None`
/// - At most MAX_REFERENCE_LEN (64) characters
///
/// ## Returns
/// The trimmed reference, or `None` when the input carries no content.
pub fn validate_reference(reference: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(raw) = reference else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.len() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    Ok(Some(trimmed.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn snapshot() -> ProductSnapshot {
        ProductSnapshot {
            product_id: "prod-1".to_string(),
            sku: "LAV-330".to_string(),
            name: "Lavender Oil 330ml".to_string(),
            retail_price: Money::from_units(10_000),
            wholesale_price: Money::from_units(7_500),
            stock_available: 12,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_product_snapshot() {
        assert!(validate_product_snapshot(&snapshot()).is_ok());

        let mut p = snapshot();
        p.product_id = "  ".to_string();
        assert!(validate_product_snapshot(&p).is_err());

        let mut p = snapshot();
        p.sku = String::new();
        assert!(validate_product_snapshot(&p).is_err());

        let mut p = snapshot();
        p.name = "A".repeat(300);
        assert!(validate_product_snapshot(&p).is_err());

        let mut p = snapshot();
        p.retail_price = Money::from_units(-100);
        assert!(validate_product_snapshot(&p).is_err());

        // Zero prices and zero stock are legal snapshot states.
        let mut p = snapshot();
        p.retail_price = Money::zero();
        p.stock_available = 0;
        assert!(validate_product_snapshot(&p).is_ok());
    }

    #[test]
    fn test_validate_reference() {
        assert_eq!(validate_reference(None).unwrap(), None);
        assert_eq!(validate_reference(Some("")).unwrap(), None);
        assert_eq!(validate_reference(Some("   ")).unwrap(), None);
        assert_eq!(
            validate_reference(Some("  COT-2031 ")).unwrap(),
            Some("COT-2031".to_string())
        );
        assert!(validate_reference(Some(&"A".repeat(100))).is_err());
    }
}
