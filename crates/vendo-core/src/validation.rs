//! # Validation Module
//!
//! Input validation for machine configuration and inventory updates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP shell                                                   │
//! │  └── Type validation (path/body deserialization)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Value rules (positive price, non-negative quantity, ...)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: VendingMachine                                               │
//! │  └── State rules (slot exists, coin accepted, stock, funds)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check here runs before the machine takes its lock, so a rejected
//! call never touches state.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product price in pence.
///
/// ## Rules
/// - Must be positive (> 0). A zero price only exists as the unconfigured
///   default; it cannot be set.
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_price;
///
/// assert!(validate_price(130).is_ok());
/// assert!(validate_price(0).is_err());
/// assert!(validate_price(-100).is_err());
/// ```
pub fn validate_price(pence: i64) -> ValidationResult<()> {
    if pence <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or coin quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0). Zero empties the slot or coin tube.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates the number of product slots at construction.
pub fn validate_slot_count(slots: usize) -> ValidationResult<()> {
    if slots == 0 {
        return Err(ValidationError::MustBePositive {
            field: "slot count".to_string(),
        });
    }

    Ok(())
}

/// Validates the supported denomination list at construction.
pub fn validate_denominations<T>(denominations: &[T]) -> ValidationResult<()> {
    if denominations.is_empty() {
        return Err(ValidationError::Required {
            field: "supported coins".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(1).is_ok());
        assert!(validate_price(180).is_ok());

        assert!(validate_price(0).is_err());
        assert!(validate_price(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(10).is_ok());

        let err = validate_quantity(-1).unwrap_err();
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validate_slot_count() {
        assert!(validate_slot_count(1).is_ok());
        assert!(validate_slot_count(0).is_err());
    }

    #[test]
    fn test_validate_denominations() {
        assert!(validate_denominations(&[0.1, 0.2]).is_ok());
        assert!(validate_denominations::<f64>(&[]).is_err());
    }
}
