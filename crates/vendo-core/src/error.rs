//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── VendError        - Machine and purchase failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vendo-api errors (app)                                                │
//! │  ├── ConfigError      - Startup configuration failures                 │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → VendError → ApiError → HTTP status + JSON     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Kinds
//! Every `VendError` belongs to exactly one [`ErrorKind`]. Callers that only
//! care about the category (the HTTP shell mapping to status codes, for
//! example) match on `kind()` instead of on every variant.

use serde::Serialize;
use thiserror::Error;

use crate::coin::Coin;
use crate::money::Money;

// =============================================================================
// Error Kind
// =============================================================================

/// Category of a [`VendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied a structurally invalid value.
    InvalidArgument,
    /// Referenced slot index does not exist.
    OutOfRange,
    /// Referenced denomination is not part of this machine.
    NotFound,
    /// Slot exists but cannot currently be sold.
    Unavailable,
    /// Tendered sum is below the price.
    InsufficientFunds,
    /// Coin stock cannot represent the change exactly.
    InsufficientChange,
    /// Internal invariant violation.
    InvalidState,
}

// =============================================================================
// Vend Error
// =============================================================================

/// Vending machine errors.
///
/// No variant is ever returned after a partial mutation: every operation
/// validates completely before it writes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VendError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A decimal face value that does not name a supported coin.
    ///
    /// ## When This Occurs
    /// - Constructing a machine with `0.15` in its coin list
    /// - Tendering `42.0` through the HTTP shell
    #[error("Unsupported coin face value: {face_value}")]
    UnsupportedCoin { face_value: f64 },

    /// Slot index outside `[0, slots)`.
    #[error("Product slot {index} does not exist (machine has {slots} slots)")]
    SlotOutOfRange { index: i64, slots: usize },

    /// Denomination is valid but this machine was not built to hold it.
    #[error("Coin {0} is not accepted by this machine")]
    CoinNotAccepted(Coin),

    /// Taking the tendered coin would overflow that denomination's stock.
    #[error("Coin stock for {0} is full")]
    CoinStockFull(Coin),

    /// Slot quantity is zero.
    #[error("Product slot {index} is sold out")]
    SoldOut { index: usize },

    /// Slot has no price, so it is not for sale.
    #[error("Product slot {index} is not for sale")]
    NotForSale { index: usize },

    /// Tendered coins do not cover the price.
    ///
    /// ## User Workflow
    /// ```text
    /// Price: £2.00, tendered: £1.80
    ///      │
    ///      ▼
    /// InsufficientFunds { price: £2.00, tendered: £1.80, shortfall: £0.20 }
    ///      │
    ///      ▼
    /// Coins handed back untouched, display shows "Insert £0.20 more"
    /// ```
    #[error("Not enough money: price {price}, tendered {tendered}, {shortfall} short")]
    InsufficientFunds {
        price: Money,
        tendered: Money,
        shortfall: Money,
    },

    /// Funds are sufficient but exact change cannot be built from stock.
    #[error("Cannot return exact change of {change_due} from coins in stock")]
    InsufficientChange { change_due: Money },

    /// Internal invariant violation. Never expected in a correct build.
    #[error("Invalid machine state: {0}")]
    InvalidState(String),
}

impl VendError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VendError::Validation(_)
            | VendError::UnsupportedCoin { .. }
            | VendError::CoinStockFull(_) => ErrorKind::InvalidArgument,
            VendError::SlotOutOfRange { .. } => ErrorKind::OutOfRange,
            VendError::CoinNotAccepted(_) => ErrorKind::NotFound,
            VendError::SoldOut { .. } | VendError::NotForSale { .. } => ErrorKind::Unavailable,
            VendError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            VendError::InsufficientChange { .. } => ErrorKind::InsufficientChange,
            VendError::InvalidState(_) => ErrorKind::InvalidState,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any machine state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required collection is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with VendError.
pub type VendResult<T> = Result<T, VendError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VendError::InsufficientFunds {
            price: Money::from_pence(200),
            tendered: Money::from_pence(180),
            shortfall: Money::from_pence(20),
        };
        assert_eq!(
            err.to_string(),
            "Not enough money: price £2.00, tendered £1.80, £0.20 short"
        );

        let err = VendError::SlotOutOfRange { index: 11, slots: 10 };
        assert_eq!(
            err.to_string(),
            "Product slot 11 does not exist (machine has 10 slots)"
        );

        let err = VendError::CoinNotAccepted(Coin::TwoPound);
        assert_eq!(err.to_string(), "Coin £2 is not accepted by this machine");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");

        let err = ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_validation_converts_to_vend_error() {
        let validation_err = ValidationError::Required {
            field: "coins".to_string(),
        };
        let vend_err: VendError = validation_err.into();
        assert!(matches!(vend_err, VendError::Validation(_)));
        assert_eq!(vend_err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            VendError::UnsupportedCoin { face_value: 0.15 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            VendError::CoinStockFull(Coin::OnePound).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(VendError::SoldOut { index: 0 }.kind(), ErrorKind::Unavailable);
        assert_eq!(VendError::NotForSale { index: 0 }.kind(), ErrorKind::Unavailable);
        assert_eq!(
            VendError::InsufficientChange {
                change_due: Money::from_pence(370)
            }
            .kind(),
            ErrorKind::InsufficientChange
        );
        assert_eq!(
            VendError::InvalidState("zero value".into()).kind(),
            ErrorKind::InvalidState
        );
    }
}
