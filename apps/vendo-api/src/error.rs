//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vendo                                  │
//! │                                                                         │
//! │  POST /product/0/purchase  [1.0, 0.5]                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<Json<T>, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad path / body? ──── PathRejection / JsonRejection ──┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Machine refuses? ──── VendError::InsufficientFunds ── ApiError ►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  HTTP 402                                                               │
//! │  { "code": "INSUFFICIENT_FUNDS",                                        │
//! │    "message": "Not enough money: price £2.00, tendered £1.50, ..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vendo_core::{ErrorKind, VendError};

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "OUT_OF_RANGE",
///   "message": "Product slot 11 does not exist (machine has 10 slots)"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed path, body, or value (400)
    InvalidArgument,

    /// Slot index outside the machine (404)
    OutOfRange,

    /// Denomination not held by this machine (404)
    NotFound,

    /// Slot sold out or unpriced (409)
    Unavailable,

    /// Tender below price (402)
    InsufficientFunds,

    /// Change cannot be made from stock (409)
    InsufficientChange,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::OutOfRange | ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unavailable | ErrorCode::InsufficientChange => StatusCode::CONFLICT,
            ErrorCode::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
            ErrorKind::OutOfRange => ErrorCode::OutOfRange,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::Unavailable => ErrorCode::Unavailable,
            ErrorKind::InsufficientFunds => ErrorCode::InsufficientFunds,
            ErrorKind::InsufficientChange => ErrorCode::InsufficientChange,
            ErrorKind::InvalidState => ErrorCode::Internal,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }
}

/// Converts machine errors to API errors.
impl From<VendError> for ApiError {
    fn from(err: VendError) -> Self {
        let code = ErrorCode::from(err.kind());
        if code == ErrorCode::Internal {
            // Log the actual error but return a generic message
            tracing::error!("Machine invariant violated: {}", err);
            return ApiError::new(code, "Internal machine error");
        }
        ApiError::new(code, err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_argument(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_argument(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vendo_core::{Coin, Money};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (VendError::UnsupportedCoin { face_value: 0.15 }, StatusCode::BAD_REQUEST),
            (VendError::SlotOutOfRange { index: 11, slots: 10 }, StatusCode::NOT_FOUND),
            (VendError::CoinNotAccepted(Coin::TwoPound), StatusCode::NOT_FOUND),
            (VendError::CoinStockFull(Coin::OnePound), StatusCode::BAD_REQUEST),
            (VendError::SoldOut { index: 0 }, StatusCode::CONFLICT),
            (VendError::NotForSale { index: 0 }, StatusCode::CONFLICT),
            (
                VendError::InsufficientFunds {
                    price: Money::from_pence(200),
                    tendered: Money::from_pence(180),
                    shortfall: Money::from_pence(20),
                },
                StatusCode::PAYMENT_REQUIRED,
            ),
            (
                VendError::InsufficientChange {
                    change_due: Money::from_pence(370),
                },
                StatusCode::CONFLICT,
            ),
            (VendError::InvalidState("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).code.status(), status);
        }
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::from(VendError::SoldOut { index: 2 });
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNAVAILABLE");
        assert_eq!(json["message"], "Product slot 2 is sold out");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = ApiError::from(VendError::InvalidState("negative stock".into()));
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("negative stock"));
    }
}
