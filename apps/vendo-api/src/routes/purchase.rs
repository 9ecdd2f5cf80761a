//! # Purchase Route
//!
//! `POST /product/{index}/purchase` with a JSON array of face values.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer inserts £1, 50p, 20p, 10p and presses slot 0 (price £1.00)   │
//! │                                                                         │
//! │  POST /product/0/purchase   [1.0, 0.5, 0.2, 0.1]                        │
//! │       │                                                                 │
//! │       ▼  face values → Coin (unknown value: 400, nothing happens)      │
//! │  VendingMachine::purchase_product(0, [£1, 50p, 20p, 10p])              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  200 { "receiptId": "...", "slot": 0, "pricePence": 100,               │
//! │        "tenderedPence": 180, "change": [0.5, 0.2, 0.1],                 │
//! │        "changePence": 80, "completedAt": "..." }                        │
//! │                                                                         │
//! │  On any error the coins are handed back and the machine is unchanged.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use vendo_core::coin::total_value;
use vendo_core::{Coin, VendResult};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Receipt for a completed purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub receipt_id: Uuid,
    pub slot: usize,
    pub price_pence: i64,
    pub tendered_pence: i64,
    /// Change as face values, largest first.
    pub change: Vec<f64>,
    pub change_pence: i64,
    pub completed_at: DateTime<Utc>,
}

/// Buys one unit from a slot.
pub async fn purchase_product(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<i64>,
    ApiJson(face_values): ApiJson<Vec<f64>>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    debug!(index, tendered = ?face_values, "purchase_product");

    let index = state.slot_index(index)?;
    let tendered = face_values
        .iter()
        .map(|face_value| Coin::from_face_value(*face_value))
        .collect::<VendResult<Vec<_>>>()?;

    let change = state.machine.purchase_product(index, &tendered)?;

    let tendered_pence = total_value(&tendered)?.pence();
    let change_pence = total_value(&change)?.pence();
    let receipt = PurchaseResponse {
        receipt_id: Uuid::new_v4(),
        slot: index,
        // Price actually charged by the committed transaction.
        price_pence: tendered_pence - change_pence,
        tendered_pence,
        change: change.iter().map(|coin| coin.face_value()).collect(),
        change_pence,
        completed_at: Utc::now(),
    };

    info!(receipt_id = %receipt.receipt_id, slot = index, "Receipt issued");
    Ok(Json(receipt))
}
