//! # Product Routes
//!
//! Reading and restocking product slots.
//!
//! ## Restock Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator at the machine                                                │
//! │                                                                         │
//! │  POST /product/3/price/130       slot 3 now costs £1.30                │
//! │  POST /product/3/quantity/12     slot 3 now holds 12 units             │
//! │  GET  /product/3                 { "price": 130, "quantity": 12 }      │
//! │                                                                         │
//! │  Indices are 0-based. A negative or too-large index is OUT_OF_RANGE.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::State;
use axum::Json;
use tracing::debug;
use vendo_core::ProductSlot;

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::state::AppState;

/// All slots in index order.
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductSlot>> {
    debug!("list_products");
    Json(state.machine.products())
}

/// One slot.
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<i64>,
) -> Result<Json<ProductSlot>, ApiError> {
    debug!(index, "get_product");
    let index = state.slot_index(index)?;
    Ok(Json(state.machine.product(index)?))
}

/// Sets how many units a slot holds. Returns the updated slot.
pub async fn set_product_quantity(
    State(state): State<AppState>,
    ApiPath((index, quantity)): ApiPath<(i64, i64)>,
) -> Result<Json<ProductSlot>, ApiError> {
    debug!(index, quantity, "set_product_quantity");
    let index = state.slot_index(index)?;
    state.machine.set_product_quantity(index, quantity)?;
    Ok(Json(state.machine.product(index)?))
}

/// Sets the price of a slot in pence. Returns the updated slot.
pub async fn set_product_price(
    State(state): State<AppState>,
    ApiPath((index, price)): ApiPath<(i64, i64)>,
) -> Result<Json<ProductSlot>, ApiError> {
    debug!(index, price, "set_product_price");
    let index = state.slot_index(index)?;
    state.machine.set_product_price(index, price)?;
    Ok(Json(state.machine.product(index)?))
}
