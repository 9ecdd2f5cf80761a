//! Coin stock routes.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use tracing::debug;
use vendo_core::Coin;

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::state::AppState;

/// Stock per accepted denomination.
pub async fn list_coins(State(state): State<AppState>) -> Json<BTreeMap<Coin, i64>> {
    debug!("list_coins");
    Json(state.machine.coins())
}

/// Sets the stock of one denomination, given as a face value (`/coin/0.2/...`).
pub async fn set_coin_quantity(
    State(state): State<AppState>,
    ApiPath((face_value, quantity)): ApiPath<(f64, i64)>,
) -> Result<Json<BTreeMap<Coin, i64>>, ApiError> {
    debug!(face_value, quantity, "set_coin_quantity");
    let coin = Coin::from_face_value(face_value)?;
    state.machine.set_coin_quantity(coin, quantity)?;
    Ok(Json(state.machine.coins()))
}

/// Sets every accepted denomination to the same quantity.
pub async fn fill_coins(
    State(state): State<AppState>,
    ApiPath(quantity): ApiPath<i64>,
) -> Result<Json<BTreeMap<Coin, i64>>, ApiError> {
    debug!(quantity, "fill_coins");
    state.machine.fill_coins(quantity)?;
    Ok(Json(state.machine.coins()))
}
