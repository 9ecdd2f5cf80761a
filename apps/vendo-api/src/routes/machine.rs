//! Health check and whole-machine snapshot.

use axum::extract::State;
use axum::Json;
use tracing::debug;
use vendo_core::MachineSnapshot;

use crate::state::AppState;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Slots and coin stock, copied under one lock.
pub async fn snapshot(State(state): State<AppState>) -> Json<MachineSnapshot> {
    debug!("snapshot");
    Json(state.machine.snapshot())
}
