//! # App State
//!
//! Shared state handed to every handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Router::with_state(AppState)                                          │
//! │         │                                                               │
//! │         ▼ cloned per request (one Arc bump)                             │
//! │  ┌──────────────────────────────┐                                       │
//! │  │  AppState                    │                                       │
//! │  │  machine: Arc<VendingMachine>│── one Mutex inside the machine        │
//! │  └──────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine does its own locking, so the state holds no lock of its own.

use std::sync::Arc;

use vendo_core::{VendError, VendingMachine};

use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AppState {
    pub machine: Arc<VendingMachine>,
}

impl AppState {
    pub fn new(machine: VendingMachine) -> Self {
        AppState {
            machine: Arc::new(machine),
        }
    }

    /// Converts a signed path index to a slot index.
    ///
    /// Negative indices fail the same way as indices past the end.
    pub fn slot_index(&self, index: i64) -> Result<usize, ApiError> {
        usize::try_from(index).map_err(|_| {
            ApiError::from(VendError::SlotOutOfRange {
                index,
                slots: self.machine.slot_count(),
            })
        })
    }
}
