//! # Domain Types
//!
//! Value types handed out by the machine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────────────────────────┐    │
//! │  │  ProductSlot    │   │  MachineSnapshot                         │    │
//! │  │  ─────────────  │   │  ─────────────────────────────────────   │    │
//! │  │  price (pence)  │   │  slots: Vec<ProductSlot>                 │    │
//! │  │  quantity       │   │  coins: BTreeMap<Coin, quantity>         │    │
//! │  └─────────────────┘   └──────────────────────────────────────────┘    │
//! │                                                                         │
//! │  Both are COPIES. Nothing outside the machine ever holds a reference   │
//! │  into its live state.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coin::Coin;
use crate::error::{VendError, VendResult};
use crate::money::Money;

// =============================================================================
// Product Slot
// =============================================================================

/// One product slot: its price and how many units are loaded.
///
/// A price of 0 means the slot is unconfigured and not for sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSlot {
    /// Price in pence.
    pub price: i64,

    /// Units currently loaded.
    pub quantity: i64,
}

impl ProductSlot {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pence(self.price)
    }

    /// Checks if the slot has been given a price.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.price > 0
    }

    /// Checks if no units are left.
    #[inline]
    pub fn is_sold_out(&self) -> bool {
        self.quantity <= 0
    }
}

// =============================================================================
// Machine Snapshot
// =============================================================================

/// A consistent copy of the whole machine, taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MachineSnapshot {
    /// Product slots in index order.
    pub slots: Vec<ProductSlot>,

    /// Coin stock per configured denomination.
    pub coins: BTreeMap<Coin, i64>,
}

impl MachineSnapshot {
    /// Total value of the coin stock.
    ///
    /// ## Errors
    /// `InvalidState` if the total does not fit in `Money`.
    pub fn stock_value(&self) -> VendResult<Money> {
        self.coins.iter().try_fold(Money::zero(), |total, (coin, qty)| {
            coin.value()?
                .checked_mul(*qty)
                .and_then(|value| total.checked_add(value))
                .ok_or_else(|| {
                    VendError::InvalidState(format!("coin stock value overflows at {}", coin))
                })
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
