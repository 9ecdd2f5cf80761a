//! # Vending Machine
//!
//! Owns the product slots and coin stock, and runs the purchase transaction.
//!
//! ## Thread Safety
//! All state sits behind one `Mutex`. Every operation, reads included,
//! takes the lock for a short, bounded section:
//! 1. Callers may share one machine across threads (`Arc<VendingMachine>`)
//! 2. No two read-modify-write sequences interleave
//! 3. Failure paths return before the first write, and the guard is
//!    released on every exit path
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase_product(index, tendered)                                      │
//! │       │                                                                 │
//! │       ▼  lock                                                           │
//! │  1. slot exists?          ── no ──► SlotOutOfRange                      │
//! │  2. quantity > 0?         ── no ──► SoldOut                             │
//! │  3. price > 0?            ── no ──► NotForSale                          │
//! │     tender accepted?      ── no ──► CoinNotAccepted                     │
//! │  4. tendered >= price?    ── no ──► InsufficientFunds { shortfall }     │
//! │     tender fits stock?    ── no ──► CoinStockFull                       │
//! │  5. change from stock + tender?                                         │
//! │                           ── no ──► InsufficientChange                  │
//! │       │                                                                 │
//! │       ▼  all checks passed, nothing written yet                         │
//! │  commit: stock = stock + tender - change, quantity -= 1                 │
//! │       │                                                                 │
//! │       ▼  unlock                                                         │
//! │  Vec<Coin> change                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::change::make_change;
use crate::coin::{self, Coin};
use crate::error::{VendError, VendResult};
use crate::money::Money;
use crate::types::{MachineSnapshot, ProductSlot};
use crate::validation::{
    validate_denominations, validate_price, validate_quantity, validate_slot_count,
};

// =============================================================================
// Machine State
// =============================================================================

/// The mutable part of the machine. Only reachable through the lock.
#[derive(Debug)]
struct MachineState {
    slots: Vec<ProductSlot>,
    coins: BTreeMap<Coin, i64>,
}

impl MachineState {
    fn slot(&self, index: usize) -> VendResult<&ProductSlot> {
        self.slots.get(index).ok_or(VendError::SlotOutOfRange {
            index: index as i64,
            slots: self.slots.len(),
        })
    }

    fn slot_mut(&mut self, index: usize) -> VendResult<&mut ProductSlot> {
        let slots = self.slots.len();
        self.slots.get_mut(index).ok_or(VendError::SlotOutOfRange {
            index: index as i64,
            slots,
        })
    }

    fn coin_mut(&mut self, coin: Coin) -> VendResult<&mut i64> {
        self.coins
            .get_mut(&coin)
            .ok_or(VendError::CoinNotAccepted(coin))
    }
}

// =============================================================================
// Vending Machine
// =============================================================================

/// A coin-operated vending machine.
///
/// ## Invariants
/// - Slot count is fixed at construction and at least 1
/// - The set of accepted denominations is fixed at construction and
///   non-empty; only quantities change afterwards
/// - Every quantity is >= 0
/// - Callers only ever receive copies of state
#[derive(Debug)]
pub struct VendingMachine {
    slot_count: usize,
    accepted: Vec<Coin>,
    state: Mutex<MachineState>,
}

impl VendingMachine {
    /// Creates a machine from decimal face values (`0.10`, `1.0`, ...).
    ///
    /// ## Errors
    /// `InvalidArgument` kind when `slot_count` is 0, the list is empty, or a
    /// face value is not a supported coin.
    ///
    /// ## Example
    /// ```rust
    /// use vendo_core::VendingMachine;
    ///
    /// let machine = VendingMachine::new(10, &[0.10, 0.20, 0.50, 1.0]).unwrap();
    /// assert_eq!(machine.slot_count(), 10);
    /// assert!(VendingMachine::new(10, &[0.15]).is_err());
    /// ```
    pub fn new(slot_count: usize, supported_face_values: &[f64]) -> VendResult<Self> {
        validate_slot_count(slot_count)?;
        validate_denominations(supported_face_values)?;

        let coins = supported_face_values
            .iter()
            .map(|face_value| Coin::from_face_value(*face_value))
            .collect::<VendResult<Vec<_>>>()?;

        Self::with_coins(slot_count, coins)
    }

    /// Creates a machine from typed denominations. Duplicates collapse.
    pub fn with_coins(slot_count: usize, coins: impl IntoIterator<Item = Coin>) -> VendResult<Self> {
        validate_slot_count(slot_count)?;
        let accepted: Vec<Coin> = coins.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        validate_denominations(&accepted)?;

        debug!(slot_count, coins = ?accepted, "Vending machine created");

        Ok(VendingMachine {
            slot_count,
            state: Mutex::new(MachineState {
                slots: vec![ProductSlot::default(); slot_count],
                coins: accepted.iter().map(|coin| (*coin, 0)).collect(),
            }),
            accepted,
        })
    }

    /// Acquires the machine-wide lock.
    ///
    /// State is only written after every check has passed, so a guard
    /// recovered from a poisoned lock still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, MachineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_accepted(&self, coin: Coin) -> VendResult<()> {
        if self.accepted.contains(&coin) {
            Ok(())
        } else {
            Err(VendError::CoinNotAccepted(coin))
        }
    }

    // =========================================================================
    // Machine Shape
    // =========================================================================

    /// Number of product slots.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Accepted denominations, ascending by value.
    pub fn supported_coins(&self) -> &[Coin] {
        &self.accepted
    }

    // =========================================================================
    // Product Inventory
    // =========================================================================

    /// Sets the price of a slot, in pence.
    ///
    /// ## Errors
    /// - `Validation` if `new_price <= 0`
    /// - `SlotOutOfRange` if the slot does not exist
    pub fn set_product_price(&self, index: usize, new_price: i64) -> VendResult<()> {
        validate_price(new_price)?;
        let mut state = self.lock();
        state.slot_mut(index)?.price = new_price;
        debug!(index, price = new_price, "Product price set");
        Ok(())
    }

    /// Sets how many units a slot holds.
    ///
    /// ## Errors
    /// - `Validation` if `new_quantity < 0`
    /// - `SlotOutOfRange` if the slot does not exist
    pub fn set_product_quantity(&self, index: usize, new_quantity: i64) -> VendResult<()> {
        validate_quantity(new_quantity)?;
        let mut state = self.lock();
        state.slot_mut(index)?.quantity = new_quantity;
        debug!(index, quantity = new_quantity, "Product quantity set");
        Ok(())
    }

    /// Price of a slot in pence; 0 if the slot was never priced.
    pub fn product_price(&self, index: usize) -> VendResult<i64> {
        Ok(self.lock().slot(index)?.price)
    }

    /// Units in a slot; 0 if the slot was never stocked.
    pub fn product_quantity(&self, index: usize) -> VendResult<i64> {
        Ok(self.lock().slot(index)?.quantity)
    }

    /// Copy of one slot.
    pub fn product(&self, index: usize) -> VendResult<ProductSlot> {
        self.lock().slot(index).copied()
    }

    /// Copy of every slot, in index order.
    pub fn products(&self) -> Vec<ProductSlot> {
        self.lock().slots.clone()
    }

    // =========================================================================
    // Coin Inventory
    // =========================================================================

    /// Sets the stock of one denomination.
    ///
    /// ## Errors
    /// - `Validation` if `new_quantity < 0`
    /// - `CoinNotAccepted` if the machine was not built with this coin
    pub fn set_coin_quantity(&self, coin: Coin, new_quantity: i64) -> VendResult<()> {
        validate_quantity(new_quantity)?;
        let mut state = self.lock();
        *state.coin_mut(coin)? = new_quantity;
        debug!(%coin, quantity = new_quantity, "Coin quantity set");
        Ok(())
    }

    /// Stock of one denomination.
    pub fn coin_quantity(&self, coin: Coin) -> VendResult<i64> {
        self.ensure_accepted(coin)?;
        Ok(self.lock().coins.get(&coin).copied().unwrap_or(0))
    }

    /// Sets every accepted denomination to the same quantity.
    pub fn fill_coins(&self, quantity: i64) -> VendResult<()> {
        validate_quantity(quantity)?;
        let mut state = self.lock();
        state.coins.values_mut().for_each(|qty| *qty = quantity);
        debug!(quantity, "All coin quantities set");
        Ok(())
    }

    /// Copy of the coin stock.
    pub fn coins(&self) -> BTreeMap<Coin, i64> {
        self.lock().coins.clone()
    }

    /// Total value held in coin stock.
    pub fn stock_value(&self) -> VendResult<Money> {
        self.snapshot().stock_value()
    }

    /// Slots and coins copied under one lock.
    pub fn snapshot(&self) -> MachineSnapshot {
        let state = self.lock();
        MachineSnapshot {
            slots: state.slots.clone(),
            coins: state.coins.clone(),
        }
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Buys one unit from a slot and returns the change.
    ///
    /// The tendered coins are absorbed into stock, the change is taken out of
    /// stock, and the slot quantity drops by one, all in one step. On any
    /// error nothing changes and the tender is conceptually handed back.
    ///
    /// The order of the returned coins carries no meaning; it is currently
    /// largest first.
    pub fn purchase_product(&self, index: usize, tendered: &[Coin]) -> VendResult<Vec<Coin>> {
        let mut state = self.lock();

        match self.try_purchase(&mut state, index, tendered) {
            Ok(change) => Ok(change),
            Err(e) => {
                warn!(index, tendered = ?tendered, error = %e, "Purchase rejected");
                Err(e)
            }
        }
    }

    fn try_purchase(
        &self,
        state: &mut MachineState,
        index: usize,
        tendered: &[Coin],
    ) -> VendResult<Vec<Coin>> {
        let slot = *state.slot(index)?;
        if slot.is_sold_out() {
            return Err(VendError::SoldOut { index });
        }
        if !slot.is_configured() {
            return Err(VendError::NotForSale { index });
        }
        for coin in tendered {
            self.ensure_accepted(*coin)?;
        }

        let price = slot.price();
        let paid = coin::total_value(tendered)?;
        if paid < price {
            return Err(VendError::InsufficientFunds {
                price,
                tendered: paid,
                shortfall: price - paid,
            });
        }

        let mut working = state.coins.clone();
        for coin in tendered {
            let qty = working.entry(*coin).or_insert(0);
            *qty = qty.checked_add(1).ok_or(VendError::CoinStockFull(*coin))?;
        }
        let change = make_change(&working, paid - price)?;

        // Commit. Nothing below can fail.
        for (coin, count) in change.counts() {
            *working.entry(*coin).or_insert(0) -= count;
        }
        state.coins = working;
        state.slots[index].quantity -= 1;

        info!(
            index,
            price = %price,
            paid = %paid,
            change = %change.total(),
            remaining = state.slots[index].quantity,
            "Purchase completed"
        );

        Ok(change.into_coins())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
