//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of Vendo. It owns the state of a coin-operated
//! vending machine and the purchase transaction, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendo Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP shell (vendo-api)                       │   │
//! │  │    /product ──► /coin ──► /product/{index}/purchase            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ decimal face values → Coin            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   coin    │  │   money   │  │  change   │  │  machine  │  │   │
//! │  │   │   Coin    │  │   Money   │  │  Change   │  │  Vending  │  │   │
//! │  │   │  parsing  │  │  (pence)  │  │  search   │  │  Machine  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • IN-MEMORY STATE ONLY     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coin`] - Closed set of coin denominations and face-value parsing
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Product slots and machine snapshots
//! - [`change`] - Change-determination search
//! - [`machine`] - The vending machine and its purchase transaction
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::{Coin, VendingMachine};
//!
//! let machine = VendingMachine::new(10, &[0.10, 0.20, 0.50, 1.0]).unwrap();
//! machine.set_product_price(0, 100).unwrap();
//! machine.set_product_quantity(0, 5).unwrap();
//! machine.fill_coins(10).unwrap();
//!
//! // £1.80 tendered for a £1.00 product
//! let tender = [Coin::TenP, Coin::TwentyP, Coin::FiftyP, Coin::OnePound];
//! let change = machine.purchase_product(0, &tender).unwrap();
//!
//! assert_eq!(change, vec![Coin::FiftyP, Coin::TwentyP, Coin::TenP]);
//! assert_eq!(machine.product_quantity(0).unwrap(), 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod coin;
pub mod error;
pub mod machine;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::{make_change, Change};
pub use coin::Coin;
pub use error::{ErrorKind, ValidationError, VendError, VendResult};
pub use machine::VendingMachine;
pub use money::Money;
pub use types::*;
