//! # Routes Module
//!
//! Every HTTP endpoint exposed by the machine.
//!
//! ## Route Organization
//! ```text
//! routes/
//! ├── mod.rs       ◄─── You are here (router assembly)
//! ├── machine.rs   ◄─── Health and whole-machine snapshot
//! ├── product.rs   ◄─── Slot prices and quantities
//! ├── coin.rs      ◄─── Coin stock
//! └── purchase.rs  ◄─── The purchase transaction
//! ```
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET   /health                                  "OK"                    │
//! │  GET   /                                        MachineSnapshot         │
//! │  GET   /product                                 [ProductSlot]           │
//! │  GET   /product/{index}                         ProductSlot             │
//! │  POST  /product/{index}/quantity/{quantity}     ProductSlot             │
//! │  POST  /product/{index}/price/{price}           ProductSlot             │
//! │  POST  /product/{index}/purchase   [1.0, 0.5]   PurchaseResponse        │
//! │  GET   /coin                                    { Coin: quantity }      │
//! │  POST  /coin/{coin}/quantity/{quantity}         { Coin: quantity }      │
//! │  POST  /coin/all/quantity/{quantity}            { Coin: quantity }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coins in paths and bodies are decimal face values (`0.2`, `1.0`). They
//! become `Coin`s here, before the machine is touched.

pub mod coin;
pub mod machine;
pub mod product;
pub mod purchase;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Builds the route table. State is supplied by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(machine::health))
        .route("/", get(machine::snapshot))
        .route("/product", get(product::list_products))
        .route("/product/{index}", get(product::get_product))
        .route(
            "/product/{index}/quantity/{quantity}",
            post(product::set_product_quantity),
        )
        .route("/product/{index}/price/{price}", post(product::set_product_price))
        .route("/product/{index}/purchase", post(purchase::purchase_product))
        .route("/coin", get(coin::list_coins))
        .route("/coin/all/quantity/{quantity}", post(coin::fill_coins))
        .route("/coin/{coin}/quantity/{quantity}", post(coin::set_coin_quantity))
}
