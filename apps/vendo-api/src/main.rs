//! # Vendo API
//!
//! Entry point: load config, install tracing, serve.

use tracing::info;
use vendo_api::{init_tracing, run, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load(None)?;
    init_tracing(&config.logging.filter);

    info!("Starting Vendo API server...");
    run(config).await
}
