//! # Vendo API
//!
//! HTTP shell around a single in-memory vending machine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vendo API Server                                 │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► TraceLayer ───► routes ───► vendo-core   │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                                           ApiError → status + JSON      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - Defaults, TOML file, and environment overrides
//! - [`error`] - Error-to-status mapping
//! - [`extract`] - Path/JSON extractors with JSON rejections
//! - [`routes`] - Handlers
//! - [`state`] - Shared machine handle

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the application router with tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback` is used.
pub fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Builds the machine from `config`, binds, and serves until shutdown.
pub async fn run(config: ApiConfig) -> anyhow::Result<()> {
    let machine = config.machine.build()?;
    info!(
        slots = machine.slot_count(),
        coins = ?machine.supported_coins(),
        "Machine ready"
    );

    let bind_addr = config.server.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Starting HTTP server");

    axum::serve(listener, app(AppState::new(machine)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
