//! # Keygen Worker
//!
//! Activation key generation with configurable formats:
//!
//! - **Key formats**: separator, component length and count, optional prefix
//! - **Character maps**: validated digit to digit and digit to letter tables
//!   that turn raw digits into the final alphanumeric key
//! - **Seed chaining**: every call returns a seed; feeding it into the next
//!   call guarantees the next key differs from the current one
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Worker Service                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │  API Layer  │  │   Service    │  │       Domain        │  │
//! │  │   (Axum)    │→ │ KeyGenerator │→ │ KeyFormatProperties │  │
//! │  └─────────────┘  └──────────────┘  └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Library use
//!
//! ```
//! use std::sync::Arc;
//!
//! use keygen_worker::{KeyFormatProperties, KeyGenerator};
//!
//! let properties = KeyFormatProperties::new('-', 4, 4, 3).unwrap();
//! let keygen = KeyGenerator::new(Arc::new(properties));
//!
//! let first = keygen.generate_with_prefix("ABC", None).unwrap();
//! let second = keygen.generate_with_prefix("ABC", Some(first.seed())).unwrap();
//!
//! assert!(first.value().starts_with("ABC-"));
//! assert_eq!(first.value().len(), 23);
//! assert_ne!(first.value(), second.value());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;

pub use crate::domain::{CharacterMap, GeneratedKey, GenerationSeed, KeyFormatProperties};
pub use crate::error::KeyError;
pub use crate::service::{KeyChain, KeyGenerator};

/// Run the keygen worker service.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Builds and validates the key format
/// 3. Installs the metrics recorder
/// 4. Starts the HTTP server
/// 5. Handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The key format is invalid
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Keygen Worker"
    );

    // Create application state
    let mut state = AppState::new(Arc::new(config.clone()))?;
    let format = state.key_service.format();
    info!(
        separator = %format.separator,
        component_length = format.component_length,
        component_count = format.component_count,
        prefix_length = format.prefix_length,
        "Key format initialized"
    );

    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
        info!(path = %config.observability.metrics_path, "Metrics recorder installed");
    }

    // Create router
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
