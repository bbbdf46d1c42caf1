//! Remote Dictionary - an in-memory key/value server
//!
//! Bounded LRU store with capacity eviction on insert and a background
//! monitor that evicts under process memory pressure.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remote_dictionary::{
    api::create_router, spawn_pressure_monitor, AppState, Config, SystemProbe,
};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables (and `.env`)
/// 3. Create cache store with configured limits
/// 4. Start the memory pressure monitor
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remote_dictionary=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Starting remote_dictionary with port={}, max_cache_size={}, max_key_size={}, max_value_size={}",
        config.port,
        config
            .max_cache_size
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
        config.max_key_size,
        config.max_value_size
    );

    let state = AppState::from_config(&config);
    info!("Cache store initialized");

    let monitor_handle =
        spawn_pressure_monitor(state.cache.clone(), SystemProbe::new(), config.monitor());
    info!("Memory pressure monitor started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(monitor_handle))
        .await
        .context("server error")?;

    info!("Server exiting");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the monitor task and lets in-flight requests
/// finish.
async fn shutdown_signal(monitor_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down server...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down server...");
        }
    }

    monitor_handle.abort();
    warn!("Memory pressure monitor stopped");
}
