//! Redis Gateway - A thin HTTP façade over a Redis server
//!
//! Maps REST-style paths onto single store commands and renders the
//! result as JSON.

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use redis_gateway::{api::create_router, AppState, Config};

/// Main entry point for the gateway.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing, to stdout or to the configured log file
/// 3. Create the store handle and ping it; an unreachable store is logged
///    and the server starts anyway
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config)?;

    info!("Starting Redis HTTP gateway");
    info!(
        "Configuration loaded: port={}, backend={}, log_file={:?}",
        config.server_port, config.store_backend, config.log_file
    );

    let state = AppState::from_config(&config).context("invalid store configuration")?;

    // Liveness check, failure only degrades requests
    let backend = state.store.backend();
    match state.store.ping().await {
        Ok(()) => info!("Connected to {} store successfully", backend),
        Err(e) => error!(
            "Failed to connect to {} store, requests will fail until it is reachable: {}",
            backend, e
        ),
    }

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Installs the global subscriber.
///
/// Defaults to "info" for this crate, can be overridden with RUST_LOG.
/// With `LOG_FILE` set, lines are appended to that file without colors
/// instead of going to stdout.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "redis_gateway=info,tower_http=info".into());

    let (stdout_layer, file_layer) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));
            (None, Some(layer))
        }
        None => (Some(fmt::layer()), None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
