//! Cinema seating HTTP server.
//!
//! # Usage
//!
//! ```bash
//! PORT=8080 METRICS_PORT=9090 cargo run --bin server
//! ```

use anyhow::Context;
use cinema_server::{build_router, metrics, AppState, CinemaService, Config, InMemoryGridStore};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema Seating Server");
    info!(
        log_level = %config.server.log_level,
        address = %config.server_addr(),
        metrics_enabled = config.metrics.enabled,
        max_rows = config.limits.max_rows,
        max_columns = config.limits.max_columns,
        max_seats = config.limits.max_seats,
        "Configuration loaded"
    );

    // Install Prometheus exporter
    if config.metrics.enabled {
        let metrics_addr: SocketAddr = config
            .metrics_addr()
            .parse()
            .with_context(|| format!("invalid metrics address {}", config.metrics_addr()))?;
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        metrics::register_business_metrics();
        info!(address = %metrics_addr, "Prometheus metrics available at /metrics");
    }

    // Build application state
    let service = CinemaService::new(
        Arc::new(InMemoryGridStore::new()),
        config.limits,
        tracing::info_span!("cinema"),
    );
    let app = build_router(AppState::new(service));

    // Create TCP listener
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    // Run server until a shutdown signal, then give in-flight requests a bounded drain
    let shutdown = Arc::new(Notify::new());
    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown({
                let shutdown = Arc::clone(&shutdown);
                async move { shutdown.notified().await }
            })
            .into_future(),
    );

    shutdown_signal().await;
    shutdown.notify_one();

    let timeout = Duration::from_secs(config.server.shutdown_timeout);
    match tokio::time::timeout(timeout, server).await {
        Ok(joined) => joined.context("server task panicked")??,
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Graceful shutdown timed out, dropping open connections"
        ),
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
