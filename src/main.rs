use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_errors::api::handlers::AppStateInner;
use status_errors::api::routes::create_router;
use status_errors::config::Config;
use status_errors::{metrics, status};

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,status_errors=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Status Errors service v{}", env!("CARGO_PKG_VERSION"));

    metrics::init_metrics();
    let registry = status::init();
    info!(registered_codes = registry.len(), "Status code registry ready");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        capture_trace = config.errors.capture_trace,
        expose_trace = config.errors.expose_trace,
        "Configuration loaded successfully"
    );

    let state = Arc::new(AppStateInner {
        registry,
        tracer: config.errors.tracer(),
        expose_trace: config.errors.expose_trace,
        instance_id: config.server.instance_id.clone(),
    });

    let app = create_router(state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server on {}", addr))?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");

    Ok(())
}
