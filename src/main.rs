//! Shophub server — storefront authorization and administration API.
//!
//! Main entry point that wires all crates together and starts the
//! server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use shophub_api::app::{build_app, build_state};
use shophub_auth::ratelimit::spawn_sweeper;
use shophub_core::config::AppConfig;
use shophub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("SHOPHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    let env = std::env::var("SHOPHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let overlay = format!("config/{env}.toml");

    AppConfig::load(&config_path, Some(&overlay))
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Shophub v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db_pool = shophub_database::connection::create_pool(&config.database).await?;
    shophub_database::migration::run_migrations(&db_pool).await?;

    // ── Application state ────────────────────────────────────────
    let config = Arc::new(config);
    let state = build_state(Arc::clone(&config), db_pool)?;
    tracing::info!("Services initialized");

    // ── Shutdown channel + rate limit sweeper ────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper_handle = spawn_sweeper(
        state.rate_limiter.store(),
        Duration::from_secs(config.rate_limit.sweep_interval_seconds),
        shutdown_rx,
    );
    tracing::info!(
        interval_seconds = config.rate_limit.sweep_interval_seconds,
        "Rate limit sweeper started"
    );

    // ── HTTP server ──────────────────────────────────────────────
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = sweeper_handle.await;
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => {
                tracing::error!("Failed to install SIGTERM handler");
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
}
