//! Finance Hub - API Server Binary
//!
//! Starts the HTTP API and the background currency quote poller.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin finance-api
//!
//! API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin finance-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - Secret shared with the auth provider
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `API_RATES_BASE_URL` - Quote API root
//! * `API_RATES_POLL_SECS` - Seconds between quote refreshes (default: 300)
//! * `API_TIMEZONE` - IANA zone used for "today" (default: America/Sao_Paulo)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, run_migrations, DatabaseConfig};
use infra_rates::{spawn_poller, AwesomeApiClient, RateBoard};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let (config, config_error) = match ApiConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (ApiConfig::default(), Some(e)),
    };

    init_tracing(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Invalid API_* environment, using defaults");
    }

    tracing::info!(
        host = %config.host,
        port = %config.port,
        timezone = ?config.timezone,
        "Starting Finance Hub API Server"
    );

    let db_config =
        DatabaseConfig::new(&config.database_url).max_connections(config.database_max_connections);
    let pool = create_pool(db_config)
        .await
        .context("connecting to the database")?;
    run_migrations(&pool)
        .await
        .context("applying migrations")?;

    let rates = RateBoard::new();
    let rates_config = config.rates();
    let poll_interval = rates_config.poll_interval();
    let source = AwesomeApiClient::new(rates_config).context("building the quote client")?;
    let poller = spawn_poller(Arc::new(source), rates.clone(), poll_interval);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    let app = create_router(AppState::new(pool, config, rates));

    tracing::info!(%addr, "Server listening");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    poller.abort();
    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM so in-flight requests can finish
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
