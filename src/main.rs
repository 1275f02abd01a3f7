//! Payroll engine HTTP server.

use std::env;
use std::io;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::PayrollError;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Reasons the server can fail to start or keep serving.
#[derive(Debug, Error)]
enum ServerError {
    #[error("invalid PAYROLL_ADDR '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error(transparent)]
    Payroll(#[from] PayrollError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_line_number(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "Payroll engine stopped");
        std::process::exit(1);
    }
}

fn parse_addr(raw: &str) -> Result<SocketAddr, ServerError> {
    raw.parse().map_err(|source| ServerError::InvalidAddr {
        addr: raw.to_string(),
        source,
    })
}

async fn run() -> Result<(), ServerError> {
    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = parse_addr(&env::var("PAYROLL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()))?;

    let loader = ConfigLoader::load(&config_dir)?;
    info!(
        ticks_per_run = loader.batch().ticks_per_run(),
        tick_interval_ms = loader.batch().tick_interval_ms,
        "Batch cadence configured"
    );
    let state = AppState::new(&loader)?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, config_dir = %config_dir, "Payroll engine listening");

    axum::serve(listener, router).await.map_err(ServerError::Serve)
}
