//! persons-api - CSV-backed persons REST service main entry point
//!
//! Serves person records parsed from a flat CSV file, with support for
//! in-memory additions over a small REST surface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use persons_api::{build_router, AppState, CsvPersonRepository};
use persons_common::config;

/// Command-line arguments for persons-api
#[derive(Parser, Debug)]
#[command(name = "persons-api")]
#[command(about = "CSV-backed persons REST service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides PERSONS_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// CSV file containing person records (overrides PERSONS_CSV_FILE and the config file)
    #[arg(short, long)]
    csv_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Persons API (persons-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let csv_file = config::resolve_csv_file(args.csv_file.as_deref());
    let port = config::resolve_port(args.port);

    info!("CSV source: {}", csv_file.display());
    if !csv_file.exists() {
        info!("CSV source does not exist yet; starting with an empty record set");
    }

    // The repository is shared as a singleton across all requests
    let repo = Arc::new(CsvPersonRepository::new(csv_file));
    let state = AppState::new(repo);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("persons-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
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
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
