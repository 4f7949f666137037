//! Dealflow API - Main entry point
//!
//! REST backend for the real-estate lead/property-management dashboard.
//! Owns the SQLite store and exposes CRUD plus valuation endpoints.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dealflow_api::api;

/// Command-line arguments for dealflow-api
#[derive(Parser, Debug)]
#[command(name = "dealflow-api")]
#[command(about = "REST backend for the Dealflow dashboard")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5830", env = "DEALFLOW_PORT")]
    port: u16,

    /// Data folder holding the SQLite database
    #[arg(short, long, env = "DEALFLOW_DATA_FOLDER")]
    data_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dealflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    let data_folder = dealflow_common::config::resolve_data_folder(
        args.data_folder.as_deref(),
        "DEALFLOW_DATA_FOLDER",
    )
    .context("Failed to resolve data folder")?;

    info!("Starting Dealflow API on port {}", args.port);
    info!("Data folder: {}", data_folder.display());

    // Open (or create) the database
    let db_path = dealflow_common::config::database_path(&data_folder);
    let db_pool = dealflow_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    // Build the application router
    let ctx = api::AppContext { db_pool };
    let app = api::create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
