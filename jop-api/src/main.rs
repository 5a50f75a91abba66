//! jop-api - Joy of Painting episode API server

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jop_api::{build_router, AppState};
use jop_common::config::{Overrides, TomlConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for jop-api
#[derive(Parser, Debug)]
#[command(name = "jop-api")]
#[command(about = "Joy of Painting episode API")]
#[command(version)]
struct Args {
    /// Config file (defaults to ./jop.toml, then the user config directory)
    #[arg(short, long, env = "JOP_CONFIG")]
    config: Option<PathBuf>,

    /// Database file written by jop-etl
    #[arg(short, long, env = "JOP_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "JOP_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "JOP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load(args.config.as_deref()).with_overrides(Overrides {
        database_path: args.database,
        host: args.host,
        port: args.port,
        ..Default::default()
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=debug", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Joy of Painting API (jop-api) v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Database path: {}", config.database_path.display());

    // Lazy read-only pool: a missing database shows up in /health, not here
    let pool = jop_common::db::connect_readonly(&config.database_path)?;
    let app = build_router(AppState::new(pool));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("jop-api listening on http://{}", addr);
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
