//! moodcast-rec - Mood & Music Recommendation microservice
//!
//! Takes a user's mood and city, predicts the public mood from the city's
//! current weather, compares the two, and recommends a song for the user's
//! mood.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodcast_common::config::load_toml_config;
use moodcast_rec::config::DEFAULT_LOG_FILTER;
use moodcast_rec::{AppState, ServiceConfig};

/// Command-line arguments for moodcast-rec
#[derive(Parser, Debug)]
#[command(name = "moodcast-rec")]
#[command(about = "Mood & Music recommendation microservice")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "MOODCAST_PORT")]
    port: u16,

    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1", env = "MOODCAST_BIND")]
    bind: IpAddr,

    /// TOML config file (defaults to ~/.config/moodcast/config.toml)
    #[arg(short, long, env = "MOODCAST_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so the TOML log level can apply
    let toml_result = load_toml_config(args.config.as_deref());
    let log_filter = toml_result
        .as_ref()
        .ok()
        .and_then(|config| config.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let toml_config = toml_result.context("Failed to load configuration")?;

    info!("Starting moodcast-rec (Mood & Music) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = ServiceConfig::resolve(&toml_config);
    let orchestrator = config
        .build_orchestrator()
        .context("Failed to initialize recommendation pipeline")?;

    let state = AppState::new(orchestrator, config);
    let app = moodcast_rec::build_router(state);

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on http://{}", addr);
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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
