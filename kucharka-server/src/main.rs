//! kucharka-server - recipe storage service
//!
//! Serves the recipe and ingredient collections, each kept as one JSON file
//! in the data folder, over a small HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kucharka_common::config::{DataFolderInitializer, DataFolderResolver, TomlConfig};
use kucharka_server::{build_router, AppState};

const DEFAULT_PORT: u16 = 5780;

/// Command-line arguments for kucharka-server
#[derive(Parser, Debug)]
#[command(name = "kucharka-server")]
#[command(about = "Recipe storage service for Kuchařka")]
#[command(version)]
struct Args {
    /// Port to listen on [default: 5780]
    #[arg(short, long, env = "KUCHARKA_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Folder holding recipes.json and ingredients.json
    #[arg(short, long)]
    data_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                toml.log_level
                    .clone()
                    .unwrap_or_else(|| "kucharka_server=info,tower_http=info".to_string())
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Kuchařka server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let resolver = DataFolderResolver::new(args.data_folder.clone(), toml.clone());
    let initializer = DataFolderInitializer::new(resolver.resolve());
    initializer.ensure_directory_exists()?;
    info!("Data folder: {}", initializer.data_folder().display());

    let state = AppState::for_data_folder(&initializer);
    for result in [
        state.recipes.ensure_initialized().await,
        state.ingredients.ensure_initialized().await,
    ] {
        if let Err(e) = result {
            error!("Failed to initialize storage: {}", e);
            return Err(e.into());
        }
    }
    info!("Recipes: {}", state.recipes.path().display());
    info!("Ingredients: {}", state.ingredients.path().display());

    let app = build_router(state);

    let port = args.port.or(toml.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", args.bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("kucharka-server listening on http://{}", addr);
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
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
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
