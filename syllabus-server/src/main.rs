//! Syllabus Expander (syllabus-server) - Main entry point
//!
//! HTTP service that turns a course title, description, scope and duration
//! into a complete syllabus. See `syllabus_server::build_router` for routes.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use syllabus_common::config::{load_config, CONFIG_ENV_VAR};
use syllabus_server::services::SyllabusPipeline;
use syllabus_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for syllabus-server
#[derive(Parser, Debug)]
#[command(name = "syllabus-server")]
#[command(about = "Syllabus expander HTTP service")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "SYLLABUS_PORT")]
    port: Option<u16>,

    /// Interface to bind (overrides config)
    #[arg(short, long, env = "SYLLABUS_BIND")]
    bind: Option<String>,

    /// Fixed random seed for every request (overrides config)
    #[arg(long, env = "SYLLABUS_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Syllabus Expander (syllabus-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let port = args.port.unwrap_or(config.port);
    let bind = args.bind.unwrap_or_else(|| config.bind_address.clone());
    let seed = args.seed.or(config.seed);
    if let Some(seed) = seed {
        info!("Fixed seed {} applies to requests without their own seed", seed);
    }
    info!(
        keyword_count = config.pipeline.keyword_count,
        max_topics = config.pipeline.max_topics,
        questions_per_module = config.pipeline.questions_per_module,
        "Pipeline configured"
    );

    let state = AppState::new(SyllabusPipeline::new(&config.pipeline), seed);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((bind.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", bind, port))?;
    let addr: SocketAddr = listener.local_addr().context("Failed to read bound address")?;
    info!("syllabus-server listening on http://{}", addr);
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
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
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
