//! inkrelay - compiler relay for embedded Idris playgrounds.
//!
//! `inkrelay --port 8090` binds the HTTP front end and shells out to
//! the configured toolchain for each request. Configuration comes from
//! `inkwell.toml` (see the inkconf crate); CLI flags override it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inkrelay::{router, AppState, IdrisInvoker, SessionStore};

/// The inkwell playground relay
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (replaces the local inkwell.toml override)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Toolchain executable (name or path)
    #[arg(long)]
    toolchain: Option<PathBuf>,

    /// Root directory for per-request workspaces
    #[arg(long)]
    staging_dir: Option<PathBuf>,

    /// Subprocess wall-clock bound in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = inkconf::InkConfig::load_with_override(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.bind.http_port = port;
    }
    if let Some(toolchain) = cli.toolchain {
        config.toolchain.program = toolchain;
    }
    if let Some(staging_dir) = cli.staging_dir {
        config.paths.staging_dir = staging_dir;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.toolchain.timeout_secs = timeout_secs;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level)),
        )
        .init();

    std::fs::create_dir_all(&config.paths.staging_dir)
        .context("failed to create staging directory")?;

    let state = AppState {
        sessions: Arc::new(SessionStore::new(&config.paths.staging_dir)),
        invoker: Arc::new(IdrisInvoker::new(
            &config.toolchain.program,
            Duration::from_secs(config.toolchain.timeout_secs),
        )),
        start_time: Instant::now(),
    };

    let addr = format!("0.0.0.0:{}", config.bind.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!("inkrelay ready");
    info!("   Run:    POST http://{}/run", addr);
    info!("   Health: GET  http://{}/health", addr);
    info!(
        "   Toolchain: {} (timeout {}s)",
        config.toolchain.program.display(),
        config.toolchain.timeout_secs
    );
    info!("   Staging: {}", config.paths.staging_dir.display());

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("received SIGINT, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{signal, SignalKind};
                let mut sigterm = signal(SignalKind::terminate()).expect("failed to setup SIGTERM");
                sigterm.recv().await;
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("received SIGTERM, shutting down...");
        }
    }
}
