//! NekoTrack - Claw-Machine Vending Operations Analytics
//!
//! # Usage
//!
//! ```bash
//! # Serve the dashboard API (default)
//! nekotrack
//!
//! # One-shot fleet report to stdout
//! nekotrack report
//!
//! # Custom bind address and data directory
//! nekotrack --addr 127.0.0.1:9090 --data-dir /var/lib/nekotrack
//! ```
//!
//! # Environment Variables
//!
//! - `NEKOTRACK_CONFIG`: Path to a TOML config file
//! - `NEKOTRACK_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use nekotrack::analytics::AnalyticsEngine;
use nekotrack::api::{create_app, DashboardState};
use nekotrack::config::AppConfig;
use nekotrack::store::SledStore;

#[derive(Parser, Debug)]
#[command(name = "nekotrack")]
#[command(about = "Claw-machine vending operations analytics")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Override the data directory holding the record store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to a TOML config file (overrides the search order)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the dashboard API (default when no subcommand is given)
    Serve,
    /// Print the fleet overview and leaderboard as JSON and exit
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    if let Some(data_dir) = args.data_dir {
        config.store.data_dir = data_dir;
    }

    let db_path = config.store.data_dir.join("nekotrack.db");
    let store = Arc::new(
        SledStore::open(&db_path)
            .with_context(|| format!("failed to open record store at {}", db_path.display()))?,
    );

    let engine = Arc::new(AnalyticsEngine::new(
        store.clone(),
        store,
        config.analytics.clone(),
    ));

    match args.command {
        Some(SubCommand::Report) => run_report(&engine),
        Some(SubCommand::Serve) | None => serve(engine, config).await,
    }
}

/// One-shot fleet report on stdout.
fn run_report(engine: &AnalyticsEngine) -> Result<()> {
    let overview = engine
        .fleet_overview()
        .context("fleet aggregation failed")?;
    let leaderboard = engine.leaderboard().context("leaderboard failed")?;

    let report = serde_json::json!({
        "fleet": overview,
        "leaderboard": leaderboard,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Run the dashboard API server until shutdown.
async fn serve(engine: Arc<AnalyticsEngine>, config: AppConfig) -> Result<()> {
    let state = DashboardState::new(engine, config.profit.clone());
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr))?;
    info!(addr = %config.server.addr, "dashboard API listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;
    Ok(())
}
