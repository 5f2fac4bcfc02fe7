//! Ants replay viewer binary.
//!
//! Composition root: parses arguments, loads configuration, sets up logging
//! and validates the snapshot store before handing it to a frontend.
//!
//! # Examples
//!
//! ```bash
//! # Play ./movie3.db (or $REPLAY_DB)
//! ant-replay
//!
//! # Validate a recording without starting the UI
//! ant-replay recordings/match.db --check
//!
//! # Print the decoded turn 12 as JSON
//! ant-replay recordings/match.db --dump 12
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use replay_store::{SnapshotStore, SqliteSnapshotStore};
use viewer_core::ViewerConfig;

/// Replay viewer for recorded ants arenas
#[derive(Parser)]
#[command(name = "ant-replay")]
#[command(about = "Replay recorded ants arena snapshots", long_about = None)]
#[command(version)]
struct Cli {
    /// Snapshot database (defaults to $REPLAY_DB or ./movie3.db)
    #[arg(value_name = "DB")]
    db: Option<PathBuf>,

    /// Validate the database, print a summary and exit
    #[arg(long, conflicts_with = "dump")]
    check: bool,

    /// Print one decoded turn as JSON and exit
    #[arg(long, value_name = "TURN")]
    dump: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = ViewerConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if cli.check {
        return check(&config).await;
    }
    if let Some(turn) = cli.dump {
        return dump(&config, turn).await;
    }

    #[cfg(feature = "frontend-cli")]
    {
        run_cli(config).await?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

async fn open(config: &ViewerConfig) -> Result<SqliteSnapshotStore> {
    SqliteSnapshotStore::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open {}", config.db_path.display()))
}

/// `--check`: validation only, logging to stderr.
async fn check(config: &ViewerConfig) -> Result<()> {
    #[cfg(feature = "frontend-cli")]
    viewer_cli::logging::setup_stderr_logging()?;

    let store = open(config).await?;
    let summary = store
        .validate()
        .await
        .with_context(|| format!("{} is not a valid replay", config.db_path.display()))?;

    println!("Source:    {}", summary.source);
    println!("Turns:     {}", summary.turn_count);
    println!(
        "First:     {}",
        summary.first_recorded_at.as_deref().unwrap_or("-")
    );
    println!(
        "Last:      {}",
        summary.last_recorded_at.as_deref().unwrap_or("-")
    );

    store.close().await;
    Ok(())
}

/// `--dump TURN`: one decoded snapshot as pretty JSON on stdout.
async fn dump(config: &ViewerConfig, turn: i64) -> Result<()> {
    #[cfg(feature = "frontend-cli")]
    viewer_cli::logging::setup_stderr_logging()?;

    let store = open(config).await?;
    let snapshot = store
        .snapshot(turn)
        .await
        .with_context(|| format!("failed to read turn {turn}"))?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    store.close().await;
    Ok(())
}

/// Run the terminal frontend.
#[cfg(feature = "frontend-cli")]
async fn run_cli(config: ViewerConfig) -> Result<()> {
    use viewer_cli::{CliApp, CliConfig, logging};
    use viewer_core::FrontendApp;

    let cli_config = CliConfig::from_env();

    // The writer stops when the guard drops; hold it until exit.
    let _log_guard = logging::setup_file_logging(cli_config.log_dir.as_deref())?;

    // Startup validation failures exit non-zero before the UI takes over.
    let store = open(&config).await?;
    let summary = store
        .validate()
        .await
        .with_context(|| format!("{} is not a valid replay", config.db_path.display()))?;
    tracing::info!(
        source = %summary.source,
        turns = summary.turn_count,
        "Validated replay"
    );

    CliApp::new(config, cli_config)
        .with_store(store)
        .run()
        .await
}
