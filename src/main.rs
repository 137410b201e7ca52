//! Command-line interface for catalog-loader
//!
//! # Usage Examples
//!
//! ```bash
//! # Create the editor and platform schemas, dropping existing tables
//! catalog-loader init-schema --recreate
//!
//! # Generate, sync and commit with the settings from catalog-loader.toml
//! catalog-loader run
//!
//! # Same, against explicit databases and a fixed seed
//! catalog-loader run \
//!   --editor-db-url "host=localhost user=user password=password dbname=editor_db" \
//!   --platform-db-url "host=localhost user=user password=password dbname=platform_db" \
//!   --seed 42
//!
//! # Recompute the platform database from the current editor database
//! catalog-loader sync
//!
//! # Print the resolved configuration
//! catalog-loader --config ./loader.toml show-config
//! ```

use anyhow::Context;
use catalog_generator::Distribution;
use catalog_loader::{
    log_realized, run_pipeline, run_sync_only, EstimatedCounts, LoaderConfig, DEFAULT_CONFIG_FILE,
};
use catalog_postgresql::{
    connect, init_schema, DatabaseArgs, PostgresEditorStore, PostgresPlatformStore, SchemaKind,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog-loader")]
#[command(about = "Generate a synthetic game catalog and sync its published part")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./catalog-loader.toml when present)
    #[arg(long, global = true, env = "CATALOG_LOADER_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    db: DatabaseArgs,

    /// Seed for the random generator (random when omitted)
    #[arg(long, global = true, env = "CATALOG_LOADER_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate into the editor database and sync the published closure
    Run,

    /// Recompute the platform database from the existing editor database
    Sync {
        /// Keep existing platform rows instead of rebuilding the platform tables
        #[arg(long)]
        keep_platform_rows: bool,
    },

    /// Create the editor and platform schemas
    InitSchema {
        /// Drop existing tables and types first
        #[arg(long)]
        recreate: bool,
    },

    /// Print the resolved configuration as TOML
    ShowConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The log filter depends on `verbose`, so the file is read first and
    // its origin is reported once the subscriber is installed.
    let source = LoaderConfig::source_path(cli.config.as_deref());
    let mut config = LoaderConfig::load_from(source.as_deref())?;
    config.apply_overrides(&cli.db, cli.seed);

    init_tracing(config.verbose);
    match &source {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::info!("{DEFAULT_CONFIG_FILE} not found, using defaults"),
    }

    match cli.command {
        Commands::Run => run_load(&config).await,
        Commands::Sync { keep_platform_rows } => run_sync(&config, !keep_platform_rows).await,
        Commands::InitSchema { recreate } => run_init_schema(&config, recreate).await,
        Commands::ShowConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "catalog_loader=info,catalog_postgresql=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn connect_both(
    config: &LoaderConfig,
) -> anyhow::Result<(PostgresEditorStore, PostgresPlatformStore)> {
    let editor = PostgresEditorStore::connect(&config.editor_db_url)
        .await
        .context("Failed to connect to the editor database")?;
    let platform = PostgresPlatformStore::connect(&config.platform_db_url)
        .await
        .context("Failed to connect to the platform database")?;
    Ok((editor, platform))
}

async fn run_load(config: &LoaderConfig) -> anyhow::Result<()> {
    config.log();
    let (mut editor, mut platform) = connect_both(config).await?;

    let mut dist = Distribution::new(config.seed);
    tracing::info!(
        "Using seed {} (pass --seed {} to reproduce this run)",
        dist.seed(),
        dist.seed()
    );

    let report = run_pipeline(config, &mut dist, &mut editor, &mut platform).await?;

    drop(editor);
    drop(platform);
    tracing::info!("Database connections closed");

    println!("{}", EstimatedCounts::from_config(config));
    log_realized(&report);
    Ok(())
}

async fn run_sync(config: &LoaderConfig, clear_platform: bool) -> anyhow::Result<()> {
    config.log();
    let (mut editor, mut platform) = connect_both(config).await?;

    let report = run_sync_only(&mut editor, &mut platform, clear_platform).await?;
    tracing::info!(
        "Sync complete: {} editors, {} games, {} DLCs, {} patches",
        report.editors,
        report.games,
        report.dlcs,
        report.patches
    );
    Ok(())
}

async fn run_init_schema(config: &LoaderConfig, recreate: bool) -> anyhow::Result<()> {
    for (kind, url) in [
        (SchemaKind::Editor, &config.editor_db_url),
        (SchemaKind::Platform, &config.platform_db_url),
    ] {
        let client = connect(url, kind.as_str())
            .await
            .with_context(|| format!("Failed to connect to the {} database", kind.as_str()))?;
        init_schema(&client, kind, recreate)
            .await
            .with_context(|| format!("Failed to initialize the {} schema", kind.as_str()))?;
    }
    tracing::info!("Schemas ready");
    Ok(())
}
