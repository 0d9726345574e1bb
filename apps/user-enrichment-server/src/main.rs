mod config;
mod logging;
mod signals;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use user_enrichment::infra::storage::schema::ensure_users_table;
use user_enrichment::UserEnrichmentModule;

use crate::config::{AppConfig, DatabaseConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// User Enrichment Server - user records with inferred demographics
#[derive(Parser)]
#[command(name = "user-enrichment-server")]
#[command(about = "User Enrichment Server - user records with inferred demographics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database instead of the configured DSN
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref()
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.port, cli.verbose)?;
    if cli.mock {
        config.database = mock_database();
    }

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            logging::init(&config.logging);
            run_server(config).await
        }
        Commands::Check => check_config(&config),
    }
}

fn mock_database() -> DatabaseConfig {
    // Every pooled connection to `sqlite::memory:` opens its own database.
    DatabaseConfig {
        dsn: "sqlite::memory:".to_owned(),
        max_conns: 1,
        min_conns: 1,
        ..DatabaseConfig::default()
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.dsn.clone());
    options
        .max_connections(config.max_conns)
        .min_connections(config.min_conns)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options)
        .await
        .context("failed to connect to the database")
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("User Enrichment Server starting");

    let addr = config.server.socket_addr()?;

    let db = connect(&config.database).await?;
    ensure_users_table(&db)
        .await
        .context("failed to prepare the users table")?;

    let module = UserEnrichmentModule::init(db.clone(), config.user_enrichment.clone())?;
    let app = module.register_rest(Router::new());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = signals::shutdown_signal().await;
            tracing::info!(%signal, "Draining in-flight requests");
        })
        .await
        .context("HTTP server failed")?;

    tracing::info!("Closing database pool");
    db.close().await.context("failed to close the database")?;
    tracing::info!("User Enrichment Server stopped");
    Ok(())
}
