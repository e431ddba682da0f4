//! FileFort Server — file backup service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use filefort_cache::CacheManager;
use filefort_core::config::AppConfig;
use filefort_core::error::AppError;
use filefort_database::{DatabasePool, Repositories};
use filefort_storage::StorageManager;

/// FileFort — file backup service
#[derive(Debug, Parser)]
#[command(name = "filefort-server", version, about, long_about = None)]
struct Cli {
    /// Configuration overlay loaded on top of `config/default.toml`
    #[arg(short, long, env = "FILEFORT_ENV", default_value = "development")]
    env: String,

    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run(config).await,
        Command::Migrate => migrate(&config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `FILEFORT__*` variables
fn load_configuration(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Apply migrations against the configured PostgreSQL database
async fn migrate(config: &AppConfig) -> Result<(), AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    filefort_database::migration::run_migrations(pool.pool()).await?;
    pool.close().await;
    Ok(())
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileFort v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database ─────────────────────────────────────────
    let repos = Repositories::connect(&config.database).await?;
    tracing::info!(backend = repos.backend_name(), "Repositories ready");

    // ── Step 2: Cache ────────────────────────────────────────────
    let cache = Arc::new(CacheManager::new(&config.cache).await?);
    tracing::info!(provider = cache.provider_type(), "Cache initialized");

    // ── Step 3: Blob store ───────────────────────────────────────
    let storage = Arc::new(StorageManager::new(&config.storage).await?);
    tracing::info!(provider = storage.provider_type(), "Blob store initialized");

    // ── Step 4: Services and admin seeding ───────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = filefort_api::build_state(config, repos.clone(), cache, storage)?;
    filefort_api::seed_admin(&state).await?;

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = filefort_api::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("FileFort server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    repos.close().await;
    tracing::info!("FileFort server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
