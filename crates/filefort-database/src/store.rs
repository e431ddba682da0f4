//! The repository bundle handed to services.

use std::sync::Arc;

use tracing::info;

use filefort_core::config::DatabaseConfig;
use filefort_core::error::AppError;
use filefort_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryFileRepository, MemoryFolderRepository, MemoryUserRepository};
use crate::migration::run_migrations;
use crate::repositories::{
    FileRepository, FolderRepository, PgFileRepository, PgFolderRepository, PgUserRepository,
    UserRepository,
};

/// All repositories over one backend.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Folders.
    pub folders: Arc<dyn FolderRepository>,
    /// File metadata.
    pub files: Arc<dyn FileRepository>,
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

impl Repositories {
    /// Build repositories for the configured backend, migrating PostgreSQL when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory repositories; data is lost on restart");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database backend: '{other}'. Expected 'postgres' or 'memory'"
            ))),
        }
    }

    /// Repositories over a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.pool().clone())),
            folders: Arc::new(PgFolderRepository::new(pool.pool().clone())),
            files: Arc::new(PgFileRepository::new(pool.pool().clone())),
            backend: Backend::Postgres(pool),
        }
    }

    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            folders: Arc::new(MemoryFolderRepository::new()),
            files: Arc::new(MemoryFileRepository::new()),
            backend: Backend::Memory,
        }
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Check that the backing database answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(true),
        }
    }

    /// Release database connections.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
