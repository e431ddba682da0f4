//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use filefort_core::error::{AppError, ErrorKind};

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to run migrations", e)
        })?;

    info!("Database schema is up to date");
    Ok(())
}
