//! PostgreSQL file repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use filefort_core::error::{AppError, ErrorKind};
use filefort_core::result::AppResult;
use filefort_core::types::pagination::{PageRequest, PageResponse};
use filefort_entity::file::File;

use super::FileRepository;

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, file: &File) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, owner_id, folder_id, store_key, size_bytes, is_unsafe, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(file.id)
        .bind(&file.name)
        .bind(file.owner_id)
        .bind(file.folder_id)
        .bind(&file.store_key)
        .bind(file.size_bytes)
        .bind(file.is_unsafe)
        .bind(file.created_at)
        .bind(file.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list_visible_by_folder(
        &self,
        folder_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM files WHERE folder_id = $1 AND is_unsafe = FALSE",
        )
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;

        let files = sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 AND is_unsafe = FALSE \
             ORDER BY created_at ASC, id ASC LIMIT $2 OFFSET $3",
        )
        .bind(folder_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;

        Ok(PageResponse::new(files, page, total as u64))
    }

    async fn mark_unsafe(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE files SET is_unsafe = TRUE, updated_at = $2 WHERE id = $1 AND is_unsafe = FALSE",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark file unsafe", e))?;

        Ok(result.rows_affected() > 0)
    }
}
