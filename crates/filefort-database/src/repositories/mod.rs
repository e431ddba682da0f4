//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only, so the same business logic runs
//! against PostgreSQL in production and against [`crate::memory`] in tests.

pub mod file;
pub mod folder;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use filefort_core::result::AppResult;
use filefort_core::types::pagination::{PageRequest, PageResponse};
use filefort_entity::file::File;
use filefort_entity::folder::Folder;
use filefort_entity::user::User;

pub use file::PgFileRepository;
pub use folder::PgFolderRepository;
pub use user::PgUserRepository;

/// Persistence for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. A taken email yields `Conflict`.
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Persistence for folders.
#[async_trait]
pub trait FolderRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a folder. A taken id yields `Conflict`.
    async fn create(&self, folder: &Folder) -> AppResult<Folder>;

    /// Find a folder by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;
}

/// Persistence for file metadata.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a file row.
    async fn create(&self, file: &File) -> AppResult<File>;

    /// Find a file by primary key, including files flagged unsafe.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// List the files of a folder that are not flagged unsafe, oldest first.
    async fn list_visible_by_folder(
        &self,
        folder_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>>;

    /// Flag a file unsafe and stamp `updated_at`.
    ///
    /// Returns `false` when no row changed (missing or already unsafe).
    async fn mark_unsafe(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool>;
}
