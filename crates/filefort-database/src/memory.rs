//! In-memory repositories.
//!
//! Backed by `DashMap`, with the same uniqueness rules as the PostgreSQL
//! schema: one user per email, one folder per id. Used by the test suites
//! and by `database.backend = "memory"` for local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use filefort_core::error::AppError;
use filefort_core::result::AppResult;
use filefort_core::types::pagination::{PageRequest, PageResponse};
use filefort_entity::file::File;
use filefort_entity::folder::Folder;
use filefort_entity::user::User;

use crate::repositories::{FileRepository, FolderRepository, UserRepository};

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<Uuid, User>,
    by_email: DashMap<String, Uuid>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AppResult<User> {
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("user already exists")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user.clone())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.by_email.get(email).map(|id| *id.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }
}

/// In-memory folder store.
#[derive(Debug, Default)]
pub struct MemoryFolderRepository {
    folders: DashMap<Uuid, Folder>,
}

impl MemoryFolderRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored folders.
    pub fn len(&self) -> usize {
        self.folders.len()
    }

    /// Whether the store holds no folders.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

#[async_trait]
impl FolderRepository for MemoryFolderRepository {
    async fn create(&self, folder: &Folder) -> AppResult<Folder> {
        match self.folders.entry(folder.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Folder {} already exists",
                folder.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(folder.clone());
                Ok(folder.clone())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.folders.get(&id).map(|f| f.value().clone()))
    }
}

/// In-memory file metadata store.
#[derive(Debug, Default)]
pub struct MemoryFileRepository {
    files: DashMap<Uuid, File>,
}

impl MemoryFileRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, unsafe ones included.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no rows are stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Snapshot of a row, unsafe or not.
    pub fn get(&self, id: Uuid) -> Option<File> {
        self.files.get(&id).map(|f| f.value().clone())
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn create(&self, file: &File) -> AppResult<File> {
        match self.files.entry(file.id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "File {} already exists",
                file.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(file.clone());
                Ok(file.clone())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.files.get(&id).map(|f| f.value().clone()))
    }

    async fn list_visible_by_folder(
        &self,
        folder_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<File>> {
        let mut visible: Vec<File> = self
            .files
            .iter()
            .filter(|f| f.folder_id == folder_id && f.is_visible())
            .map(|f| f.value().clone())
            .collect();
        visible.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = visible.len() as u64;
        let items = visible
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn mark_unsafe(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        Ok(self
            .files
            .get_mut(&id)
            .is_some_and(|mut file| file.mark_unsafe(at)))
    }
}
