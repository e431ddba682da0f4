//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata row for an uploaded blob.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name as uploaded.
    pub name: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// The folder containing this file.
    pub folder_id: Uuid,
    /// Object key in the blob store.
    pub store_key: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Set once an administrator flags the file; hidden from every read path.
    pub is_unsafe: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Build a new, not yet persisted file row.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        owner_id: Uuid,
        folder_id: Uuid,
        store_key: impl Into<String>,
        size_bytes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            owner_id,
            folder_id,
            store_key: store_key.into(),
            size_bytes,
            is_unsafe: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Object key under which the blob for `file_id` is stored.
    pub fn object_key(owner_id: Uuid, file_id: Uuid) -> String {
        format!("{owner_id}/{file_id}")
    }

    /// Whether `user_id` owns this file.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Whether the file is visible on read paths.
    pub fn is_visible(&self) -> bool {
        !self.is_unsafe
    }

    /// Flag the file unsafe. Returns `false` if it already was.
    pub fn mark_unsafe(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_unsafe {
            return false;
        }
        self.is_unsafe = true;
        self.updated_at = now;
        true
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}
