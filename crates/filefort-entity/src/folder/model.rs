//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Name given to every user's default upload folder.
pub const HOME_FOLDER_NAME: &str = "home";

/// A flat, single-owner folder.
///
/// The folder whose `id` equals its `owner_id` is that owner's home folder.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Build a new, not yet persisted folder with a fresh id.
    pub fn new(name: impl Into<String>, owner_id: Uuid) -> Self {
        Self::with_id(Uuid::new_v4(), name, owner_id)
    }

    /// Build the home folder for `owner_id`.
    pub fn home_for(owner_id: Uuid) -> Self {
        Self::with_id(owner_id, HOME_FOLDER_NAME, owner_id)
    }

    fn with_id(id: Uuid, name: impl Into<String>, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this is its owner's home folder.
    pub fn is_home(&self) -> bool {
        self.id == self.owner_id
    }

    /// Whether `user_id` owns this folder.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_folder_shares_owner_id() {
        let owner = Uuid::new_v4();
        let home = Folder::home_for(owner);
        assert_eq!(home.id, owner);
        assert_eq!(home.name, HOME_FOLDER_NAME);
        assert!(home.is_home());
        assert!(home.is_owned_by(owner));
    }

    #[test]
    fn regular_folder_is_not_home() {
        let folder = Folder::new("docs", Uuid::new_v4());
        assert!(!folder.is_home());
        assert!(!folder.is_owned_by(Uuid::new_v4()));
    }
}
