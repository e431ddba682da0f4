//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filefort_entity::file::File;
use filefort_entity::folder::Folder;
use filefort_entity::user::{User, UserRole};
use filefort_service::DownloadLink;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Short human-readable summary.
    pub message: String,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Creates a successful response without data.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role.
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub access_token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

/// Folder view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub folder_name: String,
    /// Owner.
    pub owner_id: Uuid,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            folder_name: folder.name,
            owner_id: folder.owner_id,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
        }
    }
}

/// File metadata view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// File ID.
    pub id: Uuid,
    /// Uploaded name.
    pub file_name: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Object key in the blob store.
    pub file_store_key: String,
    /// Owner.
    pub owner_id: Uuid,
    /// Containing folder.
    pub folder_id: Uuid,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            file_name: file.name,
            file_size: file.size_bytes,
            file_store_key: file.store_key,
            owner_id: file.owner_id,
            folder_id: file.folder_id,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

/// Download link response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// Presigned URL.
    pub url: String,
    /// When the URL expires.
    pub expires_at: DateTime<Utc>,
    /// File metadata.
    pub file: FileResponse,
}

impl From<DownloadLink> for DownloadResponse {
    fn from(link: DownloadLink) -> Self {
        Self {
            url: link.url,
            expires_at: link.expires_at,
            file: link.file.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub cache: String,
    /// Blob store status.
    pub storage: String,
    /// Version.
    pub version: String,
}
