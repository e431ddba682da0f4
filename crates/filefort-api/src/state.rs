//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filefort_auth::SessionAuthority;
use filefort_cache::CacheManager;
use filefort_core::config::AppConfig;
use filefort_database::Repositories;
use filefort_service::{
    DownloadService, FolderService, ModerationService, UploadService, UserService,
};
use filefort_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Repositories over the configured database backend
    pub repos: Repositories,
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,
    /// Blob store manager
    pub storage: Arc<StorageManager>,

    /// Token issuance and active-session checks
    pub sessions: Arc<SessionAuthority>,

    /// Account service
    pub user_service: Arc<UserService>,
    /// Folder service
    pub folder_service: Arc<FolderService>,
    /// Upload service
    pub upload_service: Arc<UploadService>,
    /// Download service
    pub download_service: Arc<DownloadService>,
    /// Unsafe-marking service
    pub moderation_service: Arc<ModerationService>,
}
