//! Application wiring: services over connected infrastructure.

use std::sync::Arc;

use tracing::info;

use filefort_auth::{PasswordHasher, SessionAuthority};
use filefort_cache::CacheManager;
use filefort_core::config::AppConfig;
use filefort_core::result::AppResult;
use filefort_database::Repositories;
use filefort_service::{
    DownloadService, FolderService, ModerationService, UploadService, UserService,
};
use filefort_storage::StorageManager;

use crate::state::AppState;

/// Construct every service over already-connected infrastructure.
pub fn build_state(
    config: AppConfig,
    repos: Repositories,
    cache: Arc<CacheManager>,
    storage: Arc<StorageManager>,
) -> AppResult<AppState> {
    let hasher = Arc::new(PasswordHasher::new(&config.auth.argon2)?);
    let sessions = Arc::new(SessionAuthority::new(&config.auth, Arc::clone(&cache)));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&repos.users),
        hasher,
        Arc::clone(&sessions),
    ));
    let folder_service = FolderService::new(Arc::clone(&repos.folders), Arc::clone(&repos.files));
    let upload_service = Arc::new(UploadService::new(
        Arc::clone(&repos.files),
        folder_service.clone(),
        Arc::clone(&storage),
    ));
    let download_service = Arc::new(DownloadService::new(
        Arc::clone(&repos.files),
        Arc::clone(&storage),
    ));
    let moderation_service = Arc::new(ModerationService::new(
        Arc::clone(&repos.files),
        Arc::clone(&storage),
    ));

    Ok(AppState {
        config: Arc::new(config),
        repos,
        cache,
        storage,
        sessions,
        user_service,
        folder_service: Arc::new(folder_service),
        upload_service,
        download_service,
        moderation_service,
    })
}

/// Seed the configured administrator account, if any.
pub async fn seed_admin(state: &AppState) -> AppResult<()> {
    if let Some(admin) = &state.config.auth.bootstrap_admin {
        let user = state.user_service.ensure_admin(admin).await?;
        info!(user_id = %user.id, "Bootstrap admin ready");
    }
    Ok(())
}
