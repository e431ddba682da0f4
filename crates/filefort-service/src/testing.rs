//! Shared fixture for service tests: every collaborator in memory.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::{StreamExt, stream};
use uuid::Uuid;

use filefort_auth::{PasswordHasher, SessionAuthority};
use filefort_cache::CacheManager;
use filefort_core::config::{Argon2Config, AuthConfig, CacheConfig};
use filefort_core::traits::ByteStream;
use filefort_database::memory::{
    MemoryFileRepository, MemoryFolderRepository, MemoryUserRepository,
};
use filefort_entity::user::UserRole;
use filefort_storage::StorageManager;
use filefort_storage::providers::MemoryBlobStore;

use crate::context::RequestContext;
use crate::file::{DownloadService, ModerationService, UploadService};
use crate::folder::FolderService;
use crate::user::UserService;

pub(crate) struct Fixture {
    pub users: UserService,
    pub folders: FolderService,
    pub uploads: UploadService,
    pub downloads: DownloadService,
    pub moderation: ModerationService,
    pub sessions: Arc<SessionAuthority>,
    pub repos_folders: Arc<MemoryFolderRepository>,
    pub repos_files: Arc<MemoryFileRepository>,
    pub blobs: MemoryBlobStore,
}

impl Fixture {
    pub async fn new() -> Self {
        let auth = AuthConfig {
            jwt_secret: "service-test-secret".to_string(),
            ..AuthConfig::default()
        };
        let cache = Arc::new(CacheManager::new(&CacheConfig::default()).await.unwrap());
        let sessions = Arc::new(SessionAuthority::new(&auth, cache));
        let hasher = Arc::new(
            PasswordHasher::new(&Argon2Config {
                memory_cost_kib: 1024,
                time_cost: 1,
                parallelism: 1,
            })
            .unwrap(),
        );

        let users_repo = Arc::new(MemoryUserRepository::new());
        let repos_folders = Arc::new(MemoryFolderRepository::new());
        let repos_files = Arc::new(MemoryFileRepository::new());
        let blobs = MemoryBlobStore::new();
        let storage = Arc::new(StorageManager::from_store(
            Arc::new(blobs.clone()),
            Duration::from_secs(900),
        ));

        let folders = FolderService::new(repos_folders.clone(), repos_files.clone());
        Self {
            users: UserService::new(users_repo, hasher, sessions.clone()),
            uploads: UploadService::new(repos_files.clone(), folders.clone(), storage.clone()),
            downloads: DownloadService::new(repos_files.clone(), storage.clone()),
            moderation: ModerationService::new(repos_files.clone(), storage),
            folders,
            sessions,
            repos_folders,
            repos_files,
            blobs,
        }
    }
}

pub(crate) fn ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), UserRole::Regular, None)
}

pub(crate) fn admin_ctx() -> RequestContext {
    RequestContext::new(Uuid::new_v4(), UserRole::Admin, None)
}

pub(crate) fn body(data: &'static [u8]) -> ByteStream<'static> {
    stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(data))]).boxed()
}
