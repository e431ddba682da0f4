//! Storage manager: the configured blob store plus presign policy.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use filefort_core::config::storage::StorageConfig;
use filefort_core::error::AppError;
use filefort_core::result::AppResult;
use filefort_core::traits::storage::{BlobStore, ByteStream};

use crate::providers::MemoryBlobStore;

/// A time-limited retrieval link.
#[derive(Debug, Clone)]
pub struct PresignedLink {
    /// URL the client fetches the object from.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
}

/// Front for the blob store used by the services.
#[derive(Debug, Clone)]
pub struct StorageManager {
    store: Arc<dyn BlobStore>,
    presign_ttl: Duration,
}

impl StorageManager {
    /// Build the blob store selected by `config.provider`.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let store: Arc<dyn BlobStore> = match config.provider.as_str() {
            #[cfg(feature = "s3")]
            "s3" => {
                let store = crate::providers::S3BlobStore::new(&config.s3).await?;
                if config.s3.create_bucket {
                    store.ensure_bucket().await?;
                }
                Arc::new(store)
            }
            "memory" => {
                info!("Using in-memory blob store; objects are lost on restart");
                Arc::new(MemoryBlobStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: s3, memory"
                )));
            }
        };

        Ok(Self::from_store(
            store,
            Duration::from_secs(config.presign_ttl_seconds),
        ))
    }

    /// Wrap an existing store.
    pub fn from_store(store: Arc<dyn BlobStore>, presign_ttl: Duration) -> Self {
        Self { store, presign_ttl }
    }

    /// Name of the active provider.
    pub fn provider_type(&self) -> &str {
        self.store.provider_type()
    }

    /// Stream an upload into `key`, returning the stored size.
    pub async fn save(&self, key: &str, stream: ByteStream<'_>) -> AppResult<u64> {
        self.store.put_stream(key, stream).await
    }

    /// Produce a retrieval link valid for the configured presign TTL.
    pub async fn presigned_download(&self, key: &str) -> AppResult<PresignedLink> {
        let url = self.store.presigned_url(key, self.presign_ttl).await?;
        let ttl = chrono::Duration::from_std(self.presign_ttl)
            .map_err(|e| AppError::configuration(format!("Invalid presign TTL: {e}")))?;
        Ok(PresignedLink {
            url,
            expires_at: Utc::now() + ttl,
        })
    }

    /// Delete the object at `key`.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.delete(key).await
    }

    /// Check that the store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}
