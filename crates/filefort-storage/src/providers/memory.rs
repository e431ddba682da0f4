//! In-process blob store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use chrono::Utc;
use dashmap::DashMap;
use futures::StreamExt;
use tracing::debug;

use filefort_core::error::AppError;
use filefort_core::result::AppResult;
use filefort_core::traits::storage::{BlobStore, ByteStream, stream_error};

/// Blob store keeping every object in a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: Arc<DashMap<String, Bytes>>,
    deletes: Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of the object at `key`, if any.
    pub fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.get(key).map(|o| o.value().clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of delete calls that reached the store.
    pub fn delete_count(&self) -> u64 {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Make every subsequent write and delete fail, as an unreachable store would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::storage("blob store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.unavailable.load(Ordering::SeqCst))
    }

    async fn put_stream(&self, key: &str, mut stream: ByteStream<'_>) -> AppResult<u64> {
        self.ensure_available()?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk.map_err(stream_error)?);
        }

        let size = buf.len() as u64;
        self.objects.insert(key.to_string(), buf.freeze());
        debug!(key, bytes = size, "Stored object in memory");
        Ok(size)
    }

    async fn presigned_url(&self, key: &str, ttl: Duration) -> AppResult<String> {
        if !self.objects.contains_key(key) {
            return Err(AppError::storage(format!("Object {key} does not exist")));
        }
        let expires = Utc::now().timestamp() + ttl.as_secs() as i64;
        Ok(format!("memory://{key}?expires={expires}"))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;
        self.objects.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.objects.contains_key(key))
    }
}
