//! Blob store trait for pluggable object storage backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// A byte stream fed into the blob store.
///
/// Borrowing streams are allowed so request bodies can be forwarded
/// without copying them into an owned buffer first.
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, std::io::Error>>;

/// Trait for object storage backends.
///
/// Implementations exist for S3-compatible services and an in-process
/// map used for tests and local runs.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Consume `stream` into the object at `key`. Returns the stored size.
    async fn put_stream(&self, key: &str, stream: ByteStream<'_>) -> AppResult<u64>;

    /// Produce a time-limited retrieval URL for `key`.
    async fn presigned_url(&self, key: &str, ttl: Duration) -> AppResult<String>;

    /// Remove the object at `key`. Removing a missing object succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Map an error yielded by an upload stream into an [`AppError`].
///
/// A body that hit the configured size limit surfaces as
/// `io::ErrorKind::FileTooLarge` and is reported as a validation failure
/// carrying the stream's own message. Anything else is a storage failure.
pub fn stream_error(err: std::io::Error) -> AppError {
    match err.kind() {
        std::io::ErrorKind::FileTooLarge => AppError::validation(err.to_string()),
        _ => AppError::with_source(ErrorKind::Storage, "Stream read error", err),
    }
}
