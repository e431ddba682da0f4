//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider: `"s3"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Lifetime of presigned download links in seconds.
    #[serde(default = "default_presign_ttl")]
    pub presign_ttl_seconds: u64,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            presign_ttl_seconds: default_presign_ttl(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Bucket holding all uploaded blobs.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (for LocalStack, MinIO, ...).
    #[serde(default)]
    pub endpoint: String,
    /// Static access key (empty = default credential chain).
    #[serde(default)]
    pub access_key: String,
    /// Static secret key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing.
    #[serde(default)]
    pub force_path_style: bool,
    /// Create the bucket at startup when it does not exist.
    #[serde(default)]
    pub create_bucket: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: false,
            create_bucket: false,
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_presign_ttl() -> u64 {
    900
}

fn default_bucket() -> String {
    "file-fort".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
