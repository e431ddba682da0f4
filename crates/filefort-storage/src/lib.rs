//! # filefort-storage
//!
//! Blob store implementations for FileFort: an S3-compatible object store
//! (behind the `s3` feature) and an in-process store for tests and local
//! runs. [`StorageManager`] selects one from configuration.

pub mod manager;
pub mod providers;

pub use manager::StorageManager;
