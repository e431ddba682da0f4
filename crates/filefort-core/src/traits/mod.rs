//! Core traits defined in `filefort-core` and implemented by other crates.

pub mod cache;
pub mod storage;

pub use cache::CacheProvider;
pub use storage::{BlobStore, ByteStream};
