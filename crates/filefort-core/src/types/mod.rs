//! Core type definitions used across the FileFort workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
