//! # filefort-core
//!
//! Core crate for FileFort. Contains the configuration schema, the
//! cache and blob-store traits, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FileFort crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
