//! # filefort-entity
//!
//! Domain entity models for FileFort. Every struct in this crate
//! represents a database table row. All entities derive `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and `sqlx::FromRow`.

pub mod file;
pub mod folder;
pub mod user;
