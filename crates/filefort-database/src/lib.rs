//! # filefort-database
//!
//! PostgreSQL connection management, embedded migrations, and the
//! repository layer for users, folders, and files. Every repository is a
//! trait with a PostgreSQL implementation and an in-memory one with the
//! same uniqueness semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Repositories;
