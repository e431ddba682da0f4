//! # filefort-api
//!
//! HTTP API layer for FileFort built on Axum.
//!
//! Provides the REST endpoints, the authentication and admin gates,
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, seed_admin};
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
