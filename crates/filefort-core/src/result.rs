//! Convenience result type alias for FileFort.

use crate::error::AppError;

/// A specialized `Result` type for FileFort operations.
pub type AppResult<T> = Result<T, AppError>;
