//! Token validation failures.

use thiserror::Error;

use filefort_core::error::AppError;

/// Reasons a bearer token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The header has no `Bearer ` prefix or carries an empty token.
    #[error("invalid token")]
    InvalidToken,
    /// Signature mismatch or malformed token structure.
    #[error("error decoding JWT token")]
    DecodingError,
    /// The `exp` claim lies in the past.
    #[error("expired token")]
    ExpiredToken,
}

/// Every rejection reaches the caller as the same `unauthorized` message;
/// the variant only shows up in logs.
impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized("unauthorized")
    }
}
