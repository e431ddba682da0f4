//! `AuthUser` extractor: the context placed by the authentication gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use filefort_core::error::AppError;
use filefort_service::RequestContext;

use crate::error::ApiError;

/// Authenticated caller, available in handlers behind `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("unauthorized").into())
    }
}
