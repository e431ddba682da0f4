//! Admin guard. Must be layered inside [`super::auth::require_auth`].

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use filefort_core::error::AppError;
use filefort_service::RequestContext;

use crate::error::ApiResult;

/// Let only administrators through.
pub async fn require_admin(request: Request, next: Next) -> ApiResult<Response> {
    let ctx = request
        .extensions()
        .get::<RequestContext>()
        .ok_or_else(|| AppError::unauthorized("unauthorized"))?;
    filefort_auth::require_admin(ctx.role)?;

    Ok(next.run(request).await)
}
