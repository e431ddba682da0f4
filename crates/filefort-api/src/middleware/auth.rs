//! Authentication gate.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use filefort_service::RequestContext;

use crate::error::ApiResult;
use crate::state::AppState;

/// Require a valid bearer token that is its user's active session.
///
/// On success the caller's [`RequestContext`] is placed in the request
/// extensions for the admin guard and the [`crate::extractors::AuthUser`]
/// extractor.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let claims = state.sessions.authenticate(header).await?;
    let ctx = RequestContext::from_claims(claims)?;
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
