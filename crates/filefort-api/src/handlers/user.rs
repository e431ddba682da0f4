//! Profile handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok("user retrieved successfully", user.into())))
}
