//! Account handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::WithRejection;

use filefort_service::RegisterUser;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    req.check()?;

    let user = state
        .user_service
        .register(RegisterUser {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok("user created successfully", user.into())))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    req.check()?;

    let outcome = state.user_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(
        "user logged in successfully",
        LoginResponse {
            access_token: outcome.access_token,
            expires_at: outcome.expires_at,
        },
    )))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.user_service.logout(&auth).await?;
    Ok(Json(ApiResponse::message("user logged out successfully")))
}
