//! Route definitions for the FileFort HTTP API.
//!
//! Routes are grouped by the gate they sit behind: public, authenticated,
//! and admin. The router receives `AppState` and passes it to all handlers
//! via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(public_routes())
        .merge(user_routes(&state))
        .merge(admin_routes(&state))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health, registration and login
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/users", post(handlers::auth::register))
        .route("/users/login", post(handlers::auth::login))
}

/// Endpoints for any caller with an active session
fn user_routes(state: &AppState) -> Router<AppState> {
    let max_upload = usize::try_from(state.config.server.max_upload_size_bytes)
        .unwrap_or(usize::MAX);

    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/users/logout", post(handlers::auth::logout))
        .route("/folder", post(handlers::folder::create_folder))
        .route("/folder/{id}/files", get(handlers::folder::list_files))
        .route(
            "/file",
            post(handlers::file::upload).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/file/{id}", get(handlers::file::download))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ))
}

/// Administrator endpoints
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/file/{id}/mark-unsafe", post(handlers::file::mark_unsafe))
        .route_layer(axum_middleware::from_fn(middleware::rbac::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ))
}
