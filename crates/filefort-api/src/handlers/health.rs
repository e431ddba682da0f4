//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use filefort_core::result::AppResult;
use filefort_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

fn component_status(name: &str, check: AppResult<bool>) -> &'static str {
    match check {
        Ok(true) => "up",
        Ok(false) => {
            warn!(component = name, "Health check reported down");
            "down"
        }
        Err(e) => {
            warn!(component = name, error = %e, "Health check failed");
            "down"
        }
    }
}

/// GET /health
///
/// Pings the database, the cache and the blob store.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let (database, cache, storage) = futures::join!(
        state.repos.health_check(),
        state.cache.health_check(),
        state.storage.health_check(),
    );

    let database = component_status("database", database);
    let cache = component_status("cache", cache);
    let storage = component_status("storage", storage);
    let healthy = [database, cache, storage].iter().all(|s| *s == "up");

    let (status, message) = if healthy {
        (StatusCode::OK, "service is live")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "service is degraded")
    };

    let body = ApiResponse {
        success: healthy,
        message: message.to_string(),
        data: Some(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database: database.to_string(),
            cache: cache.to_string(),
            storage: storage.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    };
    (status, Json(body))
}
