//! Folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use filefort_core::types::PageResponse;

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::{ApiResponse, FileResponse, FolderResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /folder
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(req), _): WithRejection<Json<CreateFolderRequest>, ApiError>,
) -> ApiResult<Json<ApiResponse<FolderResponse>>> {
    req.check()?;

    let folder = state
        .folder_service
        .create_folder(&auth, &req.folder_name)
        .await?;

    Ok(Json(ApiResponse::ok(
        "folder created successfully",
        folder.into(),
    )))
}

/// GET /folder/{id}/files?page=&rows=
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(folder_id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, ApiError>,
) -> ApiResult<Json<ApiResponse<PageResponse<FileResponse>>>> {
    let page = state
        .folder_service
        .list_files(&auth, folder_id, params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(
        "files retrieved successfully",
        page.map(FileResponse::from),
    )))
}
