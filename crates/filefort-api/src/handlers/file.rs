//! File handlers: streaming upload, download links, unsafe-marking.

use std::io;

use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum_extra::extract::WithRejection;
use futures::{StreamExt, TryStreamExt};
use uuid::Uuid;

use filefort_core::error::AppError;
use filefort_core::traits::ByteStream;
use filefort_service::MarkOutcome;

use crate::dto::response::{ApiResponse, DownloadResponse, FileResponse};
use crate::error::{ApiError, ApiResult, INVALID_ID_MESSAGE};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Message for a missing or unreadable `file` part.
const MISSING_FILE_MESSAGE: &str = "Error retrieving file, please try again";

fn too_large_message(limit_mb: u64) -> String {
    format!(
        "The file you are trying to upload exceeds the maximum allowed size of {limit_mb}MB."
    )
}

/// Forward a multipart part as a blob store stream.
///
/// Hitting the body limit mid-stream surfaces as `FileTooLarge` so the
/// store reports it as a validation failure.
fn field_stream<'a>(field: Field<'a>, limit_mb: u64) -> ByteStream<'a> {
    field
        .map_err(move |e: MultipartError| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                io::Error::new(io::ErrorKind::FileTooLarge, too_large_message(limit_mb))
            } else {
                io::Error::other(e.body_text())
            }
        })
        .boxed()
}

fn multipart_error(e: MultipartError, limit_mb: u64) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation(too_large_message(limit_mb)).into()
    } else {
        e.into()
    }
}

/// POST /file
///
/// Multipart body with an optional `folder_id` text part followed by a
/// `file` part. The file part is streamed straight into the blob store,
/// so `folder_id` has to come first.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<FileResponse>>> {
    let limit = state.config.server.max_upload_size_bytes;
    let limit_mb = state.config.server.max_upload_size_mb();

    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(AppError::validation(too_large_message(limit_mb)).into());
    }

    let mut folder_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_mb))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field.text().await.map_err(|e| multipart_error(e, limit_mb))?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(
                        Uuid::parse_str(text)
                            .map_err(|_| AppError::validation(INVALID_ID_MESSAGE))?,
                    );
                }
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::validation(MISSING_FILE_MESSAGE))?;

                let file = state
                    .upload_service
                    .upload(&auth, folder_id, &file_name, field_stream(field, limit_mb))
                    .await?;

                return Ok(Json(ApiResponse::ok(
                    "file uploaded successfully",
                    file.into(),
                )));
            }
            _ => {}
        }
    }

    Err(AppError::validation(MISSING_FILE_MESSAGE).into())
}

/// GET /file/{id}
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<ApiResponse<DownloadResponse>>> {
    let link = state.download_service.download_link(&auth, id).await?;
    Ok(Json(ApiResponse::ok(
        "download url generated successfully",
        link.into(),
    )))
}

/// POST /file/{id}/mark-unsafe
pub async fn mark_unsafe(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let message = match state.moderation_service.mark_unsafe(&auth, id).await? {
        MarkOutcome::Marked => "file marked unsafe successfully",
        MarkOutcome::AlreadyUnsafe => "file already marked unsafe",
    };
    Ok(Json(ApiResponse::message(message)))
}
