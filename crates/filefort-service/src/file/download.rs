//! Time-limited download links.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use filefort_core::error::AppError;
use filefort_database::repositories::FileRepository;
use filefort_entity::file::File;
use filefort_storage::StorageManager;

use crate::context::RequestContext;

/// A presigned link to a file the caller owns.
#[derive(Debug, Clone)]
pub struct DownloadLink {
    /// URL the client fetches the blob from.
    pub url: String,
    /// When the URL stops working.
    pub expires_at: DateTime<Utc>,
    /// File metadata.
    pub file: File,
}

/// Hands out download links with ownership checks.
#[derive(Debug, Clone)]
pub struct DownloadService {
    files: Arc<dyn FileRepository>,
    storage: Arc<StorageManager>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(files: Arc<dyn FileRepository>, storage: Arc<StorageManager>) -> Self {
        Self { files, storage }
    }

    /// Presigned link for `file_id`.
    ///
    /// Files flagged unsafe are reported missing.
    pub async fn download_link(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<DownloadLink, AppError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .filter(File::is_visible)
            .ok_or_else(|| AppError::not_found("file does not exist"))?;

        if !file.is_owned_by(ctx.user_id) {
            return Err(AppError::not_owner("unauthorized to view this file"));
        }

        let link = self.storage.presigned_download(&file.store_key).await?;
        debug!(user_id = %ctx.user_id, file_id = %file.id, "Issued download link");

        Ok(DownloadLink {
            url: link.url,
            expires_at: link.expires_at,
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, body, ctx};
    use filefort_core::error::ErrorKind;

    #[tokio::test]
    async fn owner_gets_a_link() {
        let fx = Fixture::new().await;
        let me = ctx();
        let file = fx
            .uploads
            .upload(&me, None, "a.txt", body(b"abc"))
            .await
            .unwrap();

        let link = fx.downloads.download_link(&me, file.id).await.unwrap();
        assert!(link.url.contains(&file.store_key));
        assert!(link.expires_at > Utc::now());
        assert_eq!(link.file.id, file.id);
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let fx = Fixture::new().await;
        let file = fx
            .uploads
            .upload(&ctx(), None, "a.txt", body(b"abc"))
            .await
            .unwrap();

        let err = fx.downloads.download_link(&ctx(), file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ForbiddenNotOwner);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx
            .downloads
            .download_link(&ctx(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "file does not exist");
    }
}
