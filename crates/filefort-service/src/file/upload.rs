//! Streaming file upload.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use filefort_core::error::AppError;
use filefort_core::traits::ByteStream;
use filefort_database::repositories::FileRepository;
use filefort_entity::file::File;
use filefort_storage::StorageManager;

use crate::context::RequestContext;
use crate::folder::FolderService;

/// Accepts uploads into the caller's folders.
#[derive(Debug, Clone)]
pub struct UploadService {
    files: Arc<dyn FileRepository>,
    folders: FolderService,
    storage: Arc<StorageManager>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileRepository>,
        folders: FolderService,
        storage: Arc<StorageManager>,
    ) -> Self {
        Self {
            files,
            folders,
            storage,
        }
    }

    /// Store an upload and record its metadata.
    ///
    /// The target folder is resolved before any byte is written, and the
    /// blob is written before the metadata row.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        file_name: &str,
        body: ByteStream<'_>,
    ) -> Result<File, AppError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::validation("file name required"));
        }

        let folder = self.folders.resolve_upload_target(ctx, folder_id).await?;

        let file_id = Uuid::new_v4();
        let store_key = File::object_key(ctx.user_id, file_id);
        let size = self.storage.save(&store_key, body).await?;

        let record = File::new(
            file_id,
            file_name,
            ctx.user_id,
            folder.id,
            store_key,
            size as i64,
        );
        let file = match self.files.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&record.store_key).await {
                    warn!(
                        key = %record.store_key,
                        error = %cleanup,
                        "Failed to remove blob of unrecorded upload"
                    );
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = %file.folder_id,
            size = file.size_bytes,
            "Upload completed"
        );
        Ok(file)
    }
}
