//! Administrative unsafe-marking.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use filefort_core::error::AppError;
use filefort_database::repositories::FileRepository;
use filefort_storage::StorageManager;

use crate::context::RequestContext;

/// What `mark_unsafe` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The file was already flagged; nothing changed.
    AlreadyUnsafe,
    /// The blob was deleted and the file flagged.
    Marked,
}

/// Flags files unsafe on behalf of an administrator.
///
/// Callers are expected to have passed the admin guard.
#[derive(Debug, Clone)]
pub struct ModerationService {
    files: Arc<dyn FileRepository>,
    storage: Arc<StorageManager>,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(files: Arc<dyn FileRepository>, storage: Arc<StorageManager>) -> Self {
        Self { files, storage }
    }

    /// Delete the blob of `file_id` and hide the file from every read path.
    ///
    /// If the blob delete fails the file stays visible, so a retry redoes
    /// the whole operation.
    pub async fn mark_unsafe(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<MarkOutcome, AppError> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("file does not exist"))?;

        if file.is_unsafe {
            return Ok(MarkOutcome::AlreadyUnsafe);
        }

        self.storage.delete(&file.store_key).await?;

        if !self.files.mark_unsafe(file.id, Utc::now()).await? {
            return Ok(MarkOutcome::AlreadyUnsafe);
        }

        info!(
            admin_id = %ctx.user_id,
            file_id = %file.id,
            owner_id = %file.owner_id,
            "File marked unsafe"
        );
        Ok(MarkOutcome::Marked)
    }
}
