//! Folder creation, listing, and upload-target resolution.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use filefort_core::error::{AppError, ErrorKind};
use filefort_core::types::pagination::{PageRequest, PageResponse};
use filefort_database::repositories::{FileRepository, FolderRepository};
use filefort_entity::file::File;
use filefort_entity::folder::Folder;

use crate::context::RequestContext;

/// Manages folders owned by the caller.
#[derive(Debug, Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderRepository>, files: Arc<dyn FileRepository>) -> Self {
        Self { folders, files }
    }

    /// Create a folder owned by the caller.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Folder, AppError> {
        let folder = self
            .folders
            .create(&Folder::new(name.trim(), ctx.user_id))
            .await?;
        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    /// Fetch a folder the caller owns.
    ///
    /// `denied` is the message used when the folder belongs to someone else.
    async fn owned_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        denied: &str,
    ) -> Result<Folder, AppError> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("folder does not exist"))?;

        if !folder.is_owned_by(ctx.user_id) {
            return Err(AppError::not_owner(denied));
        }
        Ok(folder)
    }

    /// One page of the visible files in a folder the caller owns.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResponse<File>, AppError> {
        let folder = self
            .owned_folder(ctx, folder_id, "unauthorized to view this folder")
            .await?;
        self.files.list_visible_by_folder(folder.id, &page).await
    }

    /// Folder an upload lands in.
    ///
    /// An explicit folder must belong to the caller. Without one, the
    /// caller's home folder is used, created on first use.
    pub async fn resolve_upload_target(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        match folder_id {
            Some(id) => {
                self.owned_folder(ctx, id, "unauthorized to upload to this folder")
                    .await
            }
            None => self.home_folder(ctx.user_id).await,
        }
    }

    /// The home folder of `user_id`, creating it if absent.
    ///
    /// Concurrent first uploads race on the insert; the loser re-reads the
    /// winner's row.
    pub async fn home_folder(&self, user_id: Uuid) -> Result<Folder, AppError> {
        if let Some(folder) = self.folders.find_by_id(user_id).await? {
            return Ok(folder);
        }

        match self.folders.create(&Folder::home_for(user_id)).await {
            Ok(folder) => {
                info!(user_id = %user_id, "Home folder created");
                Ok(folder)
            }
            Err(e) if e.is(ErrorKind::Conflict) => {
                debug!(user_id = %user_id, "Home folder created concurrently");
                self.folders
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| AppError::internal("home folder vanished after conflict"))
            }
            Err(e) => Err(e),
        }
    }
}
