//! # filefort-service
//!
//! Business logic service layer for FileFort. Each service orchestrates
//! repositories, the blob store, and the session authority to implement
//! one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{
    DownloadLink, DownloadService, MarkOutcome, ModerationService, UploadService,
};
pub use folder::FolderService;
pub use user::{LoginOutcome, RegisterUser, UserService};
