//! File upload, download, and moderation.

pub mod download;
pub mod moderation;
pub mod upload;

pub use download::{DownloadLink, DownloadService};
pub use moderation::{MarkOutcome, ModerationService};
pub use upload::UploadService;
