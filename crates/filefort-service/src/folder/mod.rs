//! Folder operations and the home-folder bootstrapper.

pub mod service;

pub use service::FolderService;
