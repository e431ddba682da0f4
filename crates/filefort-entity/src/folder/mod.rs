//! Folder domain entities.

pub mod model;

pub use model::{Folder, HOME_FOLDER_NAME};
