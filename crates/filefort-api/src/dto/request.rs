//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use filefort_core::error::AppError;

/// Validate `value`, reporting the first failing field in `order`.
///
/// Fields are checked in a fixed order so a body missing several fields
/// always yields the same message.
pub fn validate_ordered<T: Validate>(value: &T, order: &[&str]) -> Result<(), AppError> {
    let Err(errors) = value.validate() else {
        return Ok(());
    };
    let fields = errors.field_errors();
    let message = order
        .iter()
        .filter_map(|name| fields.get(*name))
        .chain(fields.values())
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "invalid request body".to_string());
    Err(AppError::validation(message))
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "email required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "password required"))]
    pub password: String,
    /// Given name.
    #[serde(default)]
    #[validate(length(min = 1, message = "first_name required"))]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    #[validate(length(min = 1, message = "last_name required"))]
    pub last_name: String,
}

impl RegisterRequest {
    /// Check required fields.
    pub fn check(&self) -> Result<(), AppError> {
        validate_ordered(self, &["email", "password", "first_name", "last_name"])
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[serde(default)]
    #[validate(length(min = 1, message = "email required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "password required"))]
    pub password: String,
}

impl LoginRequest {
    /// Check required fields.
    pub fn check(&self) -> Result<(), AppError> {
        validate_ordered(self, &["email", "password"])
    }
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[serde(default)]
    #[validate(length(min = 1, message = "folder_name required"))]
    pub folder_name: String,
}

/// Longest accepted folder name, in characters.
pub const MAX_FOLDER_NAME_CHARS: usize = 255;

impl CreateFolderRequest {
    /// Check required fields.
    pub fn check(&self) -> Result<(), AppError> {
        if self.folder_name.trim().is_empty() {
            return Err(AppError::validation("folder_name required"));
        }
        if self.folder_name.chars().count() > MAX_FOLDER_NAME_CHARS {
            return Err(AppError::validation(format!(
                "folder_name must be at most {MAX_FOLDER_NAME_CHARS} characters"
            )));
        }
        validate_ordered(self, &["folder_name"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_missing_field_is_reported_in_order() {
        let req = RegisterRequest {
            email: String::new(),
            password: String::new(),
            first_name: "A".to_string(),
            last_name: String::new(),
        };
        assert_eq!(req.check().unwrap_err().message, "email required");

        let req = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "p".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert_eq!(req.check().unwrap_err().message, "first_name required");
    }

    #[test]
    fn blank_folder_name_is_rejected() {
        let req = CreateFolderRequest {
            folder_name: "   ".to_string(),
        };
        assert_eq!(req.check().unwrap_err().message, "folder_name required");
    }

    #[test]
    fn overlong_folder_name_has_its_own_message() {
        let req = CreateFolderRequest {
            folder_name: "a".repeat(300),
        };
        assert_eq!(
            req.check().unwrap_err().message,
            "folder_name must be at most 255 characters"
        );

        let req = CreateFolderRequest {
            folder_name: "a".repeat(MAX_FOLDER_NAME_CHARS),
        };
        assert!(req.check().is_ok());
    }

    #[test]
    fn complete_login_passes() {
        let req = LoginRequest {
            email: "a@b.c".to_string(),
            password: "p".to_string(),
        };
        assert!(req.check().is_ok());
    }
}
