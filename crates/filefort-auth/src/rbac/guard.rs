//! Role checks for administrative routes.

use filefort_core::error::AppError;
use filefort_entity::user::UserRole;

/// Allow only administrators through.
pub fn require_admin(role: UserRole) -> Result<(), AppError> {
    match role {
        UserRole::Admin => Ok(()),
        UserRole::Regular => Err(AppError::not_admin("not admin")),
    }
}
