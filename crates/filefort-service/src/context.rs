//! Request context carrying the authenticated caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filefort_auth::Claims;
use filefort_core::error::AppError;
use filefort_entity::user::UserRole;

/// Who is acting on the current request.
///
/// Built by the authentication middleware from verified claims and passed
/// into every service method that acts on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The user's email at the time the token was issued.
    pub email: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: Option<String>) -> Self {
        Self {
            user_id,
            role,
            email,
        }
    }

    /// Build the context from verified claims.
    ///
    /// A token without a subject cannot act on anyone's behalf. A missing
    /// role claim grants no privileges.
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let user_id = claims
            .sub
            .ok_or_else(|| AppError::unauthorized("unauthorized"))?;
        Ok(Self {
            user_id,
            role: claims.role.unwrap_or_default(),
            email: claims.email,
        })
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_role_defaults_to_regular() {
        let id = Uuid::new_v4();
        let ctx = RequestContext::from_claims(Claims {
            sub: Some(id),
            role: None,
            email: None,
            exp: 0,
            iat: None,
            jti: None,
        })
        .unwrap();
        assert_eq!(ctx.user_id, id);
        assert_eq!(ctx.role, UserRole::Regular);
        assert!(!ctx.is_admin());
    }

    #[test]
    fn missing_subject_is_unauthorized() {
        let err = RequestContext::from_claims(Claims {
            sub: None,
            role: Some(UserRole::Admin),
            email: None,
            exp: 0,
            iat: None,
            jti: None,
        })
        .unwrap_err();
        assert_eq!(err.kind, filefort_core::error::ErrorKind::Unauthorized);
    }
}
