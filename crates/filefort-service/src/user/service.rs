//! Account lifecycle: registration, login, profile, logout, admin seeding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use filefort_auth::{PasswordHasher, SessionAuthority};
use filefort_core::config::BootstrapAdminConfig;
use filefort_core::error::{AppError, ErrorKind};
use filefort_database::repositories::UserRepository;
use filefort_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Input for a new account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterUser {
    /// Login email; compared case-insensitively.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plain-text password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Handles account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<PasswordHasher>,
    sessions: Arc<SessionAuthority>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<SessionAuthority>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    /// Register a regular account.
    pub async fn register(&self, req: RegisterUser) -> Result<User, AppError> {
        self.create_account(req, UserRole::Regular).await
    }

    async fn create_account(&self, req: RegisterUser, role: UserRole) -> Result<User, AppError> {
        let email = normalize_email(&req.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("user already exists"));
        }

        let hash = self.hasher.hash_password(&req.password)?;
        let user = User::new(
            email,
            req.first_name.trim(),
            req.last_name.trim(),
            hash,
            role,
        );
        let user = self.users.create(&user).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verify credentials and start a new session, replacing any previous one.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::not_found("user does not exist"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::invalid_credentials("invalid credentials"));
        }

        let issued = self.sessions.establish(&user).await?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            access_token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user does not exist"))
    }

    /// End the caller's session.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.sessions.revoke(ctx.user_id).await
    }

    /// Make sure the configured administrator account exists.
    ///
    /// An existing account with the same email is left untouched.
    pub async fn ensure_admin(&self, config: &BootstrapAdminConfig) -> Result<User, AppError> {
        if let Some(existing) = self.users.find_by_email(&normalize_email(&config.email)).await? {
            if !existing.is_admin() {
                warn!(
                    user_id = %existing.id,
                    "Bootstrap admin email belongs to a regular account"
                );
            }
            return Ok(existing);
        }

        let req = RegisterUser {
            email: config.email.clone(),
            first_name: config.first_name.clone(),
            last_name: config.last_name.clone(),
            password: config.password.clone(),
        };
        match self.create_account(req, UserRole::Admin).await {
            Ok(user) => Ok(user),
            // Another instance seeded it first.
            Err(e) if e.is(ErrorKind::Conflict) => self
                .users
                .find_by_email(&normalize_email(&config.email))
                .await?
                .ok_or(e),
            Err(e) => Err(e),
        }
    }
}
