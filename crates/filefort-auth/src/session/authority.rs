//! Single-session authority.
//!
//! Each user has at most one accepted token: the one stored under
//! `prefix + user_id` by the most recent login. A token that still has a
//! valid signature and expiry is rejected once a newer login overwrote the
//! pointer or the pointer was deleted.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use filefort_cache::CacheManager;
use filefort_cache::keys;
use filefort_core::config::AuthConfig;
use filefort_core::error::AppError;
use filefort_core::traits::CacheProvider;
use filefort_entity::user::User;

use crate::jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, bearer_token};

/// Issues tokens and decides whether a presented token is the active one.
#[derive(Debug, Clone)]
pub struct SessionAuthority {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    cache: Arc<CacheManager>,
    key_prefix: String,
    session_ttl: Duration,
}

impl SessionAuthority {
    /// Build the authority from auth configuration and the shared cache.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            cache,
            key_prefix: config.session_key_prefix.clone(),
            session_ttl: Duration::from_secs(config.session_ttl_seconds),
        }
    }

    fn key(&self, user_id: Uuid) -> String {
        keys::active_session(&self.key_prefix, user_id)
    }

    /// Issue a token for `user` and make it the user's only active one.
    pub async fn establish(&self, user: &User) -> Result<IssuedToken, AppError> {
        let issued = self.encoder.issue(user)?;
        self.cache
            .set(&self.key(user.id), &issued.token, self.session_ttl)
            .await?;
        debug!(user_id = %user.id, "Stored active session");
        Ok(issued)
    }

    /// Whether the token in `header` is the one currently stored for `user_id`.
    ///
    /// A missing entry, a different token, or an unreachable cache all
    /// count as inactive.
    pub async fn is_active(&self, header: &str, user_id: Uuid) -> bool {
        let Ok(token) = bearer_token(header) else {
            return false;
        };
        match self.cache.get(&self.key(user_id)).await {
            Ok(Some(stored)) => stored.as_bytes() == token.as_bytes(),
            Ok(None) => false,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Session lookup failed");
                false
            }
        }
    }

    /// Decode the bearer header and require it to be the active session.
    pub async fn authenticate(&self, header: &str) -> Result<Claims, AppError> {
        let claims = self.decoder.decode_bearer(header).map_err(|e| {
            warn!(reason = %e, "Rejected bearer token");
            AppError::from(e)
        })?;

        let user_id = claims.sub.unwrap_or_else(Uuid::nil);
        if !self.is_active(header, user_id).await {
            warn!(user_id = %user_id, "Token is not the active session");
            return Err(AppError::unauthorized("unauthorized"));
        }
        Ok(claims)
    }

    /// Forget the active session of `user_id`, logging them out everywhere.
    pub async fn revoke(&self, user_id: Uuid) -> Result<(), AppError> {
        self.cache.delete(&self.key(user_id)).await?;
        info!(user_id = %user_id, "Session revoked");
        Ok(())
    }
}
