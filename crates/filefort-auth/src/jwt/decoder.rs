//! Bearer header parsing and JWT validation.

use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use filefort_core::config::AuthConfig;

use super::claims::Claims;
use super::error::TokenError;

const BEARER: &str = "Bearer ";

/// Extract the raw token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Result<&str, TokenError> {
    match header.strip_prefix(BEARER) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(TokenError::InvalidToken),
    }
}

/// Validates HS256 tokens signed with the server secret.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        // Expiry is checked by `decode_bearer` so it surfaces as its own error.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decode the token carried in an `Authorization` header value.
    pub fn decode_bearer(&self, header: &str) -> Result<Claims, TokenError> {
        let token = bearer_token(header)?;
        self.decode_token(token)
    }

    /// Decode a raw token string.
    pub fn decode_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::DecodingError)?;

        if data.claims.is_expired_at(Utc::now()) {
            return Err(TokenError::ExpiredToken);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use filefort_entity::user::{User, UserRole};
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn sign(secret: &str, payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_decodes_with_identity() {
        let cfg = config("s3cret");
        let user = User::new("a@b.c", "A", "B", "hash", UserRole::Admin);
        let issued = JwtEncoder::new(&cfg).issue(&user).unwrap();

        let claims = JwtDecoder::new(&cfg)
            .decode_bearer(&format!("Bearer {}", issued.token))
            .unwrap();
        assert_eq!(claims.sub, Some(user.id));
        assert_eq!(claims.role, Some(UserRole::Admin));
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn back_to_back_issuances_differ() {
        let cfg = config("s3cret");
        let encoder = JwtEncoder::new(&cfg);
        let user = User::new("a@b.c", "A", "B", "hash", UserRole::Regular);
        let first = encoder.issue(&user).unwrap();
        let second = encoder.issue(&user).unwrap();
        assert_ne!(first.token, second.token);

        let decoder = JwtDecoder::new(&cfg);
        let a = decoder.decode_token(&first.token).unwrap();
        let b = decoder.decode_token(&second.token).unwrap();
        assert!(a.jti.is_some());
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn missing_prefix_or_empty_token_is_invalid() {
        let decoder = JwtDecoder::new(&config("s3cret"));
        assert_eq!(decoder.decode_bearer("").unwrap_err(), TokenError::InvalidToken);
        assert_eq!(
            decoder.decode_bearer("Bearer ").unwrap_err(),
            TokenError::InvalidToken
        );
        assert_eq!(
            decoder.decode_bearer("Token abc").unwrap_err(),
            TokenError::InvalidToken
        );
    }

    #[test]
    fn wrong_secret_is_a_decoding_error() {
        let user = User::new("a@b.c", "A", "B", "hash", UserRole::Regular);
        let issued = JwtEncoder::new(&config("one")).issue(&user).unwrap();
        let err = JwtDecoder::new(&config("two"))
            .decode_bearer(&format!("Bearer {}", issued.token))
            .unwrap_err();
        assert_eq!(err, TokenError::DecodingError);
    }

    #[test]
    fn malformed_token_is_a_decoding_error() {
        let decoder = JwtDecoder::new(&config("s3cret"));
        assert_eq!(
            decoder.decode_bearer("Bearer not.a.jwt").unwrap_err(),
            TokenError::DecodingError
        );
    }

    #[test]
    fn past_expiry_is_reported_as_expired() {
        let token = sign(
            "s3cret",
            serde_json::json!({ "sub": uuid::Uuid::new_v4(), "role": "regular", "exp": Utc::now().timestamp() - 5 }),
        );
        let err = JwtDecoder::new(&config("s3cret"))
            .decode_bearer(&format!("Bearer {token}"))
            .unwrap_err();
        assert_eq!(err, TokenError::ExpiredToken);
    }

    #[test]
    fn absent_identity_fields_stay_empty() {
        let token = sign(
            "s3cret",
            serde_json::json!({ "exp": Utc::now().timestamp() + 60 }),
        );
        let claims = JwtDecoder::new(&config("s3cret"))
            .decode_bearer(&format!("Bearer {token}"))
            .unwrap();
        assert!(claims.sub.is_none());
        assert!(claims.role.is_none());
        assert!(claims.email.is_none());
    }

    #[test]
    fn unknown_role_is_a_decoding_error() {
        let token = sign(
            "s3cret",
            serde_json::json!({ "role": "root", "exp": Utc::now().timestamp() + 60 }),
        );
        let err = JwtDecoder::new(&config("s3cret"))
            .decode_bearer(&format!("Bearer {token}"))
            .unwrap_err();
        assert_eq!(err, TokenError::DecodingError);
    }
}
