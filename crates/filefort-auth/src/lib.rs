//! # filefort-auth
//!
//! Authentication and authorization for FileFort.
//!
//! ## Modules
//!
//! - `jwt`: HS256 token issuance and bearer-header validation
//! - `password`: Argon2id password hashing
//! - `session`: the single active session per user, kept in the cache
//! - `rbac`: the admin guard

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::PasswordHasher;
pub use rbac::require_admin;
pub use session::SessionAuthority;
