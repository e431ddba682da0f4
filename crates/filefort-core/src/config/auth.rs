//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication, token, and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Must be set.
    #[serde(default)]
    pub jwt_secret: String,
    /// Lifetime of an issued token in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Lifetime of the server-held session pointer in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// Prefix of the cache key holding each user's active token.
    #[serde(default = "default_session_key_prefix")]
    pub session_key_prefix: String,
    /// Argon2 cost parameters.
    #[serde(default)]
    pub argon2: Argon2Config,
    /// Administrator account created at startup when absent.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_seconds: default_token_ttl(),
            session_ttl_seconds: default_session_ttl(),
            session_key_prefix: default_session_key_prefix(),
            argon2: Argon2Config::default(),
            bootstrap_admin: None,
        }
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    #[serde(default = "default_memory_cost")]
    pub memory_cost_kib: u32,
    /// Number of iterations.
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    /// Degree of parallelism.
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost_kib: default_memory_cost(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

/// Administrator account seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Admin email.
    pub email: String,
    /// Admin password (plain text, hashed before storage).
    pub password: String,
    /// Admin first name.
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    /// Admin last name.
    #[serde(default = "default_admin_name")]
    pub last_name: String,
}

fn default_token_ttl() -> u64 {
    600
}

fn default_session_ttl() -> u64 {
    1800
}

fn default_session_key_prefix() -> String {
    "file-fort-active-jwt-clients".to_string()
}

fn default_memory_cost() -> u32 {
    19_456
}

fn default_time_cost() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_admin_name() -> String {
    "admin".to_string()
}
