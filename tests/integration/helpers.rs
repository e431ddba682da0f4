//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use filefort_cache::CacheManager;
use filefort_core::config::{AppConfig, BootstrapAdminConfig};
use filefort_database::Repositories;
use filefort_storage::StorageManager;
use filefort_storage::providers::MemoryBlobStore;

pub const ADMIN_EMAIL: &str = "admin@filefort.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

const BOUNDARY: &str = "filefort-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Blob store behind the router, for direct inspection
    pub blobs: MemoryBlobStore,
    /// Application config
    pub config: AppConfig,
}

/// Response status and parsed JSON body
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `message` field of the envelope.
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `data` field of the envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = "memory".to_string();
    config.cache.provider = "memory".to_string();
    config.storage.provider = "memory".to_string();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.argon2.memory_cost_kib = 1024;
    config.auth.argon2.time_cost = 1;
    config.auth.bootstrap_admin = Some(BootstrapAdminConfig {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        first_name: "Admin".to_string(),
        last_name: "Admin".to_string(),
    });
    config
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom upload limit
    pub async fn with_upload_limit(bytes: u64) -> Self {
        let mut config = test_config();
        config.server.max_upload_size_bytes = bytes;
        Self::with_config(config).await
    }

    async fn with_config(config: AppConfig) -> Self {
        let repos = Repositories::in_memory();
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let blobs = MemoryBlobStore::new();
        let storage = Arc::new(StorageManager::from_store(
            Arc::new(blobs.clone()),
            Duration::from_secs(config.storage.presign_ttl_seconds),
        ));

        let state = filefort_api::build_state(config.clone(), repos, cache, storage)
            .expect("Failed to build state");
        filefort_api::seed_admin(&state)
            .await
            .expect("Failed to seed admin");

        Self {
            router: filefort_api::build_router(state),
            blobs,
            config,
        }
    }

    /// Register a user through the API
    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "email": email,
                "first_name": "Test",
                "last_name": "User",
                "password": password,
            })),
            None,
        )
        .await
    }

    /// Login and return JWT access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/users/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.data()["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register then login, returning the token
    pub async fn signup(&self, email: &str) -> String {
        let response = self.register(email, "password123").await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        self.login(email, "password123").await
    }

    /// Login as the seeded administrator
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        self.send(req.body(body).expect("Failed to build request"))
            .await
    }

    /// Build a multipart/form-data body
    pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(file_name, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    /// POST /file with a multipart body
    pub async fn upload(
        &self,
        token: &str,
        parts: &[Part<'_>],
        with_content_length: bool,
    ) -> TestResponse {
        let body = Self::multipart_body(parts);
        let mut req = Request::builder()
            .method("POST")
            .uri("/file")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if with_content_length {
            req = req.header(header::CONTENT_LENGTH, body.len());
        }

        self.send(req.body(Body::from(body)).expect("Failed to build request"))
            .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
