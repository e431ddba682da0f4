//! Integration tests for registration, login and the session gate.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_register_returns_user() {
    let app = helpers::TestApp::new().await;

    let response = app.register("Will@Example.com", "some-random-password").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "user created successfully");
    assert_eq!(response.data()["email"], "will@example.com");
    assert_eq!(response.data()["role"], "regular");
    assert!(response.data().get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_reports_first_missing_field() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({ "email": "a@b.c", "last_name": "x" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "password required");
}

#[tokio::test]
async fn test_register_without_body() {
    let app = helpers::TestApp::new().await;

    let response = app.request("POST", "/users", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "missing body request");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new().await;
    app.register("will@gmail.com", "some-random-password").await;

    let response = app.register("will@gmail.com", "passcode").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "user already exists");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "email": "nobody@x.io", "password": "p" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "user does not exist");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = helpers::TestApp::new().await;
    app.register("a@x.io", "password123").await;

    let response = app
        .request(
            "POST",
            "/users/login",
            Some(serde_json::json!({ "email": "a@x.io", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "invalid credentials");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = helpers::TestApp::new().await;

    let missing = app.request("GET", "/users/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "unauthorized");

    let garbage = app.request("GET", "/users/me", None, Some("not-a-jwt")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.message(), "unauthorized");
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = helpers::TestApp::new().await;
    let token = app.signup("me@x.io").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "me@x.io");
    assert_eq!(response.data()["first_name"], "Test");
}

#[tokio::test]
async fn test_second_login_invalidates_first_token() {
    let app = helpers::TestApp::new().await;
    let first = app.signup("twice@x.io").await;

    let second = app.login("twice@x.io", "password123").await;
    assert_ne!(first, second);

    let stale = app.request("GET", "/users/me", None, Some(&first)).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let fresh = app.request("GET", "/users/me", None, Some(&second)).await;
    assert_eq!(fresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = helpers::TestApp::new().await;
    let token = app.signup("bye@x.io").await;

    let response = app
        .request("POST", "/users/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["database"], "up");
    assert_eq!(response.data()["cache"], "up");
    assert_eq!(response.data()["storage"], "up");
}

#[tokio::test]
async fn test_health_degrades_when_store_is_down() {
    let app = helpers::TestApp::new().await;
    app.blobs.set_unavailable(true);

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.data()["storage"], "down");
}
