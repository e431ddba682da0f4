//! Integration tests for folders, uploads, downloads and unsafe-marking.

mod helpers;

use helpers::{Part, TestApp};
use http::StatusCode;

async fn create_folder(app: &TestApp, token: &str, name: &str) -> String {
    let response = app
        .request(
            "POST",
            "/folder",
            Some(serde_json::json!({ "folder_name": name })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_backup_lifecycle() {
    let app = TestApp::new().await;

    let alice = app.signup("alice@x.io").await;
    let docs = create_folder(&app, &alice, "docs").await;

    let uploaded = app
        .upload(
            &alice,
            &[Part::Text("folder_id", &docs), Part::File("report.pdf", b"%PDF-1.7")],
            true,
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::OK, "{:?}", uploaded.body);
    assert_eq!(uploaded.message(), "file uploaded successfully");
    let file_id = uploaded.data()["id"].as_str().unwrap().to_string();
    let store_key = uploaded.data()["file_store_key"].as_str().unwrap().to_string();
    assert_eq!(uploaded.data()["file_size"], 8);
    assert!(app.blobs.object(&store_key).is_some());

    let listing = app
        .request("GET", &format!("/folder/{docs}/files"), None, Some(&alice))
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    let items = listing.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], file_id.as_str());
    let me = app.request("GET", "/users/me", None, Some(&alice)).await;
    assert_eq!(items[0]["owner_id"], me.data()["id"]);

    let bob = app.signup("bob@x.io").await;
    let foreign = app
        .request("GET", &format!("/file/{file_id}"), None, Some(&bob))
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign.message(), "unauthorized to view this file");

    let admin = app.admin_token().await;
    let marked = app
        .request("POST", &format!("/file/{file_id}/mark-unsafe"), None, Some(&admin))
        .await;
    assert_eq!(marked.status, StatusCode::OK, "{:?}", marked.body);
    assert!(app.blobs.object(&store_key).is_none());

    let listing = app
        .request("GET", &format!("/folder/{docs}/files"), None, Some(&alice))
        .await;
    assert_eq!(listing.data()["items"].as_array().unwrap().len(), 0);
    assert_eq!(listing.data()["total_items"], 0);

    let gone = app
        .request("GET", &format!("/file/{file_id}"), None, Some(&alice))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.message(), "file does not exist");
}

#[tokio::test]
async fn test_download_returns_presigned_link() {
    let app = TestApp::new().await;
    let token = app.signup("dl@x.io").await;

    let uploaded = app
        .upload(&token, &[Part::File("a.txt", b"hello")], true)
        .await;
    let file_id = uploaded.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/file/{file_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["url"].as_str().unwrap().starts_with("memory://"));
    assert!(response.data()["expires_at"].is_string());
    assert_eq!(response.data()["file"]["file_name"], "a.txt");
}

#[tokio::test]
async fn test_upload_without_folder_uses_home_folder() {
    let app = TestApp::new().await;
    let token = app.signup("home@x.io").await;
    let me = app.request("GET", "/users/me", None, Some(&token)).await;
    let user_id = me.data()["id"].as_str().unwrap().to_string();

    let first = app.upload(&token, &[Part::File("1.txt", b"one")], true).await;
    let second = app.upload(&token, &[Part::File("2.txt", b"two")], true).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.data()["folder_id"], user_id.as_str());
    assert_eq!(second.data()["folder_id"], user_id.as_str());

    let listing = app
        .request("GET", &format!("/folder/{user_id}/files"), None, Some(&token))
        .await;
    assert_eq!(listing.data()["total_items"], 2);
}

#[tokio::test]
async fn test_foreign_folder_is_forbidden_not_missing() {
    let app = TestApp::new().await;
    let owner = app.signup("owner@x.io").await;
    let other = app.signup("other@x.io").await;
    let folder = create_folder(&app, &owner, "private").await;

    let listing = app
        .request("GET", &format!("/folder/{folder}/files"), None, Some(&other))
        .await;
    assert_eq!(listing.status, StatusCode::FORBIDDEN);
    assert_eq!(listing.message(), "unauthorized to view this folder");

    let upload = app
        .upload(
            &other,
            &[Part::Text("folder_id", &folder), Part::File("x.bin", b"x")],
            true,
        )
        .await;
    assert_eq!(upload.status, StatusCode::FORBIDDEN);
    assert_eq!(upload.message(), "unauthorized to upload to this folder");
    assert!(app.blobs.is_empty());

    let missing = app
        .request(
            "GET",
            &format!("/folder/{}/files", uuid::Uuid::new_v4()),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "folder does not exist");
}

#[tokio::test]
async fn test_invalid_ids_are_rejected() {
    let app = TestApp::new().await;
    let token = app.signup("ids@x.io").await;

    let download = app.request("GET", "/file/not-a-uuid", None, Some(&token)).await;
    assert_eq!(download.status, StatusCode::BAD_REQUEST);
    assert_eq!(download.message(), "ID is not in its proper form");

    let listing = app.request("GET", "/folder/123/files", None, Some(&token)).await;
    assert_eq!(listing.status, StatusCode::BAD_REQUEST);

    let upload = app
        .upload(
            &token,
            &[Part::Text("folder_id", "nope"), Part::File("a", b"a")],
            true,
        )
        .await;
    assert_eq!(upload.status, StatusCode::BAD_REQUEST);
    assert_eq!(upload.message(), "ID is not in its proper form");
}

#[tokio::test]
async fn test_pagination_is_clamped() {
    let app = TestApp::new().await;
    let token = app.signup("pages@x.io").await;
    let folder = create_folder(&app, &token, "many").await;
    for i in 0..3 {
        let name = format!("{i}.txt");
        app.upload(
            &token,
            &[Part::Text("folder_id", &folder), Part::File(&name, b"x")],
            true,
        )
        .await;
    }

    let page = app
        .request(
            "GET",
            &format!("/folder/{folder}/files?page=2&rows=2"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data()["items"].as_array().unwrap().len(), 1);
    assert_eq!(page.data()["total_items"], 3);

    let clamped = app
        .request(
            "GET",
            &format!("/folder/{folder}/files?page=0&rows=500"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(clamped.data()["page"], 1);
    assert_eq!(clamped.data()["page_size"], 20);
}

#[tokio::test]
async fn test_mark_unsafe_requires_admin() {
    let app = TestApp::new().await;
    let token = app.signup("plain@x.io").await;
    let uploaded = app.upload(&token, &[Part::File("a", b"a")], true).await;
    let file_id = uploaded.data()["id"].as_str().unwrap().to_string();

    let anonymous = app
        .request("POST", &format!("/file/{file_id}/mark-unsafe"), None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let regular = app
        .request("POST", &format!("/file/{file_id}/mark-unsafe"), None, Some(&token))
        .await;
    assert_eq!(regular.status, StatusCode::FORBIDDEN);
    assert_eq!(regular.message(), "not admin");
    assert_eq!(app.blobs.len(), 1);
}

#[tokio::test]
async fn test_mark_unsafe_twice_deletes_blob_once() {
    let app = TestApp::new().await;
    let token = app.signup("twice@x.io").await;
    let uploaded = app.upload(&token, &[Part::File("a", b"a")], true).await;
    let file_id = uploaded.data()["id"].as_str().unwrap().to_string();
    let admin = app.admin_token().await;

    let path = format!("/file/{file_id}/mark-unsafe");
    let first = app.request("POST", &path, None, Some(&admin)).await;
    let second = app.request("POST", &path, None, Some(&admin)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.blobs.delete_count(), 1);

    let missing = app
        .request(
            "POST",
            &format!("/file/{}/mark-unsafe", uuid::Uuid::new_v4()),
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_upload_rejected_by_declared_length() {
    let app = TestApp::with_upload_limit(1024).await;
    let token = app.signup("big@x.io").await;
    let data = vec![7u8; 4096];

    let response = app.upload(&token, &[Part::File("big.bin", &data)], true).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().starts_with("The file you are trying to upload exceeds"));
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_oversized_upload_rejected_while_streaming() {
    let app = TestApp::with_upload_limit(1024).await;
    let token = app.signup("stream@x.io").await;
    let data = vec![7u8; 4096];

    let response = app.upload(&token, &[Part::File("big.bin", &data)], false).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().starts_with("The file you are trying to upload exceeds"));
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let app = TestApp::new().await;
    let token = app.signup("nofile@x.io").await;

    let response = app.upload(&token, &[Part::Text("other", "x")], true).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Error retrieving file, please try again");
}

#[tokio::test]
async fn test_create_folder_requires_name() {
    let app = TestApp::new().await;
    let token = app.signup("folder@x.io").await;

    let response = app
        .request("POST", "/folder", Some(serde_json::json!({})), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "folder_name required");
}
