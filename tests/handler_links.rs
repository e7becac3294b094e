mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_success() {
    let server = common::create_test_server().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["original_url"], "https://example.com");
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["created"], true);
}

#[tokio::test]
async fn test_create_link_deduplicates_url() {
    let server = common::create_test_server().await;

    let first = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    let second = response.json::<Value>();
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["short_code"], first["short_code"]);
    assert_eq!(second["created"], false);

    let links = server.get("/api/links").await.json::<Vec<Value>>();
    assert_eq!(links.len(), 1);
}

#[tokio::test]
async fn test_create_link_empty_url() {
    let server = common::create_test_server().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_link_url_too_long() {
    let server = common::create_test_server().await;
    let url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": url }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_links_in_creation_order() {
    let server = common::create_test_server().await;

    for url in ["https://c.com", "https://a.com", "https://b.com"] {
        server
            .post("/api/links")
            .json(&json!({ "original_url": url }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let links = server.get("/api/links").await.json::<Vec<Value>>();
    let urls: Vec<&str> = links
        .iter()
        .map(|l| l["original_url"].as_str().unwrap())
        .collect();

    assert_eq!(urls, vec!["https://c.com", "https://a.com", "https://b.com"]);
}

#[tokio::test]
async fn test_get_link() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server.get(&format!("/api/links/{}", created["id"])).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["short_code"], created["short_code"]);

    server.get("/api/links/999").await.assert_status_not_found();
}

#[tokio::test]
async fn test_update_link() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();
    let old_code = created["short_code"].as_str().unwrap().to_string();
    let new_code = if old_code == "Custom" { "Other1" } else { "Custom" };

    let response = server
        .put(&format!("/api/links/{}", created["id"]))
        .json(&json!({ "original_url": "https://example.org", "short_code": new_code }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["original_url"], "https://example.org");
    assert_eq!(json["short_code"], new_code);

    server
        .get(&format!("/{new_code}"))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
    server
        .get(&format!("/{old_code}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_link_invalid_code() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server
        .put(&format!("/api/links/{}", created["id"]))
        .json(&json!({ "original_url": "https://example.com", "short_code": "ab-c_d" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_link_code_conflict() {
    let server = common::create_test_server().await;
    let first = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://a.com" }))
        .await
        .json::<Value>();
    let second = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://b.com" }))
        .await
        .json::<Value>();

    let response = server
        .put(&format!("/api/links/{}", second["id"]))
        .json(&json!({ "original_url": "https://b.com", "short_code": first["short_code"] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_update_missing_link() {
    let server = common::create_test_server().await;

    let response = server
        .put("/api/links/999")
        .json(&json!({ "original_url": "https://example.com", "short_code": "abc123" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();
    let path = format!("/api/links/{}", created["id"]);

    server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get(&path).await.assert_status_not_found();
    server.delete(&path).await.assert_status_not_found();
    server
        .get(&format!("/{}", created["short_code"].as_str().unwrap()))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_share_link() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server
        .get(&format!("/api/links/{}/share", created["id"]))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["short_url"], created["short_url"]);
}

#[tokio::test]
async fn test_create_link_rejects_control_characters() {
    let server = common::create_test_server().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com/a\nb" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");

    let links = server.get("/api/links").await.json::<Vec<Value>>();
    assert!(links.is_empty());
}

#[tokio::test]
async fn test_update_link_rejects_control_characters() {
    let server = common::create_test_server().await;
    let created = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();

    let response = server
        .put(&format!("/api/links/{}", created["id"]))
        .json(&json!({ "original_url": "https://example.com/\r\n", "short_code": "abc123" }))
        .await;

    response.assert_status_bad_request();
    server
        .get(&format!("/{}", created["short_code"].as_str().unwrap()))
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}
