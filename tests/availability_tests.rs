//! Integration tests for `POST /api/dns/check-subdomain`.
//!
//! The availability check is public and read-only: it consults the request
//! store and the DNS provider concurrently and never reserves anything.

use axum::http::StatusCode;

mod common;
use common::{
    build_test_app, create_test_db, create_test_user, insert_request, json_request,
    MockDnsProvider,
};

#[tokio::test]
async fn short_label_is_rejected_without_any_lookup() {
    let db = create_test_db().await;
    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns.clone());

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "ab" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 3"));
    // The expensive checks never ran
    assert_eq!(dns.find_count(), 0);
}

#[tokio::test]
async fn free_label_is_available() {
    let db = create_test_db().await;
    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns.clone());

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "myapp" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(dns.find_count(), 1);
    assert_eq!(
        dns.queried_fqdns.lock().unwrap().as_slice(),
        ["myapp.example.test"]
    );
}

#[tokio::test]
async fn input_is_sanitized_before_checking() {
    let db = create_test_db().await;
    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns.clone());

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "  My_App  " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
    assert_eq!(
        dns.queried_fqdns.lock().unwrap().as_slice(),
        ["myapp.example.test"]
    );
}

#[tokio::test]
async fn label_with_live_request_is_taken() {
    let db = create_test_db().await;
    let user = create_test_user(&db, "owner@example.com", None).await;
    insert_request(&db, user.id, "taken", "A", "1.2.3.4", "pending").await;

    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns.clone());

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "taken" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Taken locally even though the provider reports nothing
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn approved_request_blocks_label_too() {
    let db = create_test_db().await;
    let user = create_test_user(&db, "owner@example.com", None).await;
    insert_request(&db, user.id, "shipped", "A", "1.2.3.4", "approved").await;

    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns);

    let (_, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "shipped" })),
    )
    .await;

    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn label_with_live_provider_record_is_taken() {
    let db = create_test_db().await;
    let dns = MockDnsProvider::with_existing(&["ghost.example.test"]);
    let app = build_test_app(db, dns);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Taken at the provider even though the local store is empty
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn rejected_request_frees_its_label() {
    let db = create_test_db().await;
    let user = create_test_user(&db, "owner@example.com", None).await;
    insert_request(&db, user.id, "freed", "A", "1.2.3.4", "rejected").await;

    let dns = MockDnsProvider::new();
    let app = build_test_app(db, dns);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "freed" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);
}

#[tokio::test]
async fn provider_failure_is_an_error_not_available() {
    let db = create_test_db().await;
    let dns = MockDnsProvider::new();
    dns.fail_find
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let app = build_test_app(db, dns);

    let (status, body) = json_request(
        app,
        "POST",
        "/api/dns/check-subdomain",
        None,
        Some(serde_json::json!({ "subdomain": "anything" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("simulated outage"));
}
