//! HTTP surface: routing, auth, and error mapping.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{seed_user, test_pool};
use lingo_connect::web::build_router;

fn cookie_for(user_id: &str) -> String {
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(json!({ "sub": user_id }).to_string());
    format!("access_token=eyJhbGciOiJIUzI1NiJ9.{}.signature", payload)
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(header::COOKIE, cookie_for(user));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn app_with_users() -> Router {
    let pool = test_pool().await;
    seed_user(&pool, "alice", "Alice", true).await;
    seed_user(&pool, "bob", "Bob", true).await;
    seed_user(&pool, "carol", "Carol", false).await;
    build_router(pool)
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = app_with_users().await;
    let (status, body) = call(&app, "GET", "/api/users/friends", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn responses_are_not_cached() {
    let app = app_with_users().await;
    let request = Request::builder()
        .uri("/api/users/recommendations")
        .header(header::COOKIE, cookie_for("alice"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn friend_request_flow_over_http() {
    let app = app_with_users().await;

    let (status, body) =
        call(&app, "GET", "/api/users/recommendations", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    let recommended: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(recommended, vec!["bob"]);

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("alice"),
        Some(json!({ "target_id": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    let request_id = body["request_id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("bob"),
        Some(json!({ "target_id": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_request");

    let (status, body) =
        call(&app, "GET", "/api/friend-requests/outgoing", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["request_id"], request_id.as_str());
    assert_eq!(body[0]["recipient"]["full_name"], "Bob");

    let accept_uri = format!("/api/friend-requests/{}/accept", request_id);
    let (status, body) = call(&app, "POST", &accept_uri, Some("alice"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = call(&app, "POST", &accept_uri, Some("bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    let (status, body) = call(&app, "GET", "/api/users/friends", Some("bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["user_id"], "alice");

    let (_, body) = call(&app, "GET", "/api/friend-requests/accepted", Some("alice"), None).await;
    assert_eq!(body[0]["role"], "sender");
    assert_eq!(body[0]["other_user"]["user_id"], "bob");
    assert_eq!(body[0]["request"]["status"], "accepted");

    let (_, body) = call(&app, "GET", "/api/friend-requests", Some("bob"), None).await;
    assert_eq!(body["incoming_requests"].as_array().unwrap().len(), 0);
    assert_eq!(body["accepted_requests"][0]["role"], "recipient");

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("bob"),
        Some(json!({ "target_id": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_friends");
}

#[tokio::test]
async fn domain_errors_have_distinct_codes() {
    let app = app_with_users().await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("alice"),
        Some(json!({ "target_id": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "self_request");

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("alice"),
        Some(json!({ "target_id": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) =
        call(&app, "POST", "/api/friend-requests/nope/accept", Some("bob"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn bad_send_bodies_use_the_error_shape() {
    let app = app_with_users().await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("alice"),
        Some(json!({ "target": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_body");
    assert!(body["message"].as_str().unwrap().contains("target_id"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/friend-requests")
        .header(header::COOKIE, cookie_for("alice"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_body");
}

#[tokio::test]
async fn incoming_lists_pending_requests_with_sender() {
    let app = app_with_users().await;
    call(
        &app,
        "POST",
        "/api/friend-requests",
        Some("carol"),
        Some(json!({ "target_id": "bob" })),
    )
    .await;

    let (status, body) =
        call(&app, "GET", "/api/friend-requests/incoming", Some("bob"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["sender"]["user_id"], "carol");
    assert_eq!(body[0]["sender_id"], "carol");
}
