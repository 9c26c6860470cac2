mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{post_json, send, test_app};
use serde_json::json;

#[tokio::test]
async fn health_is_public() {
    let app = test_app(Vec::new());
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn missing_header_is_rejected() {
    let app = test_app(Vec::new());

    for uri in [
        "/api/random-phrase",
        "/api/similar-words",
        "/api/livekit-token",
        "/api/tutor-chat",
    ] {
        let (status, body) = send(&app.router, post_json(uri, None, "{}")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Authorization header is required");
    }
    assert!(app.model.requests().is_empty());
}

#[tokio::test]
async fn unknown_token_is_rejected() {
    let app = test_app(Vec::new());

    let (status, body) = send(
        &app.router,
        post_json("/api/similar-words", Some("stale"), "{}"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Authentication failed: "), "{message}");
}

#[tokio::test]
async fn bare_token_without_scheme_is_accepted() {
    let app = test_app(Vec::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/similar-words")
        .header(header::AUTHORIZATION, common::TOKEN)
        .body(Body::from("{}"))
        .unwrap();

    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
