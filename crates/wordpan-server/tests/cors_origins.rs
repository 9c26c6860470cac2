mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::test_app_with;
use tower::ServiceExt;
use wordpan_voice::LiveKitConfig;

#[tokio::test]
async fn allowed_origin_passes_preflight_with_credentials() {
    let origin = "http://localhost:5173";
    let app = test_app_with(
        Vec::new(),
        LiveKitConfig::default(),
        vec![origin.to_string()],
    );

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tutor-chat")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(preflight).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some(origin)
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn unknown_origin_gets_no_allow_header() {
    let app = test_app_with(
        Vec::new(),
        LiveKitConfig::default(),
        vec!["http://localhost:5173".to_string()],
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn wildcard_origin_mirrors_caller_with_credentials() {
    let app = test_app_with(Vec::new(), LiveKitConfig::default(), vec!["*".to_string()]);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://example.test")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://example.test")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}
