mod common;

use axum::http::StatusCode;
use common::{post_json, send, test_app, test_app_with, TOKEN, USER_ID};
use wordpan_voice::LiveKitConfig;

#[tokio::test]
async fn unconfigured_livekit_is_500() {
    let app = test_app(Vec::new());

    let (status, body) = send(
        &app.router,
        post_json("/api/livekit-token", Some(TOKEN), "{}"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("LiveKit is not configured."));
}

#[tokio::test]
async fn token_issued_even_when_dispatch_fails() {
    // Nothing listens on port 1, so agent dispatch fails.
    let app = test_app_with(
        Vec::new(),
        LiveKitConfig::new("ws://127.0.0.1:1", "devkey", "secret"),
        Vec::new(),
    );

    let (status, body) = send(
        &app.router,
        post_json("/api/livekit-token", Some(TOKEN), ""),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "ws://127.0.0.1:1");
    assert_eq!(body["roomName"], format!("wordpan-voice-{USER_ID}"));
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn requested_room_is_used() {
    let app = test_app_with(
        Vec::new(),
        LiveKitConfig::new("ws://127.0.0.1:1", "devkey", "secret"),
        Vec::new(),
    );

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/livekit-token",
            Some(TOKEN),
            r#"{"roomName": " quiz-room "}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roomName"], "quiz-room");
}
