#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wordpan_llm::{Completion, ScriptedModel};
use wordpan_server::{app, AppState};
use wordpan_store::MemoryStore;
use wordpan_voice::{LiveKitConfig, VoiceService};

pub const TOKEN: &str = "token-1";
pub const USER_ID: &str = "user-1";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub model: Arc<ScriptedModel>,
}

pub fn test_app(replies: Vec<Completion>) -> TestApp {
    test_app_with(replies, LiveKitConfig::default(), Vec::new())
}

pub fn test_app_with(
    replies: Vec<Completion>,
    livekit: LiveKitConfig,
    cors_origins: Vec<String>,
) -> TestApp {
    let store = MemoryStore::new();
    store.add_user(TOKEN, USER_ID);
    let model = Arc::new(ScriptedModel::new(replies));
    let state = AppState::new(
        Arc::new(store.clone()),
        model.clone(),
        VoiceService::new(livekit),
        cors_origins,
    );
    TestApp {
        router: app(state),
        store,
        model,
    }
}

pub fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response<Body> = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Every message text the model was shown, across all requests.
pub fn prompts(model: &ScriptedModel) -> Vec<String> {
    model
        .requests()
        .iter()
        .flat_map(|request| request.messages.iter())
        .filter_map(|message| message.content.clone())
        .collect()
}
