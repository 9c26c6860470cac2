use axum::{body::Bytes, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use livekit_protocol as proto;
use prost::Message;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use wordpan_voice::{LiveKitConfig, VoiceError, VoiceService};

const KEY: &str = "devkey";
const SECRET: &str = "secret";

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
    video: VideoClaims,
}

#[derive(Deserialize)]
struct VideoClaims {
    #[serde(default)]
    room: String,
    #[serde(rename = "roomJoin", default)]
    room_join: bool,
    #[serde(rename = "roomAdmin", default)]
    room_admin: bool,
    #[serde(rename = "canPublish", default)]
    can_publish: bool,
    #[serde(rename = "canSubscribe", default)]
    can_subscribe: bool,
    #[serde(rename = "canPublishData", default)]
    can_publish_data: bool,
}

fn decode_claims(token: &str) -> Claims {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    decode::<Claims>(token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
        .expect("token should decode")
        .claims
}

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("ws://{addr}")
}

#[test]
fn join_token_grants_room_access() {
    let service = VoiceService::new(LiveKitConfig::new("ws://localhost:7880", KEY, SECRET));

    let token = service
        .generate_join_token("wordpan-voice-user-1", "user-1")
        .unwrap();
    let claims = decode_claims(&token);

    assert_eq!(claims.sub, "user-1");
    assert_eq!(claims.video.room, "wordpan-voice-user-1");
    assert!(claims.video.room_join);
    assert!(claims.video.can_publish);
    assert!(claims.video.can_subscribe);
    assert!(claims.video.can_publish_data);
    assert!(!claims.video.room_admin);
}

#[tokio::test]
async fn dispatch_posts_twirp_request_with_admin_token() {
    type Seen = (String, String, proto::CreateAgentDispatchRequest);
    let seen: Arc<Mutex<Option<Seen>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let router = Router::new().route(
        "/twirp/livekit.AgentDispatchService/CreateDispatch",
        post(move |headers: HeaderMap, body: Bytes| {
            let captured = captured.clone();
            async move {
                let header = |name: &str| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                };
                let request = proto::CreateAgentDispatchRequest::decode(body).unwrap();
                *captured.lock().unwrap() =
                    Some((header("authorization"), header("content-type"), request.clone()));
                proto::AgentDispatch {
                    id: "AD_123".into(),
                    agent_name: request.agent_name,
                    room: request.room,
                    ..Default::default()
                }
                .encode_to_vec()
            }
        }),
    );
    let url = spawn_server(router).await;
    let service = VoiceService::new(LiveKitConfig::new(url, KEY, SECRET));

    let id = service.dispatch_agent("room-1").await.unwrap();
    assert_eq!(id.as_deref(), Some("AD_123"));

    let (auth, content_type, request) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(content_type, "application/protobuf");
    assert_eq!(request.agent_name, "wordpan-voice-agent");
    assert_eq!(request.room, "room-1");
    let token = auth.strip_prefix("Bearer ").unwrap();
    let claims = decode_claims(token);
    assert!(claims.video.room_admin);
    assert_eq!(claims.video.room, "room-1");
}

#[tokio::test]
async fn dispatch_failure_is_an_error() {
    let router = Router::new().route(
        "/twirp/livekit.AgentDispatchService/CreateDispatch",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"code": "unauthenticated", "msg": "invalid token"})),
            )
        }),
    );
    let url = spawn_server(router).await;
    let service = VoiceService::new(LiveKitConfig::new(url, KEY, SECRET));

    let err = service.dispatch_agent("room-1").await.unwrap_err();
    assert!(matches!(err, VoiceError::Dispatch(ref m) if m.contains("unauthenticated")));
}
