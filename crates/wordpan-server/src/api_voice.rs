//! Handler for issuing LiveKit tokens.

use crate::api::{json_object, ApiError};
use crate::middleware::AuthContext;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Json},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Response body for `POST /api/livekit-token`.
#[derive(Debug, Serialize)]
pub struct LiveKitTokenResponse {
    pub token: String,
    pub url: String,
    #[serde(rename = "roomName")]
    pub room_name: String,
}

/// Room used when the client does not name one.
pub fn default_room_name(user_id: &str) -> String {
    format!("wordpan-voice-{user_id}")
}

/// Handler for `POST /api/livekit-token`.
///
/// Dispatch failures are logged; the learner still gets a token.
pub async fn livekit_token_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<LiveKitTokenResponse>, ApiError> {
    let voice = &state.voice_service;
    if !voice.is_enabled() {
        return Err(ApiError::InternalServerError(
            "LiveKit is not configured. Please set LIVEKIT_URL, LIVEKIT_API_KEY, \
             and LIVEKIT_API_SECRET in the server environment."
                .into(),
        ));
    }

    let requested = json_object(&body)
        .and_then(|data| {
            data.get("roomName")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();
    let room_name = match requested.trim() {
        "" => default_room_name(&auth.user.id),
        name => name.to_string(),
    };

    let token = voice
        .generate_join_token(&room_name, &auth.user.id)
        .map_err(|e| {
            ApiError::InternalServerError(format!("Failed to create LiveKit token: {e}"))
        })?;

    if let Err(e) = voice.dispatch_agent(&room_name).await {
        tracing::warn!(
            room = %room_name,
            agent = voice.agent_name(),
            "failed to dispatch agent: {}",
            e
        );
    }

    Ok(Json(LiveKitTokenResponse {
        token,
        url: voice.get_url().to_string(),
        room_name,
    }))
}
