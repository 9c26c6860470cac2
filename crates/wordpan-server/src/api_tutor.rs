//! Handler for the tutor chat.

use crate::api::{json_object, user_context, ApiError};
use crate::middleware::AuthContext;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Json},
};
use serde_json::Value;
use std::sync::Arc;
use wordpan_tutor::DeckAccess;
use wordpan_types::{ChatMessage, Role, TutorMessage};

/// Keeps turns with a known role and non-blank content, both trimmed.
pub fn validate_messages(items: &[Value]) -> Vec<ChatMessage> {
    items
        .iter()
        .filter_map(|item| {
            let text = |key: &str| {
                item.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
            };
            let role = Role::parse(text("role"))?;
            let content = text("content");
            (!content.is_empty()).then(|| ChatMessage::new(role, content))
        })
        .collect()
}

/// Handler for `POST /api/tutor-chat`.
pub async fn tutor_chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<TutorMessage>, ApiError> {
    let messages = json_object(&body)
        .and_then(|mut data| data.remove("messages"))
        .ok_or_else(|| {
            ApiError::BadRequest("Request body must include 'messages' array".into())
        })?;

    let messages = match messages {
        Value::Array(items) if !items.is_empty() => validate_messages(&items),
        _ => {
            return Err(ApiError::BadRequest(
                "'messages' must be a non-empty array".into(),
            ))
        }
    };
    if messages.is_empty() {
        return Err(ApiError::BadRequest("No valid messages provided".into()));
    }

    let context = user_context(&state, &auth.user.id).await;
    let deck = DeckAccess {
        user_id: auth.user.id.clone(),
        deck: state.backend.deck_for(&auth.token),
    };

    let reply = state
        .tutor
        .run(
            &messages,
            Some(context.as_deref().unwrap_or_default()),
            Some(deck),
        )
        .await
        .map_err(|e| {
            tracing::error!(user_id = %auth.user.id, "tutor chat failed: {}", e);
            ApiError::InternalServerError(e.to_string())
        })?;

    Ok(Json(reply))
}
