//! API handlers for the practice endpoints, and the shared error type.

use crate::middleware::AuthContext;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use wordpan_crews::{generate_random_phrase, suggest_similar_words};
use wordpan_types::{PhraseOutput, SimilarWordsOutput};

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Reads a JSON object body. Empty, malformed and non-object bodies all
/// read as `None` so each handler can answer with its own message.
pub(crate) fn json_object(body: &Bytes) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// The learner's profile context; lookup failures count as no context.
pub(crate) async fn user_context(state: &AppState, user_id: &str) -> Option<String> {
    match state.backend.user_context(user_id).await {
        Ok(context) => context,
        Err(e) => {
            tracing::warn!(user_id, "error fetching user context: {}", e);
            None
        }
    }
}

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy"
    }))
}

/// Handler for `POST /api/random-phrase`.
pub async fn random_phrase_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<PhraseOutput>, ApiError> {
    let words = json_object(&body)
        .and_then(|mut data| data.remove("words"))
        .ok_or_else(|| ApiError::BadRequest("Request body must include 'words' array".into()))?;

    let words: Vec<String> = match words {
        Value::Array(items) if !items.is_empty() => items
            .into_iter()
            .map(|item| match item {
                Value::String(word) => word,
                other => other.to_string(),
            })
            .collect(),
        _ => {
            return Err(ApiError::BadRequest(
                "'words' must be a non-empty array".into(),
            ))
        }
    };

    let context = user_context(&state, &auth.user.id).await;
    let phrase = generate_random_phrase(
        state.model.clone(),
        &words,
        context.as_deref().unwrap_or_default(),
    )
    .await
    .map_err(|e| {
        tracing::error!(user_id = %auth.user.id, "random phrase failed: {}", e);
        ApiError::InternalServerError(format!("An error occurred: {e}"))
    })?;

    Ok(Json(phrase))
}

/// Handler for `POST /api/similar-words`.
pub async fn similar_words_handler(
    Extension(state): Extension<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    body: Bytes,
) -> Result<Json<SimilarWordsOutput>, ApiError> {
    let data = json_object(&body)
        .filter(|data| data.contains_key("word1") && data.contains_key("word2"))
        .ok_or_else(|| {
            ApiError::BadRequest("Request body must include 'word1' and 'word2'".into())
        })?;

    let field = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    let (word1, word2) = (field("word1"), field("word2"));
    if word1.is_empty() || word2.is_empty() {
        return Err(ApiError::BadRequest(
            "'word1' and 'word2' must be non-empty".into(),
        ));
    }

    let similar = suggest_similar_words(state.model.clone(), &word1, &word2)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %auth.user.id, "similar words failed: {}", e);
            ApiError::InternalServerError(format!("An error occurred: {e}"))
        })?;

    Ok(Json(similar))
}
