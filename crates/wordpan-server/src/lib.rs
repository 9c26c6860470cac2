//! Wordpan HTTP service library logic.

pub mod api;
pub mod api_tutor;
pub mod api_voice;
pub mod config;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use wordpan_llm::ChatModel;
use wordpan_store::Backend;
use wordpan_tutor::TutorRouter;
use wordpan_voice::VoiceService;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Supabase (or a stand-in): auth, profiles and decks.
    pub backend: Arc<dyn Backend>,
    /// Chat model used by the practice crews.
    pub model: Arc<dyn ChatModel>,
    /// Intent router for the tutor chat.
    pub tutor: TutorRouter,
    /// Voice service.
    pub voice_service: Arc<VoiceService>,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn Backend>,
        model: Arc<dyn ChatModel>,
        voice_service: VoiceService,
        cors_origins: Vec<String>,
    ) -> Self {
        Self {
            backend,
            tutor: TutorRouter::new(model.clone()),
            model,
            voice_service: Arc::new(voice_service),
            cors_origins,
        }
    }
}

/// Maximum request body size (2 MiB). Protects against OOM from oversized payloads.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// `*` cannot be combined with credentials, so it mirrors the caller's origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(origin_values(origins))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn origin_values(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/random-phrase", post(api::random_phrase_handler))
        .route("/api/similar-words", post(api::similar_words_handler))
        .route("/api/livekit-token", post(api_voice::livekit_token_handler))
        .route("/api/tutor-chat", post(api_tutor::tutor_chat_handler))
        .layer(axum::middleware::from_fn(middleware::auth_middleware));

    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/health", get(api::health))
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
