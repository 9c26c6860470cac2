use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use wordpan_store::AuthUser;

use crate::api::ApiError;
use crate::AppState;

/// The authenticated learner and the token they presented, stored in
/// request extensions.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user: AuthUser,
    pub token: String,
}

/// Pulls the token out of an `Authorization` header value.
///
/// `Bearer <jwt>` yields the second space-separated field; a value without
/// spaces is taken whole.
pub fn extract_token(header: &str) -> &str {
    if header.contains(' ') {
        header.split(' ').nth(1).unwrap_or_default()
    } else {
        header
    }
}

/// Middleware to authenticate requests via `Authorization: Bearer <jwt>`.
///
/// The JWT is checked by the auth service, not locally.
pub async fn auth_middleware(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .map(|value| value.to_str().unwrap_or_default().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is required".to_string()))?;
    let token = extract_token(&header).to_string();

    let state = req
        .extensions()
        .get::<Arc<AppState>>()
        .ok_or_else(|| ApiError::InternalServerError("application state missing".to_string()))?
        .clone();

    let user = state.backend.authenticate(&token).await.map_err(|e| {
        tracing::debug!("authentication rejected: {}", e);
        ApiError::Unauthorized(format!("Authentication failed: {e}"))
    })?;

    req.extensions_mut().insert(AuthContext { user, token });
    Ok(next.run(req).await)
}
