use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use webstat_core::identity::Identity;

use crate::state::AppState;

use super::jwt::decode_jwt;

/// Name of the cookie carrying the session JWT.
pub const SESSION_COOKIE: &str = "webstat_session";

/// Identity resolved for the current request, injected into request
/// extensions. `None` when no valid token was presented.
#[derive(Debug, Clone, Default)]
pub struct CurrentIdentity(pub Option<Identity>);

/// Resolve the caller's identity from a Bearer token or the session cookie.
///
/// Never rejects: whether an absent identity may proceed is the ownership
/// gate's decision.
pub async fn resolve_identity(state: Arc<AppState>, mut request: Request, next: Next) -> Response {
    // Extract the token synchronously to avoid holding &Request across await.
    let token = bearer_token(request.headers()).or_else(|| session_cookie(request.headers()));

    let identity = match token {
        Some(token) => validate_jwt(&state, &token).await,
        None => None,
    };
    request.extensions_mut().insert(CurrentIdentity(identity));
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str
                .split(';')
                .find_map(|c| c.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
                .map(|t| t.to_string())
        })
}

async fn validate_jwt(state: &AppState, token: &str) -> Option<Identity> {
    let secret = match state.db.get_setting("jwt_secret").await {
        Ok(secret) => secret?,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load JWT secret");
            return None;
        }
    };
    match decode_jwt(token, &secret) {
        Ok(claims) => Some(claims.into()),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session token");
            None
        }
    }
}
