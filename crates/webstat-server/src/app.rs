use std::sync::Arc;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use webstat_core::config::Config;

use crate::{auth::middleware::resolve_identity, routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `CorsLayer` — configured origins, or any origin when none are set.
/// 2. `TraceLayer` — structured request/response logging via `tracing`.
/// 3. `resolve_identity` — analytics routes only; attaches the caller's
///    identity (possibly absent) for the ownership gate.
pub fn build_app(state: Arc<AppState>) -> Router {
    let identity_state = Arc::clone(&state);
    let analytics = Router::new()
        .route(
            "/api/w/{website}",
            get(routes::analytics::website_analytics),
        )
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            resolve_identity(Arc::clone(&identity_state), request, next)
        }));

    Router::new()
        .route("/health", get(routes::health::health))
        .merge(analytics)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
