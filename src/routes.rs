use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Admin and lead routes, before any rate limiting is layered on.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/api_key/:aid", post(handlers::create_api_key))
        .route(
            "/admin/accounts/:aid/status",
            put(handlers::update_account_status),
        )
        .route("/api/leads", post(handlers::add_lead))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Final app: health check (never rate limited) merged with `api`.
pub fn build_router(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
