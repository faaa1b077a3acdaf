//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    fetch_handler, get_entry_handler, health_handler, put_entry_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// Entry keys are taken from the rest of the path, so keys may contain `/`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/entries/*key", put(put_entry_handler).get(get_entry_handler))
        .route("/fetch", get(fetch_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
