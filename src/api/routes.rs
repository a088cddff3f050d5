//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    analytics_handler, cleanup_handler, details_handler, fingerprint_handler, get_handler,
    health_handler, invalidate_handler, performance_handler, put_handler, search_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Store a computed value
/// - `GET /cache/:key` - Read a fresh value (404 on miss)
/// - `DELETE /cache/:key` - Invalidate a key
/// - `GET /cache/:key/details` - Age, TTL and usage of an entry
/// - `GET /search` - Search values and metadata
/// - `POST /fingerprint` - Derive a cache key from a message and context
/// - `POST /cleanup` - Run a cleanup pass now
/// - `GET /stats` - Entry counts and hit totals
/// - `GET /stats/performance` - Hit rate and most used entries
/// - `GET /stats/analytics` - Hourly activity and hits-per-hour ranking
/// - `GET /health` - Health check with cache probe
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", put(put_handler))
        .route("/cache/:key", get(get_handler).delete(invalidate_handler))
        .route("/cache/:key/details", get(details_handler))
        .route("/search", get(search_handler))
        .route("/fingerprint", post(fingerprint_handler))
        .route("/cleanup", post(cleanup_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/performance", get(performance_handler))
        .route("/stats/analytics", get(analytics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
