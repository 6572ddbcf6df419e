//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{cache_metrics_handler, health_handler, property_list, AppState};
use super::page_cache::page_cache;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties/` - Property listing, behind the page cache
/// - `GET /cache/metrics` - Cache hit/miss metrics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listing = Router::new()
        .route("/properties/", get(property_list))
        .route_layer(middleware::from_fn_with_state(state.clone(), page_cache));

    Router::new()
        .merge(listing)
        .route("/cache/metrics", get(cache_metrics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
