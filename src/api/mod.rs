//! REST interface for map rendering surfaces.

pub mod handlers;
pub mod service;

pub use service::MapService;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_rest_router(service: Arc<MapService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/legend", get(handlers::get_legend))
        .route("/api/v1/centroids", get(handlers::get_centroids))
        .route("/api/v1/origins", post(handlers::list_origins))
        .route("/api/v1/scene", post(handlers::render_scene))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
