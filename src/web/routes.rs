//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Subsonic search endpoints
        .route("/rest/search2", get(handlers::search2))
        .route("/rest/search2.view", get(handlers::search2))
        .route("/rest/search3", get(handlers::search3))
        .route("/rest/search3.view", get(handlers::search3))
        // Operational routes
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        .layer(cors)
        .with_state(state)
}
