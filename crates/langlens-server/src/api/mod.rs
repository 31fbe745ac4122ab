//! API routes and handlers.

mod predict;
mod service;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Assemble the router: liveness root, predict endpoint, request tracing,
/// and CORS for the configured origins.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    // Credentials stay enabled, so methods and headers mirror the request
    // instead of using wildcards (wildcards cannot be combined with
    // credentials).
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/", get(service::info))
        .route("/predict", post(predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
