use axum::{Router, http::HeaderValue, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod error;
mod resources;
mod system;

pub use error::ApiError;

use crate::state::SharedState;

pub type AppState = Arc<SharedState>;

pub fn router(state: AppState) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/location", get(resources::location))
        .route("/weather", get(resources::weather))
        .route("/yelp", get(resources::yelp))
        .route("/movies", get(resources::movies))
        .route("/meetups", get(resources::meetups))
        .route("/trails", get(resources::trails))
        .route("/status", get(system::status))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
