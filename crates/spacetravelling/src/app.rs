use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::{healthz, livez},
        post::show_post,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Anything that isn't a page is looked up in the public directory
    let assets = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/post/{slug}", get(show_post))
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
