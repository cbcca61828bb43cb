pub mod auth;
pub mod dashboard;
pub mod proxy;
pub mod session;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes, the gated `/api` and
/// `/dashboard` trees, and the static frontend as fallback.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let index = state.frontend_dir.join("index.html");
    let static_dir = ServeDir::new(&state.frontend_dir).fallback(ServeFile::new(index));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout));

    let gated = proxy::router()
        .merge(dashboard::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), session::require_session));

    public
        .merge(gated)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
