//! Router assembly for the gosh HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with the
//! response cache, CORS, and tracing middleware layers.

use axum::middleware;
use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::{cache_responses, STREAM_PATH};
use crate::handlers;
use crate::state::AppState;
use crate::stream;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. The stream route accepts any
/// method so that every non-upgrade request gets the same 426 answer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route(
            "/api/program",
            get(handlers::programs::search_programs).post(handlers::programs::create_program),
        )
        .route("/api/program/{id}", get(handlers::programs::get_program))
        .route(STREAM_PATH, any(stream::stream_search))
        .layer(middleware::from_fn_with_state(
            state.cache.clone(),
            cache_responses,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
