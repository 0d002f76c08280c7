//! # Route Configuration
//!
//! Maps the REST surface onto handler functions and attaches the
//! request-tracing and CORS layers shared by every route.

use crate::api::rest::handlers::{
    AppState, create_event, create_market, create_position, health, list_events, list_markets,
    list_positions,
};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router over shared handler state.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/markets", get(list_markets).post(create_market))
        .route(
            "/api/v1/positions",
            get(list_positions).post(create_position),
        )
        .route("/api/v1/events", get(list_events).post(create_event))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
