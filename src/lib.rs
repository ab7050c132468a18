//! Library crate for mrcoffee-back, exposing modules for binaries and integration tests.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Settings file and environment configuration.
pub mod config;
/// Entities and storage backends.
pub mod dao;
/// Request and response bodies.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP routers and handlers.
pub mod routes;
/// Business logic used by the handlers and background tasks.
pub mod services;
/// Shared application state and sessions.
pub mod state;

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
