use axum::Router;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::state::SharedState;

/// Sign-up, login, logout and the session gate.
pub mod auth;
/// Swagger UI and the OpenAPI document.
pub mod docs;
/// Liveness endpoint.
pub mod health;
/// Schedule endpoints.
pub mod schedules;
/// User endpoints.
pub mod users;

/// Compose all route trees, wiring in shared state, documentation and static files.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(auth::public_router())
        .merge(auth::session_router(state.clone()))
        .merge(users::router(state.clone()))
        .merge(schedules::router(state.clone()))
        .merge(docs::router());

    let api_router = match state.config().static_dir.as_deref() {
        Some(dir) if dir.is_dir() => {
            info!(dir = %dir.display(), "serving static files");
            api_router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!(dir = %dir.display(), "static directory missing; static files disabled");
            api_router
        }
        None => api_router,
    };

    api_router.with_state(state)
}
