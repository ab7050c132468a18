use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether storage is reachable while logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let active_sessions = state.sessions().len();

    match state.require_roster_store().await {
        Ok(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "storage health check failed");
                return HealthResponse::degraded(active_sessions);
            }
        }
        Err(_) => warn!("storage unavailable (degraded mode)"),
    }

    if state.is_degraded().await {
        HealthResponse::degraded(active_sessions)
    } else {
        HealthResponse::ok(active_sessions)
    }
}
