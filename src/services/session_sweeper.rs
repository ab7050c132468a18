use std::time::Duration;

use tokio::time::interval;
use tracing::debug;

use crate::state::SharedState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically drop expired sessions. Returns immediately when sessions never expire.
pub async fn run(state: SharedState) {
    if state.sessions().ttl().is_none() {
        return;
    }

    let mut ticker = interval(SWEEP_INTERVAL);
    loop {
        ticker.tick().await;
        let purged = state.sessions().purge_expired();
        if purged > 0 {
            debug!(purged, remaining = state.sessions().len(), "expired sessions purged");
        }
    }
}
