use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the installed game store and report whether the service is degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.game_store().await {
        Some(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "game store health check failed");
            }
        }
        None => warn!("game store unavailable (degraded mode)"),
    }

    if state.is_degraded() {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
