use axum::{routing::get, Router};

use crate::features::health::handlers::{health_check, HealthState};

/// Create routes for the health feature
pub fn routes(state: HealthState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .with_state(state)
}
