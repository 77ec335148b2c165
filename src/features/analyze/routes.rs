use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::features::analyze::handlers::analyze_image;
use crate::modules::classifier::RoboflowClient;

/// Create routes for the analyze feature
pub fn routes(client: Arc<RoboflowClient>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(analyze_image).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(client)
}
