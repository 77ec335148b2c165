use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::health::dtos::HealthResponseDto;
use crate::features::reports::ReportService;
use crate::modules::classifier::RoboflowClient;

#[derive(Clone)]
pub struct HealthState {
    pub report_service: Arc<ReportService>,
    pub classifier: Arc<RoboflowClient>,
}

/// Report liveness and integration status. Never touches the network.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponseDto)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "online".to_string(),
        classifier_configured: state.classifier.is_configured(),
        classifier_model: state.classifier.model().to_string(),
        persistence_configured: state.report_service.is_configured(),
    })
}
