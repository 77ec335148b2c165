use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness plus which optional integrations are wired up
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "online")]
    pub status: String,
    pub classifier_configured: bool,
    #[schema(example = "visual-pollution-detection-04jk5/3")]
    pub classifier_model: String,
    pub persistence_configured: bool,
}
