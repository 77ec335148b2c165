use utoipa::{Modify, OpenApi};

use crate::features::analyze::{dtos as analyze_dtos, handlers as analyze_handlers};
use crate::features::health::{dtos as health_dtos, handlers as health_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::shared::types::{ApiResponse, UpstreamErrorDetail};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health_handlers::health_check,
        // Reports
        reports_handlers::list_reports,
        reports_handlers::create_report,
        // Analyze
        analyze_handlers::analyze_image,
    ),
    components(
        schemas(
            ApiResponse<UpstreamErrorDetail>,
            UpstreamErrorDetail,
            health_dtos::HealthResponseDto,
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            analyze_dtos::AnalyzeUploadDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness and integration status"),
        (name = "reports", description = "Citizen pollution reports"),
        (name = "analyze", description = "Image classification proxy"),
    ),
    info(
        title = "EcoTrack API",
        version = "2.0.0",
        description = "Citizen pollution reports and image classification proxy",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
