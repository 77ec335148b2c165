use serde::Deserialize;
use utoipa::ToSchema;

/// Multipart form accepted by the analyze endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeUploadDto {
    /// Image to classify (JPEG or PNG)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}
