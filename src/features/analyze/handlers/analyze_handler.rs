use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::analyze::dtos::AnalyzeUploadDto;
use crate::modules::classifier::RoboflowClient;
use crate::shared::types::{ApiResponse, UpstreamErrorDetail};

/// Classify an image with the upstream model
///
/// Accepts either multipart/form-data with a `file` field or the raw image
/// bytes as the request body. The classifier's JSON answer is returned as-is.
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "analyze",
    request_body(
        content = AnalyzeUploadDto,
        content_type = "multipart/form-data",
        description = "Image upload; a raw image body is accepted as well",
    ),
    responses(
        (status = 200, description = "Classifier response, passed through unchanged"),
        (status = 400, description = "Empty or unreadable upload"),
        (status = 501, description = "Classifier not configured"),
        (status = 502, description = "Classifier error or unreachable", body = ApiResponse<UpstreamErrorDetail>),
        (status = 504, description = "Classifier timed out")
    )
)]
pub async fn analyze_image(
    State(client): State<Arc<RoboflowClient>>,
    request: Request,
) -> Result<Json<Value>> {
    client.ensure_configured()?;

    let image = read_image(request).await?;
    let verdict = client.analyze(image).await?;

    Ok(Json(verdict))
}

async fn read_image(request: Request) -> Result<Bytes> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        return Bytes::from_request(request, &()).await.map_err(|e| {
            debug!("Failed to read image body: {}", e);
            AppError::BadRequest(format!("Failed to read image body: {}", e.body_text()))
        });
    }

    let mut multipart = Multipart::from_request(request, &()).await.map_err(|e| {
        debug!("Invalid multipart request: {}", e);
        AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text()))
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        if field.name() == Some("file") {
            return field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            });
        }
        debug!("Ignoring unknown field: {:?}", field.name());
    }

    Err(AppError::BadRequest("File is required".to_string()))
}
