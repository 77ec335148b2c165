use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::reports::dtos::{CreateReportDto, ListReportsQuery, ReportResponseDto};
use crate::features::reports::services::ReportService;

/// List the most recent reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Reports ordered by creation time, newest first", body = Vec<ReportResponseDto>),
        (status = 400, description = "limit outside [1, 2000]"),
        (status = 500, description = "Database error"),
        (status = 501, description = "Persistence not configured")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<ListReportsQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = service.list(query.limit).await?;
    Ok(Json(reports))
}

/// Submit a citizen report
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report stored", body = ReportResponseDto),
        (status = 400, description = "Invalid coordinates or missing title"),
        (status = 500, description = "Database error"),
        (status = 501, description = "Persistence not configured")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportResponseDto>)> {
    let report = service.submit(dto).await?;
    Ok((StatusCode::CREATED, Json(report)))
}
