use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{CreateReportDto, ReportResponseDto};
use crate::features::reports::store::ReportStore;
use crate::shared::constants::{MAX_REPORT_LIMIT, MIN_REPORT_LIMIT, REPORT_ID_PREFIX};
use crate::shared::validation::{is_valid_report_limit, validation_messages};

/// Service for report operations
///
/// Holds no store when `DATABASE_URL` is absent; every operation then fails
/// with `NotConfigured` before touching the network.
pub struct ReportService {
    store: Option<Arc<dyn ReportStore>>,
}

impl ReportService {
    pub fn new(store: Option<Arc<dyn ReportStore>>) -> Self {
        Self { store }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<Arc<dyn ReportStore>> {
        self.store
            .clone()
            .ok_or_else(|| AppError::NotConfigured("missing DATABASE_URL".to_string()))
    }

    /// Generate a report id: `rep-` followed by 128 random bits in hex
    pub fn generate_report_id() -> String {
        format!("{}{}", REPORT_ID_PREFIX, Uuid::new_v4().simple())
    }

    /// Validate and persist a citizen report
    pub async fn submit(&self, dto: CreateReportDto) -> Result<ReportResponseDto> {
        let store = self.store()?;

        dto.validate()
            .map_err(|e| AppError::Validation(validation_messages(&e).join("; ")))?;

        let data = dto.into_create(Self::generate_report_id());

        // Own task: a dropped request must not cancel the insert midway
        let report = tokio::spawn(async move { store.insert(&data).await })
            .await
            .map_err(|e| AppError::Internal(format!("Report insert task failed: {}", e)))??;

        tracing::info!(
            "Created report: {} at ({}, {})",
            report.id,
            report.lat,
            report.lon
        );

        Ok(report.into())
    }

    /// List the newest `limit` reports in public shape
    pub async fn list(&self, limit: i64) -> Result<Vec<ReportResponseDto>> {
        let store = self.store()?;

        if !is_valid_report_limit(limit) {
            return Err(AppError::Validation(format!(
                "limit must be between {} and {}",
                MIN_REPORT_LIMIT, MAX_REPORT_LIMIT
            )));
        }

        let reports = tokio::spawn(async move { store.list(limit).await })
            .await
            .map_err(|e| AppError::Internal(format!("Report list task failed: {}", e)))??;

        tracing::debug!("Listed {} reports (limit {})", reports.len(), limit);

        Ok(reports.into_iter().map(ReportResponseDto::from).collect())
    }
}
