//! Geo store for reports
//!
//! The store owns the `reports` schema and is the only place that knows
//! locations are kept as a PostGIS point geometry.

mod postgis_store;

pub use postgis_store::PostgisReportStore;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reports::models::{CreateReport, Report};

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Create the extension, table and spatial index if missing. Idempotent.
    async fn ensure_schema(&self) -> Result<()>;

    /// Persist a validated report, returning the stored row with its
    /// store-assigned `created_at` and coordinates read back from the geometry.
    async fn insert(&self, report: &CreateReport) -> Result<Report>;

    /// Up to `limit` reports, newest first. Equal timestamps order by id, descending.
    async fn list(&self, limit: i64) -> Result<Vec<Report>>;
}
