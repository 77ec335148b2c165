use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::reports::models::{CreateReport, Report};
use crate::shared::constants::{DEFAULT_REPORT_LIMIT, REPORT_STATUS_SUBMITTED, REPORT_TYPE_CITIZEN};
use crate::shared::validation::{is_valid_coordinate, validate_not_blank};

/// Request DTO for submitting a report.
///
/// Omitted `tipo_reporte`, `detectado_ai` and `status` take their defaults;
/// an explicit `null` is kept as null.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_report_coordinates"))]
pub struct CreateReportDto {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Acumulación de basura en el canal")]
    pub titulo: String,
    /// Latitude in decimal degrees, WGS84
    pub lat: f64,
    /// Longitude in decimal degrees, WGS84
    pub lon: f64,
    pub fecha_evento: Option<NaiveDate>,
    pub direccion: Option<String>,
    pub colonia: Option<String>,
    #[schema(example = "medio")]
    pub gravedad: Option<String>,
    pub descripcion: Option<String>,
    pub mm_lluvia: Option<f64>,
    pub tipo_evento: Option<String>,
    pub medio: Option<String>,
    pub imagen: Option<String>,
    pub url_noticia: Option<String>,
    #[serde(default = "default_tipo_reporte")]
    pub tipo_reporte: Option<String>,
    #[serde(default = "default_detectado_ai")]
    pub detectado_ai: Option<bool>,
    pub ai_confidence: Option<f64>,
    #[serde(default = "default_status")]
    pub status: Option<String>,
}

fn default_tipo_reporte() -> Option<String> {
    Some(REPORT_TYPE_CITIZEN.to_string())
}

fn default_detectado_ai() -> Option<bool> {
    Some(false)
}

fn default_status() -> Option<String> {
    Some(REPORT_STATUS_SUBMITTED.to_string())
}

fn validate_report_coordinates(dto: &CreateReportDto) -> Result<(), ValidationError> {
    if is_valid_coordinate(dto.lat, dto.lon) {
        return Ok(());
    }
    let mut err = ValidationError::new("coordinates");
    err.message = Some("Invalid coordinates".into());
    Err(err)
}

impl CreateReportDto {
    /// Attach the server-generated id, producing the insert payload
    pub fn into_create(self, id: String) -> CreateReport {
        CreateReport {
            id,
            fecha_evento: self.fecha_evento,
            titulo: self.titulo,
            direccion: self.direccion,
            colonia: self.colonia,
            gravedad: self.gravedad,
            descripcion: self.descripcion,
            mm_lluvia: self.mm_lluvia,
            tipo_evento: self.tipo_evento,
            medio: self.medio,
            imagen: self.imagen,
            url_noticia: self.url_noticia,
            tipo_reporte: self.tipo_reporte,
            detectado_ai: self.detectado_ai,
            ai_confidence: self.ai_confidence,
            status: self.status,
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Public shape of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    #[schema(example = "rep-3f2b8c0d9a4e4b7f8c1d2e3f4a5b6c7d")]
    pub id: String,
    /// Event date as `YYYY-MM-DD`
    pub fecha_evento: Option<String>,
    pub titulo: String,
    pub direccion: Option<String>,
    pub colonia: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub gravedad: Option<String>,
    pub mm_lluvia: Option<f64>,
    pub tipo_evento: Option<String>,
    pub medio: Option<String>,
    pub descripcion: Option<String>,
    pub imagen: Option<String>,
    pub url_noticia: Option<String>,
    pub tipo_reporte: Option<String>,
    pub detectado_ai: Option<bool>,
    pub ai_confidence: Option<f64>,
    pub status: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: Option<String>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            fecha_evento: r.fecha_evento.map(|d| d.format("%Y-%m-%d").to_string()),
            titulo: r.titulo,
            direccion: r.direccion,
            colonia: r.colonia,
            lat: r.lat,
            lon: r.lon,
            gravedad: r.gravedad,
            mm_lluvia: r.mm_lluvia,
            tipo_evento: r.tipo_evento,
            medio: r.medio,
            descripcion: r.descripcion,
            imagen: r.imagen,
            url_noticia: r.url_noticia,
            tipo_reporte: r.tipo_reporte,
            detectado_ai: r.detectado_ai,
            ai_confidence: r.ai_confidence,
            status: r.status,
            created_at: r.created_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Query parameters for listing reports
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Maximum number of reports, newest first
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 2000, default = 500)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_REPORT_LIMIT
}
