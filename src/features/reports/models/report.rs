use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for a pollution report.
///
/// `lat`/`lon` are not columns: they are projected out of the `geom`
/// point with `ST_Y`/`ST_X` by every query that returns this row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Report {
    pub id: String,
    pub fecha_evento: Option<NaiveDate>,
    pub titulo: String,
    pub direccion: Option<String>,
    pub colonia: Option<String>,
    pub gravedad: Option<String>,
    pub descripcion: Option<String>,
    pub mm_lluvia: Option<f64>,
    pub tipo_evento: Option<String>,
    pub medio: Option<String>,
    pub imagen: Option<String>,
    pub url_noticia: Option<String>,
    pub tipo_reporte: Option<String>,
    pub detectado_ai: Option<bool>,
    pub ai_confidence: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub lat: f64,
    pub lon: f64,
}

/// Data for inserting a new report. Already validated, id already assigned.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub id: String,
    pub fecha_evento: Option<NaiveDate>,
    pub titulo: String,
    pub direccion: Option<String>,
    pub colonia: Option<String>,
    pub gravedad: Option<String>,
    pub descripcion: Option<String>,
    pub mm_lluvia: Option<f64>,
    pub tipo_evento: Option<String>,
    pub medio: Option<String>,
    pub imagen: Option<String>,
    pub url_noticia: Option<String>,
    pub tipo_reporte: Option<String>,
    pub detectado_ai: Option<bool>,
    pub ai_confidence: Option<f64>,
    pub status: Option<String>,
    pub lat: f64,
    pub lon: f64,
}
