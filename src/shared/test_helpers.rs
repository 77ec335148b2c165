use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Bytes, http::StatusCode, response::IntoResponse, Router};
use chrono::{DateTime, Utc};
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::lorem::en::Sentence;
use fake::Fake;

use crate::core::error::Result;
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::store::ReportStore;
use crate::features::reports::ReportService;

/// Row as the store would return it for `data`
pub fn stored_report(data: CreateReport, created_at: Option<DateTime<Utc>>) -> Report {
    Report {
        id: data.id,
        fecha_evento: data.fecha_evento,
        titulo: data.titulo,
        direccion: data.direccion,
        colonia: data.colonia,
        gravedad: data.gravedad,
        descripcion: data.descripcion,
        mm_lluvia: data.mm_lluvia,
        tipo_evento: data.tipo_evento,
        medio: data.medio,
        imagen: data.imagen,
        url_noticia: data.url_noticia,
        tipo_reporte: data.tipo_reporte,
        detectado_ai: data.detectado_ai,
        ai_confidence: data.ai_confidence,
        status: data.status,
        created_at,
        lat: data.lat,
        lon: data.lon,
    }
}

/// Submission with a fake title and address, all other optionals unset
pub fn sample_report_dto(lat: f64, lon: f64) -> CreateReportDto {
    let titulo: String = Sentence(2..5).fake();
    let direccion: String = StreetName().fake();
    let colonia: String = CityName().fake();

    CreateReportDto {
        titulo,
        lat,
        lon,
        fecha_evento: None,
        direccion: Some(direccion),
        colonia: Some(colonia),
        gravedad: Some("medio".to_string()),
        descripcion: None,
        mm_lluvia: None,
        tipo_evento: None,
        medio: None,
        imagen: None,
        url_noticia: None,
        tipo_reporte: Some("ciudadano".to_string()),
        detectado_ai: Some(false),
        ai_confidence: None,
        status: Some("enviado".to_string()),
    }
}

/// Insert payload with a fresh id and every optional field null
pub fn create_report_data(lat: f64, lon: f64) -> CreateReport {
    CreateReport {
        id: ReportService::generate_report_id(),
        fecha_evento: None,
        titulo: Sentence(2..5).fake(),
        direccion: None,
        colonia: None,
        gravedad: None,
        descripcion: None,
        mm_lluvia: None,
        tipo_evento: None,
        medio: None,
        imagen: None,
        url_noticia: None,
        tipo_reporte: None,
        detectado_ai: None,
        ai_confidence: None,
        status: None,
        lat,
        lon,
    }
}

/// In-memory `ReportStore` that counts every call it receives
#[derive(Default)]
pub struct InMemoryReportStore {
    reports: Mutex<Vec<Report>>,
    inserts: AtomicUsize,
    calls: AtomicUsize,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportStore for InMemoryReportStore {
    async fn ensure_schema(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, data: &CreateReport) -> Result<Report> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inserts.fetch_add(1, Ordering::SeqCst);

        let report = stored_report(data.clone(), Some(Utc::now()));
        self.reports.lock().unwrap().push(report.clone());
        Ok(report)
    }

    async fn list(&self, limit: i64) -> Result<Vec<Report>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Insertion order is creation order
        let reports = self.reports.lock().unwrap();
        Ok(reports
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// What the fake classifier upstream answers with
#[derive(Clone)]
pub enum UpstreamBehavior {
    Json(serde_json::Value),
    Status(StatusCode, String),
    /// Echo the request query string back with the given status
    EchoQuery(StatusCode),
    Delay(std::time::Duration),
}

/// Local HTTP server standing in for the classifier
pub struct UpstreamDouble {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<Bytes>>>,
}

impl UpstreamDouble {
    pub async fn spawn(behavior: UpstreamBehavior) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let last_body = Arc::new(Mutex::new(None));

        let handler_hits = hits.clone();
        let handler_body = last_body.clone();
        let app = Router::new().fallback(move |uri: axum::http::Uri, body: Bytes| {
            let behavior = behavior.clone();
            let hits = handler_hits.clone();
            let last_body = handler_body.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                *last_body.lock().unwrap() = Some(body);
                match behavior {
                    UpstreamBehavior::Json(value) => axum::Json(value).into_response(),
                    UpstreamBehavior::Status(status, text) => (status, text).into_response(),
                    UpstreamBehavior::EchoQuery(status) => {
                        (status, uri.query().unwrap_or("").to_string()).into_response()
                    }
                    UpstreamBehavior::Delay(duration) => {
                        tokio::time::sleep(duration).await;
                        axum::Json(serde_json::json!({ "predictions": [] })).into_response()
                    }
                }
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            last_body,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<Bytes> {
        self.last_body.lock().unwrap().clone()
    }
}

/// Base URL on which nothing is listening
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
