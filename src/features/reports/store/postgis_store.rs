use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::store::ReportStore;
use crate::shared::constants::WGS84_SRID;

/// Serializes `ensure_schema` across replicas starting at the same time
const SCHEMA_LOCK_KEY: i64 = 0x6563_6f74_7261_636b;

const SCHEMA_STATEMENTS: [&str; 3] = [
    "CREATE EXTENSION IF NOT EXISTS postgis",
    r#"
    CREATE TABLE IF NOT EXISTS reports (
        id TEXT PRIMARY KEY,
        fecha_evento DATE,
        titulo TEXT NOT NULL,
        direccion TEXT,
        colonia TEXT,
        gravedad TEXT,
        descripcion TEXT,
        mm_lluvia DOUBLE PRECISION,
        tipo_evento TEXT,
        medio TEXT,
        imagen TEXT,
        url_noticia TEXT,
        tipo_reporte TEXT DEFAULT 'ciudadano',
        detectado_ai BOOLEAN DEFAULT FALSE,
        ai_confidence DOUBLE PRECISION,
        status TEXT DEFAULT 'enviado',
        geom GEOMETRY(Point, 4326) NOT NULL,
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reports_geom ON reports USING GIST (geom)",
];

/// PostGIS-backed report store
pub struct PostgisReportStore {
    pool: PgPool,
}

impl PostgisReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PostgisReportStore {
    async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open schema transaction: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to acquire schema lock: {:?}", e);
                AppError::Database(e)
            })?;

        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    tracing::error!("Schema statement failed: {:?}", e);
                    AppError::Database(e)
                })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit schema transaction: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Reports schema ready");
        Ok(())
    }

    async fn insert(&self, data: &CreateReport) -> Result<Report> {
        // ST_MakePoint takes (x, y) = (lon, lat)
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (
                id, fecha_evento, titulo, direccion, colonia, gravedad, descripcion,
                mm_lluvia, tipo_evento, medio, imagen, url_noticia,
                tipo_reporte, detectado_ai, ai_confidence, status,
                geom
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                ST_SetSRID(ST_MakePoint($17, $18), $19)
            )
            RETURNING
                id, fecha_evento, titulo, direccion, colonia, gravedad, descripcion,
                mm_lluvia, tipo_evento, medio, imagen, url_noticia,
                tipo_reporte, detectado_ai, ai_confidence, status, created_at,
                ST_Y(geom)::double precision AS lat,
                ST_X(geom)::double precision AS lon
            "#,
        )
        .bind(&data.id)
        .bind(data.fecha_evento)
        .bind(&data.titulo)
        .bind(&data.direccion)
        .bind(&data.colonia)
        .bind(&data.gravedad)
        .bind(&data.descripcion)
        .bind(data.mm_lluvia)
        .bind(&data.tipo_evento)
        .bind(&data.medio)
        .bind(&data.imagen)
        .bind(&data.url_noticia)
        .bind(&data.tipo_reporte)
        .bind(data.detectado_ai)
        .bind(data.ai_confidence)
        .bind(&data.status)
        .bind(data.lon)
        .bind(data.lat)
        .bind(WGS84_SRID)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert report {}: {:?}", data.id, e);
            AppError::Database(e)
        })?;

        Ok(report)
    }

    async fn list(&self, limit: i64) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT
                id, fecha_evento, titulo, direccion, colonia, gravedad, descripcion,
                mm_lluvia, tipo_evento, medio, imagen, url_noticia,
                tipo_reporte, detectado_ai, ai_confidence, status, created_at,
                ST_Y(geom)::double precision AS lat,
                ST_X(geom)::double precision AS lon
            FROM reports
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }
}
