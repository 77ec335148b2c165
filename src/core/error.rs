use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::{ApiResponse, UpstreamErrorDetail};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Upstream returned HTTP {status_code}")]
    UpstreamStatus { status_code: u16, body: String },

    #[error("Upstream request timed out")]
    UpstreamTimeout,

    #[error("Upstream request failed: {0}")]
    UpstreamUnreachable(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotConfigured(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::UpstreamStatus { .. } | AppError::UpstreamUnreachable(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors, data) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ("Database error occurred".to_string(), None, None)
            }
            AppError::Validation(msg) => (msg.clone(), Some(vec![msg]), None),
            AppError::BadRequest(msg) => (msg, None, None),
            AppError::NotConfigured(msg) => {
                (format!("Server not configured: {}", msg), None, None)
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), None, None)
            }
            AppError::UpstreamStatus { status_code, body } => (
                "Classifier returned an error".to_string(),
                None,
                Some(UpstreamErrorDetail { status_code, body }),
            ),
            AppError::UpstreamTimeout => ("Classifier request timed out".to_string(), None, None),
            AppError::UpstreamUnreachable(msg) => {
                (format!("Classifier request failed: {}", msg), None, None)
            }
        };

        let body = Json(ApiResponse::error(Some(message), errors, data));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
