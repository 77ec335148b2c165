use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope used for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>, data: Option<T>) -> Self {
        Self {
            success: false,
            data,
            message,
            errors,
        }
    }
}

/// Diagnostic payload attached to an upstream classifier failure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpstreamErrorDetail {
    /// HTTP status returned by the classifier
    pub status_code: u16,
    /// Raw response body, with the credential redacted
    pub body: String,
}
