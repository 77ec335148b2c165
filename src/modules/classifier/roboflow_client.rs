use axum::body::Bytes;
use serde_json::Value;
use thiserror::Error;

use crate::core::config::ClassifierConfig;
use crate::core::error::AppError;

const REDACTED: &str = "***";

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("missing ROBOFLOW_API_KEY")]
    NotConfigured,

    #[error("Empty file")]
    EmptyPayload,

    #[error("Classifier returned HTTP {status_code}")]
    Status { status_code: u16, body: String },

    #[error("Classifier returned a non-JSON body with HTTP {status_code}")]
    InvalidResponse { status_code: u16, body: String },

    #[error("Classifier request timed out")]
    Timeout,

    #[error("Classifier unreachable: {0}")]
    Unreachable(String),
}

impl From<ClassifierError> for AppError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::NotConfigured => {
                AppError::NotConfigured("missing ROBOFLOW_API_KEY".to_string())
            }
            ClassifierError::EmptyPayload => AppError::Validation("Empty file".to_string()),
            ClassifierError::Status { status_code, body }
            | ClassifierError::InvalidResponse { status_code, body } => {
                AppError::UpstreamStatus { status_code, body }
            }
            ClassifierError::Timeout => AppError::UpstreamTimeout,
            ClassifierError::Unreachable(msg) => AppError::UpstreamUnreachable(msg),
        }
    }
}

/// Client for the Roboflow hosted "detect" endpoint
pub struct RoboflowClient {
    config: ClassifierConfig,
    client: reqwest::Client,
}

impl RoboflowClient {
    pub fn new(config: ClassifierConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to build classifier HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Fail fast when no credential is present, before the body is read
    pub fn ensure_configured(&self) -> Result<(), ClassifierError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ClassifierError::NotConfigured)
        }
    }

    /// Replace every occurrence of the credential in upstream text
    fn redact(&self, text: &str) -> String {
        match self.config.api_key.as_deref() {
            Some(key) => text.replace(key, REDACTED),
            None => text.to_string(),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ClassifierError {
        if err.is_timeout() {
            tracing::warn!("Classifier request timed out after {:?}", self.config.timeout);
            return ClassifierError::Timeout;
        }

        // The URL carries the credential
        let err = err.without_url();
        let detail = self.redact(&err.to_string());
        tracing::warn!("Classifier request failed: {}", detail);
        ClassifierError::Unreachable(detail)
    }

    /// Send one image to the classifier and return its JSON verdict unchanged
    pub async fn analyze(&self, image: Bytes) -> Result<Value, ClassifierError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClassifierError::NotConfigured)?;

        if image.is_empty() {
            return Err(ClassifierError::EmptyPayload);
        }

        let url = format!("{}/{}", self.config.base_url, self.config.model);
        tracing::debug!(
            "Sending {} bytes to classifier model {}",
            image.len(),
            self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("api_key", api_key)])
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(image)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!("Classifier returned HTTP {}", status.as_u16());
            return Err(ClassifierError::Status {
                status_code: status.as_u16(),
                body: self.redact(&text),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Classifier returned a non-JSON body: {}", e);
            ClassifierError::InvalidResponse {
                status_code: status.as_u16(),
                body: self.redact(&text),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{unreachable_base_url, UpstreamBehavior, UpstreamDouble};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    const KEY: &str = "rf-test-key-9f8e7d";

    fn config(base_url: &str, api_key: Option<&str>, timeout: Duration) -> ClassifierConfig {
        ClassifierConfig {
            api_key: api_key.map(str::to_string),
            model: ClassifierConfig::DEFAULT_MODEL.to_string(),
            base_url: base_url.to_string(),
            timeout,
        }
    }

    fn client_for(base_url: &str) -> RoboflowClient {
        RoboflowClient::new(config(base_url, Some(KEY), Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_success_passes_json_through() {
        let verdict = json!({
            "predictions": [{ "class": "garbage", "confidence": 0.91, "x": 10, "y": 20 }],
            "image": { "width": 640, "height": 480 }
        });
        let upstream = UpstreamDouble::spawn(UpstreamBehavior::Json(verdict.clone())).await;
        let client = client_for(&upstream.base_url);

        let image = Bytes::from_static(b"\xff\xd8\xff\xe0fake-jpeg");
        let result = client.analyze(image.clone()).await.unwrap();

        assert_eq!(result, verdict);
        assert_eq!(upstream.hits(), 1);
        assert_eq!(upstream.last_body(), Some(image));
    }

    #[tokio::test]
    async fn test_empty_payload_makes_no_call() {
        let upstream = UpstreamDouble::spawn(UpstreamBehavior::Json(json!({}))).await;
        let client = client_for(&upstream.base_url);

        let err = client.analyze(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyPayload));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let upstream = UpstreamDouble::spawn(UpstreamBehavior::Json(json!({}))).await;
        let client =
            RoboflowClient::new(config(&upstream.base_url, None, Duration::from_secs(5))).unwrap();

        assert!(!client.is_configured());
        assert!(client.ensure_configured().is_err());
        let err = client.analyze(Bytes::from_static(b"img")).await.unwrap_err();
        assert!(matches!(err, ClassifierError::NotConfigured));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let upstream = UpstreamDouble::spawn(UpstreamBehavior::Status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "model overloaded".to_string(),
        ))
        .await;
        let client = client_for(&upstream.base_url);

        match client.analyze(Bytes::from_static(b"img")).await.unwrap_err() {
            ClassifierError::Status { status_code, body } => {
                assert_eq!(status_code, 500);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(upstream.hits(), 1);
    }

    #[tokio::test]
    async fn test_echoed_credential_is_redacted() {
        let upstream =
            UpstreamDouble::spawn(UpstreamBehavior::EchoQuery(StatusCode::FORBIDDEN)).await;
        let client = client_for(&upstream.base_url);

        let err = client.analyze(Bytes::from_static(b"img")).await.unwrap_err();
        match &err {
            ClassifierError::Status { status_code, body } => {
                assert_eq!(*status_code, 403);
                assert!(body.contains("api_key=***"));
                assert!(!body.contains(KEY));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!format!("{:?}", err).contains(KEY));
    }

    #[tokio::test]
    async fn test_non_json_success_is_upstream_error() {
        let upstream = UpstreamDouble::spawn(UpstreamBehavior::Status(
            StatusCode::OK,
            "<html>maintenance</html>".to_string(),
        ))
        .await;
        let client = client_for(&upstream.base_url);

        let err = client.analyze(Bytes::from_static(b"img")).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InvalidResponse { status_code: 200, .. }
        ));
        assert!(matches!(
            AppError::from(err),
            AppError::UpstreamStatus { status_code: 200, .. }
        ));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let upstream =
            UpstreamDouble::spawn(UpstreamBehavior::Delay(Duration::from_secs(3))).await;
        let client = RoboflowClient::new(config(
            &upstream.base_url,
            Some(KEY),
            Duration::from_millis(200),
        ))
        .unwrap();

        let err = client.analyze(Bytes::from_static(b"img")).await.unwrap_err();
        assert!(matches!(err, ClassifierError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let base_url = unreachable_base_url().await;
        let client = client_for(&base_url);

        match client.analyze(Bytes::from_static(b"img")).await.unwrap_err() {
            ClassifierError::Unreachable(detail) => {
                assert!(!detail.contains(KEY));
                assert!(!detail.contains("api_key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            AppError::from(ClassifierError::NotConfigured),
            AppError::NotConfigured(_)
        ));
        assert!(matches!(
            AppError::from(ClassifierError::EmptyPayload),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(ClassifierError::Timeout),
            AppError::UpstreamTimeout
        ));
        assert!(matches!(
            AppError::from(ClassifierError::Unreachable("refused".into())),
            AppError::UpstreamUnreachable(_)
        ));
    }
}
