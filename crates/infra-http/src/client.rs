// GROBID HTTP Client
// Implements the DocumentService port over reqwest

use crate::endpoint::Endpoint;
use async_trait::async_trait;
use grobid_batch_core::domain::GrobidService;
use grobid_batch_core::port::{DocumentService, ServiceError, UPLOAD_FIELD_NAME};
use reqwest::multipart;
use std::time::Duration;
use tracing::debug;

const ISALIVE_PATH: &str = "isalive";

/// HTTP adapter for a running GROBID server.
pub struct GrobidClient {
    endpoint: Endpoint,
    http: reqwest::Client,
}

impl GrobidClient {
    /// Client with no request deadline (the service may take a long time on
    /// large documents).
    pub fn new(endpoint: Endpoint) -> Result<Self, ServiceError> {
        Self::with_timeout(endpoint, None)
    }

    /// Client with an optional per-request deadline.
    pub fn with_timeout(
        endpoint: Endpoint,
        timeout: Option<Duration>,
    ) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ServiceError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { endpoint, http })
    }
}

#[async_trait]
impl DocumentService for GrobidClient {
    async fn is_alive(&self) -> Result<(), ServiceError> {
        let url = self.endpoint.url(ISALIVE_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Unreachable(e.to_string()))?;

        // The probe reports ready with exactly 200.
        if response.status() != reqwest::StatusCode::OK {
            return Err(ServiceError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    async fn process_document(
        &self,
        service: GrobidService,
        file_name: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, ServiceError> {
        let url = self.endpoint.url(service.suffix());
        debug!(%url, file = %file_name, "uploading document");

        let part = multipart::Part::bytes(payload).file_name(file_name.to_string());
        let form = multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}
