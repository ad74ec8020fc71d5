// Document Service Port
// Abstraction over the remote document-analysis HTTP collaborator

use crate::domain::GrobidService;
use async_trait::async_trait;
use thiserror::Error;

/// Multipart form field the uploaded file travels under
pub const UPLOAD_FIELD_NAME: &str = "input";

/// Errors surfaced by the remote service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("service not reachable: {0}")]
    Unreachable(String),

    #[error("service responded with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Remote document-analysis service port
///
/// Implementations:
/// - GrobidClient (infra-http): real HTTP calls against a GROBID server
/// - mocks::MockDocumentService: scripted behavior for tests
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Liveness probe. Ok(()) only when the service reports ready.
    ///
    /// # Errors
    /// - ServiceError::Unreachable on network-level failure
    /// - ServiceError::Status when the probe answers with anything but ready
    async fn is_alive(&self) -> Result<(), ServiceError>;

    /// Submit one document and return the raw response body.
    ///
    /// # Errors
    /// - ServiceError::Transport on network-level failure
    /// - ServiceError::Status when the service answers with a non-success code
    async fn process_document(
        &self,
        service: GrobidService,
        file_name: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, ServiceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock Document Service for testing
    ///
    /// Echoes a fixed body for every upload, with a scripted liveness answer,
    /// optional per-file transport failures and an optional artificial delay.
    /// Every upload attempt is recorded so tests can assert exactly-once
    /// submission.
    pub struct MockDocumentService {
        alive: bool,
        response: Vec<u8>,
        delay: Option<Duration>,
        fail_uploads: Mutex<HashSet<String>>,
        uploads: Mutex<Vec<String>>,
    }

    impl MockDocumentService {
        pub fn new(response: impl Into<Vec<u8>>) -> Self {
            Self {
                alive: true,
                response: response.into(),
                delay: None,
                fail_uploads: Mutex::new(HashSet::new()),
                uploads: Mutex::new(Vec::new()),
            }
        }

        /// Mock whose liveness probe always reports not ready
        pub fn new_down() -> Self {
            let mut mock = Self::new(Vec::new());
            mock.alive = false;
            mock
        }

        /// Script a transport failure for one file name
        pub fn fail_on(self, file_name: impl Into<String>) -> Self {
            self.fail_uploads.lock().unwrap().insert(file_name.into());
            self
        }

        /// Sleep this long before answering each upload
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// File names uploaded so far, in arrival order
        pub fn uploads(&self) -> Vec<String> {
            self.uploads.lock().unwrap().clone()
        }

        pub fn upload_count(&self) -> usize {
            self.uploads.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DocumentService for MockDocumentService {
        async fn is_alive(&self) -> Result<(), ServiceError> {
            if self.alive {
                Ok(())
            } else {
                Err(ServiceError::Status(503))
            }
        }

        async fn process_document(
            &self,
            _service: GrobidService,
            file_name: &str,
            _payload: Vec<u8>,
        ) -> Result<Vec<u8>, ServiceError> {
            self.uploads.lock().unwrap().push(file_name.to_string());

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_uploads.lock().unwrap().contains(file_name) {
                return Err(ServiceError::Transport(format!(
                    "connection reset while uploading {file_name}"
                )));
            }

            Ok(self.response.clone())
        }
    }
}
