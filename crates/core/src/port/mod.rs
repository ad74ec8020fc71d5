// Port Layer - Interfaces for external dependencies

pub mod document_service;

// Re-exports
pub use document_service::{DocumentService, ServiceError, UPLOAD_FIELD_NAME};
