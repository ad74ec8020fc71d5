// Central Error Types - two severity tiers

use crate::port::ServiceError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal (whole-run) error tier: stops the batch run.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("GROBID service is not reachable: {0}")]
    ServiceUnavailable(ServiceError),

    #[error("directory traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using the fatal tier
pub type Result<T> = std::result::Result<T, BatchError>;

/// Per-job error tier: logged and tallied at the worker, never fatal.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("cannot open source file {}: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("upload failed for {file_name}: {source}")]
    Upload {
        file_name: String,
        source: ServiceError,
    },

    #[error("cannot create output file {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl JobError {
    /// An already-existing output counts as a skip, not a failure
    pub fn is_already_exists(&self) -> bool {
        matches!(self, JobError::OutputExists(_))
    }
}
