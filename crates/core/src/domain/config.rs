// Run Configuration

use super::GrobidService;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default size of the worker pool
pub const DEFAULT_WORKER_COUNT: usize = 10;

/// Immutable parameters for one batch run.
///
/// Passed explicitly into the run operation; nothing is ambient or mutable
/// after start, so several runs with different configurations can coexist
/// in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory tree scanned for input files
    pub input_dir: PathBuf,
    /// Flat directory receiving one artifact per processed input
    pub output_dir: PathBuf,
    /// Remote operation invoked for every file
    pub service: GrobidService,
    /// Fixed number of concurrent workers
    pub worker_count: usize,
}

impl RunConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        service: GrobidService,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            service,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count.max(1);
        self
    }
}
