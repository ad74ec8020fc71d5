// Job Domain Model

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suffix appended to the input file name to form the output artifact name
pub const OUTPUT_SUFFIX: &str = ".tei.xml";

/// One discovered input file awaiting submission to the remote service.
///
/// Created by discovery, delivered to exactly one worker, then discarded.
/// Jobs have no lifecycle beyond a single run and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Full path of the source file on disk
    pub source_path: PathBuf,
    /// Base name of the source file, also used as the upload file name
    pub file_name: String,
}

impl Job {
    pub fn new(source_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Output artifact path: `{output_dir}/{file_name}.tei.xml`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}{}", self.file_name, OUTPUT_SUFFIX))
    }
}
