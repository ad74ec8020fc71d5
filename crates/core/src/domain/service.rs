// Remote Service Catalog

use serde::{Deserialize, Serialize};

/// Named GROBID operation, keyed to a URL suffix under the API base.
///
/// A closed set: adding a service means adding a variant and its suffix,
/// nothing in the dispatch path changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrobidService {
    /// Full text extraction over the whole document
    FullTextDocument,
}

impl GrobidService {
    /// URL path suffix appended to the service base URL
    pub fn suffix(&self) -> &'static str {
        match self {
            GrobidService::FullTextDocument => "processFulltextDocument",
        }
    }
}

impl std::fmt::Display for GrobidService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}
