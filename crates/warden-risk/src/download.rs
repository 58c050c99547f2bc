//! Download descriptor

use serde::{Deserialize, Serialize};
use url::Url;

/// One download-created event as reported by the platform.
///
/// The identifier is opaque and owned by the event source; it is only echoed
/// back on pause/resume/cancel actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadDescriptor {
    pub id: String,
    pub file_name: String,
    pub url: String,
    /// Declared size in bytes. `None` and `Some(0)` both mean unknown.
    pub total_bytes: Option<u64>,
}

impl DownloadDescriptor {
    pub fn new(id: String, file_name: String, url: String) -> Self {
        Self {
            id,
            file_name,
            url,
            total_bytes: None,
        }
    }

    pub fn with_size(mut self, total_bytes: u64) -> Self {
        self.total_bytes = Some(total_bytes);
        self
    }

    /// Hostname of the source URL, if the URL parses at all.
    pub fn source_domain(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }
}
