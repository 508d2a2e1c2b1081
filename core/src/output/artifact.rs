//! Rendered announcement artifacts

use std::path::PathBuf;

/// A rendered announcement ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioArtifact {
    /// Announcement text handed to the backend at delivery time.
    Text(String),
    /// Pre-rendered audio on disk.
    File(PathBuf),
}

impl AudioArtifact {
    /// Whether this artifact can still be delivered. Text never goes
    /// stale; a file artifact dies with its backing file.
    pub fn resolves(&self) -> bool {
        match self {
            AudioArtifact::Text(_) => true,
            AudioArtifact::File(path) => path.is_file(),
        }
    }
}
