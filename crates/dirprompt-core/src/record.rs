//! Per-file metadata captured at read time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Layout used when a modification time is rendered into a file block.
///
/// Produces e.g. `Mon Oct 19 2026 14:03:11 GMT+0200`.
pub const MODIFIED_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Size and modification time of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, in local time.
    pub last_modified: DateTime<Local>,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(path: impl Into<PathBuf>, size: u64, last_modified: DateTime<Local>) -> Self {
        Self {
            path: path.into(),
            size,
            last_modified,
        }
    }

    /// Build a record from filesystem metadata.
    ///
    /// Fails only on platforms that do not report modification times.
    pub fn from_metadata(path: &Path, metadata: &std::fs::Metadata) -> std::io::Result<Self> {
        let modified = metadata.modified()?;
        Ok(Self::new(path, metadata.len(), DateTime::<Local>::from(modified)))
    }

    /// Modification time formatted with [`MODIFIED_FORMAT`].
    pub fn modified_display(&self) -> String {
        self.last_modified.format(MODIFIED_FORMAT).to_string()
    }
}
