//! Per-file metadata lookup.

use std::path::Path;

use dirprompt_core::{FileRecord, LoadError};

/// Read size and modification time of a file.
///
/// Errors are returned as-is so the content loader can turn them into a
/// placeholder.
pub async fn file_metadata(path: impl AsRef<Path>) -> Result<FileRecord, LoadError> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| LoadError::io(path, e))?;

    FileRecord::from_metadata(path, &metadata).map_err(|e| LoadError::io(path, e))
}
