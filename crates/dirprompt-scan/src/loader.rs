//! File content loading with per-file failure isolation.

use std::path::{Path, PathBuf};

use dirprompt_core::{FileBlock, LoadError, channel};

use crate::metadata::file_metadata;

/// Express `path` relative to `base` for display, `..` segments included.
///
/// Returns `path` unchanged when no relative form exists (e.g. a relative
/// path against an absolute base).
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Load one file into an annotated block.
///
/// Never fails: a read or metadata error yields a
/// [`FileBlock::Placeholder`] naming the file and the error.
pub async fn file_content(path: impl AsRef<Path>, working_dir: impl AsRef<Path>) -> FileBlock {
    let path = path.as_ref();

    match load(path, working_dir.as_ref()).await {
        Ok(block) => block,
        Err(err) => {
            tracing::error!(
                target: channel::ERROR,
                error = %err,
                "Error reading file {}",
                path.display()
            );
            FileBlock::placeholder(path, &err)
        }
    }
}

async fn load(path: &Path, working_dir: &Path) -> Result<FileBlock, LoadError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| LoadError::io(path, e))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();
    let record = file_metadata(path).await?;
    let relative_path = relative_to(path, working_dir);

    tracing::info!(target: channel::INFO, "Reading file: {}", relative_path.display());
    tracing::info!(target: channel::INFO, "File size: {} bytes", record.size);
    tracing::info!(target: channel::INFO, "Last modified: {}", record.modified_display());

    Ok(FileBlock::content(relative_path, record, content))
}
