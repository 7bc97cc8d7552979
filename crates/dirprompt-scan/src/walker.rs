//! Recursive, failure-isolating directory walker.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt, join_all};
use tokio::fs::DirEntry;

use dirprompt_core::channel;

use crate::exists::path_exists;

/// What a directory entry turned out to be.
enum EntryKind {
    Directory,
    File,
    /// Socket, FIFO or device node.
    Special,
}

/// Resolve `path` against the process working directory.
///
/// Falls back to the path unchanged when it cannot be resolved (e.g. empty).
pub fn absolute(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Collect the absolute paths of all files below `dir`.
///
/// Siblings are walked concurrently; results keep directory-listing order with
/// each subdirectory spliced in at its entry's position. A missing or
/// unreadable directory, or an entry that cannot be classified, contributes
/// nothing and is reported on the error channel. Symbolic links are returned as
/// files and never descended into.
pub async fn read_files_recursively(dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let working_dir = std::env::current_dir().unwrap_or_default();
    read_files_in(dir, working_dir).await
}

/// Like [`read_files_recursively`], with a relative `dir` resolved against
/// `working_dir` instead of the process cwd.
pub async fn read_files_in(dir: impl AsRef<Path>, working_dir: impl AsRef<Path>) -> Vec<PathBuf> {
    let given = dir.as_ref();
    let working_dir = working_dir.as_ref();
    let resolved = absolute(working_dir.join(given));

    if !path_exists(&resolved).await {
        report_missing(given, working_dir, &resolved);
        return Vec::new();
    }
    walk_dir(resolved).await
}

fn report_missing(given: &Path, working_dir: &Path, resolved: &Path) {
    tracing::error!(target: channel::ERROR, "Directory not found: {}", given.display());
    tracing::error!(
        target: channel::ERROR,
        "Current working directory: {}",
        working_dir.display()
    );
    tracing::error!(
        target: channel::ERROR,
        "Attempted absolute path: {}",
        resolved.display()
    );
}

fn walk_dir(dir: PathBuf) -> BoxFuture<'static, Vec<PathBuf>> {
    async move {
        // Subdirectories can vanish between listing and descent.
        if !path_exists(&dir).await {
            let cwd = std::env::current_dir().unwrap_or_default();
            report_missing(&dir, &cwd, &dir);
            return Vec::new();
        }

        let entries = match list_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(
                    target: channel::ERROR,
                    error = %err,
                    "Error reading directory {}",
                    dir.display()
                );
                return Vec::new();
            }
        };

        join_all(entries.into_iter().map(walk_entry))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
    .boxed()
}

async fn walk_entry(entry: DirEntry) -> Vec<PathBuf> {
    let path = absolute(entry.path());

    match classify(&entry).await {
        Ok(EntryKind::Directory) => walk_dir(path).await,
        Ok(EntryKind::File) => {
            tracing::info!(target: channel::INFO, "Found file: {}", path.display());
            vec![path]
        }
        Ok(EntryKind::Special) => {
            tracing::info!(target: channel::INFO, "Skipping special file: {}", path.display());
            Vec::new()
        }
        Err(err) => {
            tracing::error!(
                target: channel::ERROR,
                error = %err,
                "Error processing {}",
                path.display()
            );
            Vec::new()
        }
    }
}

async fn classify(entry: &DirEntry) -> std::io::Result<EntryKind> {
    let file_type = entry.file_type().await?;

    Ok(if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() || file_type.is_symlink() {
        EntryKind::File
    } else {
        EntryKind::Special
    })
}

/// List the immediate entries of `dir`.
///
/// Opening the directory is fatal for the subtree. A failure after the first
/// entries were read stops the listing but keeps what was read.
async fn list_dir(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    loop {
        match reader.next_entry().await {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => break,
            Err(err) => {
                tracing::error!(
                    target: channel::ERROR,
                    error = %err,
                    "Listing of {} stopped early after {} entries",
                    dir.display(),
                    entries.len()
                );
                break;
            }
        }
    }

    Ok(entries)
}
