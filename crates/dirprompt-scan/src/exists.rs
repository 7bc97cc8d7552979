//! Path accessibility check.

use std::path::Path;

/// Whether `path` is currently reachable by this process.
///
/// Any failure (missing, permission denied, broken symlink) reports `false`.
pub async fn path_exists(path: impl AsRef<Path>) -> bool {
    tokio::fs::metadata(path.as_ref()).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();

        assert!(path_exists(temp.path()).await);
        assert!(path_exists(&file).await);
        assert!(!path_exists(temp.path().join("missing")).await);
        assert!(!path_exists("").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_broken_symlink_is_missing() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling");
        std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).unwrap();

        assert!(!path_exists(&link).await);
    }
}
