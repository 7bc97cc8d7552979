//! Error types for loading files and directories.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a file or resolving paths.
///
/// These never reach the caller of the section builder; they are folded into
/// placeholder text or a fallback section.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process working directory could not be determined.
    #[error("Cannot determine working directory: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl LoadError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a working directory error.
    pub fn working_directory(source: std::io::Error) -> Self {
        Self::WorkingDirectory { source }
    }

    /// Create an error from a free-form message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Render the error together with its source chain.
    ///
    /// Used where a "stack" of causes is shown to the reader.
    pub fn chain(&self) -> String {
        let mut out = format!("{self:?}");
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str("\n  caused by: ");
            out.push_str(&err.to_string());
            source = std::error::Error::source(err);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_io() {
        let err = LoadError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, LoadError::PermissionDenied { .. }));

        let err = LoadError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "Path not found: /test/path");
    }

    #[test]
    fn test_chain_includes_source() {
        let err = LoadError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes"),
        );
        let chain = err.chain();
        assert!(chain.starts_with("Io"));
        assert!(chain.contains("caused by: bad bytes"));
    }
}
