//! Rendered per-file blocks.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::FileRecord;

/// The text contributed by one file to a section.
///
/// A placeholder renders as plain text just like a real block, so callers can
/// join blocks without looking at the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileBlock {
    /// File was read successfully.
    Content {
        /// Path relative to the working directory, for display.
        relative_path: PathBuf,
        /// Size and modification time.
        record: FileRecord,
        /// Raw file content.
        content: String,
    },
    /// File could not be read or stat'ed.
    Placeholder {
        /// Base name of the file.
        file_name: String,
        /// Message of the underlying error.
        message: String,
    },
}

impl FileBlock {
    /// Create a block for a successfully read file.
    pub fn content(
        relative_path: impl Into<PathBuf>,
        record: FileRecord,
        content: impl Into<String>,
    ) -> Self {
        Self::Content {
            relative_path: relative_path.into(),
            record,
            content: content.into(),
        }
    }

    /// Create a placeholder naming the file's base name and the error.
    pub fn placeholder(path: &Path, error: &impl fmt::Display) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self::Placeholder {
            file_name,
            message: error.to_string(),
        }
    }

    /// Whether this block stands in for a file that failed to load.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Size of the loaded file, if any.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::Content { record, .. } => Some(record.size),
            Self::Placeholder { .. } => None,
        }
    }
}

impl fmt::Display for FileBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content {
                relative_path,
                record,
                content,
            } => write!(
                f,
                "\nFile: {}\nSize: {} bytes\nLast Modified: {}\n---\n{}\n",
                relative_path.display(),
                record.size,
                record.modified_display(),
                content
            ),
            Self::Placeholder { file_name, message } => {
                write!(f, "Error reading {file_name}: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_content_layout() {
        let when = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let record = FileRecord::new("/work/docs/a.txt", 5, when);
        let block = FileBlock::content("docs/a.txt", record.clone(), "hello");

        let expected = format!(
            "\nFile: docs/a.txt\nSize: 5 bytes\nLast Modified: {}\n---\nhello\n",
            record.modified_display()
        );
        assert_eq!(block.to_string(), expected);
        assert!(!block.is_placeholder());
        assert_eq!(block.size(), Some(5));
    }

    #[test]
    fn test_placeholder_uses_base_name() {
        let block = FileBlock::placeholder(Path::new("/work/docs/a.txt"), &"Path not found");

        assert!(block.is_placeholder());
        assert_eq!(block.to_string(), "Error reading a.txt: Path not found");
        assert_eq!(block.size(), None);
    }
}
