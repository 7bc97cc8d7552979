//! Titled sections built from a directory.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::FileBlock;

/// Line drawn under every section title.
pub const UNDERLINE: &str = "===================";

/// What a section contains below its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionBody {
    /// One block per discovered file, in discovery order.
    Populated(Vec<FileBlock>),
    /// The directory yielded no files.
    Empty {
        /// Absolute path that was searched.
        attempted_path: PathBuf,
        /// Working directory at the time of the search.
        working_dir: PathBuf,
    },
    /// An unexpected failure escaped file-level isolation.
    BuildError {
        /// Short error message.
        message: String,
        /// Debug representation of the error and its causes.
        detail: String,
        /// Absolute path of the directory being built.
        directory: PathBuf,
    },
}

/// A titled block of text handed to the prompt consumer.
///
/// Always renders to a non-empty string with one of three shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title.
    pub title: String,
    /// Section contents.
    pub body: SectionBody,
}

impl Section {
    /// Create a section holding file blocks.
    pub fn populated(title: impl Into<String>, blocks: Vec<FileBlock>) -> Self {
        Self {
            title: title.into(),
            body: SectionBody::Populated(blocks),
        }
    }

    /// Create the "no files found" fallback.
    pub fn empty(
        title: impl Into<String>,
        attempted_path: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            body: SectionBody::Empty {
                attempted_path: attempted_path.into(),
                working_dir: working_dir.into(),
            },
        }
    }

    /// Create the "build error" fallback.
    pub fn build_error(
        title: impl Into<String>,
        message: impl Into<String>,
        detail: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            body: SectionBody::BuildError {
                message: message.into(),
                detail: detail.into(),
                directory: directory.into(),
            },
        }
    }

    /// Whether the section holds file blocks.
    pub fn is_populated(&self) -> bool {
        matches!(self.body, SectionBody::Populated(_))
    }

    /// File blocks in this section (empty for fallbacks).
    pub fn blocks(&self) -> &[FileBlock] {
        match &self.body {
            SectionBody::Populated(blocks) => blocks,
            _ => &[],
        }
    }

    /// Number of files that were read successfully.
    pub fn loaded_count(&self) -> usize {
        self.blocks().iter().filter(|b| !b.is_placeholder()).count()
    }

    /// Total size in bytes of the files that were read successfully.
    pub fn total_size(&self) -> u64 {
        self.blocks().iter().filter_map(FileBlock::size).sum()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}:\n{UNDERLINE}\n", self.title)?;

        match &self.body {
            SectionBody::Populated(blocks) => {
                for (i, block) in blocks.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n\n")?;
                    }
                    write!(f, "{block}")?;
                }
                f.write_str("\n")
            }
            SectionBody::Empty {
                attempted_path,
                working_dir,
            } => write!(
                f,
                "No files found in directory. Debug info:\n- Attempted path: {}\n- Working directory: {}\n",
                attempted_path.display(),
                working_dir.display()
            ),
            SectionBody::BuildError {
                message,
                detail,
                directory,
            } => write!(
                f,
                "Error building section. Debug info:\n- Error: {message}\n- Stack: {detail}\n- Directory: {}\n",
                directory.display()
            ),
        }
    }
}
