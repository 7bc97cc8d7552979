//! Directory walking and file loading for dirprompt.
//!
//! Every operation here except [`file_metadata`] is infallible: failures are
//! traced on the [`channel::ERROR`](dirprompt_core::channel::ERROR) target and
//! folded into an empty result or a placeholder block.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirprompt_scan::{file_content, read_files_recursively};
//!
//! # async fn run() {
//! let cwd = std::env::current_dir().unwrap();
//! for path in read_files_recursively("lib/docs").await {
//!     println!("{}", file_content(&path, &cwd).await);
//! }
//! # }
//! ```

mod exists;
mod loader;
mod metadata;
mod walker;

pub use exists::path_exists;
pub use loader::{file_content, relative_to};
pub use metadata::file_metadata;
pub use walker::{absolute, read_files_in, read_files_recursively};

// Re-export core types for convenience
pub use dirprompt_core::{FileBlock, FileRecord, LoadError};
