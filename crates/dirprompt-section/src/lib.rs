//! Section building and prompt assembly for dirprompt.
//!
//! A section is one directory tree rendered as a titled text block. Building a
//! section never fails; the worst case is one of two diagnostic fallbacks.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirprompt_section::build_doc_section;
//!
//! # async fn run() {
//! let text = build_doc_section("lib/examples", "Code Examples").await;
//! println!("{text}");
//! # }
//! ```

mod builder;
mod prompt;

pub use builder::{SectionBuilder, build_doc_section};
pub use prompt::PromptBuilder;

// Re-export core types for convenience
pub use dirprompt_core::{
    DatabaseError, DbError, FileBlock, PromptConfig, Section, SectionBody, SectionConfig,
    handle_db_error,
};
