//! Core types for dirprompt.
//!
//! This crate provides the data model shared by the scanner and the section
//! builder: file records, rendered file blocks, sections, configuration, the
//! trace channel names, and the database error classifier.

pub mod channel;
mod block;
mod config;
mod db;
mod error;
mod record;
mod section;

pub use block::FileBlock;
pub use config::{
    ConfigError, PromptConfig, SectionConfig, SectionConfigBuilder, SectionConfigBuilderError,
};
pub use db::{DatabaseError, DbError, DbErrorClass, FOREIGN_KEY_VIOLATION, handle_db_error};
pub use error::LoadError;
pub use record::{FileRecord, MODIFIED_FORMAT};
pub use section::{Section, SectionBody, UNDERLINE};
