//! Diagnostic trace channels.
//!
//! Every trace emitted by dirprompt goes to one of these `tracing` targets.
//! Hosts enable or silence them through their subscriber filter, e.g.
//! `RUST_LOG=prompt=trace` or `RUST_LOG=prompt::error=warn`.

/// Progress and discovery traces.
pub const INFO: &str = "prompt::info";

/// Failures that were absorbed into fallback output.
pub const ERROR: &str = "prompt::error";

/// Database error classification.
pub const DB: &str = "prompt::db";

/// Filter directive that enables every channel.
pub const ALL: &str = "prompt=trace";
