//! Classification of relational database errors into readable messages.
//!
//! The classifier never produces errors of its own. Whatever fields the driver
//! supplied, it returns a message.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel;

/// SQLSTATE code for a foreign-key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Shown in place of a field the error did not carry.
const MISSING_FIELD: &str = "undefined";

/// Read access to the fields a database driver may attach to an error.
///
/// Every accessor defaults to `None`, so adapters only override what their
/// driver actually reports.
pub trait DatabaseError: fmt::Debug {
    /// SQLSTATE or driver error code.
    fn code(&self) -> Option<&str> {
        None
    }

    /// Name of the violated constraint.
    fn constraint_name(&self) -> Option<&str> {
        None
    }

    /// Driver-provided detail line.
    fn detail(&self) -> Option<&str> {
        None
    }

    /// Table the error relates to.
    fn table_name(&self) -> Option<&str> {
        None
    }

    /// Primary error message.
    fn message(&self) -> Option<&str> {
        None
    }
}

/// Plain structured database error, deserializable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DbError {
    /// Create an error carrying only a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Create an error with a code and detail line.
    pub fn with_code(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            detail: Some(detail.into()),
            ..Default::default()
        }
    }
}

impl DatabaseError for DbError {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn constraint_name(&self) -> Option<&str> {
        self.constraint_name.as_deref()
    }

    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Reads top-level string fields; anything else counts as absent.
impl DatabaseError for serde_json::Value {
    fn code(&self) -> Option<&str> {
        self.get("code").and_then(serde_json::Value::as_str)
    }

    fn constraint_name(&self) -> Option<&str> {
        self.get("constraint_name").and_then(serde_json::Value::as_str)
    }

    fn detail(&self) -> Option<&str> {
        self.get("detail").and_then(serde_json::Value::as_str)
    }

    fn table_name(&self) -> Option<&str> {
        self.get("table_name").and_then(serde_json::Value::as_str)
    }

    fn message(&self) -> Option<&str> {
        self.get("message").and_then(serde_json::Value::as_str)
    }
}

/// Kind of database failure recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbErrorClass {
    /// A row references a key that does not exist.
    ForeignKeyViolation,
    /// Anything else.
    Unknown,
}

impl DbErrorClass {
    /// Classify an error by its code.
    pub fn of<E: DatabaseError + ?Sized>(error: &E) -> Self {
        match error.code() {
            Some(FOREIGN_KEY_VIOLATION) => Self::ForeignKeyViolation,
            _ => Self::Unknown,
        }
    }
}

/// Turn a database error into a message suitable for an end user.
pub fn handle_db_error<E: DatabaseError + ?Sized>(error: &E) -> String {
    match DbErrorClass::of(error) {
        DbErrorClass::ForeignKeyViolation => {
            tracing::warn!(
                target: channel::DB,
                constraint = ?error.constraint_name(),
                detail = ?error.detail(),
                table = ?error.table_name(),
                "Foreign key violation detected"
            );
            format!(
                "Database constraint error: {}",
                error.detail().unwrap_or(MISSING_FIELD)
            )
        }
        DbErrorClass::Unknown => {
            tracing::warn!(target: channel::DB, error = ?error, "Unknown database error");
            format!(
                "Unknown database error: {}",
                error.message().unwrap_or(MISSING_FIELD)
            )
        }
    }
}
