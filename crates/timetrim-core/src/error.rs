//! Error types and result aliases for timetrim.
//!
//! These are the errors raised by the shared primitives: identifier and date
//! parsing, snapshot I/O, and lookups against a schedule graph.

use std::fmt;

/// The result type used throughout timetrim-core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An invalid identifier was provided.
    #[error("invalid identifier: {message}")]
    InvalidId {
        /// Description of what made the ID invalid.
        message: String,
    },

    /// A date could not be parsed as a `YYYYMMDD` calendar date.
    #[error("invalid date: {message}")]
    InvalidDate {
        /// Description of what made the date invalid.
        message: String,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// Reading or writing a snapshot failed.
    #[error("io error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
        /// The underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// The requested entity was not found.
    #[error("not found: {entity} with id {id}")]
    NotFound {
        /// The kind of entity that was not found.
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
}

impl Error {
    /// Creates a new not found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a new I/O error with context.
    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}
