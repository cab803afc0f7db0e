//! Error types for prune operations.

use serde::Serialize;
use thiserror::Error;

use timetrim_core::EntityKind;

/// Result type alias for prune operations.
pub type Result<T> = std::result::Result<T, PruneError>;

/// Errors that abort a prune.
///
/// Every variant is raised before the graph is mutated.
#[derive(Debug, Error)]
pub enum PruneError {
    /// The cutoff date or the policy is malformed or out of range.
    #[error("validation error: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// A core operation failed.
    #[error(transparent)]
    Core(#[from] timetrim_core::Error),
}

impl PruneError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// A removal that found nothing to remove.
///
/// Not an error: removals are idempotent, so an id that is already gone is
/// recorded and the batch carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundWarning {
    /// Kind of entity that was requested.
    pub entity: EntityKind,
    /// The id that was absent.
    pub id: String,
}
