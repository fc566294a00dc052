// Error taxonomy for store operations

use std::path::PathBuf;

/// Errors returned by [`crate::Store`] operations
///
/// An unreadable snapshot is deliberately absent: loading recovers to an
/// empty collection instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced task id is not in the collection
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// Description was empty or whitespace-only
    #[error("task description cannot be empty")]
    EmptyDescription,

    /// Status outside of todo / in-progress / done
    #[error("invalid status: '{0}' (expected todo, in-progress or done)")]
    InvalidStatus(String),

    /// More than one task id starts with the given prefix
    #[error("ambiguous task id prefix: '{prefix}' matches {matches} tasks")]
    AmbiguousId { prefix: String, matches: usize },

    /// Writing the snapshot failed
    #[error("failed to persist tasks to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// True for rejected user input (empty description, unknown status)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyDescription | Self::InvalidStatus(_))
    }
}
