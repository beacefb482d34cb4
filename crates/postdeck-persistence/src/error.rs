//! Error types for snapshot persistence

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while saving, loading, undoing or redoing
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No snapshot exists in the snapshot directory
    #[error("No snapshot found in {}", dir.display())]
    NotFound {
        /// Directory that was searched
        dir: PathBuf,
    },

    /// The redo namespace is empty
    #[error("Nothing to redo")]
    NoRedo,

    /// Persisted data is malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A persisted reference does not resolve (strict revive only)
    #[error("Reference integrity violation in {entity} {id}: {reason}")]
    ReferenceIntegrity {
        /// Kind of entity holding the reference
        entity: &'static str,
        /// Id of the entity holding the reference
        id: u32,
        /// What did not resolve
        reason: String,
    },

    /// The seed file does not exist
    #[error("Seed file not found: {}", path.display())]
    SeedNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PersistenceError {
    /// Create a new Parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new ReferenceIntegrity error with context
    pub fn reference(entity: &'static str, id: u32, reason: impl Into<String>) -> Self {
        Self::ReferenceIntegrity {
            entity,
            id,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
