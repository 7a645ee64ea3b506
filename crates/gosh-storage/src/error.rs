//! Storage error types for gosh-storage.
//!
//! [`StorageError`] separates "the row does not exist" from infrastructure
//! failures so callers can map them to different response codes.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SQLite reported an error (I/O, constraint violation).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A program with the given ID was not found.
    #[error("program not found: {0}")]
    ProgramNotFound(i64),
}

impl StorageError {
    /// Returns `true` when the error means "no such row" rather than a
    /// failure of the store itself.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::ProgramNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable() {
        assert!(StorageError::ProgramNotFound(4).is_not_found());
        assert!(!StorageError::Migration("boom".into()).is_not_found());
    }

    #[test]
    fn display_includes_id() {
        assert_eq!(
            StorageError::ProgramNotFound(42).to_string(),
            "program not found: 42"
        );
    }
}
