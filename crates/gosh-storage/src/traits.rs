//! The [`ProgramStore`] trait defining the storage contract for programs.
//!
//! All backends ([`InMemoryStore`](crate::InMemoryStore),
//! [`SqliteStore`](crate::SqliteStore)) implement this trait, so the service
//! layer can swap them without changing any search or handler logic.

use crate::error::StorageError;
use crate::types::{Program, ProgramId};

/// The storage contract for catalog programs.
///
/// The trait is synchronous: the SQLite backend is synchronous and callers
/// serialize access behind an async mutex.
pub trait ProgramStore {
    /// Persists a new program and returns it with its assigned [`ProgramId`].
    ///
    /// Either the full record is stored or nothing is.
    fn create_program(&mut self, name: &str, description: &str) -> Result<Program, StorageError>;

    /// Fetches a program by ID.
    ///
    /// Returns [`StorageError::ProgramNotFound`] when no row matches.
    fn get_program(&self, id: ProgramId) -> Result<Program, StorageError>;

    /// Runs a full-text match for an already normalized query.
    ///
    /// Results come back in the backend's ranking order. No matches is an
    /// empty vector, not an error.
    fn search_text(&self, normalized_query: &str) -> Result<Vec<Program>, StorageError>;
}
