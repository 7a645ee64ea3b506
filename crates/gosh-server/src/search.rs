//! Transport-independent text search over the shared program store.
//!
//! [`SearchService::search`] never fails from the caller's point of view: a
//! store error produces an empty result, exactly like "no matches". The two
//! cases are told apart only internally, through a `warn` log line and the
//! [`SearchService::failures`] counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gosh_storage::{normalize_query, Program};

use crate::state::SharedStore;

/// Best-effort search shared by the HTTP and WebSocket endpoints.
#[derive(Clone)]
pub struct SearchService {
    store: SharedStore,
    failures: Arc<AtomicU64>,
}

impl SearchService {
    pub fn new(store: SharedStore) -> Self {
        SearchService {
            store,
            failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Normalizes `raw` and returns the matching programs in store ranking
    /// order. Store failures are absorbed into an empty result.
    pub async fn search(&self, raw: &str) -> Vec<Program> {
        let query = normalize_query(raw);
        if query.is_empty() {
            return Vec::new();
        }

        let result = {
            let store = self.store.lock().await;
            store.search_text(&query)
        };

        match result {
            Ok(programs) => {
                tracing::debug!(query = %query, hits = programs.len(), "search completed");
                programs
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(query = %query, error = %e, "search failed; returning no results");
                Vec::new()
            }
        }
    }

    /// Number of searches whose store call failed since startup.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gosh_storage::{InMemoryStore, ProgramId, ProgramStore, StorageError};
    use tokio::sync::Mutex;

    use super::*;

    fn io_error() -> StorageError {
        StorageError::Sqlite(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            Some("disk I/O error".to_string()),
        ))
    }

    /// A store whose every operation fails like a lost connection.
    struct UnreachableStore;

    impl ProgramStore for UnreachableStore {
        fn create_program(&mut self, _: &str, _: &str) -> Result<Program, StorageError> {
            Err(io_error())
        }

        fn get_program(&self, _: ProgramId) -> Result<Program, StorageError> {
            Err(io_error())
        }

        fn search_text(&self, _: &str) -> Result<Vec<Program>, StorageError> {
            Err(io_error())
        }
    }

    fn service_with(store: impl ProgramStore + Send + 'static) -> SearchService {
        let shared: SharedStore = Arc::new(Mutex::new(store));
        SearchService::new(shared)
    }

    #[tokio::test]
    async fn finds_programs_by_phrase() {
        let mut store = InMemoryStore::new();
        store.create_program("Machine Learning", "ml").unwrap();
        store.create_program("Cooking", "pasta").unwrap();
        let service = service_with(store);

        let found = service.search("  machine    learning ").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Machine Learning");
    }

    #[tokio::test]
    async fn store_failure_becomes_empty_result() {
        let service = service_with(UnreachableStore);
        let found = service.search("anything").await;
        assert!(found.is_empty());
        assert_eq!(service.failures(), 1);
    }

    #[tokio::test]
    async fn blank_query_skips_the_store() {
        let service = service_with(UnreachableStore);
        assert!(service.search("   ").await.is_empty());
        assert_eq!(service.failures(), 0);
    }

    #[tokio::test]
    async fn clones_share_the_failure_counter() {
        let service = service_with(UnreachableStore);
        let other = service.clone();
        other.search("x").await;
        assert_eq!(service.failures(), 1);
    }
}
