//! Application state shared by every handler and stream session.
//!
//! The store is an explicitly constructed handle, created once at startup and
//! passed to handlers through axum's `State`. It sits behind a
//! `tokio::sync::Mutex` (async-aware, so waiting handlers don't block the
//! runtime). `rusqlite::Connection` is `!Sync`, which rules out an `RwLock`;
//! the mutex is the only mutual exclusion the store needs.

use std::sync::Arc;
use std::time::Duration;

use gosh_storage::{ProgramStore, SqliteStore};

use crate::cache::ResponseCache;
use crate::error::ApiError;
use crate::search::SearchService;

/// Handle to the program store, shared across tasks.
pub type SharedStore = Arc<tokio::sync::Mutex<dyn ProgramStore + Send>>;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The program store used by create/get handlers.
    pub store: SharedStore,
    /// Search over the same store, used by both transports.
    pub search: SearchService,
    /// GET response cache (never applied to the stream endpoint).
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    /// Creates an `AppState` backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str, cache_ttl: Duration) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)
            .map_err(|e| ApiError::InternalError(format!("failed to open store: {}", e)))?;
        Ok(Self::with_store(store).with_cache_ttl(cache_ttl))
    }

    /// Creates an `AppState` with an in-memory SQLite database and the
    /// response cache disabled (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()
            .map_err(|e| ApiError::InternalError(format!("failed to open test store: {}", e)))?;
        Ok(Self::with_store(store))
    }

    /// Wraps an arbitrary store backend. The response cache starts disabled.
    pub fn with_store(store: impl ProgramStore + Send + 'static) -> Self {
        let store: SharedStore = Arc::new(tokio::sync::Mutex::new(store));
        AppState {
            search: SearchService::new(store.clone()),
            store,
            cache: Arc::new(ResponseCache::disabled()),
        }
    }

    /// Replaces the response cache with one using the given TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = Arc::new(ResponseCache::new(ttl));
        self
    }
}
