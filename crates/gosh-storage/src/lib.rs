//! Storage abstraction for the gosh program catalog.
//!
//! Provides the [`ProgramStore`] trait defining the storage contract, plus
//! [`SqliteStore`] (FTS5-indexed, persistent) and [`InMemoryStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: Program and ProgramId
//! - [`query`]: search query normalization into index token form
//! - [`traits`]: ProgramStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod query;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::StorageError;
pub use memory::InMemoryStore;
pub use query::{normalize_query, WORD_JOINER};
pub use sqlite::SqliteStore;
pub use traits::ProgramStore;
pub use types::{Program, ProgramId};
