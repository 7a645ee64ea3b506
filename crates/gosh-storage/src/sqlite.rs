//! SQLite implementation of [`ProgramStore`].
//!
//! [`SqliteStore`] persists programs in a SQLite database with WAL mode and
//! automatic schema migrations. Text search runs against the external-content
//! FTS5 table `programs_fts`, which triggers keep in step with `programs`.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StorageError;
use crate::query::fts_phrase;
use crate::traits::ProgramStore;
use crate::types::{Program, ProgramId};

/// SQLite-backed implementation of [`ProgramStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Closes the underlying connection, surfacing any error SQLite reports
    /// while finalizing.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Sqlite(e))
    }

    fn row_to_program(row: &Row<'_>) -> rusqlite::Result<Program> {
        Ok(Program {
            id: ProgramId(row.get(0)?),
            name: row.get(1)?,
            description: row.get(2)?,
        })
    }
}

impl ProgramStore for SqliteStore {
    fn create_program(&mut self, name: &str, description: &str) -> Result<Program, StorageError> {
        // The FTS insert happens in the AFTER INSERT trigger, inside the same
        // implicit statement transaction as the row itself.
        let id: i64 = self.conn.query_row(
            "INSERT INTO programs (name, description) VALUES (?1, ?2) RETURNING id",
            params![name, description],
            |row| row.get(0),
        )?;

        Ok(Program {
            id: ProgramId(id),
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    fn get_program(&self, id: ProgramId) -> Result<Program, StorageError> {
        self.conn
            .query_row(
                "SELECT id, name, description FROM programs WHERE id = ?1",
                params![id.0],
                Self::row_to_program,
            )
            .optional()?
            .ok_or(StorageError::ProgramNotFound(id.0))
    }

    fn search_text(&self, normalized_query: &str) -> Result<Vec<Program>, StorageError> {
        let Some(phrase) = fts_phrase(normalized_query) else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare_cached(
            "SELECT p.id, p.name, p.description
             FROM programs_fts
             JOIN programs p ON p.id = programs_fts.rowid
             WHERE programs_fts MATCH ?1
             ORDER BY bm25(programs_fts), p.id",
        )?;

        let rows = stmt.query_map(params![phrase], Self::row_to_program)?;

        let mut programs = Vec::new();
        for row in rows {
            programs.push(row?);
        }
        Ok(programs)
    }
}
