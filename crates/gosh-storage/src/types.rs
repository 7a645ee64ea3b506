//! Storage-layer types for program identity and records.
//!
//! [`ProgramId`] lives here because identity is a storage concern: a program
//! only gains an ID once a store has persisted it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a stored program.
///
/// The inner `i64` aligns with SQLite's `INTEGER PRIMARY KEY`. Serializes
/// transparently as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub i64);

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry as persisted by a [`ProgramStore`](crate::ProgramStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Store-assigned identifier.
    pub id: ProgramId,
    /// Program name.
    pub name: String,
    /// Free-form description; may be empty.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_display() {
        assert_eq!(ProgramId(7).to_string(), "7");
    }

    #[test]
    fn program_serializes_with_flat_id() {
        let program = Program {
            id: ProgramId(3),
            name: "Foo".to_string(),
            description: "bar".to_string(),
        };
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "name": "Foo", "description": "bar" })
        );
    }
}
