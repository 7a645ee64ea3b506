//! In-memory implementation of [`ProgramStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed. It has no tokenizer or stemmer: a program
//! matches when the query words appear as a contiguous, case-insensitive word
//! sequence in its name or description.

use std::collections::BTreeMap;

use crate::error::StorageError;
use crate::query::query_terms;
use crate::traits::ProgramStore;
use crate::types::{Program, ProgramId};

/// In-memory storage backend. IDs start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    programs: BTreeMap<ProgramId, Program>,
    next_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Lowercased words of `text`, split on anything that is not alphanumeric.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    haystack.windows(phrase.len()).any(|window| window == phrase)
}

impl ProgramStore for InMemoryStore {
    fn create_program(&mut self, name: &str, description: &str) -> Result<Program, StorageError> {
        self.next_id += 1;
        let id = ProgramId(self.next_id);
        let program = Program {
            id,
            name: name.to_string(),
            description: description.to_string(),
        };
        self.programs.insert(id, program.clone());
        Ok(program)
    }

    fn get_program(&self, id: ProgramId) -> Result<Program, StorageError> {
        self.programs
            .get(&id)
            .cloned()
            .ok_or(StorageError::ProgramNotFound(id.0))
    }

    fn search_text(&self, normalized_query: &str) -> Result<Vec<Program>, StorageError> {
        let phrase = query_terms(normalized_query);
        if phrase.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .programs
            .values()
            .filter(|p| {
                contains_phrase(&words(&p.name), &phrase)
                    || contains_phrase(&words(&p.description), &phrase)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one() {
        let mut store = InMemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.create_program("a", "").unwrap().id, ProgramId(1));
        assert_eq!(store.create_program("b", "").unwrap().id, ProgramId(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_then_get_roundtrip() {
        let mut store = InMemoryStore::new();
        let created = store.create_program("Foo", "bar").unwrap();
        assert_eq!(store.get_program(created.id).unwrap(), created);
    }

    #[test]
    fn missing_id_is_not_found() {
        let store = InMemoryStore::new();
        assert!(store.get_program(ProgramId(5)).unwrap_err().is_not_found());
    }

    #[test]
    fn phrase_match_is_case_insensitive_and_contiguous() {
        let mut store = InMemoryStore::new();
        store
            .create_program("Machine Learning Basics", "")
            .unwrap();
        store
            .create_program("Learning about machines", "machine, then learning")
            .unwrap();

        // The second program has both words, but never adjacent.
        let found = store.search_text("machine_learning").unwrap();
        assert_eq!(found.len(), 1);

        let found = store.search_text("MACHINE_LEARNING_BASICS").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Machine Learning Basics");
    }

    #[test]
    fn punctuation_separates_words() {
        let mut store = InMemoryStore::new();
        store.create_program("E-Learning for Kids", "node.js and C++").unwrap();
        assert_eq!(store.search_text("e-learning").unwrap().len(), 1);
        assert_eq!(store.search_text("e_learning").unwrap().len(), 1);
        assert_eq!(store.search_text("node.js").unwrap().len(), 1);
        assert_eq!(store.search_text("C++").unwrap().len(), 1);
    }

    #[test]
    fn blank_query_matches_nothing() {
        let mut store = InMemoryStore::new();
        store.create_program("anything", "").unwrap();
        assert!(store.search_text("").unwrap().is_empty());
    }
}
