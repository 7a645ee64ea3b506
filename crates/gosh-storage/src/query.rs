//! Search query normalization.
//!
//! A normalized query is the user's words joined by [`WORD_JOINER`]. Stores
//! treat it as a phrase: `machine_learning` matches the adjacent words
//! "machine learning". [`fts_phrase`] renders it as a quoted FTS5 string, so
//! punctuation is left to the tokenizer and no user text is read as FTS5
//! operators or column filters.

/// Token placed between words of a normalized query.
pub const WORD_JOINER: char = '_';

/// Converts raw user input into the token form the index expects.
///
/// Leading and trailing whitespace is dropped and every run of interior
/// whitespace becomes a single [`WORD_JOINER`]. Empty or whitespace-only
/// input yields an empty string.
pub fn normalize_query(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(WORD_JOINER);
        }
        normalized.push_str(word);
    }
    normalized
}

/// Splits a normalized query back into its words, lowercased.
///
/// Anything that is not alphanumeric separates words, [`WORD_JOINER`]
/// included, the same way the index tokenizer splits `e-learning` or
/// `node.js`. Used by backends without a native tokenizer.
pub fn query_terms(normalized: &str) -> Vec<String> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Renders a normalized query as one FTS5 phrase string.
///
/// Words are split on [`WORD_JOINER`], embedded `"` are doubled, and the
/// result is wrapped in double quotes. Returns `None` when there are no words.
pub fn fts_phrase(normalized: &str) -> Option<String> {
    let words: Vec<String> = normalized
        .split(WORD_JOINER)
        .filter(|word| !word.is_empty())
        .map(|word| word.replace('"', "\"\""))
        .collect();
    if words.is_empty() {
        return None;
    }
    Some(format!("\"{}\"", words.join(" ")))
}
