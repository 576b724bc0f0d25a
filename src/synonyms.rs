//! Genre synonym table.
//!
//! Conversational genre phrasing ("new releases") is rewritten to the
//! catalog's canonical tag before filtering. Lookups ignore case and
//! surrounding whitespace; unknown phrases pass through unchanged.

use std::collections::HashMap;

const STANDARD: &[(&str, &str)] = &[("new releases", "NewRelease"), ("new release", "NewRelease")];

#[derive(Debug, Clone)]
pub struct GenreSynonyms {
    entries: HashMap<String, String>,
}

impl GenreSynonyms {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Add or replace a mapping.
    pub fn with(mut self, phrase: &str, canonical: impl Into<String>) -> Self {
        self.entries.insert(key(phrase), canonical.into());
        self
    }

    pub fn canonical<'a>(&'a self, genre: &'a str) -> &'a str {
        self.entries.get(&key(genre)).map(String::as_str).unwrap_or(genre)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GenreSynonyms {
    fn default() -> Self {
        STANDARD.iter().fold(Self::empty(), |table, (phrase, canonical)| table.with(phrase, *canonical))
    }
}

fn key(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_releases_collapse_to_one_tag() {
        let table = GenreSynonyms::default();
        assert_eq!(table.canonical("new releases"), "NewRelease");
        assert_eq!(table.canonical("New Release "), "NewRelease");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unknown_genres_pass_through() {
        assert_eq!(GenreSynonyms::default().canonical("Thriller"), "Thriller");
        assert!(GenreSynonyms::empty().is_empty());
    }

    #[test]
    fn table_is_extensible() {
        let table = GenreSynonyms::default().with("sci-fi", "SciFi").with("science fiction", "SciFi");
        assert_eq!(table.canonical("Science Fiction"), "SciFi");
        assert_eq!(table.canonical("new release"), "NewRelease");
    }
}
