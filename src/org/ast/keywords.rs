//! Recognized TODO keywords

use indexmap::IndexSet;
use serde::Serialize;

/// Keywords recognized when none are declared
pub const DEFAULT_TODO_KEYWORDS: &[&str] = &["TODO", "DONE"];

/// Ordered set of TODO keywords for one document
///
/// Seeded with [`DEFAULT_TODO_KEYWORDS`] (or configured seeds) and extended by every
/// `#+SEQ_TODO:` line of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    keywords: IndexSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::from_seeds(DEFAULT_TODO_KEYWORDS.iter().copied())
    }

    pub fn from_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordSet {
            keywords: seeds.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the keyword was not known yet
    pub fn insert(&mut self, keyword: impl Into<String>) -> bool {
        self.keywords.insert(keyword.into())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seeds() {
        let set = KeywordSet::new();
        assert!(set.contains("TODO"));
        assert!(set.contains("DONE"));
        assert!(!set.contains("WAITING"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut set = KeywordSet::new();
        assert!(set.insert("WAITING"));
        assert!(!set.insert("TODO"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["TODO", "DONE", "WAITING"]);
    }
}
