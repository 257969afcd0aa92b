//! Paths excluded from comparison.
//!
//! Entries are rendered paths, compared verbatim against the path the engine
//! builds for each node (for example `meta.updated` or `items[2].id`). A
//! matching node is pruned together with everything beneath it. Entries that
//! never match are not an error.
//!
//! # Examples
//!
//! ```
//! use diffjson::ignore::IgnoreSet;
//!
//! let ignore = IgnoreSet::new().ignore("metadata.timestamp").ignore("items[0]");
//! assert!(ignore.contains("metadata.timestamp"));
//! assert!(!ignore.contains("metadata"));
//! ```

use std::collections::HashSet;

/// A set of rendered paths to skip during a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, path: impl Into<String>) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership_only() {
        let ignore = IgnoreSet::new().ignore("a.b");
        assert!(ignore.contains("a.b"));
        assert!(!ignore.contains("a"));
        assert!(!ignore.contains("a.b.c"));
        assert!(!ignore.contains(".a.b"));
    }

    #[test]
    fn test_from_iterator() {
        let ignore: IgnoreSet = vec!["x", "y[1]", "x"].into_iter().collect();
        assert_eq!(ignore.len(), 2);
        assert!(ignore.contains("y[1]"));
    }

    #[test]
    fn test_empty_set() {
        let ignore = IgnoreSet::new();
        assert!(ignore.is_empty());
        assert!(!ignore.contains(""));
    }
}
