//! Core structural diff algorithm.
//!
//! Two documents are walked in lock-step, depth first. Every differing leaf
//! and every key or index present on only one side produces one
//! [`DiffEntry`]. Containers never produce entries of their own, only their
//! differing descendants do.
//!
//! Ordering is deterministic:
//! - Within an object, entries for the original's keys come first, in the
//!   original's key order: changes for shared keys and removals for missing
//!   ones.
//! - Additions follow, in the modified document's key order.
//! - Arrays are compared by position only.
//!
//! # Examples
//!
//! ```
//! use diffjson::{compute_diff, parse_json, DiffConfig};
//!
//! let old = parse_json(r#"{"a": 1, "b": 2}"#).unwrap();
//! let new = parse_json(r#"{"b": 3, "c": 4}"#).unwrap();
//!
//! let diff = compute_diff(&old, &new, &DiffConfig::default());
//! let paths: Vec<&str> = diff.entries.iter().map(|e| e.path()).collect();
//! assert_eq!(paths, vec!["a", "b", "c"]);
//! assert_eq!(diff.stats.modified, 1);
//! ```
//!
//! Recursion depth follows document depth; inputs nested deeply enough to
//! exhaust the stack abort the process rather than producing partial output.

use crate::ignore::IgnoreSet;
use crate::output::FormattingPolicy;
use crate::path::{PathResolver, Step};
use crate::tree::Node;
use indexmap::IndexMap;
use serde::Serialize;

/// The type of change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Present in the modified document only
    Added,
    /// Present in the original document only
    Removed,
    /// Present in both with different values
    Modified,
}

/// One classified difference at a rendered path.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEntry {
    Added {
        path: String,
        value: Node,
    },
    Removed {
        path: String,
        value: Node,
    },
    Modified {
        path: String,
        original: Node,
        modified: Node,
    },
}

impl DiffEntry {
    pub fn path(&self) -> &str {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Modified { path, .. } => path,
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self {
            DiffEntry::Added { .. } => ChangeType::Added,
            DiffEntry::Removed { .. } => ChangeType::Removed,
            DiffEntry::Modified { .. } => ChangeType::Modified,
        }
    }

    /// Value on the original side, if any.
    pub fn old_value(&self) -> Option<&Node> {
        match self {
            DiffEntry::Removed { value, .. } => Some(value),
            DiffEntry::Modified { original, .. } => Some(original),
            DiffEntry::Added { .. } => None,
        }
    }

    /// Value on the modified side, if any.
    pub fn new_value(&self) -> Option<&Node> {
        match self {
            DiffEntry::Added { value, .. } => Some(value),
            DiffEntry::Modified { modified, .. } => Some(modified),
            DiffEntry::Removed { .. } => None,
        }
    }
}

/// Counts of entries per change type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: &DiffEntry) {
        match entry.change_type() {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Modified => self.modified += 1,
        }
    }

    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// The complete diff result.
#[derive(Debug, Clone, Default)]
pub struct Diff {
    pub entries: Vec<DiffEntry>,
    pub stats: DiffStats,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DiffEntry) {
        self.stats.record(&entry);
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Traversal settings: how paths are rendered and which are skipped.
#[derive(Debug, Clone, Default)]
pub struct DiffConfig {
    pub paths: PathResolver,
    pub ignore: IgnoreSet,
}

impl DiffConfig {
    pub fn new(paths: PathResolver, ignore: IgnoreSet) -> Self {
        Self { paths, ignore }
    }
}

/// Runs diffs and renders their entries through a [`FormattingPolicy`].
///
/// The engine keeps no state between runs and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
    policy: FormattingPolicy,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            policy: FormattingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FormattingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    pub fn policy(&self) -> &FormattingPolicy {
        &self.policy
    }

    /// Hands every entry to `on_entry` in traversal order.
    pub fn walk<F>(&self, original: &Node, modified: &Node, mut on_entry: F)
    where
        F: FnMut(DiffEntry),
    {
        Walker::new(&self.config, |_: &str, _: &Step, entry: DiffEntry| on_entry(entry))
            .start(original, modified);
    }

    /// Collects all entries with their statistics.
    pub fn compute(&self, original: &Node, modified: &Node) -> Diff {
        let mut diff = Diff::new();
        self.walk(original, modified, |entry| diff.push(entry));
        diff
    }

    /// Formats each entry as a line and pushes it to `sink` as soon as it is
    /// found.
    ///
    /// ```
    /// use diffjson::{parse_json, DiffEngine};
    ///
    /// let old = parse_json("[1, 2, 3]").unwrap();
    /// let new = parse_json("[1, 2, 3, 4]").unwrap();
    ///
    /// let mut lines = Vec::new();
    /// DiffEngine::default().run(&old, &new, |line| lines.push(line));
    /// assert_eq!(lines, vec!["> [3]: 4"]);
    /// ```
    pub fn run<S>(&self, original: &Node, modified: &Node, mut sink: S) -> DiffStats
    where
        S: FnMut(String),
    {
        let mut stats = DiffStats::new();
        let paths = &self.config.paths;
        let policy = &self.policy;

        Walker::new(&self.config, |parent: &str, step: &Step, entry: DiffEntry| {
            stats.record(&entry);
            sink(policy.format_line(paths, parent, step, &entry));
        })
        .start(original, modified);

        tracing::debug!(
            added = stats.added,
            removed = stats.removed,
            modified = stats.modified,
            "diff complete"
        );
        stats
    }
}

/// Computes the diff between two nodes.
pub fn compute_diff(old: &Node, new: &Node, config: &DiffConfig) -> Diff {
    let mut diff = Diff::new();
    Walker::new(config, |_: &str, _: &Step, entry: DiffEntry| diff.push(entry)).start(old, new);
    diff
}

/// One depth-first traversal. `emit` receives the parent path and final step
/// alongside each entry so formatters can style the last segment.
struct Walker<'c, F> {
    config: &'c DiffConfig,
    emit: F,
}

impl<'c, F> Walker<'c, F>
where
    F: FnMut(&str, &Step, DiffEntry),
{
    fn new(config: &'c DiffConfig, emit: F) -> Self {
        Self { config, emit }
    }

    fn start(mut self, original: &Node, modified: &Node) {
        self.diff_value("", &Step::key(""), original, modified);
    }

    fn diff_value(&mut self, path: &str, key: &Step, original: &Node, modified: &Node) {
        if original.semantic_equals(modified) {
            return;
        }

        let full = self.config.paths.combine(path, key);
        if self.is_ignored(&full) {
            return;
        }

        match (original, modified) {
            (Node::Object(old_map), Node::Object(new_map)) => {
                self.diff_objects(&full, old_map, new_map)
            }
            (Node::Array(old_arr), Node::Array(new_arr)) => {
                self.diff_arrays(&full, old_arr, new_arr)
            }
            _ => (self.emit)(
                path,
                key,
                DiffEntry::Modified {
                    path: full,
                    original: original.clone(),
                    modified: modified.clone(),
                },
            ),
        }
    }

    fn diff_objects(
        &mut self,
        path: &str,
        old_map: &IndexMap<String, Node>,
        new_map: &IndexMap<String, Node>,
    ) {
        for (key, old_value) in old_map {
            let step = Step::key(key.as_str());
            match new_map.get(key) {
                Some(new_value) => self.diff_value(path, &step, old_value, new_value),
                None => self.one_sided(path, &step, old_value, ChangeType::Removed),
            }
        }

        // Keys matched above are skipped; the rest keep the new map's order.
        for (key, new_value) in new_map.iter().filter(|(key, _)| !old_map.contains_key(*key)) {
            self.one_sided(path, &Step::key(key.as_str()), new_value, ChangeType::Added);
        }
    }

    fn diff_arrays(&mut self, path: &str, old_arr: &[Node], new_arr: &[Node]) {
        for (index, old_value) in old_arr.iter().enumerate() {
            let step = Step::Index(index);
            match new_arr.get(index) {
                Some(new_value) => self.diff_value(path, &step, old_value, new_value),
                None => self.one_sided(path, &step, old_value, ChangeType::Removed),
            }
        }

        for (index, new_value) in new_arr.iter().enumerate().skip(old_arr.len()) {
            self.one_sided(path, &Step::Index(index), new_value, ChangeType::Added);
        }
    }

    fn one_sided(&mut self, path: &str, key: &Step, value: &Node, change: ChangeType) {
        let full = self.config.paths.combine(path, key);
        if self.is_ignored(&full) {
            return;
        }

        let value = value.clone();
        let entry = match change {
            ChangeType::Added => DiffEntry::Added { path: full, value },
            _ => DiffEntry::Removed { path: full, value },
        };
        (self.emit)(path, key, entry);
    }

    fn is_ignored(&self, full: &str) -> bool {
        let ignored = self.config.ignore.contains(full);
        if ignored {
            tracing::trace!(path = full, "skipping ignored path");
        }
        ignored
    }
}
