//! Rendering diff entries as text.
//!
//! A [`FormattingPolicy`] controls how each entry becomes a line. It has three
//! parts:
//! - the prefix for each change type;
//! - a [`Colorizer`];
//! - a [`ModifiedFormatter`] that joins the before and after values of a
//!   modification.
//!
//! The policy never inspects the terminal. Callers decide whether color is
//! appropriate and pass that in.
//!
//! # Examples
//!
//! ```
//! use diffjson::{parse_json, DiffConfig, DiffEngine, FormattingPolicy, Prefixes};
//!
//! let policy = FormattingPolicy::default()
//!     .with_prefixes(Prefixes::new("+ ", "- ", "* "))
//!     .with_modified_formatter(|old: &str, new: &str| format!("{} -> {}", old, new));
//! let engine = DiffEngine::new(DiffConfig::default()).with_policy(policy);
//!
//! let mut lines = Vec::new();
//! engine.run(
//!     &parse_json(r#"{"n": 1}"#).unwrap(),
//!     &parse_json(r#"{"n": 2}"#).unwrap(),
//!     |line| lines.push(line),
//! );
//! assert_eq!(lines, vec!["* n: 1 -> 2"]);
//! ```

use crate::diff::{ChangeType, Diff, DiffEntry, DiffStats};
use crate::error::OutputError;
use crate::path::{PathResolver, Step};
use colored::Color;
use std::fmt;
use std::sync::Arc;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per entry, shaped by the formatting policy
    Text,
    /// JSON document with all entries and statistics
    Json,
}

/// Paints text belonging to one change type.
pub trait Colorizer: Send + Sync {
    fn paint(&self, change: ChangeType, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColor;

impl Colorizer for NoColor {
    fn paint(&self, _change: ChangeType, text: &str) -> String {
        text.to_string()
    }
}

/// Wraps text in ANSI foreground color codes, one color per change type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiColors {
    pub added: Color,
    pub removed: Color,
    pub modified: Color,
}

impl Default for AnsiColors {
    fn default() -> Self {
        Self {
            added: Color::BrightGreen,
            removed: Color::BrightRed,
            modified: Color::BrightBlue,
        }
    }
}

impl Colorizer for AnsiColors {
    fn paint(&self, change: ChangeType, text: &str) -> String {
        let color = match change {
            ChangeType::Added => self.added,
            ChangeType::Removed => self.removed,
            ChangeType::Modified => self.modified,
        };
        format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
    }
}

/// Joins the rendered original and modified values of a modification.
///
/// Any `Fn(&str, &str) -> String` closure is a formatter.
pub trait ModifiedFormatter: Send + Sync {
    fn format(&self, original: &str, modified: &str) -> String;
}

impl<F> ModifiedFormatter for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn format(&self, original: &str, modified: &str) -> String {
        self(original, modified)
    }
}

/// `original > modified`
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowFormatter;

impl ModifiedFormatter for ArrowFormatter {
    fn format(&self, original: &str, modified: &str) -> String {
        format!("{} > {}", original, modified)
    }
}

/// `modified (was original)`
#[derive(Debug, Clone, Copy, Default)]
pub struct WasFormatter;

impl ModifiedFormatter for WasFormatter {
    fn format(&self, original: &str, modified: &str) -> String {
        format!("{} (was {})", modified, original)
    }
}

/// Literal text placed before each line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefixes {
    pub added: String,
    pub removed: String,
    pub modified: String,
}

impl Prefixes {
    pub fn new(
        added: impl Into<String>,
        removed: impl Into<String>,
        modified: impl Into<String>,
    ) -> Self {
        Self {
            added: added.into(),
            removed: removed.into(),
            modified: modified.into(),
        }
    }

    pub fn for_change(&self, change: ChangeType) -> &str {
        match change {
            ChangeType::Added => &self.added,
            ChangeType::Removed => &self.removed,
            ChangeType::Modified => &self.modified,
        }
    }
}

impl Default for Prefixes {
    fn default() -> Self {
        Self::new("> ", "< ", "~ ")
    }
}

/// Prefixes, colorizer and modified-value formatter used to render entries.
#[derive(Clone)]
pub struct FormattingPolicy {
    prefixes: Prefixes,
    colorizer: Arc<dyn Colorizer>,
    modified_formatter: Arc<dyn ModifiedFormatter>,
    escape_strings: bool,
}

impl Default for FormattingPolicy {
    fn default() -> Self {
        Self {
            prefixes: Prefixes::default(),
            colorizer: Arc::new(NoColor),
            modified_formatter: Arc::new(ArrowFormatter),
            escape_strings: false,
        }
    }
}

impl fmt::Debug for FormattingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattingPolicy")
            .field("prefixes", &self.prefixes)
            .field("escape_strings", &self.escape_strings)
            .finish_non_exhaustive()
    }
}

impl FormattingPolicy {
    /// Default policy, with the default ANSI colors when `enabled`.
    ///
    /// Pass `wants_color && output_is_terminal`.
    pub fn colored(enabled: bool) -> Self {
        let policy = Self::default();
        if enabled {
            policy.with_colorizer(AnsiColors::default())
        } else {
            policy
        }
    }

    pub fn with_prefixes(mut self, prefixes: Prefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    pub fn with_colorizer(mut self, colorizer: impl Colorizer + 'static) -> Self {
        self.colorizer = Arc::new(colorizer);
        self
    }

    pub fn with_modified_formatter(mut self, formatter: impl ModifiedFormatter + 'static) -> Self {
        self.modified_formatter = Arc::new(formatter);
        self
    }

    /// Renders string values as escaped JSON strings instead of the legacy
    /// unescaped form.
    pub fn with_escaped_strings(mut self, escape: bool) -> Self {
        self.escape_strings = escape;
        self
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn escapes_strings(&self) -> bool {
        self.escape_strings
    }

    /// Formats one entry. `parent` and `step` locate it; the appended
    /// segment is painted in the entry's color.
    pub fn format_line(
        &self,
        paths: &PathResolver,
        parent: &str,
        step: &Step,
        entry: &DiffEntry,
    ) -> String {
        let change = entry.change_type();
        let path = paths.combine_styled(parent, step, |segment| {
            self.colorizer.paint(change, segment)
        });
        let prefix = self.prefixes.for_change(change);

        match entry {
            DiffEntry::Added { value, .. } | DiffEntry::Removed { value, .. } => {
                format!("{}{}: {}", prefix, path, value.render(self.escape_strings))
            }
            DiffEntry::Modified {
                original, modified, ..
            } => {
                let before = self
                    .colorizer
                    .paint(ChangeType::Removed, &original.render(self.escape_strings));
                let after = self
                    .colorizer
                    .paint(ChangeType::Added, &modified.render(self.escape_strings));
                format!(
                    "{}{}: {}",
                    prefix,
                    path,
                    self.modified_formatter.format(&before, &after)
                )
            }
        }
    }
}

/// Formats a collected diff as pretty-printed JSON.
pub fn format_json(diff: &Diff) -> Result<String, OutputError> {
    use serde_json::json;

    let changes: Vec<serde_json::Value> = diff
        .entries
        .iter()
        .map(|entry| {
            json!({
                "path": entry.path(),
                "type": entry.change_type(),
                "old_value": entry.old_value().map(|v| v.to_json_value()),
                "new_value": entry.new_value().map(|v| v.to_json_value()),
            })
        })
        .collect();

    let output = json!({
        "changes": changes,
        "stats": diff.stats,
    });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Formats summary statistics.
pub fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.modified > 0 {
        parts.push(format!("{} modified", stats.modified));
    }

    format!("Summary: {}", parts.join(", "))
}
