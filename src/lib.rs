//! diffjson - structural diff for JSON documents.
//!
//! Two documents are compared key by key and index by index. Every added,
//! removed or modified value is reported once at its path, in a stable order
//! that follows the documents' own key order. Sub-trees can be selected before
//! diffing, and paths can be excluded.
//!
//! # Example
//!
//! ```
//! use diffjson::{parse_json, DiffConfig, DiffEngine, IgnoreSet, PathResolver};
//!
//! let mut old = parse_json(r#"{"data": {"id": 1, "seen": "mon", "tags": ["a"]}}"#).unwrap();
//! let mut new = parse_json(r#"{"data": {"id": 2, "seen": "tue", "tags": ["a", "b"]}}"#).unwrap();
//!
//! let paths = PathResolver::default();
//! assert!(paths.select(&mut old, "data"));
//! assert!(paths.select(&mut new, "data"));
//!
//! let engine = DiffEngine::new(DiffConfig::new(paths, IgnoreSet::new().ignore("seen")));
//! let mut lines = Vec::new();
//! engine.run(&old, &new, |line| lines.push(line));
//!
//! assert_eq!(lines, vec!["~ id: 1 > 2", "> tags[1]: \"b\""]);
//! ```

pub mod diff;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod parser;
pub mod path;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{compute_diff, ChangeType, Diff, DiffConfig, DiffEngine, DiffEntry, DiffStats};
pub use error::{DiffJsonError, OutputError, ParseError, PathError};
pub use ignore::IgnoreSet;
pub use output::{
    format_json, format_summary, AnsiColors, ArrowFormatter, Colorizer, FormattingPolicy,
    ModifiedFormatter, NoColor, OutputFormat, Prefixes, WasFormatter,
};
pub use parser::{parse_content, parse_file, parse_json, parse_stdin, FormatHint};
pub use path::{PathResolver, Step};
pub use tree::Node;
