//! Path construction, parsing and navigation.
//!
//! A path is a sequence of [`Step`]s. It has a rendered string form such as
//! `users[0].name`, shaped by the resolver's delimiter and bracket settings.
//! Rendered paths are what diff lines print and what ignore lists contain.
//! Parsed step lists drive navigation.
//!
//! # Examples
//!
//! ```
//! use diffjson::parser::parse_json;
//! use diffjson::path::{PathResolver, Step};
//!
//! let paths = PathResolver::default();
//! assert_eq!(paths.render(&[Step::key("users"), Step::Index(0)]), "users[0]");
//!
//! let doc = parse_json(r#"{"users": [{"name": "Ann"}]}"#).unwrap();
//! let name = paths.resolve(&doc, "users[0].name").unwrap();
//! assert_eq!(name.render(false), "\"Ann\"");
//! ```

use crate::error::{DiffJsonError, PathError};
use crate::parser::parse_json;
use crate::tree::Node;
use std::borrow::Cow;
use std::fmt;

/// One navigation step: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl Step {
    pub fn key(key: impl Into<String>) -> Self {
        Step::Key(key.into())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => f.write_str(key),
            Step::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Converts between step lists and rendered paths, and navigates documents.
///
/// Configure once, then share freely: every method takes `&self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    delimiter: String,
    use_square_brackets: bool,
    deserialize_operator: Option<String>,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self {
            delimiter: ".".to_string(),
            use_square_brackets: true,
            deserialize_operator: None,
        }
    }
}

impl PathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the separator used to render and parse paths.
    ///
    /// # Errors
    ///
    /// Returns `DiffJsonError::ConfigError` for an empty delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Result<Self, DiffJsonError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(DiffJsonError::config("path delimiter must not be empty"));
        }
        self.delimiter = delimiter;
        Ok(self)
    }

    pub fn with_square_brackets(mut self, enabled: bool) -> Self {
        self.use_square_brackets = enabled;
        self
    }

    /// Enables embedded-JSON navigation for steps carrying `operator` as a
    /// prefix. An empty operator disables it.
    pub fn with_deserialize_operator(mut self, operator: Option<String>) -> Self {
        self.deserialize_operator = operator.filter(|op| !op.is_empty());
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn uses_square_brackets(&self) -> bool {
        self.use_square_brackets
    }

    pub fn deserialize_operator(&self) -> Option<&str> {
        self.deserialize_operator.as_deref()
    }

    /// Appends `step` to the rendered `path`.
    pub fn combine(&self, path: &str, step: &Step) -> String {
        self.combine_styled(path, step, |segment| segment.to_string())
    }

    /// Like [`combine`](Self::combine), with `style` applied to the appended
    /// segment only. Bracket characters are part of the segment.
    pub fn combine_styled<F>(&self, path: &str, step: &Step, style: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        match step {
            Step::Index(index) if self.use_square_brackets => {
                format!("{}{}", path, style(&format!("[{}]", index)))
            }
            _ if path.is_empty() => style(&step.to_string()),
            _ => format!("{}{}{}", path, self.delimiter, style(&step.to_string())),
        }
    }

    /// Renders a step list.
    pub fn render(&self, steps: &[Step]) -> String {
        steps
            .iter()
            .fold(String::new(), |path, step| self.combine(&path, step))
    }

    /// Parses a rendered path into steps.
    ///
    /// Leading and trailing delimiters are ignored. An empty spec yields a
    /// single empty key.
    pub fn parse(&self, spec: &str) -> Vec<Step> {
        let delimiter = self.delimiter.as_str();
        let trimmed = spec
            .trim_start_matches(delimiter)
            .trim_end_matches(delimiter);
        let mut steps = Vec::new();

        for token in trimmed.split(self.delimiter.as_str()) {
            if !self.use_square_brackets {
                steps.push(match token.parse::<usize>() {
                    Ok(index) if is_digits(token) => Step::Index(index),
                    _ => Step::key(token),
                });
                continue;
            }

            let (prefix, suffix) = self.split_brackets(token);
            if !prefix.is_empty() || suffix.is_empty() {
                steps.push(Step::key(prefix));
            }
            steps.extend(suffix);
        }

        steps
    }

    /// Peels trailing `[n]` (and `[<op>n]`) groups off a token, returning the
    /// remaining prefix and the peeled steps in path order.
    fn split_brackets<'t>(&self, token: &'t str) -> (&'t str, Vec<Step>) {
        let mut rest = token;
        let mut peeled = Vec::new();

        while let Some(body) = rest.strip_suffix(']') {
            let Some(open) = body.rfind('[') else {
                break;
            };
            let inner = &body[open + 1..];

            let step = if is_digits(inner) {
                inner.parse::<usize>().ok().map(Step::Index)
            } else {
                self.deserialize_operator
                    .as_deref()
                    .and_then(|op| inner.strip_prefix(op))
                    .filter(|digits| is_digits(digits))
                    .map(|_| Step::key(inner))
            };

            match step {
                Some(step) => {
                    peeled.push(step);
                    rest = &body[..open];
                }
                None => break,
            }
        }

        peeled.reverse();
        (rest, peeled)
    }

    /// Walks `root` along `steps`.
    ///
    /// A step carrying the deserialize operator that is not itself a key of
    /// the current object is stripped of the operator. The value it locates
    /// must be a string holding JSON, which is decoded and navigation
    /// continues inside it.
    pub fn navigate<'a>(&self, root: &'a Node, steps: &[Step]) -> Result<Cow<'a, Node>, PathError> {
        let mut current = Cow::Borrowed(root);
        let mut walked = String::new();

        for step in steps {
            walked = self.combine(&walked, step);

            if let Some(stripped) = self.deserialize_target(&current, step) {
                let located = child(&current, &stripped)
                    .ok_or_else(|| PathError::not_found(walked.clone()))?;
                let Node::String(text) = located else {
                    return Err(PathError::malformed(
                        walked,
                        format!("expected a string, found {}", located.type_name()),
                    ));
                };
                let decoded =
                    parse_json(text).map_err(|e| PathError::malformed(walked.clone(), e.to_string()))?;
                current = Cow::Owned(decoded);
                continue;
            }

            current = match current {
                Cow::Borrowed(node) => child(node, step).map(Cow::Borrowed),
                Cow::Owned(node) => child(&node, step).cloned().map(Cow::Owned),
            }
            .ok_or_else(|| PathError::not_found(walked.clone()))?;
        }

        Ok(current)
    }

    /// Returns the operator-stripped step when `step` should be decoded as
    /// embedded JSON.
    fn deserialize_target(&self, current: &Node, step: &Step) -> Option<Step> {
        let op = self.deserialize_operator.as_deref()?;
        let Step::Key(key) = step else {
            return None;
        };
        if current.get(key).is_some() {
            return None;
        }
        key.strip_prefix(op).map(Step::key)
    }

    /// Resolves `spec` against `root`. A path that does not resolve yields
    /// `None`.
    pub fn resolve(&self, root: &Node, spec: &str) -> Option<Node> {
        match self.navigate(root, &self.parse(spec)) {
            Ok(node) => Some(node.into_owned()),
            Err(err) => {
                tracing::debug!(spec, error = %err, "path did not resolve");
                None
            }
        }
    }

    /// Narrows `root` to the sub-value at `spec`.
    ///
    /// Returns `false` and leaves `root` unchanged when the path does not
    /// resolve.
    pub fn select(&self, root: &mut Node, spec: &str) -> bool {
        match self.resolve(root, spec) {
            Some(node) => {
                *root = node;
                true
            }
            None => false,
        }
    }
}

fn child<'n>(node: &'n Node, step: &Step) -> Option<&'n Node> {
    match (node, step) {
        (Node::Object(map), Step::Key(key)) => map.get(key),
        (Node::Object(map), Step::Index(index)) => map.get(&index.to_string()),
        (Node::Array(arr), Step::Index(index)) => arr.get(*index),
        (Node::Array(arr), Step::Key(key)) if is_digits(key) => {
            key.parse::<usize>().ok().and_then(|index| arr.get(index))
        }
        _ => None,
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
