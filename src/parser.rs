//! Document loading for JSON, YAML and TOML.
//!
//! Every decoder used here keeps mapping keys in document order, which is what
//! makes diff output reproducible from run to run.
//!
//! # Examples
//!
//! ```no_run
//! use diffjson::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let node = parse_file(Path::new("data.json"))?;
//! let node = parse_file(Path::new("config.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::Node;
use indexmap::IndexMap;
use serde_json::Number;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Input format selector for [`parse_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON first, then YAML.
    Auto,
}

impl FormatHint {
    /// Picks a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a Node.
///
/// The format is detected by file extension. Unknown extensions are tried as
/// JSON, then YAML. A path of `-` reads standard input.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the file does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - `ParseError::JsonError` / `YamlError` / `TomlError` for invalid content
/// - `ParseError::UnknownFormat` if no decoder accepts content of an unknown type
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    if path.as_os_str() == "-" {
        return parse_stdin(FormatHint::Auto);
    }

    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))?;

    parse_content(
        &content,
        FormatHint::from_path(path),
        &path.to_string_lossy(),
    )
}

/// Reads standard input to the end and parses it.
pub fn parse_stdin(hint: FormatHint) -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;
    parse_content(&content, hint, "<stdin>")
}

/// Parses in-memory text with the given format. `origin` names the source in
/// error messages.
pub fn parse_content(content: &str, hint: FormatHint, origin: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(origin, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(origin, e)),
        FormatHint::Auto => parse_json(content).or_else(|json_err| {
            parse_yaml(content).map_err(|yaml_err| {
                tracing::debug!(origin, error = %yaml_err, "YAML fallback rejected content");
                ParseError::unknown_format(origin, json_err)
            })
        }),
    }
}

/// Parses a JSON string into a Node.
///
/// ```
/// use diffjson::parser::parse_json;
///
/// let node = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert_eq!(node.get("age").unwrap().render(false), "30");
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(Node::from(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_node(value))
}

/// Converts a serde_yaml::Value to a Node.
///
/// Non-string keys are converted to strings. Tags are dropped and the tagged
/// value is kept.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Number(Number::from(i))
            } else if let Some(u) = n.as_u64() {
                Node::Number(Number::from(u))
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Node::Number)
                    // .nan and .inf have no JSON number form
                    .unwrap_or_else(|| Node::String(n.to_string()))
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let object: IndexMap<String, Node> = map
                .into_iter()
                .map(|(k, v)| {
                    let key_str = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key_str, yaml_to_node(v))
                })
                .collect();
            Node::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(Number::from(i)),
        toml::Value::Float(f) => Number::from_f64(f)
            .map(Node::Number)
            .unwrap_or_else(|| Node::String(f.to_string())),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => Node::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_node(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn keys(node: &Node) -> Vec<&str> {
        match node {
            Node::Object(map) => map.keys().map(String::as_str).collect(),
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_parse_json_primitives() {
        assert_eq!(parse_json("null").unwrap(), Node::Null);
        assert_eq!(parse_json("true").unwrap(), Node::Bool(true));
        assert_eq!(parse_json("42").unwrap(), Node::Number(Number::from(42)));
        assert_eq!(
            parse_json(r#""hello""#).unwrap(),
            Node::String("hello".to_string())
        );
    }

    #[test]
    fn test_parse_json_preserves_key_order() {
        let node = parse_json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        assert_eq!(keys(&node), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{invalid json}").is_err());
        assert!(parse_json("[1, 2,]").is_err());
    }

    #[test]
    fn test_parse_yaml_preserves_key_order() {
        let node = parse_yaml("b: 1\na: 2\nc:\n  - x\n").unwrap();
        assert_eq!(keys(&node), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_toml_table() {
        let node = parse_toml("name = \"demo\"\nversion = 3\n\n[deps]\nserde = \"1\"\n").unwrap();
        assert_eq!(keys(&node), vec!["name", "version", "deps"]);
        assert_eq!(node.get("version").unwrap().render(false), "3");
    }

    #[test]
    fn test_parse_file_by_extension() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "key: value").unwrap();
        let path = file.path().with_extension("yml");
        fs::copy(file.path(), &path).unwrap();

        let node = parse_file(&path).unwrap();
        assert_eq!(node.get("key"), Some(&Node::String("value".to_string())));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_file(Path::new("/nonexistent/file.json"));
        assert!(matches!(result, Err(ParseError::FileNotFound { .. })));
    }

    #[test]
    fn test_format_hint_from_path() {
        assert_eq!(FormatHint::from_path(Path::new("a.JSON")), FormatHint::Json);
        assert_eq!(FormatHint::from_path(Path::new("a.yml")), FormatHint::Yaml);
        assert_eq!(FormatHint::from_path(Path::new("a.toml")), FormatHint::Toml);
        assert_eq!(FormatHint::from_path(Path::new("a")), FormatHint::Auto);
    }
}
