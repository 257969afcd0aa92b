//! In-memory representation of JSON-like documents.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Number;
use std::io;

/// A node representing a value in structured data (JSON, YAML, TOML).
///
/// Objects keep their keys in insertion order so that diff output follows the
/// layout of the source documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(IndexMap<String, Node>),
    Array(Vec<Node>),
}

impl Node {
    pub fn type_name(&self) -> &str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Checks if two nodes are semantically equal.
    ///
    /// Object key order is ignored and numbers compare by value, so `1` equals
    /// `1.0`. Values of different kinds are never equal.
    pub fn semantic_equals(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Number(a), Node::Number(b)) => numbers_equal(a, b),
            (Node::Object(a), Node::Object(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|v| value.semantic_equals(v)))
            }
            (Node::Array(a), Node::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(item_a, item_b)| item_a.semantic_equals(item_b))
            }
            _ => false,
        }
    }

    /// Renders the node for display in a diff line.
    ///
    /// Containers become single-line JSON in stored key order, with `", "`
    /// between items and `": "` after keys. Strings are wrapped
    /// in double quotes; with `escape_strings` unset the contents are emitted
    /// verbatim, matching the historical output of the tool.
    pub fn render(&self, escape_strings: bool) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => n.to_string(),
            Node::String(s) if escape_strings => serde_json::Value::String(s.clone()).to_string(),
            Node::String(s) => format!("\"{}\"", s),
            Node::Object(_) | Node::Array(_) => render_container(&self.to_json_value()),
        }
    }

    /// Converts the node back into a `serde_json::Value`, keeping key order.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(*b),
            Node::Number(n) => serde_json::Value::Number(n.clone()),
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(Node::to_json_value).collect())
            }
            Node::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect(),
            ),
        }
    }

    /// Looks up a direct child by object key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Looks up a direct child by array index.
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

/// Single-line JSON layout with a space after each `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

fn render_container(value: &serde_json::Value) -> String {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut ser) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Compares numbers by value.
///
/// Integers compare exactly. A float equals an integer only when it is
/// finite, integral and inside the integer's range, so large integers are
/// never rounded through `f64`.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integer_of(a), integer_of(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().is_some_and(|f| float_equals_integer(f, x)),
        (None, Some(y)) => a.as_f64().is_some_and(|f| float_equals_integer(f, y)),
        (None, None) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn integer_of(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

fn float_equals_integer(f: f64, i: i128) -> bool {
    // Every integral f64 below 2^127 in magnitude converts to i128 exactly.
    f.is_finite() && f.fract() == 0.0 && f.abs() < 1.7e38 && f as i128 == i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from(value)
    }

    #[test]
    fn test_integer_and_float_are_equal() {
        assert!(node(json!(1)).semantic_equals(&node(json!(1.0))));
        assert!(!node(json!(1)).semantic_equals(&node(json!(1.5))));
        assert!(node(json!(-3)).semantic_equals(&node(json!(-3))));
    }

    #[test]
    fn test_object_equality_ignores_key_order() {
        let a = node(json!({"a": 1, "b": 2}));
        let b = node(json!({"b": 2, "a": 1}));
        assert!(a.semantic_equals(&b));
    }

    #[test]
    fn test_kind_mismatch_is_not_equal() {
        assert!(!node(json!({})).semantic_equals(&node(json!([]))));
        assert!(!node(json!(true)).semantic_equals(&node(json!(1))));
        assert!(!Node::Null.semantic_equals(&node(json!(""))));
    }

    #[test]
    fn test_render_keeps_number_text() {
        assert_eq!(node(json!(42)).render(false), "42");
        assert_eq!(node(json!(1.0)).render(false), "1.0");
        assert_eq!(node(json!(-0.25)).render(false), "-0.25");
    }

    #[test]
    fn test_render_string_legacy_and_escaped() {
        let value = Node::String("say \"hi\"".to_string());
        assert_eq!(value.render(false), "\"say \"hi\"\"");
        assert_eq!(value.render(true), r#""say \"hi\"""#);
    }

    #[test]
    fn test_render_container_in_insertion_order() {
        let value = node(json!({"z": [1, true, null], "a": "x"}));
        assert_eq!(value.render(false), r#"{"z": [1, true, null], "a": "x"}"#);
    }

    #[test]
    fn test_render_empty_containers() {
        assert_eq!(node(json!({})).render(false), "{}");
        assert_eq!(node(json!({"a": []})).render(false), r#"{"a": []}"#);
    }

    #[test]
    fn test_large_integer_against_float() {
        let exact = node(json!(9007199254740993_i64));
        assert!(!exact.semantic_equals(&node(json!(9007199254740992.0))));
        assert!(node(json!(u64::MAX)).semantic_equals(&node(json!(u64::MAX))));
    }
}
