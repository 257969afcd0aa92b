use diffjson::{parse_json, Node};

fn doc(text: &str) -> Node {
    parse_json(text).unwrap()
}

#[test]
fn test_type_names() {
    assert_eq!(doc("null").type_name(), "null");
    assert_eq!(doc("false").type_name(), "boolean");
    assert_eq!(doc("1").type_name(), "number");
    assert_eq!(doc(r#""s""#).type_name(), "string");
    assert_eq!(doc("{}").type_name(), "object");
    assert_eq!(doc("[]").type_name(), "array");
}

#[test]
fn test_semantic_equals_nested() {
    let a = doc(r#"{"x": [1, {"y": 2.0, "z": null}]}"#);
    let b = doc(r#"{"x": [1.0, {"z": null, "y": 2}]}"#);
    assert!(a.semantic_equals(&b));

    let c = doc(r#"{"x": [{"z": null, "y": 2}, 1]}"#);
    assert!(!a.semantic_equals(&c));
}

#[test]
fn test_large_integers_compare_exactly() {
    let a = doc("18446744073709551615");
    let b = doc("18446744073709551614");
    assert!(!a.semantic_equals(&b));
    assert!(a.semantic_equals(&a.clone()));
}

#[test]
fn test_integer_against_float_is_not_rounded() {
    assert!(!doc("9007199254740993").semantic_equals(&doc("9007199254740992.0")));
    assert!(!doc("9007199254740992.0").semantic_equals(&doc("9007199254740993")));
    assert!(doc("9007199254740992").semantic_equals(&doc("9007199254740992.0")));
    assert!(doc("1").semantic_equals(&doc("1.0")));
    assert!(doc("-4").semantic_equals(&doc("-4.0")));
    assert!(!doc("2").semantic_equals(&doc("2.5")));
    assert!(!doc("18446744073709551615").semantic_equals(&doc("1e300")));
}

#[test]
fn test_render_scalars() {
    assert_eq!(doc("null").render(false), "null");
    assert_eq!(doc("true").render(false), "true");
    assert_eq!(doc("-7").render(false), "-7");
    assert_eq!(doc(r#""x""#).render(false), r#""x""#);
}

#[test]
fn test_render_unescaped_control_characters() {
    let value = doc(r#""line\nbreak""#);
    assert_eq!(value.render(false), "\"line\nbreak\"");
    assert_eq!(value.render(true), r#""line\nbreak""#);
}

#[test]
fn test_accessors() {
    let value = doc(r#"{"list": [true]}"#);
    assert!(value.is_container());
    assert_eq!(value.get("list").and_then(|l| l.get_index(0)), Some(&Node::Bool(true)));
    assert_eq!(value.get_index(0), None);
    assert_eq!(value.get("missing"), None);
}

#[test]
fn test_to_json_value_keeps_order() {
    let value = doc(r#"{"b": 1, "a": [2]}"#);
    assert_eq!(value.to_json_value().to_string(), r#"{"b":1,"a":[2]}"#);
}

#[test]
fn test_render_nested_containers_spaced() {
    let value = doc(r#"{"x":1,"y":[1,2],"z":{"k":"v w"}}"#);
    assert_eq!(
        value.render(false),
        r#"{"x": 1, "y": [1, 2], "z": {"k": "v w"}}"#
    );
    assert_eq!(doc("[[], {}, [null]]").render(true), "[[], {}, [null]]");
}
