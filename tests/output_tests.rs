use diffjson::{
    compute_diff, format_json, format_summary, parse_json, AnsiColors, ChangeType, Colorizer,
    DiffConfig, DiffEngine, FormattingPolicy, Node, PathResolver, Prefixes, WasFormatter,
};
use colored::Color;
use pretty_assertions::assert_eq;

fn doc(text: &str) -> Node {
    parse_json(text).unwrap()
}

fn lines_with(policy: FormattingPolicy, old: &str, new: &str) -> Vec<String> {
    let engine = DiffEngine::new(DiffConfig::default()).with_policy(policy);
    let mut lines = Vec::new();
    engine.run(&doc(old), &doc(new), |line| lines.push(line));
    lines
}

/// Marks text with the change type instead of escape codes.
struct Tagging;

impl Colorizer for Tagging {
    fn paint(&self, change: ChangeType, text: &str) -> String {
        let tag = match change {
            ChangeType::Added => "add",
            ChangeType::Removed => "rem",
            ChangeType::Modified => "mod",
        };
        format!("<{}>{}</{}>", tag, text, tag)
    }
}

#[test]
fn test_default_policy_lines() {
    assert_eq!(
        lines_with(
            FormattingPolicy::default(),
            r#"{"s": "a", "l": [1], "o": {}}"#,
            r#"{"s": "b", "l": [1, {"k": [true]}]}"#,
        ),
        vec![
            r#"~ s: "a" > "b""#,
            r#"> l[1]: {"k": [true]}"#,
            "< o: {}",
        ]
    );
}

#[test]
fn test_scalar_replaced_by_container() {
    assert_eq!(
        lines_with(
            FormattingPolicy::default(),
            r#"{"a": 1}"#,
            r#"{"a": {"x": 1, "y": [1, 2]}}"#,
        ),
        vec![r#"~ a: 1 > {"x": 1, "y": [1, 2]}"#]
    );
}

#[test]
fn test_disabled_color_has_no_escape_codes() {
    let lines = lines_with(FormattingPolicy::colored(false), r#"{"a": 1}"#, r#"{"a": 2}"#);
    assert_eq!(lines, vec!["~ a: 1 > 2"]);
}

#[test]
fn test_colorizer_sees_each_category() {
    let policy = FormattingPolicy::default().with_colorizer(Tagging);
    let lines = lines_with(
        policy,
        r#"{"x": {"gone": 1, "same": 2}}"#,
        r#"{"x": {"same": 3, "new": 4}}"#,
    );
    assert_eq!(
        lines,
        vec![
            "< x.<rem>gone</rem>: 1",
            "~ x.<mod>same</mod>: <rem>2</rem> > <add>3</add>",
            "> x.<add>new</add>: 4",
        ]
    );
}

#[test]
fn test_custom_ansi_colors() {
    let colors = AnsiColors {
        added: Color::Green,
        removed: Color::Red,
        modified: Color::Yellow,
    };
    assert_eq!(colors.paint(ChangeType::Added, "v"), "\x1b[32mv\x1b[0m");
    assert_eq!(colors.paint(ChangeType::Modified, "v"), "\x1b[33mv\x1b[0m");
}

#[test]
fn test_closure_formatter_and_prefixes() {
    let policy = FormattingPolicy::default()
        .with_prefixes(Prefixes::new("+", "-", "*"))
        .with_modified_formatter(|old: &str, new: &str| format!("[{} => {}]", old, new));
    assert_eq!(
        lines_with(policy, "[1, 2]", "[3]"),
        vec!["*[0]: [1 => 3]", "-[1]: 2"]
    );
}

#[test]
fn test_was_formatter_matches_legacy_layout() {
    let policy = FormattingPolicy::default().with_modified_formatter(WasFormatter);
    assert_eq!(
        lines_with(policy, r#"{"a": 1}"#, r#"{"a": 2}"#),
        vec!["~ a: 2 (was 1)"]
    );
}

#[test]
fn test_string_escaping_flag() {
    let old = r#"{"q": "plain"}"#;
    let new = r#"{"q": "say \"hi\""}"#;

    let legacy = lines_with(FormattingPolicy::default(), old, new);
    assert_eq!(legacy, vec![r#"~ q: "plain" > "say "hi"""#]);

    let escaped = lines_with(FormattingPolicy::default().with_escaped_strings(true), old, new);
    assert_eq!(escaped, vec![r#"~ q: "plain" > "say \"hi\"""#]);
}

#[test]
fn test_paths_follow_resolver_settings() {
    let config = DiffConfig::new(
        PathResolver::default()
            .with_square_brackets(false)
            .with_delimiter("/")
            .unwrap(),
        Default::default(),
    );
    let engine = DiffEngine::new(config);
    let mut lines = Vec::new();
    engine.run(
        &doc(r#"{"a": [{"b": 1}]}"#),
        &doc(r#"{"a": [{"b": 2}]}"#),
        |line| lines.push(line),
    );
    assert_eq!(lines, vec!["~ a/0/b: 1 > 2"]);
}

#[test]
fn test_json_report() {
    let diff = compute_diff(
        &doc(r#"{"a": 1, "b": [1]}"#),
        &doc(r#"{"b": [1, 2]}"#),
        &DiffConfig::default(),
    );
    let report: serde_json::Value = serde_json::from_str(&format_json(&diff).unwrap()).unwrap();

    assert_eq!(report["changes"][0]["path"], "a");
    assert_eq!(report["changes"][0]["type"], "removed");
    assert_eq!(report["changes"][0]["new_value"], serde_json::Value::Null);
    assert_eq!(report["changes"][1]["path"], "b[1]");
    assert_eq!(report["changes"][1]["new_value"], 2);
    assert_eq!(report["stats"]["added"], 1);
    assert_eq!(report["stats"]["removed"], 1);
}

#[test]
fn test_summary_line() {
    let diff = compute_diff(&doc("[1, 2]"), &doc("[5]"), &DiffConfig::default());
    assert_eq!(
        format_summary(&diff.stats),
        "Summary: 1 removed, 1 modified"
    );
}
