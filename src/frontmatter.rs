//! Frontmatter parsing
//!
//! Parses the fenced YAML block at the top of a note into a fixed,
//! validated record. Parsing is never fatal: malformed or oversized
//! frontmatter degrades to an empty record with the full text kept as
//! body, so a broken block can never hide a note from the scan — the
//! missing fields surface as lint warnings instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::constants as C;

/// Structured note metadata.
///
/// Recognized keys get typed fields; everything else is preserved
/// opaquely in `extra` and ignored by downstream logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub dek: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub unlisted: bool,
    pub password: Option<String>,
    /// Unrecognized keys, carried through untouched.
    pub extra: BTreeMap<String, Value>,
}

impl Frontmatter {
    pub fn is_empty(&self) -> bool {
        *self == Frontmatter::default()
    }
}

/// Split raw file text into `(frontmatter, body)`.
///
/// The body is everything after the closing `---` fence line. When
/// there is no frontmatter block (or it cannot be parsed) the body is
/// the full input text.
pub fn parse(text: &str) -> (Frontmatter, &str) {
    match split_fences(text) {
        Some((yaml, body)) => match parse_yaml(yaml) {
            Some(fm) => (fm, body),
            None => (Frontmatter::default(), text),
        },
        None => (Frontmatter::default(), text),
    }
}

/// Locate the fenced YAML block. Returns `(yaml, body)` slices, or
/// None when the text does not open with a closed `---` fence.
fn split_fences(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---\n").or_else(|| text.strip_prefix("---\r\n"))?;

    // Closing fence is a line that is exactly "---"
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            if yaml.len() > C::MAX_FRONTMATTER_SIZE {
                return None;
            }
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(yaml: &str) -> Option<Frontmatter> {
    let map: BTreeMap<String, Value> = serde_yaml::from_str(yaml).ok()?;
    let mut fm = Frontmatter::default();

    for (key, value) in map {
        match key.as_str() {
            "title" => fm.title = value_to_string(&value),
            "dek" => fm.dek = value_to_string(&value),
            "date" => fm.date = value_to_string(&value),
            "tags" => fm.tags = value_to_tags(&value),
            "unlisted" => fm.unlisted = value_to_bool(&value),
            "password" => fm.password = value_to_string(&value).filter(|s| !s.is_empty()),
            _ => {
                fm.extra.insert(key, value);
            }
        }
    }

    Some(fm)
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        // Obsidian sometimes writes bare yes/no or quoted booleans
        Value::String(s) => matches!(s.trim(), "true" | "yes"),
        _ => false,
    }
}

/// Accept both YAML sequences and comma-separated scalar tag lists.
fn value_to_tags(value: &Value) -> Vec<String> {
    let mut tags: Vec<String> = match value {
        Value::Sequence(seq) => seq.iter().filter_map(value_to_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    };
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_frontmatter() {
        let text = "---\ntitle: Hello World\ndate: 2026-01-15\ntags: [rust, notes]\n---\n\n# Hello\n";
        let (fm, body) = parse(text);
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2026-01-15"));
        assert_eq!(fm.tags, vec!["rust", "notes"]);
        assert!(!fm.unlisted);
        assert_eq!(body, "\n# Hello\n");
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let text = "# Just a heading\n\nBody text.\n";
        let (fm, body) = parse(text);
        assert!(fm.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_parse_malformed_yaml_is_not_fatal() {
        let text = "---\ntitle: [unclosed\n  nope: {{\n---\nBody\n";
        let (fm, body) = parse(text);
        assert!(fm.is_empty());
        // Full text kept as body so the note is still scannable
        assert_eq!(body, text);
    }

    #[test]
    fn test_parse_unclosed_fence() {
        let text = "---\ntitle: Dangling\n\nBody without closing fence\n";
        let (fm, body) = parse(text);
        assert!(fm.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_unrecognized_keys_preserved() {
        let text = "---\ntitle: T\ncustom_key: custom value\n---\nBody\n";
        let (fm, _) = parse(text);
        assert_eq!(
            fm.extra.get("custom_key"),
            Some(&Value::String("custom value".into()))
        );
    }

    #[test]
    fn test_unlisted_and_password() {
        let text = "---\nunlisted: true\npassword: \"abc123\"\n---\nBody\n";
        let (fm, _) = parse(text);
        assert!(fm.unlisted);
        assert_eq!(fm.password.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_unlisted_yes_string() {
        let text = "---\nunlisted: \"yes\"\n---\nBody\n";
        let (fm, _) = parse(text);
        assert!(fm.unlisted);
    }

    #[test]
    fn test_empty_password_treated_as_absent() {
        let text = "---\npassword: \"\"\n---\nBody\n";
        let (fm, _) = parse(text);
        assert!(fm.password.is_none());
    }

    #[test]
    fn test_tags_comma_separated_scalar() {
        let text = "---\ntags: rust, notes\n---\nBody\n";
        let (fm, _) = parse(text);
        assert_eq!(fm.tags, vec!["rust", "notes"]);
    }

    #[test]
    fn test_numeric_date_coerced() {
        let text = "---\ndate: 2026\n---\nBody\n";
        let (fm, _) = parse(text);
        assert_eq!(fm.date.as_deref(), Some("2026"));
    }
}
