//! Leading `---` block parsing.

use crate::domain::Frontmatter;
use crate::parser::markdown::FRONTMATTER_PATTERN;
use regex::Regex;
use serde_json::Value;

/// Parses `key: value` lines from a frontmatter block at document start.
///
/// This is not a YAML parser. Each line is split at its first colon; lines
/// without a key are ignored, and keys with an empty value (the head of a
/// multi-line list) are skipped entirely. Values starting with `[` or `{`
/// are read as JSON when they parse, otherwise every value is a string.
///
/// # Examples
///
/// ```
/// use notegraph::parser::parse_frontmatter;
///
/// let fm = parse_frontmatter("---\ntitle: X\ntags: [\"a\", \"b\"]\n---\nBody");
/// assert_eq!(fm["title"], "X");
/// assert!(fm["tags"].is_array());
/// assert!(parse_frontmatter("No frontmatter").is_empty());
/// ```
pub fn parse_frontmatter(content: &str) -> Frontmatter {
    let pattern = Regex::new(FRONTMATTER_PATTERN).expect("frontmatter pattern is valid");
    let mut frontmatter = Frontmatter::new();

    let Some(caps) = pattern.captures(content) else {
        return frontmatter;
    };

    for line in caps[1].split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        frontmatter.insert(key.trim().to_string(), parse_value(value));
    }

    frontmatter
}

fn parse_value(value: &str) -> Value {
    if value.starts_with('[') || value.starts_with('{') {
        if let Ok(parsed) = serde_json::from_str(value) {
            return parsed;
        }
    }
    Value::String(value.to_string())
}
