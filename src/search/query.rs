//! Search query operators.

use crate::domain::Note;
use regex::Regex;

const TAG_OPERATOR: &str = r"(?i)tag:(\S+)";
const PATH_OPERATOR: &str = r"(?i)path:(\S+)";

/// A raw query split into free text and filter operators.
///
/// Only the first `tag:` and the first `path:` operator are recognized;
/// each is removed from the text once. Later occurrences stay in the text
/// as ordinary words.
///
/// # Examples
///
/// ```
/// use notegraph::search::ParsedQuery;
///
/// let parsed = ParsedQuery::parse("tag:react hooks");
/// assert_eq!(parsed.text(), "hooks");
/// assert_eq!(parsed.tag(), Some("react"));
/// assert!(ParsedQuery::parse("path:meetings").is_match_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    text: String,
    tag: Option<String>,
    path: Option<String>,
}

impl ParsedQuery {
    pub fn parse(query: &str) -> Self {
        let mut text = query.trim().to_string();

        let tag = extract_operator(TAG_OPERATOR, query, &mut text);
        let path = extract_operator(PATH_OPERATOR, query, &mut text);

        Self { text, tag, path }
    }

    /// Free text left after removing operators, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// True when only operators were given.
    pub fn is_match_all(&self) -> bool {
        self.text.is_empty()
    }

    pub fn has_filters(&self) -> bool {
        self.tag.is_some() || self.path.is_some()
    }

    /// Checks a note against the filters.
    ///
    /// `tag:` matches when any inline tag contains the value, `path:` when
    /// the path contains it, both ignoring case. With a filter set, a
    /// missing note never passes.
    pub fn accepts(&self, note: Option<&Note>) -> bool {
        if !self.has_filters() {
            return true;
        }
        let Some(note) = note else {
            return false;
        };

        if let Some(tag) = &self.tag {
            let tag = tag.to_lowercase();
            let tagged = note
                .metadata()
                .inline_tags
                .iter()
                .any(|t| t.to_lowercase().contains(&tag));
            if !tagged {
                return false;
            }
        }

        if let Some(path) = &self.path
            && !note.path().to_lowercase().contains(&path.to_lowercase())
        {
            return false;
        }

        true
    }
}

fn extract_operator(pattern: &str, query: &str, text: &mut String) -> Option<String> {
    let regex = Regex::new(pattern).expect("operator pattern is valid");
    let caps = regex.captures(query)?;
    *text = text.replacen(&caps[0], "", 1).trim().to_string();
    Some(caps[1].to_string())
}
