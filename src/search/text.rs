//! Text preparation for indexing, tokenization and snippets.

use regex::Regex;

/// Markdown rewrites applied before indexing, in order.
const STRIP_RULES: &[(&str, &str)] = &[
    (r"\A---\n(?s:.*?)\n---", ""),
    (r"(?s)```.*?```", ""),
    (r"`[^`]+`", ""),
    (r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]", "${2} ${1}"),
    (r"!\[.*?\]\(.*?\)", ""),
    (r"\[([^\]]+)\]\([^)]+\)", "${1}"),
    (r"(?m)^#{1,6}\s+", ""),
    (r"[*_~`]", ""),
];

/// Reduces markdown to the text worth indexing.
///
/// Frontmatter, code and images are dropped. Wikilinks become
/// `alias target` (just the target when there is no alias), markdown links
/// keep their visible text, and heading hashes and emphasis markers go.
///
/// # Examples
///
/// ```
/// use notegraph::search::strip_markdown;
///
/// assert_eq!(strip_markdown("# Title\nSee [[Page|this]]"), "Title\nSee this Page");
/// ```
pub fn strip_markdown(content: &str) -> String {
    let mut text = content.to_string();
    for (pattern, replacement) in STRIP_RULES {
        let regex = Regex::new(pattern).expect("strip pattern is valid");
        text = regex.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Lowercases `text` and splits it on whitespace, hyphens, underscores and
/// slashes. Empty pieces are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_token_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '/')
}

/// Finds the first line of `content` containing a query term and returns a
/// window around the match.
///
/// Terms are the whitespace-separated words of `query`, compared
/// case-insensitively as substrings. Both sides are folded one character at
/// a time, so a character whose lowercase form is longer still lines up. The window spans `before` characters
/// ahead of the match and `after` characters past its end, with `...` marking
/// each side that was cut. Returns `None` when no line contains any term.
///
/// # Examples
///
/// ```
/// use notegraph::search::match_context;
///
/// let content = "first line\nthe Keyword is here";
/// assert_eq!(match_context(content, "keyword", 40, 60).as_deref(), Some("the Keyword is here"));
/// assert_eq!(match_context(content, "absent", 40, 60), None);
/// ```
pub fn match_context(content: &str, query: &str, before: usize, after: usize) -> Option<String> {
    let terms: Vec<Vec<char>> = query
        .split_whitespace()
        .filter(|t| *t != "*")
        .map(|t| t.chars().map(lower_char).collect())
        .collect();
    if terms.is_empty() {
        return None;
    }

    for line in content.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let lowered: Vec<char> = chars.iter().map(|&c| lower_char(c)).collect();

        for term in &terms {
            let Some(index) = find_chars(&lowered, term) else {
                continue;
            };
            let start = index.saturating_sub(before);
            let end = (index + term.len() + after).min(chars.len());

            let mut snippet: String = chars[start..end].iter().collect();
            if start > 0 {
                snippet.insert_str(0, "...");
            }
            if end < chars.len() {
                snippet.push_str("...");
            }
            return Some(snippet);
        }
    }

    None
}

/// Lowercases one character without changing the character count.
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ===========================================
    // strip_markdown
    // ===========================================

    #[test]
    fn strips_frontmatter_and_code() {
        let content = "---\ntags: [secret]\n---\nVisible\n```\nhidden code\n```\nuse `inline` too";
        let stripped = strip_markdown(content);
        assert!(!stripped.contains("secret"));
        assert!(!stripped.contains("hidden"));
        assert!(!stripped.contains("inline"));
        assert!(stripped.contains("Visible"));
    }

    #[test]
    fn rewrites_wikilinks_alias_first() {
        assert_eq!(strip_markdown("[[Target|Alias]]"), "Alias Target");
        assert_eq!(strip_markdown("[[Target]]"), " Target");
    }

    #[test]
    fn drops_images_and_unwraps_links() {
        assert_eq!(strip_markdown("![alt](img.png)[text](http://x.y)"), "text");
    }

    #[test]
    fn removes_heading_hashes_and_emphasis() {
        assert_eq!(strip_markdown("## Some **bold** and ~~gone~~ _it_"), "Some bold and gone it");
    }

    // ===========================================
    // tokenize
    // ===========================================

    #[test]
    fn tokenizes_on_separators_and_lowercases() {
        assert_eq!(
            tokenize("React-Hooks guides/state_mgmt  Two"),
            vec!["react", "hooks", "guides", "state", "mgmt", "two"]
        );
    }

    #[test]
    fn keeps_punctuation_inside_tokens() {
        assert_eq!(tokenize("plain JavaScript."), vec!["plain", "javascript."]);
    }

    #[test]
    fn splits_on_unicode_whitespace() {
        assert_eq!(tokenize("one\u{00A0}two\tthree"), vec!["one", "two", "three"]);
    }

    #[test]
    fn drops_empty_tokens() {
        assert!(tokenize("  -- / _ ").is_empty());
        assert_eq!(tokenize(" lead"), vec!["lead"]);
    }

    // ===========================================
    // match_context
    // ===========================================

    #[test]
    fn context_uses_first_matching_line() {
        let content = "This is the first line.\nThe second line has the important keyword here.\nThird.";
        assert_eq!(
            match_context(content, "important", 40, 60).as_deref(),
            Some("The second line has the important keyword here.")
        );
    }

    #[test]
    fn context_truncates_both_sides() {
        let line = format!("{}needle{}", "a".repeat(50), "b".repeat(70));
        let snippet = match_context(&line, "needle", 40, 60).unwrap();
        assert_eq!(snippet, format!("...{}needle{}...", "a".repeat(40), "b".repeat(60)));
    }

    #[test]
    fn context_checks_any_term() {
        let content = "alpha\nbeta gamma";
        assert_eq!(match_context(content, "zeta GAMMA", 40, 60).as_deref(), Some("beta gamma"));
    }

    #[test]
    fn context_found_when_lowercase_changes_length() {
        // 'İ' lowercases to two chars
        let content = "intro\nTrip to İstanbul soon";
        assert_eq!(
            match_context(content, "İstanbul", 40, 60).as_deref(),
            Some("Trip to İstanbul soon")
        );
        assert_eq!(
            match_context(content, "İSTANBUL", 40, 60).as_deref(),
            Some("Trip to İstanbul soon")
        );
    }

    #[test]
    fn match_all_query_has_no_context() {
        assert_eq!(match_context("anything", "*", 40, 60), None);
        assert_eq!(match_context("anything", "", 40, 60), None);
    }
}
