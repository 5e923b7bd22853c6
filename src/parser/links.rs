//! Link extraction from markdown content.
//!
//! Recognizes three syntaxes:
//! - Wikilinks: `[[target]]`, `[[target#heading]]`, `[[target|alias]]`,
//!   `[[target#heading|alias]]`
//! - Embeds: `![[target]]`, `![[target#block-id]]`, `![[target|alias]]`
//! - Markdown links to local resources: `[text](target)`
//!
//! An embed also contains a wikilink, and both are reported. Consumers that
//! only care about navigation (backlinks) filter on [`LinkKind::Wikilink`]
//! and rely on embeds showing up there too.

use crate::domain::{Link, LinkKind, LinkPosition};
use regex::{Captures, Regex};

const WIKILINK_PATTERN: &str = r"\[\[([^\]|#]+)(?:#([^\]|]+))?(?:\|([^\]]+))?\]\]";
const EMBED_PATTERN: &str = r"!\[\[([^\]|#]+)(?:#([^\]|]+))?(?:\|([^\]]+))?\]\]";
const MARKDOWN_LINK_PATTERN: &str = r"\[([^\]]+)\]\(([^)]+)\)";
const EXACT_WIKILINK_PATTERN: &str = r"^\[\[([^\]|#]+)(?:#([^\]|]+))?(?:\|([^\]]+))?\]\]$";

/// Default maximum length of a backlink context line.
pub const DEFAULT_CONTEXT_LENGTH: usize = 100;

/// Compiled link patterns, built fresh for each extraction call.
struct LinkPatterns {
    wikilink: Regex,
    embed: Regex,
    markdown: Regex,
}

impl LinkPatterns {
    fn new() -> Self {
        Self {
            wikilink: Regex::new(WIKILINK_PATTERN).expect("wikilink pattern is valid"),
            embed: Regex::new(EMBED_PATTERN).expect("embed pattern is valid"),
            markdown: Regex::new(MARKDOWN_LINK_PATTERN).expect("markdown link pattern is valid"),
        }
    }
}

/// A single line with `\[` and `\]` unescaped.
///
/// `offsets[i]` is the character index in the original line of character
/// `i` of `text`; the extra trailing entry maps the end of the text.
struct UnescapedLine {
    text: String,
    offsets: Vec<usize>,
}

impl UnescapedLine {
    fn new(line: &str) -> Self {
        let mut text = String::with_capacity(line.len());
        let mut offsets = Vec::with_capacity(line.len() + 1);
        let mut chars = line.chars().peekable();
        let mut original = 0;

        while let Some(c) = chars.next() {
            offsets.push(original);
            if c == '\\'
                && let Some(&(bracket @ ('[' | ']'))) = chars.peek()
            {
                chars.next();
                text.push(bracket);
                original += 2;
                continue;
            }
            text.push(c);
            original += 1;
        }
        offsets.push(original);

        Self { text, offsets }
    }

    /// Maps a byte offset in `text` to a character offset in the original line.
    fn original_offset(&self, byte: usize) -> usize {
        let chars = self.text[..byte].chars().count();
        self.offsets[chars]
    }
}

/// Extracts every link from `content` in document order.
///
/// Extraction is total: malformed syntax such as an unterminated `[[` is
/// left as plain text. Escaped brackets (`\[`, `\]`) are treated as real
/// brackets, and positions always refer to the original, escaped content.
/// Within a line, links are ordered by start offset; an embed sorts just
/// before the wikilink nested inside it.
///
/// # Examples
///
/// ```
/// use notegraph::domain::LinkKind;
/// use notegraph::parser::extract_links;
///
/// let links = extract_links("Hello [[world]]");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].kind(), LinkKind::Wikilink);
/// assert_eq!(links[0].position().start, 6);
/// assert_eq!(links[0].position().end, 15);
/// ```
pub fn extract_links(content: &str) -> Vec<Link> {
    let patterns = LinkPatterns::new();
    let mut links = Vec::new();
    let mut line_offset = 0;

    for (line_index, line) in content.split('\n').enumerate() {
        let unescaped = UnescapedLine::new(line);
        let mut line_links = Vec::new();

        let position = |start: usize, end: usize| {
            LinkPosition::new(
                line_offset + unescaped.original_offset(start),
                line_offset + unescaped.original_offset(end),
                line_index,
            )
        };

        for caps in patterns.wikilink.captures_iter(&unescaped.text) {
            let whole = caps.get(0).expect("group 0 always participates");
            let mut link = Link::new(
                &caps[1],
                LinkKind::Wikilink,
                position(whole.start(), whole.end()),
            );
            if let Some(heading) = caps.get(2) {
                link = link.with_heading(heading.as_str());
            }
            if let Some(alias) = caps.get(3) {
                link = link.with_display_text(alias.as_str());
            }
            line_links.push(link);
        }

        for caps in patterns.embed.captures_iter(&unescaped.text) {
            let whole = caps.get(0).expect("group 0 always participates");
            let mut link = Link::new(&caps[1], LinkKind::Embed, position(whole.start(), whole.end()));
            if let Some(anchor) = caps.get(2) {
                link = link.with_block_id(anchor.as_str());
            }
            if let Some(alias) = caps.get(3) {
                link = link.with_display_text(alias.as_str());
            }
            line_links.push(link);
        }

        for caps in patterns.markdown.captures_iter(&unescaped.text) {
            let target = &caps[2];
            if is_external_or_anchor(target) {
                continue;
            }
            let whole = caps.get(0).expect("group 0 always participates");
            line_links.push(
                Link::new(target, LinkKind::Markdown, position(whole.start(), whole.end()))
                    .with_display_text(&caps[1]),
            );
        }

        // Stable sort keeps the embed-before-nested-wikilink order for ties.
        line_links.sort_by_key(|link| link.position().start);
        links.extend(line_links);

        line_offset += line.chars().count() + 1;
    }

    links
}

fn is_external_or_anchor(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with('#')
}

/// Returns the line containing `link`, unescaped and truncated.
///
/// Lines longer than `context_length` characters are cut and suffixed with
/// `...`. A link pointing past the last line yields an empty string.
pub fn context_for_link(content: &str, link: &Link, context_length: usize) -> String {
    let line = content.split('\n').nth(link.position().line).unwrap_or("");
    let line = UnescapedLine::new(line).text;

    if line.chars().count() > context_length {
        let truncated: String = line.chars().take(context_length).collect();
        format!("{}...", truncated)
    } else {
        line
    }
}

/// The parts of a single wikilink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWikilink {
    pub target: String,
    pub heading: Option<String>,
    pub display_text: Option<String>,
}

/// Parses text that is exactly one wikilink, with nothing around it.
///
/// # Examples
///
/// ```
/// use notegraph::parser::parse_wikilink;
///
/// let parsed = parse_wikilink("[[note#heading|display]]").unwrap();
/// assert_eq!(parsed.target, "note");
/// assert_eq!(parsed.heading.as_deref(), Some("heading"));
/// assert!(parse_wikilink("before [[note]] after").is_none());
/// ```
pub fn parse_wikilink(text: &str) -> Option<ParsedWikilink> {
    let pattern = Regex::new(EXACT_WIKILINK_PATTERN).expect("wikilink pattern is valid");
    pattern.captures(text).map(|caps: Captures| ParsedWikilink {
        target: caps[1].to_string(),
        heading: caps.get(2).map(|m| m.as_str().to_string()),
        display_text: caps.get(3).map(|m| m.as_str().to_string()),
    })
}
