//! Markdown metadata: headings, word count, block ids, inline tags.

use crate::domain::{HeadingInfo, NoteMetadata, ParsedMarkdown};
use crate::parser::extract_links;
use regex::Regex;

const HEADING_PATTERN: &str = r"(?m)^(#{1,6})\s+(.+)$";
const BLOCK_ID_PATTERN: &str = r"(?mR)\^([a-zA-Z0-9-]+)$";
const TAG_PATTERN: &str = r"#([a-zA-Z][a-zA-Z0-9_/-]*)";
pub(crate) const FRONTMATTER_PATTERN: &str = r"\A---\n((?s:.*?))\n---";

/// Patterns stripped before counting words, applied in order.
///
/// Link targets and code are not counted as prose.
const NON_PROSE_PATTERNS: &[&str] = &[
    FRONTMATTER_PATTERN,
    r"(?s)```.*?```",
    r"`[^`]+`",
    r"\[\[[^\]]+\]\]",
    r"!\[.*?\]\(.*?\)",
    r"\[.*?\]\(.*?\)",
];
const WORD_PATTERN: &str = r"[A-Za-z0-9_]+";

/// Derives headings, word count, block ids and inline tags from content.
///
/// Inline tags are scanned over the whole raw content, so a tag-shaped
/// token inside a heading or a code block is still reported.
///
/// # Examples
///
/// ```
/// use notegraph::parser::parse_markdown;
///
/// let parsed = parse_markdown("# Title\n\nSome words here #idea");
/// assert_eq!(parsed.headings[0].text, "Title");
/// assert_eq!(parsed.inline_tags, vec!["idea".to_string()]);
/// ```
pub fn parse_markdown(content: &str) -> ParsedMarkdown {
    ParsedMarkdown {
        word_count: count_words(content),
        headings: extract_headings(content),
        block_ids: extract_block_ids(content),
        inline_tags: extract_tags(content),
    }
}

/// Derives the full metadata for `content`.
///
/// `outgoing_links` is always exactly `extract_links(content)`.
pub fn update_note_metadata(content: &str) -> NoteMetadata {
    NoteMetadata::from_parts(parse_markdown(content), extract_links(content))
}

fn extract_headings(content: &str) -> Vec<HeadingInfo> {
    let pattern = Regex::new(HEADING_PATTERN).expect("heading pattern is valid");
    let mut offsets = CharOffsets::new(content);

    pattern
        .captures_iter(content)
        .map(|caps| {
            let hashes = caps.get(1).expect("group 1 always participates");
            HeadingInfo {
                level: hashes.as_str().len() as u8,
                text: caps[2].trim().to_string(),
                position: offsets.char_offset(hashes.start()),
            }
        })
        .collect()
}

fn count_words(content: &str) -> usize {
    let mut text = content.to_string();
    for pattern in NON_PROSE_PATTERNS {
        let regex = Regex::new(pattern).expect("non-prose pattern is valid");
        text = regex.replace_all(&text, "").into_owned();
    }

    let words = Regex::new(WORD_PATTERN).expect("word pattern is valid");
    words.find_iter(&text).count()
}

fn extract_block_ids(content: &str) -> Vec<String> {
    let pattern = Regex::new(BLOCK_ID_PATTERN).expect("block id pattern is valid");
    pattern
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn extract_tags(content: &str) -> Vec<String> {
    let pattern = Regex::new(TAG_PATTERN).expect("tag pattern is valid");
    let mut tags: Vec<String> = Vec::new();
    for caps in pattern.captures_iter(content) {
        let tag = &caps[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Converts ascending byte offsets into character offsets incrementally.
struct CharOffsets<'a> {
    content: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            byte: 0,
            chars: 0,
        }
    }

    fn char_offset(&mut self, byte: usize) -> usize {
        self.chars += self.content[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
