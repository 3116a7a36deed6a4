//! Heading outline extraction
//!
//! Only `##` and `###` headings at the start of a line make it into the
//! outline, and only where the markdown renderer also sees a heading.
//! Anchor ids come from [`anchor_id`], which the markdown renderer also
//! uses for the `id` attribute of every rendered heading.

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

use crate::content::parser_options;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w]+").unwrap();
}

/// Phrase that opens an authored table of contents in a post body
const INLINE_TOC_MARKER: &str = "Table of Contents";

/// One entry of a document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Nesting depth: 1 for `##`, 2 for `###`
    pub level: u8,
    pub title: String,
    pub anchor_id: String,
}

impl HeadingEntry {
    pub fn new(level: u8, title: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            anchor_id: anchor_id(title),
        }
    }

    /// HTML heading rank (`2` for `<h2>`)
    pub fn rank(&self) -> u8 {
        self.level + 1
    }
}

/// Lowercase the title and collapse every run of non-word characters
/// into a single hyphen
pub fn anchor_id(title: &str) -> String {
    NON_WORD.replace_all(&title.to_lowercase(), "-").into_owned()
}

/// Build the outline of a markdown body
///
/// Candidates are the headings the markdown parser finds, so lines inside
/// code blocks, HTML blocks and the like never count. Of those, only lines
/// accepted by [`parse_heading_line`] make it into the outline; headings
/// nested in a list item or blockquote start mid-line and are left out.
pub fn extract_outline(body: &str) -> Vec<HeadingEntry> {
    Parser::new_ext(body, parser_options())
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Heading { .. }) => {
                let line_start = body[..range.start].rfind('\n').map_or(0, |i| i + 1);
                let line = body[line_start..].lines().next().unwrap_or_default();
                parse_heading_line(line).map(|(level, title)| HeadingEntry::new(level, title))
            }
            _ => None,
        })
        .collect()
}

/// Match an outline heading: exactly two or three `#` then a space
///
/// Returns the nesting depth and the heading text.
pub fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(2..=3).contains(&hashes) {
        return None;
    }
    let title = clean_heading_text(line[hashes..].strip_prefix(' ')?);
    if title.is_empty() {
        return None;
    }
    Some(((hashes - 1) as u8, title))
}

/// Text of a heading given its first source line
///
/// Accepts any ATX heading as well as the text line of a setext heading,
/// and agrees with [`parse_heading_line`] on every line that function
/// accepts.
pub fn heading_text(line: &str) -> &str {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_start_matches(' ');
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    let is_atx = (1..=6).contains(&hashes)
        && (trimmed.len() == hashes || trimmed[hashes..].starts_with([' ', '\t']));
    if is_atx {
        clean_heading_text(&trimmed[hashes..])
    } else {
        line.trim()
    }
}

/// Trim a heading and drop an optional closing `#` sequence
fn clean_heading_text(text: &str) -> &str {
    let text = text.trim();
    let open = text.trim_end_matches('#');
    if open.len() < text.len() && (open.is_empty() || open.ends_with([' ', '\t'])) {
        open.trim_end()
    } else {
        text
    }
}

/// Remove an authored table of contents from a body
///
/// Everything from the "Table of Contents" phrase up to the next `##` is
/// dropped; a heading line carrying the phrase goes with it. The body is
/// returned unchanged when either end is missing.
pub fn strip_inline_toc(body: &str) -> Cow<'_, str> {
    let Some(found) = body.find(INLINE_TOC_MARKER) else {
        return Cow::Borrowed(body);
    };
    let Some(offset) = body[found..].find("##") else {
        return Cow::Borrowed(body);
    };
    let end = found + offset;

    let line_start = body[..found].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &body[line_start..found];
    let start = if prefix.trim_start_matches(['#', ' ']).is_empty() {
        line_start
    } else {
        found
    };

    Cow::Owned(format!("{}{}", &body[..start], &body[end..]))
}
