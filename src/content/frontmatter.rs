//! Front-matter parsing
//!
//! A front-matter block is a run of `key: value` lines fenced by two
//! `---` lines at the very top of a markdown file. Values are kept close to
//! their source text: one layer of double quotes is stripped and
//! `[a, b]` becomes a list, everything else is left unparsed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FrontValue {
    /// A value that was wrapped in double quotes
    Str(String),
    /// A bracketed, comma-separated list
    List(Vec<String>),
    /// Any other value, kept as written
    Scalar(String),
}

impl FrontValue {
    /// Text of a string or scalar value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::Str(s) | FrontValue::Scalar(s) => Some(s),
            FrontValue::List(_) => None,
        }
    }

    /// Elements of a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Position of the front-matter block within a source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// Both delimiters found
    Closed {
        /// Lines between the delimiters
        raw: &'a str,
        /// Everything after the closing delimiter, untrimmed
        body: &'a str,
    },
    /// An opening `---` line with no closing one
    Unterminated,
    /// The text does not open with `---`
    Absent,
}

/// Locate the front-matter block at the top of `content`
pub fn split_block(content: &str) -> Block<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = line_spans(content);

    let raw_start = match lines.next() {
        Some((start, line)) if is_delimiter(line) => start + line.len(),
        _ => return Block::Absent,
    };

    for (start, line) in lines {
        if is_delimiter(line) {
            return Block::Closed {
                raw: &content[raw_start..start],
                body: &content[start + line.len()..],
            };
        }
    }

    Block::Unterminated
}

/// Lines of `text` with their byte offsets, terminators included
fn line_spans(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line)
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// A source split into front-matter and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<'a> {
    pub frontmatter: FrontMatter,
    /// Body text, trimmed
    pub body: &'a str,
    /// An opening `---` was never closed
    pub unterminated: bool,
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, FrontValue>,
}

impl FrontMatter {
    /// Split a source into front-matter and trimmed body
    ///
    /// A missing or unterminated block yields empty front-matter and the
    /// whole text as body.
    pub fn parse(content: &str) -> Parsed<'_> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let (frontmatter, body, unterminated) = match split_block(content) {
            Block::Closed { raw, body } => (Self::from_block(raw), body, false),
            Block::Unterminated => (Self::default(), content, true),
            Block::Absent => (Self::default(), content, false),
        };
        Parsed {
            frontmatter,
            body: body.trim(),
            unterminated,
        }
    }

    /// Parse the lines between the two delimiters
    pub fn from_block(raw: &str) -> Self {
        let mut fields = IndexMap::new();

        for line in raw.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            // Later duplicates overwrite the value in place
            fields.insert(key.to_string(), parse_value(value.trim()));
        }

        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.fields.get(key)
    }

    /// Text of a string or scalar field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.get_str("excerpt")
    }

    pub fn date(&self) -> Option<&str> {
        self.get_str("date")
    }

    pub fn author(&self) -> Option<&str> {
        self.get_str("author")
    }

    pub fn image(&self) -> Option<&str> {
        self.get_str("image")
    }

    /// Post tags; empty when absent or not written as a list
    pub fn tags(&self) -> &[String] {
        self.get("tags").and_then(FrontValue::as_list).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse the date field into a calendar date-time
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date().and_then(parse_date_string)
    }
}

fn parse_value(value: &str) -> FrontValue {
    let (value, quoted) = match strip_quotes(value) {
        Some(inner) => (inner, true),
        None => (value, false),
    };

    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return FrontValue::List(parse_list(inner));
    }

    if quoted {
        FrontValue::Str(value.to_string())
    } else {
        FrontValue::Scalar(value.to_string())
    }
}

fn parse_list(inner: &str) -> Vec<String> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            strip_quotes(item).unwrap_or(item).to_string()
        })
        .collect()
}

/// Strip exactly one layer of surrounding double quotes
fn strip_quotes(value: &str) -> Option<&str> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

/// Parse a date string in various formats
///
/// Month and day may be written without zero padding.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    // Honor explicit offsets before falling back to naive formats
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: "Hello World"
date: 2024-01-15
author: Jane Doe
tags: [rust, "web dev", blog]
---

This is the content.
"#;

        let Parsed { frontmatter: fm, body, .. } = FrontMatter::parse(content);
        assert_eq!(fm.get("title"), Some(&FrontValue::Str("Hello World".into())));
        assert_eq!(fm.get("date"), Some(&FrontValue::Scalar("2024-01-15".into())));
        assert_eq!(fm.author(), Some("Jane Doe"));
        assert_eq!(fm.tags(), ["rust", "web dev", "blog"]);
        assert_eq!(body, "This is the content.");
    }

    #[test]
    fn test_value_with_colons_keeps_remainder() {
        let fm = FrontMatter::parse("---\nimage: https://example.com/a.png\ntitle: Rust: a tour\n---\nbody").frontmatter;
        assert_eq!(fm.image(), Some("https://example.com/a.png"));
        assert_eq!(fm.title(), Some("Rust: a tour"));
    }

    #[test]
    fn test_quoted_list_is_parsed_as_list() {
        let fm = FrontMatter::parse("---\ntags: \"[a, b]\"\n---\n").frontmatter;
        assert_eq!(fm.tags(), ["a", "b"]);
    }

    #[test]
    fn test_empty_list() {
        let fm = FrontMatter::parse("---\ntags: []\n---\n").frontmatter;
        assert_eq!(fm.get("tags"), Some(&FrontValue::List(Vec::new())));
    }

    #[test]
    fn test_only_one_quote_layer_stripped() {
        let fm = FrontMatter::parse("---\ntitle: \"\"quoted\"\"\n---\n").frontmatter;
        assert_eq!(fm.title(), Some("\"quoted\""));
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let Parsed { frontmatter: fm, body, .. } = FrontMatter::parse("---\njust some words\ntitle: Kept\n: no key\n---\nBody");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.title(), Some("Kept"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let fm = FrontMatter::parse("---\ntitle: First\nauthor: A\ntitle: Second\n---\n").frontmatter;
        assert_eq!(fm.title(), Some("Second"));
        let keys: Vec<_> = fm.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["title", "author"]);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let fm = FrontMatter::parse("---\nseries: Intro to Rust\ndraft: true\n---\n").frontmatter;
        assert_eq!(fm.get_str("series"), Some("Intro to Rust"));
        assert_eq!(fm.get("draft"), Some(&FrontValue::Scalar("true".into())));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "\n  # Just markdown\n\nNo metadata here.\n";
        let parsed = FrontMatter::parse(content);
        assert!(parsed.frontmatter.is_empty());
        assert!(!parsed.unterminated);
        assert_eq!(parsed.body, content.trim());
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let content = "---\ntitle: Lost\n\nThe closing line never comes.";
        assert_eq!(split_block(content), Block::Unterminated);
        let parsed = FrontMatter::parse(content);
        assert!(parsed.unterminated);
        assert!(parsed.frontmatter.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_delimiter_must_be_exactly_three_hyphens() {
        assert_eq!(split_block("----\ntitle: x\n----\n"), Block::Absent);
        assert_eq!(split_block(" ---\ntitle: x\n---\n"), Block::Absent);
        assert_eq!(split_block("---\ntitle: x\n---- \nrest"), Block::Unterminated);
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nBody text\r\n";
        let Parsed { frontmatter: fm, body, .. } = FrontMatter::parse(content);
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_empty_block() {
        match split_block("---\n---\nBody") {
            Block::Closed { raw, body } => {
                assert_eq!(raw, "");
                assert_eq!(body, "Body");
            }
            other => panic!("unexpected block: {:?}", other),
        }
    }

    #[test]
    fn test_scalar_tags_are_not_a_list() {
        let fm = FrontMatter::parse("---\ntags: Notes\n---\n").frontmatter;
        assert!(fm.tags().is_empty());
        assert_eq!(fm.get_str("tags"), Some("Notes"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter::from_block("date: 2024-01-15 10:30:00");
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }

    #[test]
    fn test_parse_date_formats() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for s in ["2024-03-01", "2024-3-1", "2024/03/01", "March 1, 2024", "Mar 1, 2024"] {
            assert_eq!(parse_date_string(s), Some(day), "format {}", s);
        }
        assert_eq!(
            parse_date_string("2024-03-01T02:00:00+02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(parse_date_string("someday"), None);
        assert_eq!(parse_date_string(""), None);
    }
}
