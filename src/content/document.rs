//! Document model

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::path::Path;

use super::FrontMatter;

/// Characters escaped when a slug is used as a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A parsed markdown post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Lookup key and URL segment, from the file name
    pub slug: String,

    /// Metadata block
    pub frontmatter: FrontMatter,

    /// Markdown after the front-matter block, trimmed
    pub body: String,

    /// Path the document was ingested from
    pub source: String,

    /// Parsed `date` field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}

impl Document {
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.title()
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.frontmatter.excerpt()
    }

    pub fn tags(&self) -> &[String] {
        self.frontmatter.tags()
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title().unwrap_or(&self.slug)
    }

    /// Site-relative URL of the post, e.g. `/blog/my-post`
    pub fn url_path(&self, root: &str, post_dir: &str) -> String {
        let root = root.trim_end_matches('/');
        let post_dir = post_dir.trim_matches('/');
        let slug = utf8_percent_encode(&self.slug, PATH_SEGMENT);
        if post_dir.is_empty() {
            format!("{}/{}", root, slug)
        } else {
            format!("{}/{}/{}", root, post_dir, slug)
        }
    }

    /// Case-insensitive match of an already lowercased needle against
    /// the title and excerpt
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [self.title(), self.excerpt()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Derive a slug from a source path: the file name without directory
/// prefix and without its extension
pub fn slug_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
