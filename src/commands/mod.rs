//! CLI commands

pub mod list;
pub mod outline;
pub mod render;
pub mod search;
pub mod show;
pub mod tags;

use serde::Serialize;

use crate::content::Document;
use crate::Folio;

/// Listing view of a post
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub slug: &'a str,
    pub title: Option<&'a str>,
    pub date: Option<&'a str>,
    pub author: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub tags: &'a [String],
    pub url: String,
}

impl<'a> PostSummary<'a> {
    pub fn new(folio: &Folio, doc: &'a Document) -> Self {
        Self {
            slug: &doc.slug,
            title: doc.title(),
            date: doc.frontmatter.date(),
            author: doc.frontmatter.author(),
            excerpt: doc.excerpt(),
            tags: doc.tags(),
            url: folio.post_url(doc),
        }
    }
}

/// Date column for text listings
fn display_date(doc: &Document) -> String {
    doc.date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "undated".to_string())
}
