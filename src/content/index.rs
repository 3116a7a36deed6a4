//! Content index - the ordered, immutable post collection

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::document::slug_from_path;
use super::frontmatter::{parse_date_string, Parsed};
use super::{Document, FrontMatter, FrontValue};

/// Problems found in a single source while building the index
///
/// None of these stop ingestion; the offending document is either
/// degraded or skipped and the rest of the index is built normally.
#[derive(Error, Debug)]
pub enum IngestWarning {
    #[error("{path}: front-matter block is never closed, treating the whole file as body")]
    UnterminatedFrontMatter { path: String },

    #[error("{path}: file name has no usable stem, skipping")]
    MissingSlug { path: String },

    #[error("duplicate slug `{slug}`: {replaced} replaced by {by}")]
    DuplicateSlug {
        slug: String,
        replaced: String,
        by: String,
    },

    #[error("{slug}: `tags` is not a list, ignoring it")]
    TagsNotList { slug: String },

    #[error("{slug}: cannot parse date `{value}`, sorting it last")]
    UnparseableDate { slug: String, value: String },

    #[error("{path}: failed to read: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

/// All posts, newest first
#[derive(Debug, Default)]
pub struct ContentIndex {
    documents: Vec<Document>,
    by_slug: HashMap<String, usize>,
    warnings: Vec<IngestWarning>,
}

impl ContentIndex {
    /// Build the index from `(path, text)` pairs
    ///
    /// Sources are taken in iteration order; when two paths share a slug
    /// the later one replaces the earlier one and the replacement is
    /// recorded as a [`IngestWarning::DuplicateSlug`].
    pub fn ingest<I, P, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        Self::ingest_with(sources, Vec::new())
    }

    /// Build the index, keeping warnings already raised while reading sources
    pub(crate) fn ingest_with<I, P, S>(sources: I, mut warnings: Vec<IngestWarning>) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut slots: IndexMap<String, Document> = IndexMap::new();

        for (path, text) in sources {
            let Some(doc) = parse_document(path.as_ref(), text.as_ref(), &mut warnings) else {
                continue;
            };
            let slug = doc.slug.clone();
            let by = doc.source.clone();
            if let Some(previous) = slots.insert(slug.clone(), doc) {
                warnings.push(IngestWarning::DuplicateSlug {
                    slug,
                    replaced: previous.source,
                    by,
                });
            }
        }

        let mut documents: Vec<Document> = slots.into_values().collect();
        documents.sort_by(chronological);

        let by_slug = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.slug.clone(), i))
            .collect();

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        tracing::debug!(
            "Indexed {} documents ({} warnings)",
            documents.len(),
            warnings.len()
        );

        Self {
            documents,
            by_slug,
            warnings,
        }
    }

    /// Documents sorted by date, newest first
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by exact slug
    pub fn lookup(&self, slug: &str) -> Option<&Document> {
        self.by_slug.get(slug).map(|&i| &self.documents[i])
    }

    /// Everything that went wrong while ingesting
    pub fn warnings(&self) -> &[IngestWarning] {
        &self.warnings
    }

    /// Slug collisions resolved during ingestion
    pub fn collisions(&self) -> impl Iterator<Item = &IngestWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, IngestWarning::DuplicateSlug { .. }))
    }

    /// Documents grouped by tag, tags in first-seen order
    pub fn posts_by_tag(&self) -> IndexMap<&str, Vec<&Document>> {
        let mut groups: IndexMap<&str, Vec<&Document>> = IndexMap::new();
        for doc in &self.documents {
            for tag in doc.tags() {
                groups.entry(tag.as_str()).or_default().push(doc);
            }
        }
        groups
    }

    /// Number of posts per tag, most used first
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .posts_by_tag()
            .into_iter()
            .map(|(tag, docs)| (tag, docs.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }

    /// Documents carrying exactly `tag`
    pub fn with_tag(&self, tag: &str) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| doc.tags().iter().any(|t| t == tag))
            .collect()
    }

    /// Case-insensitive search over titles and excerpts
    ///
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Document> {
        // Surrounding whitespace is not part of the needle
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.documents.iter().collect();
        }
        self.documents
            .iter()
            .filter(|doc| doc.matches(&needle))
            .collect()
    }

    /// The newer and older neighbours of a post
    pub fn neighbors(&self, slug: &str) -> (Option<&Document>, Option<&Document>) {
        let Some(&pos) = self.by_slug.get(slug) else {
            return (None, None);
        };
        let newer = pos.checked_sub(1).map(|i| &self.documents[i]);
        let older = self.documents.get(pos + 1);
        (newer, older)
    }
}

impl<'a> IntoIterator for &'a ContentIndex {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse one source; `None` only when no slug can be derived
fn parse_document(
    path: &Path,
    content: &str,
    warnings: &mut Vec<IngestWarning>,
) -> Option<Document> {
    let source = path.display().to_string();
    let Some(slug) = slug_from_path(path) else {
        warnings.push(IngestWarning::MissingSlug { path: source });
        return None;
    };

    let Parsed {
        frontmatter,
        body,
        unterminated,
    } = FrontMatter::parse(content);
    if unterminated {
        warnings.push(IngestWarning::UnterminatedFrontMatter {
            path: source.clone(),
        });
    }

    if matches!(
        frontmatter.get("tags"),
        Some(FrontValue::Str(_) | FrontValue::Scalar(_))
    ) {
        warnings.push(IngestWarning::TagsNotList { slug: slug.clone() });
    }

    let date = frontmatter.date().and_then(|raw| {
        let parsed = parse_date_string(raw);
        if parsed.is_none() {
            warnings.push(IngestWarning::UnparseableDate {
                slug: slug.clone(),
                value: raw.to_string(),
            });
        }
        parsed
    });

    Some(Document {
        slug,
        frontmatter,
        body: body.to_string(),
        source,
        date,
    })
}

/// Newest first; equal dates by slug; undated posts last, by slug
fn chronological(a: &Document, b: &Document) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    }
}
