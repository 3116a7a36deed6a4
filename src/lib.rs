//! mdfolio: markdown blog content index with in-page outline navigation
//!
//! Posts are read once from the content directory into an immutable
//! [`content::ContentIndex`]. Each post view derives its heading outline
//! with [`navigator::extract_outline`] and follows the reader's position
//! with a [`navigator::NavigatorSession`].

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod navigator;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentIndex, Document, MarkdownRenderer};
use navigator::{extract_outline, strip_inline_toc, HeadingEntry, ScrollOptions, ViewportBand};

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub content_dir: PathBuf,
}

/// A post prepared for display
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub html: String,
    pub outline: Vec<HeadingEntry>,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Read every post and build the index
    pub fn load_index(&self) -> Result<ContentIndex> {
        content::loader::ContentLoader::new(self).load()
    }

    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config.highlight)
    }

    /// Render a post body and the outline matching its rendered headings
    ///
    /// An authored "Table of Contents" section is dropped first; the
    /// outline is taken from the same text, so every entry has a target.
    pub fn render_post(&self, renderer: &MarkdownRenderer, doc: &Document) -> RenderedPost {
        let body = strip_inline_toc(&doc.body);
        RenderedPost {
            html: renderer.render(&body),
            outline: extract_outline(&body),
        }
    }

    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions::from_config(&self.config.navigator)
    }

    pub fn viewport_band(&self) -> ViewportBand {
        ViewportBand::from_config(&self.config.navigator)
    }

    /// Site-relative URL of a post
    pub fn post_url(&self, doc: &Document) -> String {
        doc.url_path(&self.config.root, &self.config.post_dir)
    }
}
