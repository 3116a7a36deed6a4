//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL segment posts live under, e.g. `blog` for `/blog/<slug>`
    pub post_dir: String,

    // Content
    pub content_dir: String,
    pub extensions: Vec<String>,
    /// Descend into subdirectories of `content_dir`
    pub recursive: bool,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            post_dir: "blog".to_string(),

            content_dir: "content/posts".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            recursive: false,

            highlight: HighlightConfig::default(),
            navigator: NavigatorConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Full URL of a site-relative path
    pub fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// In-page outline navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Height of the fixed site header, in pixels
    pub header_offset: f64,
    /// Extra space left above a heading after scrolling to it
    pub margin: f64,
    /// Fraction of the viewport excluded from the top of the tracked band
    pub band_top: f64,
    /// Fraction of the viewport excluded from the bottom of the tracked band
    pub band_bottom: f64,
    /// How long a scrolled-to heading stays highlighted; 0 disables it
    pub highlight_ms: u64,
    /// Animate scrolling to a heading instead of jumping
    pub smooth_scroll: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            margin: 20.0,
            band_top: 0.10,
            band_bottom: 0.70,
            highlight_ms: 2000,
            smooth_scroll: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.post_dir, "blog");
        assert!(!config.recursive);
        assert_eq!(config.navigator.header_offset, 80.0);
        assert_eq!(config.navigator.band_bottom, 0.70);
        assert!(config.navigator.smooth_scroll);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
content_dir: posts
navigator:
  header_offset: 64
highlight:
  enable: false
comments_provider: hosted
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.navigator.header_offset, 64.0);
        assert_eq!(config.navigator.margin, 20.0);
        assert!(!config.highlight.enable);
        assert_eq!(config.extensions, ["md", "markdown"]);
        assert!(config.extra.contains_key("comments_provider"));
    }

    #[test]
    fn test_full_url() {
        let config = SiteConfig {
            url: "https://blog.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.full_url("/blog/hello"), "https://blog.example.com/blog/hello");
    }
}
