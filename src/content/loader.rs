//! Content loader - reads markdown sources from the content directory

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentIndex, IngestWarning};
use crate::Folio;

/// Reads the raw markdown sources that seed the content index
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Read every source and build the index
    pub fn load(&self) -> Result<ContentIndex> {
        let (sources, warnings) = self.read_sources()?;
        tracing::info!(
            "Loaded {} sources from {:?}",
            sources.len(),
            self.folio.content_dir
        );
        Ok(ContentIndex::ingest_with(sources, warnings))
    }

    /// Collect `(path, text)` pairs, sorted by path
    ///
    /// Paths are relative to the site directory. Files that cannot be read
    /// are reported as warnings instead of failing the whole load.
    pub fn read_sources(&self) -> Result<(Vec<(PathBuf, String)>, Vec<IngestWarning>)> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return Ok((Vec::new(), Vec::new()));
        }
        if !content_dir.is_dir() {
            bail!("Content path {:?} is not a directory", content_dir);
        }

        let max_depth = if self.folio.config.recursive {
            usize::MAX
        } else {
            1
        };

        let mut sources = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .max_depth(max_depth)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !self.is_source_file(path) {
                continue;
            }

            let relative = path
                .strip_prefix(&self.folio.base_dir)
                .unwrap_or(path)
                .to_path_buf();

            match fs::read_to_string(path) {
                Ok(text) => sources.push((relative, text)),
                Err(source) => warnings.push(IngestWarning::Unreadable {
                    path: relative.display().to_string(),
                    source,
                }),
            }
        }

        sources.sort_by(|a, b| a.0.cmp(&b.0));
        Ok((sources, warnings))
    }

    /// Check if a file has one of the configured extensions
    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                self.folio
                    .config
                    .extensions
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(e))
            })
            .unwrap_or(false)
    }
}
