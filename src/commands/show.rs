//! Show a single post

use anyhow::{anyhow, Result};
use std::fmt::Write;

use super::display_date;
use crate::content::{ContentIndex, Document};
use crate::Folio;

pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let index = folio.load_index()?;
    let doc = index
        .lookup(slug)
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    if json {
        println!("{}", serde_json::to_string_pretty(doc)?);
    } else {
        print!("{}", format_post(folio, &index, doc)?);
    }
    Ok(())
}

/// Header block, body, then links to the neighbouring posts
pub fn format_post(folio: &Folio, index: &ContentIndex, doc: &Document) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", doc.display_title())?;

    let mut meta = display_date(doc);
    if let Some(author) = doc.frontmatter.author() {
        write!(meta, " • {}", author)?;
    }
    writeln!(out, "{}", meta)?;

    if !doc.tags().is_empty() {
        let tags: Vec<_> = doc.tags().iter().map(|t| format!("#{}", t)).collect();
        writeln!(out, "{}", tags.join(" "))?;
    }
    writeln!(out, "{}", folio.config.full_url(&folio.post_url(doc)))?;
    writeln!(out)?;
    writeln!(out, "{}", doc.body)?;

    let (newer, older) = index.neighbors(&doc.slug);
    if newer.is_some() || older.is_some() {
        writeln!(out)?;
    }
    if let Some(newer) = newer {
        writeln!(out, "Newer: {} [{}]", newer.display_title(), newer.slug)?;
    }
    if let Some(older) = older {
        writeln!(out, "Older: {} [{}]", older.display_title(), older.slug)?;
    }
    Ok(out)
}
