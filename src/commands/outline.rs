//! Print the heading outline of a post

use anyhow::{anyhow, Result};

use crate::helpers::outline_text;
use crate::navigator::{extract_outline, strip_inline_toc};
use crate::Folio;

pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let index = folio.load_index()?;
    let doc = index
        .lookup(slug)
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    let outline = extract_outline(&strip_inline_toc(&doc.body));
    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else if outline.is_empty() {
        println!("{} has no headings", doc.slug);
    } else {
        println!("{}", outline_text(&outline));
    }
    Ok(())
}
