//! List tags

use anyhow::Result;
use std::fmt::Write;

use crate::content::ContentIndex;
use crate::Folio;

/// Print every tag with its post count, most used first
pub fn run(folio: &Folio) -> Result<()> {
    let index = folio.load_index()?;
    print!("{}", format_tags(&index)?);
    Ok(())
}

pub fn format_tags(index: &ContentIndex) -> Result<String> {
    let counts = index.tag_counts();
    let mut out = String::new();
    writeln!(out, "Tags ({}):", counts.len())?;
    for (tag, count) in counts {
        writeln!(out, "  {} ({})", tag, count)?;
    }
    Ok(out)
}
