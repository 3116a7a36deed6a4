//! Search posts by title and excerpt

use anyhow::Result;

use super::list::format_posts;
use crate::Folio;

pub fn run(folio: &Folio, query: &str, json: bool) -> Result<()> {
    let index = folio.load_index()?;
    let hits = index.search(query);
    tracing::debug!("{} posts match {:?}", hits.len(), query);
    print!("{}", format_posts(folio, &hits, json)?);
    Ok(())
}
