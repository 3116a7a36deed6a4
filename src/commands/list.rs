//! List posts

use anyhow::Result;
use std::fmt::Write;

use super::{display_date, PostSummary};
use crate::content::Document;
use crate::helpers::truncate;
use crate::Folio;

/// List posts, newest first, optionally only those with `tag`
pub fn run(folio: &Folio, tag: Option<&str>, json: bool) -> Result<()> {
    let index = folio.load_index()?;
    let docs = match tag {
        Some(tag) => index.with_tag(tag),
        None => index.iter().collect(),
    };
    print!("{}", format_posts(folio, &docs, json)?);
    Ok(())
}

/// Text or JSON listing of `docs`
pub fn format_posts(folio: &Folio, docs: &[&Document], json: bool) -> Result<String> {
    if json {
        let summaries: Vec<_> = docs.iter().map(|d| PostSummary::new(folio, d)).collect();
        return Ok(serde_json::to_string_pretty(&summaries)? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "Posts ({}):", docs.len())?;
    for doc in docs {
        writeln!(
            out,
            "  {} - {} [{}]",
            display_date(doc),
            doc.display_title(),
            doc.slug
        )?;
        if let Some(excerpt) = doc.excerpt() {
            writeln!(out, "      {}", truncate(excerpt, 72, None))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentIndex;

    fn index() -> ContentIndex {
        ContentIndex::ingest([
            (
                "p/newer.md",
                "---\ntitle: Newer Post\ndate: 2024-02-01\nexcerpt: Fresh\ntags: [rust]\n---\nbody",
            ),
            ("p/older.md", "---\ntitle: Older Post\ndate: 2023-02-01\n---\nbody"),
            ("p/loose.md", "no metadata"),
        ])
    }

    #[test]
    fn test_text_listing() {
        let folio = Folio::with_config("/site", SiteConfig::default());
        let index = index();
        let docs: Vec<_> = index.iter().collect();
        let out = format_posts(&folio, &docs, false).unwrap();
        assert_eq!(
            out,
            "Posts (3):\n  2024-02-01 - Newer Post [newer]\n      Fresh\n  2023-02-01 - Older Post [older]\n  undated - loose [loose]\n"
        );
    }

    #[test]
    fn test_json_listing() {
        let folio = Folio::with_config("/site", SiteConfig::default());
        let index = index();
        let out = format_posts(&folio, &index.with_tag("rust"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["slug"], "newer");
        assert_eq!(value[0]["url"], "/blog/newer");
        assert_eq!(value[0]["tags"][0], "rust");
        assert_eq!(value.as_array().unwrap().len(), 1);
    }
}
