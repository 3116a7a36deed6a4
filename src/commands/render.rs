//! Render a post to HTML

use anyhow::{anyhow, Result};

use crate::helpers::outline_html;
use crate::Folio;

/// Print the rendered body, preceded by the outline when `toc` is set
pub fn run(folio: &Folio, slug: &str, toc: bool) -> Result<()> {
    let index = folio.load_index()?;
    let doc = index
        .lookup(slug)
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    let rendered = folio.render_post(&folio.renderer(), doc);
    if toc {
        println!(
            r#"<nav class="post-toc">{}</nav>"#,
            outline_html(&rendered.outline, None)
        );
    }
    print!("{}", rendered.html);
    Ok(())
}
