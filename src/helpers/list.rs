//! List helpers for rendering a document outline

use super::html_escape;
use crate::navigator::HeadingEntry;

/// Render an outline as nested `<ol class="toc">` markup
///
/// The entry whose anchor equals `active` gets an extra `active` class.
pub fn outline_html(outline: &[HeadingEntry], active: Option<&str>) -> String {
    let mut html = r#"<ol class="toc">"#.to_string();
    let mut current_level = 1;

    for heading in outline {
        let level = usize::from(heading.level.max(1));

        // Adjust nesting
        while current_level < level {
            html.push_str(r#"<ol class="toc-child">"#);
            current_level += 1;
        }
        while current_level > level {
            html.push_str("</ol>");
            current_level -= 1;
        }

        let active_class = if active == Some(heading.anchor_id.as_str()) {
            " active"
        } else {
            ""
        };
        html.push_str(&format!(
            "<li class=\"toc-item toc-level-{}{}\"><a class=\"toc-link\" href=\"#{}\"><span class=\"toc-text\">{}</span></a></li>",
            level,
            active_class,
            html_escape(&heading.anchor_id),
            html_escape(&heading.title)
        ));
    }

    while current_level > 1 {
        html.push_str("</ol>");
        current_level -= 1;
    }

    html.push_str("</ol>");
    html
}

/// Render an outline as indented plain text, one heading per line
pub fn outline_text(outline: &[HeadingEntry]) -> String {
    outline
        .iter()
        .map(|h| {
            format!(
                "{}- {} (#{})",
                "  ".repeat(usize::from(h.level.saturating_sub(1))),
                h.title,
                h.anchor_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
