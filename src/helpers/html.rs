//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
        assert_eq!(truncate("héllo wörld", 6, Some("…")), "héllo…");
    }
}
