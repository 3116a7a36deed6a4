//! Markdown rendering with heading anchors and syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;
use crate::navigator::{anchor_id, heading_text};

/// Extensions enabled for every markdown parse
///
/// The outline is read with the same options, so both agree on which
/// lines are headings. Heading attributes stay off: an explicit `{#id}`
/// would break the heading id contract with the outline.
pub(crate) fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Loaded syntaxes plus the selected theme
struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    fn load(theme_name: &str) -> Option<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, using the first available", theme_name);
                themes.into_values().next()?
            }
        };
        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn highlight(&self, code: &str, lang: &str) -> Option<String> {
        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme).ok()
    }
}

/// Markdown renderer
///
/// Every heading gets an `id` computed by [`anchor_id`] from its source
/// line, the same rule the outline uses, so outline links always land on
/// a rendered heading.
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with default highlighting
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            highlighter: Highlighter::load(theme),
            line_numbers,
        }
    }

    /// Create a renderer without syntax highlighting
    pub fn plain() -> Self {
        Self {
            highlighter: None,
            line_numbers: false,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        if config.enable {
            Self::with_options(&config.theme, config.line_number)
        } else {
            Self::plain()
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, parser_options()).into_offset_iter();

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for (event, range) in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',')
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let html = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    let id = id.or_else(|| {
                        let line = markdown[range].lines().next().unwrap_or_default();
                        let anchor = anchor_id(heading_text(line));
                        (!anchor.is_empty()).then(|| CowStr::from(anchor))
                    });
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id,
                        classes,
                        attrs,
                    }));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        match self.highlighter.as_ref().and_then(|h| h.highlight(code, lang)) {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => {
                format!(r#"<figure class="highlight {}">{}</figure>"#, lang, highlighted)
            }
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let gutter: Vec<String> = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect();

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter.join("\n"),
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
