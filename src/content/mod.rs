//! Content module - handles posts, front-matter and markdown rendering

mod document;
mod frontmatter;
mod index;
pub mod loader;
mod markdown;

pub use document::{slug_from_path, Document};
pub use frontmatter::{parse_date_string, split_block, Block, FrontMatter, FrontValue, Parsed};
pub use index::{ContentIndex, IngestWarning};
pub use markdown::MarkdownRenderer;
pub(crate) use markdown::parser_options;
