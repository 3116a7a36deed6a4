//! Helper functions for HTML and terminal output

mod html;
mod list;

pub use html::*;
pub use list::*;
