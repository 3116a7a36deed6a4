//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::NavigatorConfig;
pub use site::SiteConfig;
