//! Document navigator - heading outline and reading position
//!
//! The outline is rebuilt from a post body on every view. Tracking and
//! scrolling talk to the rendered page through the [`IntersectionSource`]
//! and [`ScrollSurface`] traits so they can run against real layout or a
//! simulated one.

mod outline;
mod scroll;
mod tracker;

pub use outline::{
    anchor_id, extract_outline, heading_text, parse_heading_line, strip_inline_toc, HeadingEntry,
};
pub use scroll::{scroll_to_anchor, ScrollBehavior, ScrollOptions, ScrollSurface};
pub use tracker::{
    ActiveHeadingTracker, BandObserver, IntersectionEntry, IntersectionSource, NavigatorSession,
    ViewportBand,
};
