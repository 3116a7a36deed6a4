//! Scroll-to-heading

use std::time::Duration;

use super::tracker::BandObserver;
use crate::config::NavigatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The rendered page, as far as scrolling is concerned
pub trait ScrollSurface {
    /// Document-relative top of the element rendered for `anchor_id`
    fn element_offset(&self, anchor_id: &str) -> Option<f64>;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Briefly emphasize the element; surfaces without styling ignore it
    fn highlight(&mut self, _anchor_id: &str, _duration: Duration) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOptions {
    /// Height of the fixed header the heading must clear
    pub header_offset: f64,
    pub margin: f64,
    pub highlight: Option<Duration>,
    pub behavior: ScrollBehavior,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            margin: 20.0,
            highlight: Some(Duration::from_millis(2000)),
            behavior: ScrollBehavior::Smooth,
        }
    }
}

impl ScrollOptions {
    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self {
            header_offset: config.header_offset,
            margin: config.margin,
            highlight: (config.highlight_ms > 0).then(|| Duration::from_millis(config.highlight_ms)),
            behavior: if config.smooth_scroll {
                ScrollBehavior::Smooth
            } else {
                ScrollBehavior::Instant
            },
        }
    }
}

/// Scroll a heading to just below the header
///
/// Returns the requested scroll offset, or `None` when nothing is rendered
/// for `anchor_id`, in which case the surface is left untouched.
pub fn scroll_to_anchor<S>(surface: &mut S, anchor_id: &str, options: &ScrollOptions) -> Option<f64>
where
    S: ScrollSurface + ?Sized,
{
    let Some(offset) = surface.element_offset(anchor_id) else {
        tracing::debug!("No rendered heading for anchor {:?}", anchor_id);
        return None;
    };

    let target = offset - options.header_offset - options.margin;
    surface.scroll_to(target, options.behavior);
    if let Some(duration) = options.highlight {
        surface.highlight(anchor_id, duration);
    }
    Some(target)
}

impl ScrollSurface for BandObserver {
    fn element_offset(&self, anchor_id: &str) -> Option<f64> {
        self.element_top(anchor_id)
    }

    fn scroll_to(&mut self, top: f64, _behavior: ScrollBehavior) {
        self.set_scroll(top);
    }
}
