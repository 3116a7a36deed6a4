//! Active heading tracking
//!
//! The host reports headings entering or leaving a horizontal band of the
//! viewport; the most recently entered heading is the active one.

use std::collections::{HashMap, HashSet};
use std::mem;

use super::HeadingEntry;
use crate::config::NavigatorConfig;

/// A heading crossing the edge of the tracked band
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub anchor_id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(anchor_id: &str) -> Self {
        Self {
            anchor_id: anchor_id.to_string(),
            is_intersecting: true,
        }
    }

    pub fn leaving(anchor_id: &str) -> Self {
        Self {
            anchor_id: anchor_id.to_string(),
            is_intersecting: false,
        }
    }
}

/// Something that reports which observed anchors cross the tracked band
pub trait IntersectionSource {
    /// Start watching the given anchors
    fn observe(&mut self, anchor_ids: &[String]);

    /// Entries recorded since the last call, in observation order
    fn take_entries(&mut self) -> Vec<IntersectionEntry>;

    /// Stop watching everything and drop any queued entries
    fn disconnect(&mut self);
}

/// Vertical stripe of the viewport in which headings count as "being read"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    /// Fraction of the viewport height cut from the top
    pub top: f64,
    /// Fraction of the viewport height cut from the bottom
    pub bottom: f64,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top: 0.10,
            bottom: 0.70,
        }
    }
}

impl ViewportBand {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self {
            top: top.clamp(0.0, 1.0),
            bottom: bottom.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &NavigatorConfig) -> Self {
        Self::new(config.band_top, config.band_bottom)
    }

    /// Start and end of the band in viewport pixels
    pub fn bounds(&self, viewport_height: f64) -> (f64, f64) {
        (
            viewport_height * self.top,
            viewport_height * (1.0 - self.bottom),
        )
    }

    /// Whether an element spanning `top..bottom` (viewport-relative)
    /// overlaps the band
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let (start, end) = self.bounds(viewport_height);
        start < end && top < end && bottom > start
    }
}

/// Keeps the most recently entered anchor
///
/// Several anchors entering in one batch resolve to the last one observed.
/// Batch order is whatever the host delivers, so simultaneous entries give
/// a single but unspecified winner.
#[derive(Debug, Clone, Default)]
pub struct ActiveHeadingTracker {
    active: Option<String>,
}

impl ActiveHeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of entries and return the active anchor
    ///
    /// Leaving entries never clear the active anchor.
    pub fn track<I>(&mut self, entries: I) -> Option<&str>
    where
        I: IntoIterator<Item = IntersectionEntry>,
    {
        for entry in entries {
            if entry.is_intersecting {
                self.active = Some(entry.anchor_id);
            }
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn reset(&mut self) {
        self.active = None;
    }
}

/// Geometry-driven [`IntersectionSource`]
///
/// Holds the document-relative position of every rendered heading and the
/// current scroll offset, and emits entries the way a browser intersection
/// observer does: one entry per target when it is first observed, then
/// only on transitions.
#[derive(Debug, Clone)]
pub struct BandObserver {
    band: ViewportBand,
    viewport_height: f64,
    scroll_y: f64,
    layout: HashMap<String, (f64, f64)>,
    targets: Vec<String>,
    inside: HashSet<String>,
    pending: Vec<IntersectionEntry>,
}

impl BandObserver {
    pub fn new(band: ViewportBand, viewport_height: f64) -> Self {
        Self {
            band,
            viewport_height,
            scroll_y: 0.0,
            layout: HashMap::new(),
            targets: Vec::new(),
            inside: HashSet::new(),
            pending: Vec::new(),
        }
    }

    /// Record where the element for `anchor_id` is rendered
    pub fn place(&mut self, anchor_id: &str, top: f64, height: f64) {
        self.layout
            .insert(anchor_id.to_string(), (top, top + height.max(0.0)));
        self.refresh();
    }

    /// Document-relative top of a rendered element
    pub fn element_top(&self, anchor_id: &str) -> Option<f64> {
        self.layout.get(anchor_id).map(|&(top, _)| top)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.refresh();
    }

    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.refresh();
    }

    pub fn observed(&self) -> &[String] {
        &self.targets
    }

    fn in_band(&self, anchor_id: &str) -> bool {
        self.layout.get(anchor_id).is_some_and(|&(top, bottom)| {
            self.band.intersects(
                top - self.scroll_y,
                bottom - self.scroll_y,
                self.viewport_height,
            )
        })
    }

    fn refresh(&mut self) {
        let mut changes = Vec::new();
        for id in &self.targets {
            let now = self.in_band(id);
            if now != self.inside.contains(id) {
                changes.push(IntersectionEntry {
                    anchor_id: id.clone(),
                    is_intersecting: now,
                });
            }
        }
        for entry in changes {
            if entry.is_intersecting {
                self.inside.insert(entry.anchor_id.clone());
            } else {
                self.inside.remove(&entry.anchor_id);
            }
            self.pending.push(entry);
        }
    }
}

impl IntersectionSource for BandObserver {
    fn observe(&mut self, anchor_ids: &[String]) {
        for id in anchor_ids {
            if self.targets.contains(id) {
                continue;
            }
            let now = self.in_band(id);
            if now {
                self.inside.insert(id.clone());
            }
            self.targets.push(id.clone());
            self.pending.push(IntersectionEntry {
                anchor_id: id.clone(),
                is_intersecting: now,
            });
        }
    }

    fn take_entries(&mut self) -> Vec<IntersectionEntry> {
        mem::take(&mut self.pending)
    }

    fn disconnect(&mut self) {
        self.targets.clear();
        self.inside.clear();
        self.pending.clear();
    }
}

/// Outline tracking for one document view
///
/// Subscribes on creation and unsubscribes when the document is replaced
/// or the session is dropped. Entries for anchors outside the current
/// outline are discarded.
pub struct NavigatorSession<S: IntersectionSource> {
    source: S,
    tracker: ActiveHeadingTracker,
    anchors: Vec<String>,
}

impl<S: IntersectionSource> NavigatorSession<S> {
    pub fn new(mut source: S, outline: &[HeadingEntry]) -> Self {
        let anchors = unique_anchors(outline);
        source.observe(&anchors);
        Self {
            source,
            tracker: ActiveHeadingTracker::new(),
            anchors,
        }
    }

    /// Drain pending entries into the tracker
    pub fn pump(&mut self) -> Option<&str> {
        let entries = self.source.take_entries();
        let anchors = &self.anchors;
        self.tracker
            .track(entries.into_iter().filter(|e| anchors.contains(&e.anchor_id)))
    }

    pub fn active(&self) -> Option<&str> {
        self.tracker.active()
    }

    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Switch the view to another document's outline
    pub fn replace_document(&mut self, outline: &[HeadingEntry]) {
        self.source.disconnect();
        self.tracker.reset();
        self.anchors = unique_anchors(outline);
        self.source.observe(&self.anchors);
    }
}

impl<S: IntersectionSource> Drop for NavigatorSession<S> {
    fn drop(&mut self) {
        self.source.disconnect();
    }
}

fn unique_anchors(outline: &[HeadingEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    outline
        .iter()
        .filter(|h| seen.insert(h.anchor_id.as_str()))
        .map(|h| h.anchor_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::extract_outline;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_band_bounds() {
        let band = ViewportBand::default();
        let (start, end) = band.bounds(1000.0);
        assert!((start - 100.0).abs() < 1e-9);
        assert!((end - 300.0).abs() < 1e-9);

        assert!(band.intersects(150.0, 180.0, 1000.0));
        assert!(band.intersects(90.0, 110.0, 1000.0));
        assert!(!band.intersects(20.0, 60.0, 1000.0));
        assert!(!band.intersects(500.0, 540.0, 1000.0));
        assert!(!ViewportBand::new(0.6, 0.6).intersects(0.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_most_recent_entry_wins() {
        let mut tracker = ActiveHeadingTracker::new();
        assert_eq!(tracker.active(), None);
        assert_eq!(
            tracker.track([IntersectionEntry::entering("intro")]),
            Some("intro")
        );
        assert_eq!(
            tracker.track([IntersectionEntry::entering("setup")]),
            Some("setup")
        );
    }

    #[test]
    fn test_leaving_keeps_active() {
        let mut tracker = ActiveHeadingTracker::new();
        tracker.track([IntersectionEntry::entering("intro")]);
        assert_eq!(
            tracker.track([IntersectionEntry::leaving("intro")]),
            Some("intro")
        );
        assert_eq!(tracker.track(Vec::new()), Some("intro"));
    }

    #[test]
    fn test_simultaneous_entries_pick_one() {
        let mut tracker = ActiveHeadingTracker::new();
        let active = tracker
            .track([
                IntersectionEntry::entering("alpha"),
                IntersectionEntry::entering("beta"),
            ])
            .map(str::to_string);
        let active = active.expect("one anchor should be active");
        assert!(active == "alpha" || active == "beta");
    }

    #[test]
    fn test_band_observer_reports_transitions() {
        let mut observer = BandObserver::new(ViewportBand::default(), 1000.0);
        observer.place("intro", 150.0, 40.0);
        observer.place("usage", 900.0, 40.0);
        observer.observe(&["intro".to_string(), "usage".to_string()]);

        assert_eq!(
            observer.take_entries(),
            [
                IntersectionEntry::entering("intro"),
                IntersectionEntry::leaving("usage"),
            ]
        );

        observer.set_scroll(700.0);
        assert_eq!(
            observer.take_entries(),
            [
                IntersectionEntry::leaving("intro"),
                IntersectionEntry::entering("usage"),
            ]
        );

        observer.set_scroll(710.0);
        assert!(observer.take_entries().is_empty());
    }

    #[test]
    fn test_band_observer_resize_and_scroll_clamp() {
        let mut observer = BandObserver::new(ViewportBand::default(), 1000.0);
        observer.place("intro", 250.0, 40.0);
        observer.observe(&["intro".to_string()]);
        assert_eq!(observer.take_entries(), [IntersectionEntry::entering("intro")]);

        // A shorter viewport moves the band above the heading
        observer.resize(500.0);
        assert_eq!(observer.take_entries(), [IntersectionEntry::leaving("intro")]);

        observer.set_scroll(-40.0);
        assert_eq!(observer.scroll_y(), 0.0);
        assert!(observer.take_entries().is_empty());

        observer.set_scroll(150.0);
        assert_eq!(observer.scroll_y(), 150.0);
        assert_eq!(observer.take_entries(), [IntersectionEntry::entering("intro")]);
    }

    #[test]
    fn test_session_tracks_scrolling() {
        let outline = extract_outline("## Intro\n### Details\n## Usage");
        let mut observer = BandObserver::new(ViewportBand::default(), 1000.0);
        observer.place("intro", 150.0, 40.0);
        observer.place("details", 600.0, 30.0);
        observer.place("usage", 1400.0, 40.0);

        let mut session = NavigatorSession::new(observer, &outline);
        assert_eq!(session.pump(), Some("intro"));

        session.source_mut().set_scroll(450.0);
        assert_eq!(session.pump(), Some("details"));

        // Nothing in the band: the last heading stays active
        session.source_mut().set_scroll(900.0);
        assert_eq!(session.pump(), Some("details"));

        session.source_mut().set_scroll(1250.0);
        assert_eq!(session.pump(), Some("usage"));
    }

    #[test]
    fn test_replace_document_resets() {
        let mut observer = BandObserver::new(ViewportBand::default(), 1000.0);
        observer.place("intro", 150.0, 40.0);
        observer.place("other", 150.0, 40.0);

        let mut session = NavigatorSession::new(observer, &extract_outline("## Intro"));
        assert_eq!(session.pump(), Some("intro"));

        session.replace_document(&extract_outline("## Other"));
        assert_eq!(session.active(), None);
        assert_eq!(session.anchors(), ["other"]);
        assert_eq!(session.source().observed(), ["other"]);
        assert_eq!(session.pump(), Some("other"));
    }

    /// Source that replays a fixed batch and records lifecycle calls
    struct Scripted {
        batch: Vec<IntersectionEntry>,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl IntersectionSource for Scripted {
        fn observe(&mut self, anchor_ids: &[String]) {
            self.log
                .borrow_mut()
                .push(format!("observe {}", anchor_ids.join(",")));
        }

        fn take_entries(&mut self) -> Vec<IntersectionEntry> {
            mem::take(&mut self.batch)
        }

        fn disconnect(&mut self) {
            self.log.borrow_mut().push("disconnect".to_string());
        }
    }

    #[test]
    fn test_session_ignores_foreign_anchors() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let source = Scripted {
            batch: vec![
                IntersectionEntry::entering("intro"),
                IntersectionEntry::entering("from-old-page"),
            ],
            log: Rc::clone(&log),
        };

        let mut session = NavigatorSession::new(source, &extract_outline("## Intro"));
        assert_eq!(session.pump(), Some("intro"));
    }

    #[test]
    fn test_drop_disconnects() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let source = Scripted {
            batch: Vec::new(),
            log: Rc::clone(&log),
        };

        let outline = extract_outline("## Notes\n## Notes\n## End");
        let session = NavigatorSession::new(source, &outline);
        assert_eq!(session.anchors(), ["notes", "end"]);
        drop(session);

        assert_eq!(*log.borrow(), ["observe notes,end", "disconnect"]);
    }
}
