use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::config::TocOptions;
use crate::dom::{Document, NodeId};
use crate::toc::items::{append_cloned_children, fragment_id};
use crate::toc::Toc;
use crate::tracker::layout::Layout;
use crate::tracker::throttle::Throttle;
use crate::tracker::types::{HeadingLink, TrackerEvent};
use crate::utils::error::{Result, TocError};

/// Delay before the second post-load recompute, for late fonts and images
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Minimum spacing between scroll-driven updates
pub const SCROLL_THROTTLE_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps one table of contents item marked as current while the page scrolls.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    content_root: NodeId,
    list: NodeId,
    links: Vec<HeadingLink>,
    current: Option<usize>,
    margin: f64,
    current_class: Option<String>,
    label: Option<NodeId>,
    preamble: String,
    link_prefix: String,
    throttle: Throttle,
    settle_at: Option<Instant>,
}

impl ScrollTracker {
    /// Wire a tracker to a built table of contents.
    ///
    /// Returns `None` when the options configure neither a current-item
    /// class nor a label, since there would be nothing to keep in sync.
    ///
    /// Attaching turns on mutation recording for `doc`. The tracker's own
    /// marker writes are not recorded, but host edits are, so the host should
    /// call [`observe_mutations`](Self::observe_mutations) after changing the
    /// document to drain them.
    pub fn attach(
        doc: &mut Document,
        toc: &Toc,
        options: &TocOptions,
        layout: &dyn Layout,
    ) -> Result<Option<Self>> {
        if !options.tracks_current_item() {
            debug!("No current item indicator configured, not tracking scroll position");
            return Ok(None);
        }

        if toc.items.len() != toc.headings.len() {
            return Err(TocError::Tracker(format!(
                "{} items recorded for {} listed headings",
                toc.items.len(),
                toc.headings.len()
            )));
        }

        let margin = options.margin.resolve(doc, layout);

        let mut tracker = ScrollTracker {
            content_root: toc.content_root,
            list: toc.list,
            links: toc
                .headings
                .iter()
                .zip(&toc.items)
                .map(|(&heading, &item)| HeadingLink {
                    heading,
                    item,
                    top: 0.0,
                })
                .collect(),
            current: None,
            margin,
            current_class: options.current_item_class_name.clone(),
            label: options.current_item_label,
            preamble: options.current_item_label_preamble.clone(),
            link_prefix: options.link_prefix.clone(),
            throttle: Throttle::new(SCROLL_THROTTLE_INTERVAL),
            settle_at: None,
        };

        tracker.recompute_positions(doc, layout);
        tracker.reset_label(doc);
        doc.set_recording(true);
        debug!("Tracking {} headings, margin {}px", tracker.links.len(), margin);

        Ok(Some(tracker))
    }

    pub fn links(&self) -> &[HeadingLink] {
        &self.links
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Index of the current heading in the listed sequence
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_heading(&self) -> Option<NodeId> {
        self.current.map(|i| self.links[i].heading)
    }

    pub fn current_item(&self) -> Option<NodeId> {
        self.current.map(|i| self.links[i].item)
    }

    /// Rebuild the position index from live layout
    pub fn recompute_positions(&mut self, doc: &Document, layout: &dyn Layout) {
        let scroll_y = layout.scroll_y();
        self.links = self
            .links
            .iter()
            .map(|link| HeadingLink {
                top: layout.bounding_rect(doc, link.heading).top + scroll_y,
                ..*link
            })
            .collect();
        trace!("Recomputed {} heading positions", self.links.len());
    }

    fn live_top(&self, doc: &Document, layout: &dyn Layout, index: usize) -> f64 {
        layout.bounding_rect(doc, self.links[index].heading).top + layout.scroll_y()
    }

    /// Find the last heading at or above the reading line.
    ///
    /// Binary search over the cached tops, then at most one step of
    /// correction against live positions in case the cache is stale.
    pub fn resolve_index(&self, doc: &Document, layout: &dyn Layout) -> Option<usize> {
        if self.links.is_empty() {
            return None;
        }

        let position = layout.scroll_y() + self.margin;
        let above = self.links.partition_point(|link| link.top <= position);

        match above.checked_sub(1) {
            Some(index) => {
                if index + 1 < self.links.len() && self.live_top(doc, layout, index + 1) <= position {
                    Some(index + 1)
                } else if self.live_top(doc, layout, index) > position {
                    index.checked_sub(1)
                } else {
                    Some(index)
                }
            }
            None => (self.live_top(doc, layout, 0) <= position).then_some(0),
        }
    }

    /// Move the current marker to whatever heading is at the reading line
    pub fn update_current(&mut self, doc: &mut Document, layout: &dyn Layout) {
        let index = self.resolve_index(doc, layout);
        if index == self.current {
            return;
        }
        self.set_current(doc, index);
    }

    fn set_current(&mut self, doc: &mut Document, index: Option<usize>) {
        let previous = std::mem::replace(&mut self.current, index);
        debug!("Current heading index is now {:?}", index);

        // Marker writes are ours, not content changes
        doc.untracked(|doc| self.mark_current(doc, previous, index));
    }

    fn mark_current(&self, doc: &mut Document, previous: Option<usize>, index: Option<usize>) {
        if let (Some(class), Some(old)) = (&self.current_class, previous) {
            doc.remove_class(self.links[old].item, class);
        }

        match index {
            Some(i) => {
                if let Some(class) = &self.current_class {
                    doc.add_class(self.links[i].item, class);
                }
                self.rebuild_label(doc, self.links[i].heading);
            }
            None => self.reset_label(doc),
        }
    }

    fn reset_label(&self, doc: &mut Document) {
        if let Some(label) = self.label {
            doc.set_text_content(label, &self.preamble);
        }
    }

    fn rebuild_label(&self, doc: &mut Document, heading: NodeId) {
        let Some(label) = self.label else {
            return;
        };
        doc.clear_children(label);

        let target = match fragment_id(doc, heading).map(str::to_string) {
            Some(id) => {
                let anchor = doc.create_element("a");
                doc.set_attribute(anchor, "href", &format!("{}#{}", self.link_prefix, id));
                if doc.append_child(label, anchor).is_err() {
                    return;
                }
                anchor
            }
            None => label,
        };

        if let Err(e) = append_cloned_children(doc, heading, target) {
            debug!("Could not mirror heading {} into label: {}", heading, e);
        }
    }

    /// Page load: measure now and once more after the settle delay
    pub fn on_load(&mut self, doc: &mut Document, layout: &dyn Layout, now: Instant) {
        self.recompute_positions(doc, layout);
        self.settle_at = Some(now + SETTLE_DELAY);
        self.update_current(doc, layout);
    }

    pub fn on_resize(&mut self, doc: &Document, layout: &dyn Layout) {
        self.recompute_positions(doc, layout);
    }

    pub fn on_mutation(&mut self, doc: &Document, layout: &dyn Layout) {
        self.recompute_positions(doc, layout);
    }

    /// A click inside the table of contents; other targets are ignored
    pub fn on_link_click(&mut self, doc: &Document, layout: &dyn Layout, target: NodeId) {
        if doc.contains(self.list, target) {
            self.recompute_positions(doc, layout);
        }
    }

    /// Rate-limited scroll handler. Returns whether the update ran now.
    pub fn on_scroll(&mut self, doc: &mut Document, layout: &dyn Layout, now: Instant) -> bool {
        if !self.throttle.hit(now) {
            trace!("Scroll update deferred");
            return false;
        }
        self.update_current(doc, layout);
        true
    }

    /// Recompute if any recorded mutation touched the content root's subtree
    pub fn observe_mutations(&mut self, doc: &mut Document, layout: &dyn Layout) -> bool {
        let records = doc.take_mutations();
        let relevant = records
            .iter()
            .any(|record| doc.contains(self.content_root, record.target));
        if relevant {
            self.on_mutation(doc, layout);
        }
        relevant
    }

    /// Run deferred work that is due at `now`
    pub fn poll(&mut self, doc: &mut Document, layout: &dyn Layout, now: Instant) {
        if self.settle_at.is_some_and(|at| now >= at) {
            self.settle_at = None;
            self.recompute_positions(doc, layout);
        }
        if self.throttle.take_due(now) {
            self.update_current(doc, layout);
        }
    }

    /// Earliest time `poll` has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.settle_at, self.throttle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle(&mut self, event: TrackerEvent, doc: &mut Document, layout: &dyn Layout) {
        match event {
            TrackerEvent::Load(now) => self.on_load(doc, layout, now),
            TrackerEvent::Resize => self.on_resize(doc, layout),
            TrackerEvent::Mutation => self.on_mutation(doc, layout),
            TrackerEvent::LinkClick(target) => self.on_link_click(doc, layout, target),
            TrackerEvent::Scroll(now) => {
                self.on_scroll(doc, layout, now);
            }
            TrackerEvent::Tick(now) => self.poll(doc, layout, now),
        }
    }
}
