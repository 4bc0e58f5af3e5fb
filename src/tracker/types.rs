use std::time::Instant;

use crate::dom::NodeId;

/// A listed heading tied to its item, with a cached document-relative top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingLink {
    pub heading: NodeId,
    pub item: NodeId,
    pub top: f64,
}

/// Host events the tracker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The page finished loading
    Load(Instant),
    /// The viewport changed size
    Resize,
    /// The observed content changed
    Mutation,
    /// An element inside the table of contents was clicked
    LinkClick(NodeId),
    /// The viewport scrolled
    Scroll(Instant),
    /// Time passed; run deferred work that is due
    Tick(Instant),
}
