//! Table of contents generation over a virtual element tree.
//!
//! [`build_toc`] walks a content region, nests its headings into `ol`/`ul`
//! lists and links each item to its heading. [`make_toc`] additionally wires
//! a [`ScrollTracker`] that marks the item for the heading currently being read.

pub mod config;
pub mod dom;
pub mod toc;
pub mod tracker;
pub mod utils;

pub use config::{load_options, validate_options, TocOptions};
pub use dom::{Document, NodeId};
pub use toc::{build_toc, build_toc_with_slugifier, make_toc, Toc};
pub use tracker::{Layout, ScrollTracker, StaticLayout, TrackerEvent};
pub use utils::error::{Result, TocError};
