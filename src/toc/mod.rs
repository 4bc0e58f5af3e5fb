//! Table of contents construction from heading structure.

mod builder;
pub(crate) mod items;
mod slugify;

pub use builder::{build_list, BuiltList};
pub use slugify::{DefaultSlugifier, SlugOptions, Slugifier};

use log::debug;

use crate::config::{validate_options, TocOptions};
use crate::dom::{Document, NodeId};
use crate::tracker::{Layout, ScrollTracker};
use crate::utils::error::{Result, TocError};

/// A built table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    /// Root list holding the items
    pub list: NodeId,
    /// Headings that received an item, in document order
    pub headings: Vec<NodeId>,
    /// The item created for each heading, index-aligned with `headings`
    pub items: Vec<NodeId>,
    /// Region the headings were collected from
    pub content_root: NodeId,
}

/// Build a table of contents for `content_root` (the body when `None`) into `toc_container`.
///
/// A list container (`ol`, `ul`, `menu`) receives the items directly; any
/// other element gets a new list appended as its last child.
pub fn build_toc(
    doc: &mut Document,
    toc_container: NodeId,
    content_root: Option<NodeId>,
    options: &TocOptions,
) -> Result<Toc> {
    build_toc_with_slugifier(doc, toc_container, content_root, options, &DefaultSlugifier)
}

/// [`build_toc`] with a caller-supplied slugifier for minted ids
pub fn build_toc_with_slugifier(
    doc: &mut Document,
    toc_container: NodeId,
    content_root: Option<NodeId>,
    options: &TocOptions,
    slugifier: &dyn Slugifier,
) -> Result<Toc> {
    validate_options(doc, options)?;

    let content_root = content_root.unwrap_or_else(|| doc.body());
    let container_class = doc
        .classify(toc_container)
        .ok_or(TocError::NotAnElement(toc_container))?;

    let built = if container_class.is_list() {
        build_list(doc, content_root, Some(toc_container), options, 1, slugifier)?
    } else {
        let built = build_list(doc, content_root, None, options, 1, slugifier)?;
        doc.append_child(toc_container, built.list)?;
        built
    };

    debug!(
        "Built table of contents with {} items from node {}",
        built.headings.len(),
        content_root
    );

    Ok(Toc {
        list: built.list,
        headings: built.headings,
        items: built.items,
        content_root,
    })
}

/// Build a table of contents and, when a current-item indicator is configured,
/// a tracker that keeps it in sync with the scroll position.
pub fn make_toc(
    doc: &mut Document,
    toc_container: NodeId,
    content_root: Option<NodeId>,
    options: &TocOptions,
    layout: &dyn Layout,
) -> Result<(Toc, Option<ScrollTracker>)> {
    let toc = build_toc(doc, toc_container, content_root, options)?;
    let tracker = ScrollTracker::attach(doc, &toc, options, layout)?;
    Ok((toc, tracker))
}
