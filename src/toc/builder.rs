use log::{debug, warn};

use crate::config::{TocOptions, DEFAULT_LIST_TAG_NAME};
use crate::dom::{Document, HeadingLevel, NodeId, TagClass};
use crate::toc::items::{add_list_item, add_sublist, is_listable, parent_list};
use crate::toc::slugify::Slugifier;
use crate::utils::error::{Result, TocError};

/// Output of one walk over a content region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltList {
    /// The list items were added to (the one passed in, or a new one)
    pub list: NodeId,
    /// Headings that received an item, in document order
    pub headings: Vec<NodeId>,
    /// The item created for each entry of `headings`
    pub items: Vec<NodeId>,
}

/// Build a nested list from the headings among `content`'s direct children.
///
/// Sectioning children are walked recursively with `base_depth` advanced by
/// the current nesting, so their headings continue the surrounding outline.
/// Any other element is ignored.
pub fn build_list(
    doc: &mut Document,
    content: NodeId,
    list: Option<NodeId>,
    options: &TocOptions,
    base_depth: usize,
    slugifier: &dyn Slugifier,
) -> Result<BuiltList> {
    if !doc.is_element(content) {
        return Err(TocError::NotAnElement(content));
    }

    let list = match list {
        Some(list) => list,
        None => doc.create_element(if options.ordered { "ol" } else { DEFAULT_LIST_TAG_NAME }),
    };

    if options.max_depth.is_some_and(|max| max <= 0) {
        warn!("build_list: max_depth is less than or equal to 0, returning empty list");
        return Ok(BuiltList {
            list,
            headings: Vec::new(),
            items: Vec::new(),
        });
    }
    if base_depth == 0 {
        return Err(TocError::InvalidOption(
            "base depth must be a positive integer".to_string(),
        ));
    }

    let max_depth = options.max_depth.map(|max| max as usize);
    let exceeds = |depth: usize| max_depth.is_some_and(|max| depth > max);

    let mut current_list = list;
    let mut level_stack: Vec<HeadingLevel> = Vec::new();
    let mut headings = Vec::new();
    let mut items = Vec::new();

    // Snapshot, since items may be written into the region being walked
    for child in doc.element_children(content) {
        if options.is_excluded(child) {
            debug!("Skipping excluded element {}", child);
            continue;
        }

        match doc.classify(child) {
            Some(TagClass::Heading(level)) => {
                if !is_listable(doc, child, options) {
                    debug!("Skipping unlinkable heading {}", child);
                    continue;
                }

                match level_stack.last().copied() {
                    None => {
                        if exceeds(base_depth) {
                            continue;
                        }
                        if base_depth > 1 {
                            current_list = add_sublist(doc, current_list)?;
                        }
                        level_stack.push(level);
                    }
                    Some(top) if level > top => {
                        if exceeds(base_depth + level_stack.len()) {
                            continue;
                        }
                        current_list = add_sublist(doc, current_list)?;
                        level_stack.push(level);
                    }
                    Some(top) if level < top => {
                        current_list = unwind(doc, current_list, &mut level_stack, level)?;
                    }
                    Some(_) => {}
                }

                let depth = base_depth + level_stack.len() - 1;
                if let Some(item) = add_list_item(doc, current_list, child, depth, options, slugifier)? {
                    headings.push(child);
                    items.push(item);
                }
            }
            Some(TagClass::Sectioning) => {
                let inner = build_list(
                    doc,
                    child,
                    Some(current_list),
                    options,
                    base_depth + level_stack.len(),
                    slugifier,
                )?;
                current_list = inner.list;
                headings.extend(inner.headings);
                items.extend(inner.items);
            }
            _ => {}
        }
    }

    Ok(BuiltList {
        list,
        headings,
        items,
    })
}

/// Climb back out of sublists until the innermost level is no deeper than `level`.
///
/// The root frame is never popped; when `level` is shallower than it, the
/// root frame is re-based to `level` instead.
fn unwind(
    doc: &Document,
    mut current_list: NodeId,
    level_stack: &mut Vec<HeadingLevel>,
    level: HeadingLevel,
) -> Result<NodeId> {
    while level_stack.len() > 1 && level_stack.last().is_some_and(|&top| level < top) {
        current_list = parent_list(doc, current_list)?;
        level_stack.pop();
    }

    if level_stack.first().is_some_and(|&root| level < root) {
        if level_stack.len() != 1 {
            return Err(TocError::ListStructure(
                "level stack should only have one element".to_string(),
            ));
        }
        debug!("Re-basing outline root from {} to {}", level_stack[0], level);
        level_stack[0] = level;
    }

    Ok(current_list)
}
