use std::collections::HashSet;

use log::debug;

use crate::config::TocOptions;
use crate::dom::{Document, NodeId};
use crate::toc::slugify::Slugifier;
use crate::utils::error::{Result, TocError};

/// Fallback id stem when a heading's text slugifies to nothing
const EMPTY_SLUG_FALLBACK: &str = "section";

/// Non-empty `id` of a heading
pub fn fragment_id(doc: &Document, heading: NodeId) -> Option<&str> {
    doc.get_attribute(heading, "id").filter(|id| !id.is_empty())
}

/// Whether the heading would end up in the list under the given options
pub fn is_listable(doc: &Document, heading: NodeId, options: &TocOptions) -> bool {
    !options.linkable_only || options.generate_ids || fragment_id(doc, heading).is_some()
}

/// Append an item for `heading` to `list`.
///
/// Returns `None` when the heading has no id and only linkable headings are wanted.
pub fn add_list_item(
    doc: &mut Document,
    list: NodeId,
    heading: NodeId,
    depth: usize,
    options: &TocOptions,
    slugifier: &dyn Slugifier,
) -> Result<Option<NodeId>> {
    let mut id = fragment_id(doc, heading).map(str::to_string);
    if id.is_none() && options.generate_ids {
        let minted = mint_id(doc, heading, options, slugifier);
        debug!("Assigned id '{}' to heading {}", minted, heading);
        doc.set_attribute(heading, "id", &minted);
        id = Some(minted);
    }

    if id.is_none() && options.linkable_only {
        return Ok(None);
    }

    if depth == 0 {
        return Err(TocError::ListStructure(
            "depth must be a positive integer".to_string(),
        ));
    }

    let item = doc.create_element("li");
    if let Some(class) = &options.item_class_name {
        doc.add_class(item, class);
    }
    if let Some(attribute) = &options.depth_data_attribute {
        doc.set_attribute(item, attribute, &depth.to_string());
    }
    doc.append_child(list, item)?;

    let container = match id {
        Some(id) => {
            let anchor = doc.create_element("a");
            doc.set_attribute(anchor, "href", &format!("{}#{}", options.link_prefix, id));
            doc.append_child(item, anchor)?;
            anchor
        }
        None => item,
    };

    append_cloned_children(doc, heading, container)?;
    Ok(Some(item))
}

/// Clone a snapshot of `source`'s children into `target`
pub fn append_cloned_children(doc: &mut Document, source: NodeId, target: NodeId) -> Result<()> {
    let children = doc.children(source).to_vec();
    for child in children {
        let copy = doc.deep_clone(child);
        doc.append_child(target, copy)?;
    }
    Ok(())
}

/// Sublist under the last item of `list`, reusing a trailing one when present
pub fn add_sublist(doc: &mut Document, list: NodeId) -> Result<NodeId> {
    let Some(last_item) = doc.last_child_with_tag(list, "li") else {
        return Err(TocError::ListStructure(
            "cannot add sublist to a list without any list items".to_string(),
        ));
    };

    if let Some(trailing) = doc.last_element_child(last_item) {
        if doc.classify(trailing).is_some_and(|class| class.is_list()) {
            return Ok(trailing);
        }
    }

    let tag = doc
        .tag_name(list)
        .map(str::to_string)
        .ok_or(TocError::NotAnElement(list))?;
    let sublist = doc.create_element(&tag);
    doc.append_child(last_item, sublist)?;
    Ok(sublist)
}

/// The list enclosing `sublist`, via its owning item
pub fn parent_list(doc: &Document, sublist: NodeId) -> Result<NodeId> {
    let item = doc
        .parent_element(sublist)
        .filter(|&item| doc.tag_name(item) == Some("li"))
        .ok_or_else(|| {
            TocError::ListStructure(format!("sublist {} is not inside a list item", sublist))
        })?;

    doc.parent_element(item)
        .filter(|&list| doc.classify(list).is_some_and(|class| class.is_list()))
        .ok_or_else(|| {
            TocError::ListStructure(format!("parent of list item {} is not a valid list element", item))
        })
}

fn mint_id(
    doc: &Document,
    heading: NodeId,
    options: &TocOptions,
    slugifier: &dyn Slugifier,
) -> String {
    let mut base = slugifier.slugify(doc.text_content(heading).trim(), options.slug);
    if base.is_empty() {
        base = EMPTY_SLUG_FALLBACK.to_string();
    }

    let taken: HashSet<&str> = doc
        .descendants(doc.root())
        .into_iter()
        .filter_map(|node| doc.get_attribute(node, "id"))
        .collect();

    if !taken.contains(base.as_str()) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{}-{}", base, suffix);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::slugify::DefaultSlugifier;

    fn heading(doc: &mut Document, tag: &str, id: Option<&str>, text: &str) -> NodeId {
        let h = doc.create_element(tag);
        if let Some(id) = id {
            doc.set_attribute(h, "id", id);
        }
        let t = doc.create_text(text);
        doc.append_child(h, t).unwrap();
        let body = doc.body();
        doc.append_child(body, h).unwrap();
        h
    }

    #[test]
    fn test_linked_item() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let h = heading(&mut doc, "h2", Some("intro"), "Intro");
        let options = TocOptions::default().with_link_prefix("/page");

        let item = add_list_item(&mut doc, list, h, 2, &options, &DefaultSlugifier)
            .unwrap()
            .unwrap();
        assert_eq!(
            doc.to_html(item),
            "<li class=\"toc-item\" data-toc-depth=\"2\"><a href=\"/page#intro\">Intro</a></li>"
        );
    }

    #[test]
    fn test_unlinked_and_filtered() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let h = heading(&mut doc, "h2", None, "Plain");

        let item = add_list_item(&mut doc, list, h, 1, &TocOptions::default(), &DefaultSlugifier)
            .unwrap()
            .unwrap();
        assert_eq!(doc.inner_html(item), "Plain");

        let linkable = TocOptions::default().with_linkable_only(true);
        assert!(add_list_item(&mut doc, list, h, 1, &linkable, &DefaultSlugifier)
            .unwrap()
            .is_none());
        assert_eq!(doc.element_children(list).len(), 1);
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let _existing = heading(&mut doc, "h1", Some("setup"), "Other");
        let h = heading(&mut doc, "h2", None, "Setup");
        let options = TocOptions::default()
            .with_generate_ids(true)
            .with_linkable_only(true);

        add_list_item(&mut doc, list, h, 1, &options, &DefaultSlugifier)
            .unwrap()
            .unwrap();
        assert_eq!(doc.get_attribute(h, "id"), Some("setup-1"));
    }

    #[test]
    fn test_sublist_reuse() {
        let mut doc = Document::new();
        let list = doc.create_element("ol");
        assert!(add_sublist(&mut doc, list).is_err());

        let h = heading(&mut doc, "h1", Some("a"), "A");
        add_list_item(&mut doc, list, h, 1, &TocOptions::default(), &DefaultSlugifier).unwrap();
        let first = add_sublist(&mut doc, list).unwrap();
        let second = add_sublist(&mut doc, list).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.tag_name(first), Some("ol"));
        assert_eq!(parent_list(&doc, first).unwrap(), list);
        assert!(parent_list(&doc, list).is_err());
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let mut doc = Document::new();
        let list = doc.create_element("ul");
        let h = heading(&mut doc, "h1", Some("a"), "A");
        let result = add_list_item(&mut doc, list, h, 0, &TocOptions::default(), &DefaultSlugifier);
        assert!(matches!(result, Err(TocError::ListStructure(_))));
    }
}
