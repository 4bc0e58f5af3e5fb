use log::trace;

use crate::dom::types::{ElementData, MutationKind, MutationRecord, NodeData, NodeId};
use crate::utils::error::{Result, TocError};

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Arena-backed element tree.
///
/// Nodes are never freed; detached subtrees simply stop being reachable from
/// the root. Handles stay valid for the life of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    recording: bool,
    mutations: Vec<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding `<html><body></body></html>`
    pub fn new() -> Self {
        let mut doc = Document {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            root: 0,
            body: 0,
            recording: false,
            mutations: Vec::new(),
        };

        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.link(doc.root, html);
        doc.link(html, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` is a handle issued by this document
    pub fn exists(&self, node: NodeId) -> bool {
        node < self.nodes.len()
    }

    pub fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node).map(|n| &n.data)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        self.nodes.len() - 1
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn record(&mut self, target: NodeId, kind: MutationKind) {
        if self.recording {
            trace!("mutation on node {}: {}", target, kind);
            self.mutations.push(MutationRecord { target, kind });
        }
    }

    /// Start or stop collecting [`MutationRecord`]s
    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
        if !recording {
            self.mutations.clear();
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Run `f` with recording paused. Mutations already collected are kept.
    pub fn untracked<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let recording = std::mem::replace(&mut self.recording, false);
        let result = f(self);
        self.recording = recording;
        result
    }

    /// Drain the mutations recorded so far
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    /// Append `child` as the last child of `parent`, moving it if it already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.exists(parent) || !self.exists(child) {
            return Err(TocError::Hierarchy(format!(
                "unknown node in append ({} -> {})",
                child, parent
            )));
        }
        if matches!(self.nodes[parent].data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(TocError::Hierarchy(format!(
                "node {} cannot have children",
                parent
            )));
        }
        if child == self.root || self.contains(child, parent) {
            return Err(TocError::Hierarchy(format!(
                "node {} is an ancestor of node {}",
                child, parent
            )));
        }

        self.detach(child);
        self.link(parent, child);
        self.record(parent, MutationKind::ChildList);
        Ok(())
    }

    /// Remove `node` from its parent. Detached nodes can be re-inserted later.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return;
        };
        self.nodes[parent].children.retain(|&c| c != node);
        self.nodes[node].parent = None;
        self.record(parent, MutationKind::ChildList);
    }

    /// Remove every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        for child in children {
            self.detach(child);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Parent node, only if it is an element
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&p| self.is_element(p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    pub fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.is_element(c))
    }

    /// Last element child with the given tag, scanning from the end
    pub fn last_child_with_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.tag_name(c).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.data(node), Some(NodeData::Element(_)))
    }

    /// Lower-cased tag name of an element node
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.data(node)
            .and_then(NodeData::as_element)
            .map(|e| e.tag.as_str())
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.data(node)
            .and_then(NodeData::as_element)
            .and_then(|e| e.attribute(name))
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.get_attribute(node, name).is_some()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(Node {
            data: NodeData::Element(element),
            ..
        }) = self.nodes.get_mut(node)
        else {
            return;
        };

        match element.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) if existing == value => return,
            Some((_, existing)) => *existing = value.to_string(),
            None => element
                .attributes
                .push((name.to_string(), value.to_string())),
        }
        self.record(node, MutationKind::Attribute(name.to_string()));
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let Some(Node {
            data: NodeData::Element(element),
            ..
        }) = self.nodes.get_mut(node)
        else {
            return;
        };

        let before = element.attributes.len();
        element.attributes.retain(|(key, _)| key != name);
        if element.attributes.len() != before {
            self.record(node, MutationKind::Attribute(name.to_string()));
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get_attribute(node, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let value = match self.get_attribute(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &value);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            return;
        }
        let value = self
            .get_attribute(node, "class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &value);
    }

    /// Whether `node` is `ancestor` itself or lies somewhere beneath it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// All nodes beneath `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Copy `node` and its whole subtree. The copy is detached.
    pub fn deep_clone(&mut self, node: NodeId) -> NodeId {
        let data = self.nodes[node].data.clone();
        let copy = self.push(data);
        let children = self.children(node).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child);
            self.link(copy, child_copy);
        }
        copy
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(NodeData::Text(text)) = self.data(node) {
            return text.clone();
        }
        self.descendants(node)
            .into_iter()
            .filter_map(|id| match self.data(id) {
                Some(NodeData::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children of `node` with a single text node
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        if let Some(Node {
            data: NodeData::Text(existing),
            ..
        }) = self.nodes.get_mut(node)
        {
            *existing = text.to_string();
            self.record(node, MutationKind::CharacterData);
            return;
        }

        self.clear_children(node);
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.link(node, text_node);
            self.record(node, MutationKind::ChildList);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_body() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.body()), Some("body"));
        let html = doc.parent(doc.body()).unwrap();
        assert_eq!(doc.tag_name(html), Some("html"));
        assert_eq!(doc.parent(html), Some(doc.root()));
        assert!(!doc.is_element(doc.root()));
    }

    #[test]
    fn test_append_moves_node() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let p = doc.create_element("P");
        doc.append_child(doc.body(), a).unwrap();
        doc.append_child(doc.body(), b).unwrap();
        doc.append_child(a, p).unwrap();
        doc.append_child(b, p).unwrap();

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[p]);
        assert_eq!(doc.tag_name(p), Some("p"));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("section");
        let inner = doc.create_element("section");
        doc.append_child(outer, inner).unwrap();
        assert!(matches!(
            doc.append_child(inner, outer),
            Err(TocError::Hierarchy(_))
        ));

        let text = doc.create_text("x");
        assert!(doc.append_child(text, inner).is_err());
    }

    #[test]
    fn test_classes() {
        let mut doc = Document::new();
        let li = doc.create_element("li");
        doc.add_class(li, "toc-item");
        doc.add_class(li, "toc-current");
        doc.add_class(li, "toc-item");
        assert_eq!(doc.get_attribute(li, "class"), Some("toc-item toc-current"));

        doc.remove_class(li, "toc-item");
        assert!(!doc.has_class(li, "toc-item"));
        assert!(doc.has_class(li, "toc-current"));
    }

    #[test]
    fn test_deep_clone_and_text() {
        let mut doc = Document::new();
        let h = doc.create_element("h1");
        let em = doc.create_element("em");
        let t1 = doc.create_text("Hello ");
        let t2 = doc.create_text("world");
        doc.append_child(h, t1).unwrap();
        doc.append_child(h, em).unwrap();
        doc.append_child(em, t2).unwrap();

        let copy = doc.deep_clone(h);
        assert_ne!(copy, h);
        assert_eq!(doc.parent(copy), None);
        assert_eq!(doc.text_content(copy), "Hello world");

        doc.set_text_content(copy, "Replaced");
        assert_eq!(doc.text_content(copy), "Replaced");
        assert_eq!(doc.text_content(h), "Hello world");
    }

    #[test]
    fn test_mutation_recording() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.body(), div).unwrap();
        assert!(doc.take_mutations().is_empty());

        doc.set_recording(true);
        doc.set_attribute(div, "id", "x");
        doc.set_attribute(div, "id", "x");
        doc.detach(div);
        let records = doc.take_mutations();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, MutationKind::Attribute("id".to_string()));
        assert_eq!(records[1].target, doc.body());
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn test_untracked_writes() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_recording(true);
        doc.set_attribute(div, "id", "kept");

        let count = doc.untracked(|doc| {
            doc.add_class(div, "quiet");
            doc.set_text_content(div, "hidden");
            doc.children(div).len()
        });
        assert_eq!(count, 1);
        assert!(doc.is_recording());
        assert_eq!(doc.take_mutations().len(), 1);
    }

    #[test]
    fn test_last_child_with_tag() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        let first = doc.create_element("li");
        let second = doc.create_element("li");
        let text = doc.create_text("trailing");
        doc.append_child(ul, first).unwrap();
        doc.append_child(ul, second).unwrap();
        doc.append_child(ul, text).unwrap();

        assert_eq!(doc.last_child_with_tag(ul, "LI"), Some(second));
        assert_eq!(doc.last_element_child(ul), Some(second));
        assert_eq!(doc.last_child_with_tag(ul, "ol"), None);
    }
}
