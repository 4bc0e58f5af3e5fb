use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::tracker::margin::{parse_length, LengthContext};

/// Vertical extent of an element relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

/// Layout measurements the tracker reads from its host
pub trait Layout {
    /// Box of `node` relative to the top of the viewport
    fn bounding_rect(&self, doc: &Document, node: NodeId) -> Rect;

    /// How far the viewport is scrolled down
    fn scroll_y(&self) -> f64;
}

/// Headless layout backed by a table of precomputed positions.
///
/// Positions are document-relative; `bounding_rect` subtracts the scroll
/// offset the way a live viewport would. Elements without an entry fall back
/// to the `height` declared in their `style` attribute, which is how margin
/// probes get measured.
#[derive(Debug, Clone)]
pub struct StaticLayout {
    tops: HashMap<NodeId, f64>,
    heights: HashMap<NodeId, f64>,
    scroll_y: f64,
    pub context: LengthContext,
}

impl Default for StaticLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticLayout {
    pub fn new() -> Self {
        Self {
            tops: HashMap::new(),
            heights: HashMap::new(),
            scroll_y: 0.0,
            context: LengthContext::default(),
        }
    }

    /// Place `node` at `top` pixels from the start of the document
    pub fn set_top(&mut self, node: NodeId, top: f64) {
        self.tops.insert(node, top);
    }

    pub fn set_height(&mut self, node: NodeId, height: f64) {
        self.heights.insert(node, height);
    }

    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    fn style_height(doc: &Document, node: NodeId, context: &LengthContext) -> Option<f64> {
        let style = doc.get_attribute(node, "style")?;
        style
            .split(';')
            .filter_map(|declaration| declaration.split_once(':'))
            .find(|(property, _)| property.trim().eq_ignore_ascii_case("height"))
            .and_then(|(_, value)| parse_length(value, context))
    }
}

impl Layout for StaticLayout {
    fn bounding_rect(&self, doc: &Document, node: NodeId) -> Rect {
        let top = self.tops.get(&node).copied().unwrap_or(0.0) - self.scroll_y;
        let height = self
            .heights
            .get(&node)
            .copied()
            .or_else(|| Self::style_height(doc, node, &self.context))
            .unwrap_or(0.0);
        Rect { top, height }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_is_viewport_relative() {
        let mut doc = Document::new();
        let h = doc.create_element("h1");
        let mut layout = StaticLayout::new();
        layout.set_top(h, 700.0);
        layout.scroll_to(200.0);

        assert_eq!(layout.bounding_rect(&doc, h).top, 500.0);
        assert_eq!(layout.scroll_y(), 200.0);
    }

    #[test]
    fn test_style_height_fallback() {
        let mut doc = Document::new();
        let probe = doc.create_element("div");
        doc.set_attribute(probe, "style", "position:absolute; HEIGHT: 2rem");
        let layout = StaticLayout::new();
        assert_eq!(layout.bounding_rect(&doc, probe).height, 32.0);
    }
}
