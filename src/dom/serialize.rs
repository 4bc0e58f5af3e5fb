use crate::dom::document::Document;
use crate::dom::types::{NodeData, NodeId};

const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        self.write_node(&mut html, node);
        html
    }

    /// Serialize only the children of `node`
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        for &child in self.children(node) {
            self.write_node(&mut html, child);
        }
        html
    }

    fn write_node(&self, html: &mut String, node: NodeId) {
        match self.data(node) {
            Some(NodeData::Document) => {
                for &child in self.children(node) {
                    self.write_node(html, child);
                }
            }
            Some(NodeData::Text(text)) => html.push_str(&html_escape::encode_text(text)),
            Some(NodeData::Comment(text)) => {
                html.push_str("<!--");
                html.push_str(text);
                html.push_str("-->");
            }
            Some(NodeData::Element(element)) => {
                html.push('<');
                html.push_str(&element.tag);
                for (name, value) in &element.attributes {
                    html.push_str(&format!(
                        " {}=\"{}\"",
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    ));
                }
                html.push('>');

                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }

                for &child in self.children(node) {
                    self.write_node(html, child);
                }
                html.push_str(&format!("</{}>", element.tag));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    #[test]
    fn test_serialize_escapes() {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.set_attribute(a, "href", "#x\"y");
        let text = doc.create_text("Fish & <Chips>");
        doc.append_child(a, text).unwrap();

        assert_eq!(
            doc.to_html(a),
            "<a href=\"#x&quot;y\">Fish &amp; &lt;Chips&gt;</a>"
        );
    }

    #[test]
    fn test_void_and_inner_html() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let br = doc.create_element("br");
        let text = doc.create_text("line");
        doc.append_child(p, text).unwrap();
        doc.append_child(p, br).unwrap();

        assert_eq!(doc.inner_html(p), "line<br>");
        assert_eq!(doc.to_html(doc.body()), "<body></body>");
    }
}
