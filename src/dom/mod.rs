//! Virtual element tree the table of contents is read from and written into.

mod document;
mod serialize;
mod tag;
mod types;

pub use document::Document;
pub use tag::{HeadingLevel, ListKind, TagClass, SECTIONING_TAGS};
pub use types::{ElementData, MutationKind, MutationRecord, NodeData, NodeId};

impl Document {
    /// Classify an element by its tag. Non-elements are `None`.
    pub fn classify(&self, node: NodeId) -> Option<TagClass> {
        self.tag_name(node).map(TagClass::classify)
    }
}
