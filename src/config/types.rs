use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::dom::NodeId;
use crate::toc::SlugOptions;
use crate::tracker::Margin;

/// Table of contents options.
///
/// Every field has a default, so partial option files and struct update
/// syntax both work. Element references cannot come from a file and are
/// skipped by serde; set them with the `with_*` helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocOptions {
    /// Elements whose subtrees are skipped entirely, matched by identity
    #[serde(skip)]
    pub exclude_elements: Vec<NodeId>,

    /// Prefix placed before `#fragment` in generated hrefs
    #[serde(default = "defaults::default_link_prefix")]
    pub link_prefix: String,

    /// Leave out headings that have no id to link to
    #[serde(default)]
    pub linkable_only: bool,

    /// Deepest nesting level to list, counted from the list's own root
    #[serde(default)]
    pub max_depth: Option<i64>,

    /// Class added to every generated item
    #[serde(default = "defaults::default_item_class_name")]
    pub item_class_name: Option<String>,

    /// Class moved onto the item of the current section
    #[serde(default = "defaults::default_current_item_class_name")]
    pub current_item_class_name: Option<String>,

    /// Attribute recording each item's depth; must start with `data-`
    #[serde(default = "defaults::default_depth_data_attribute")]
    pub depth_data_attribute: Option<String>,

    /// Scroll offset tolerance, in pixels or as a CSS length
    #[serde(default = "defaults::default_margin")]
    pub margin: Margin,

    /// External element mirroring the current heading
    #[serde(skip)]
    pub current_item_label: Option<NodeId>,

    /// Label text while no heading is current
    #[serde(default = "defaults::default_current_item_label_preamble")]
    pub current_item_label_preamble: String,

    /// Mint ids for headings that lack one
    #[serde(default)]
    pub generate_ids: bool,

    /// Slug settings used when minting ids
    #[serde(default = "defaults::default_slug_options")]
    pub slug: SlugOptions,

    /// Create an `ol` instead of a `ul` when the container is not a list
    #[serde(default)]
    pub ordered: bool,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            exclude_elements: Vec::new(),
            link_prefix: defaults::default_link_prefix(),
            linkable_only: false,
            max_depth: None,
            item_class_name: defaults::default_item_class_name(),
            current_item_class_name: defaults::default_current_item_class_name(),
            depth_data_attribute: defaults::default_depth_data_attribute(),
            margin: defaults::default_margin(),
            current_item_label: None,
            current_item_label_preamble: defaults::default_current_item_label_preamble(),
            generate_ids: false,
            slug: defaults::default_slug_options(),
            ordered: false,
        }
    }
}

impl TocOptions {
    pub fn with_exclude_elements(mut self, elements: Vec<NodeId>) -> Self {
        self.exclude_elements = elements;
        self
    }

    pub fn with_link_prefix(mut self, prefix: &str) -> Self {
        self.link_prefix = prefix.to_string();
        self
    }

    pub fn with_linkable_only(mut self, linkable_only: bool) -> Self {
        self.linkable_only = linkable_only;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<i64>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_current_item_label(mut self, label: Option<NodeId>) -> Self {
        self.current_item_label = label;
        self
    }

    pub fn with_generate_ids(mut self, generate_ids: bool) -> Self {
        self.generate_ids = generate_ids;
        self
    }

    /// Whether anything would show which section is current
    pub fn tracks_current_item(&self) -> bool {
        self.current_item_class_name.is_some() || self.current_item_label.is_some()
    }

    pub(crate) fn is_excluded(&self, node: NodeId) -> bool {
        self.exclude_elements.contains(&node)
    }
}
