use crate::toc::SlugOptions;
use crate::tracker::Margin;

/// Tag used when the builder has to create the root list itself
pub const DEFAULT_LIST_TAG_NAME: &str = "ul";

/// Default href prefix placed before `#fragment`
pub fn default_link_prefix() -> String {
    "".to_string()
}

/// Default class applied to every generated list item
pub fn default_item_class_name() -> Option<String> {
    Some("toc-item".to_string())
}

/// Default class marking the item of the section being read
pub fn default_current_item_class_name() -> Option<String> {
    Some("toc-current".to_string())
}

/// Default attribute recording each item's depth
pub fn default_depth_data_attribute() -> Option<String> {
    Some("data-toc-depth".to_string())
}

/// Default scroll tolerance
pub fn default_margin() -> Margin {
    Margin::Pixels(0.0)
}

/// Default label text shown while no heading is current
pub fn default_current_item_label_preamble() -> String {
    "Contents".to_string()
}

/// Default slug settings for minted ids
pub fn default_slug_options() -> SlugOptions {
    SlugOptions {
        lower: true,
        strict: true,
    }
}
