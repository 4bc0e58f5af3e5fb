use crate::config::TocOptions;
use crate::dom::Document;
use crate::utils::error::{Result, TocError};

const DATA_ATTRIBUTE_PREFIX: &str = "data-";

/// Validate the options against the document they will be applied to
pub fn validate_options(doc: &Document, options: &TocOptions) -> Result<()> {
    validate_exclude_elements(doc, options)?;
    validate_max_depth(options)?;
    validate_depth_data_attribute(options)?;
    validate_class_names(options)?;
    validate_current_item_label(doc, options)?;

    Ok(())
}

fn validate_exclude_elements(doc: &Document, options: &TocOptions) -> Result<()> {
    for (index, &node) in options.exclude_elements.iter().enumerate() {
        if !doc.is_element(node) {
            return Err(TocError::InvalidOption(format!(
                "exclude_elements[{}] is not an element, got node {}",
                index, node
            )));
        }
    }
    Ok(())
}

fn validate_max_depth(options: &TocOptions) -> Result<()> {
    match options.max_depth {
        Some(depth) if depth < 0 => Err(TocError::InvalidOption(format!(
            "max_depth must be a non-negative integer or null, got {}",
            depth
        ))),
        _ => Ok(()),
    }
}

fn validate_depth_data_attribute(options: &TocOptions) -> Result<()> {
    let Some(attribute) = &options.depth_data_attribute else {
        return Ok(());
    };

    if !attribute.starts_with(DATA_ATTRIBUTE_PREFIX) || attribute.len() == DATA_ATTRIBUTE_PREFIX.len() {
        return Err(TocError::InvalidOption(format!(
            "depth_data_attribute must start with '{}' and name something, got '{}'",
            DATA_ATTRIBUTE_PREFIX, attribute
        )));
    }
    if attribute.chars().any(|c| c.is_whitespace() || c.is_ascii_uppercase() || c == '=') {
        return Err(TocError::InvalidOption(format!(
            "depth_data_attribute is not a valid attribute name: '{}'",
            attribute
        )));
    }
    Ok(())
}

fn validate_class_names(options: &TocOptions) -> Result<()> {
    let named = [
        ("item_class_name", &options.item_class_name),
        ("current_item_class_name", &options.current_item_class_name),
    ];

    for (field, value) in named {
        if let Some(class) = value {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(TocError::InvalidOption(format!(
                    "{} must be a single non-empty class name, got '{}'",
                    field, class
                )));
            }
        }
    }
    Ok(())
}

fn validate_current_item_label(doc: &Document, options: &TocOptions) -> Result<()> {
    match options.current_item_label {
        Some(label) if !doc.is_element(label) => Err(TocError::InvalidOption(format!(
            "current_item_label is not an element, got node {}",
            label
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let doc = Document::new();
        assert!(validate_options(&doc, &TocOptions::default()).is_ok());
    }

    #[test]
    fn test_rejects_text_in_exclude_elements() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let text = doc.create_text("not an element");
        let options = TocOptions::default().with_exclude_elements(vec![div, text]);

        let err = validate_options(&doc, &options).unwrap_err();
        assert!(err.to_string().contains("exclude_elements[1]"));
    }

    #[test]
    fn test_max_depth_bounds() {
        let doc = Document::new();
        let negative = TocOptions::default().with_max_depth(Some(-1));
        assert!(matches!(
            validate_options(&doc, &negative),
            Err(TocError::InvalidOption(_))
        ));

        let zero = TocOptions::default().with_max_depth(Some(0));
        assert!(validate_options(&doc, &zero).is_ok());
    }

    #[test]
    fn test_depth_attribute_naming() {
        let doc = Document::new();
        for bad in ["toc-depth", "data-", "data-Depth", "data-a b"] {
            let options = TocOptions {
                depth_data_attribute: Some(bad.to_string()),
                ..TocOptions::default()
            };
            assert!(validate_options(&doc, &options).is_err(), "{} accepted", bad);
        }

        let none = TocOptions {
            depth_data_attribute: None,
            ..TocOptions::default()
        };
        assert!(validate_options(&doc, &none).is_ok());
    }

    #[test]
    fn test_class_names() {
        let doc = Document::new();
        let options = TocOptions {
            item_class_name: Some("two classes".to_string()),
            ..TocOptions::default()
        };
        assert!(validate_options(&doc, &options).is_err());
    }

    #[test]
    fn test_label_must_be_element() {
        let mut doc = Document::new();
        let text = doc.create_text("label");
        let options = TocOptions::default().with_current_item_label(Some(text));
        assert!(validate_options(&doc, &options).is_err());
    }
}
