use std::error::Error;
use std::fmt;
use std::io;

use crate::dom::NodeId;

/// Result type for table of contents operations
pub type Result<T> = std::result::Result<T, TocError>;

/// Error types for table of contents operations
#[derive(Debug)]
pub enum TocError {
    /// A node that must be an element is something else (text, comment, document)
    NotAnElement(NodeId),
    /// An option value has the wrong shape
    InvalidOption(String),
    /// The output list tree does not have the structure the builder left behind
    ListStructure(String),
    /// A tree operation would break the hierarchy (cycles, foreign nodes)
    Hierarchy(String),
    /// The scroll tracker could not be wired
    Tracker(String),
    /// Options file could not be read or parsed
    Config(String),
    /// IO error wrapper
    Io(io::Error),
}

impl fmt::Display for TocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocError::NotAnElement(node) => write!(f, "node {} is not an element", node),
            TocError::InvalidOption(msg) => write!(f, "Invalid option: {}", msg),
            TocError::ListStructure(msg) => write!(f, "List structure error: {}", msg),
            TocError::Hierarchy(msg) => write!(f, "Hierarchy error: {}", msg),
            TocError::Tracker(msg) => write!(f, "Tracker error: {}", msg),
            TocError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TocError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl Error for TocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TocError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TocError {
    fn from(err: io::Error) -> Self {
        TocError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(TocError::NotAnElement(3).to_string(), "node 3 is not an element");
        assert_eq!(
            TocError::InvalidOption("max_depth".to_string()).to_string(),
            "Invalid option: max_depth"
        );
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let err: TocError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, TocError::Io(_)));
        assert!(err.source().is_some());
    }
}
