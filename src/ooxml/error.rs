/// Error types for OOXML operations.
use crate::ooxml::docx::numbering::NumberingError;
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Well-formed XML that does not have the expected shape
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A node id that is detached or not of the expected element type
    #[error("Node not found or of the wrong kind")]
    NodeNotFound,

    /// A bookmark with this name already exists
    #[error("Duplicate bookmark name: {0}")]
    DuplicateBookmark(String),

    /// Numbering definitions error
    #[error("Numbering error: {0}")]
    Numbering(#[from] NumberingError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
