/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error, including truncated parts
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
