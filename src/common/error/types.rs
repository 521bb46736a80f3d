//! Unified error types for listnum.
//!
//! This module provides the error type returned by the public API. Markup
//! level failures surface as [`crate::ooxml::OoxmlError`] inside the OOXML
//! layer and are converted here.
use thiserror::Error;

/// Main error type for listnum operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// External tool missing from PATH
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// External conversion exited unsuccessfully
    #[error("Conversion to '{format}' failed: {output}")]
    ConversionFailed { format: String, output: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for listnum operations.
pub type Result<T> = std::result::Result<T, Error>;
