//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::error::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Xml(s) => Error::XmlError(s),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlError(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}
