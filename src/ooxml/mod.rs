//! Office Open XML (OOXML) support.
//!
//! Only WordprocessingML is handled: see [`docx`]. Markup level failures are
//! reported as [`OoxmlError`] and converted to [`crate::Error`] at the
//! public API.
pub mod docx;
pub mod error;

// Re-export error types
pub use error::{OoxmlError, Result};
