//! Unified error types for listnum.
//!
//! This module provides a unified error type that encompasses markup, archive,
//! configuration and conversion failures, presenting a consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
