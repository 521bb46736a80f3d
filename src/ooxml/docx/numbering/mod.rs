//! Automatic list numbering resolution.
//!
//! Word stores list numbers as state, not text: `word/numbering.xml` holds
//! abstract templates (`w:abstractNum`) and the instances that use them
//! (`w:num`), and each paragraph only names an instance and a level. This
//! module turns that state into the literal prefixes Word would display.
//!
//! # Architecture
//!
//! - `parser`: streaming reader for the numbering part
//! - `NumberingCatalog`: immutable abstract level styles
//! - `NumberingRegistry`: per-instance level counters copied from the catalog
//! - `ParagraphResolver`: single forward pass over paragraphs
//! - `format_number`: counter to numeral conversion
pub mod catalog;
pub mod format;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod types;

pub use catalog::{AbstractLevelSpec, NumberingCatalog};
pub use format::format_number;
pub use parser::{AbstractNum, LevelDescriptor, LevelOverride, Num, NumberingPart};
pub use registry::{LevelCounter, NumberingDefinition, NumberingRegistry};
pub use resolver::ParagraphResolver;
pub use types::{LevelIndex, NumberingReference};
