//! Listnum - materialise automatic list numbering in Word documents
//!
//! Word stores list numbers as counter state: paragraphs only name a
//! numbering instance and a level, and the visible "1.", "a)" or "IV" is
//! computed at render time. Tools that read the text directly (converters,
//! indexers, diff tools) lose those numbers. This crate computes them the
//! way Word displays them and writes them into the paragraph text.
//!
//! # Features
//!
//! - **Numbering resolution**: abstract definitions, per-instance counters,
//!   start overrides, hierarchical templates such as `%1.%2.`
//! - **Numeral styles**: decimal, upper/lower roman, upper/lower letter
//! - **Revision cleanup**: numbering left in tracked changes is ignored
//! - **Byte-preserving rewrite**: untouched markup is written back as read
//! - **Conversion**: optional hand-off to pandoc
//!
//! # Example - Processing a DOCX file
//!
//! ```no_run
//! use listnum::{NumberingProcessor, ProcessOptions, default_output_path};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = "contract.docx";
//! let processor = NumberingProcessor::new(ProcessOptions::default());
//! let report = processor.process_file(input, default_output_path(input))?;
//! println!("{:?}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Resolving paragraphs directly
//!
//! ```
//! use listnum::ooxml::docx::numbering::{LevelIndex, NumberingReference, ParagraphResolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let numbering = br#"<w:numbering xmlns:w="urn:w">
//!   <w:abstractNum w:abstractNumId="0">
//!     <w:lvl w:ilvl="0"><w:numFmt w:val="upperRoman"/><w:lvlText w:val="%1."/></w:lvl>
//!   </w:abstractNum>
//!   <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
//! </w:numbering>"#;
//!
//! let mut resolver = ParagraphResolver::from_numbering_xml(numbering)?;
//! let item = NumberingReference::new(LevelIndex::new(0).unwrap(), 1);
//! assert_eq!(resolver.resolve(Some(&item)), "I.");
//! assert_eq!(resolver.resolve(Some(&item)), "II.");
//! # Ok(())
//! # }
//! ```

/// Common types shared across the crate: errors and the XML tree
pub mod common;

/// Processing and conversion options
pub mod config;

/// Downstream conversion through pandoc
pub mod convert;

/// OOXML (Office Open XML) support
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::{ConvertOptions, ProcessOptions, TrackChanges};
pub use ooxml::docx::numbering::{LevelIndex, NumberingReference, ParagraphResolver, format_number};
pub use ooxml::docx::{NumberingProcessor, ProcessReport, WdNumberFormat, default_output_path};
