//! Word (.docx) document support.
//!
//! This module materialises automatic list numbering in Word documents: the
//! numbering part is resolved into literal prefixes which are written into
//! the paragraphs of the main document part.
//!
//! # Architecture
//!
//! - `numbering`: catalog, instance registry, formatter and resolver
//! - `paragraph`: numbering references and prefix insertion on `w:p`
//! - `revision`: removal of numbering left in tracked changes
//! - `document`: the single pass over `word/document.xml`
//! - `package`: the ZIP container
//!
//! # Example
//!
//! ```rust,no_run
//! use listnum::ooxml::docx::{NumberingProcessor, default_output_path};
//!
//! let input = "contract.docx";
//! let report = NumberingProcessor::default().process_file(input, default_output_path(input))?;
//! println!("{:?}", report.document);
//! # Ok::<(), listnum::Error>(())
//! ```
pub mod document;
pub mod enums;
pub mod numbering;
pub mod package;
pub mod paragraph;
pub mod revision;

pub use document::{DocumentStats, rewrite_document};
pub use enums::WdNumberFormat;
pub use package::{NumberingProcessor, ProcessReport, default_output_path};
