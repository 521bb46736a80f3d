//! Container handling for Word documents.
//!
//! A `.docx` file is a ZIP archive. [`NumberingProcessor`] reads the
//! numbering part, rewrites the main document part and repacks the archive,
//! copying every other entry unchanged and in its original order.
use super::document::{DocumentStats, rewrite_document};
use super::numbering::{NumberingPart, ParagraphResolver};
use crate::common::{Error, Result};
use crate::config::ProcessOptions;
use std::io::{Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Path of the main document part inside the container.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Path of the numbering part inside the container.
pub const NUMBERING_PART: &str = "word/numbering.xml";

/// Suffix appended to the file stem by [`default_output_path`].
pub const OUTPUT_SUFFIX: &str = "_numbered";

/// Upper bound on the buffer reserved from a part's declared size.
const MAX_PREALLOCATION: usize = 16 << 20;

/// Summary of one processed container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// Whether the container had a numbering part
    pub numbering_part_found: bool,
    /// Abstract definitions read from the numbering part
    pub abstract_definitions: usize,
    /// Numbering instances that resolve to an abstract definition
    pub instances: usize,
    /// Rewrite statistics, `None` when there was no main document part
    pub document: Option<DocumentStats>,
    /// Entries written to the output container
    pub entries: usize,
}

/// Materialises automatic list numbering in Word containers.
///
/// # Examples
///
/// ```rust,no_run
/// use listnum::{NumberingProcessor, ProcessOptions};
///
/// let processor = NumberingProcessor::new(ProcessOptions::default());
/// let report = processor.process_file("report.docx", "report_numbered.docx")?;
/// if let Some(stats) = report.document {
///     println!("{} of {} paragraphs numbered", stats.numbered, stats.paragraphs);
/// }
/// # Ok::<(), listnum::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberingProcessor {
    options: ProcessOptions,
}

impl NumberingProcessor {
    /// Create a processor with the given options.
    #[inline]
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// The options this processor runs with.
    #[inline]
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process an in-memory container, returning the new container bytes.
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<(Vec<u8>, ProcessReport)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut report = ProcessReport::default();

        let mut resolver = match read_part(&mut archive, NUMBERING_PART)? {
            Some(xml) => {
                let part = NumberingPart::parse(&xml)?;
                report.numbering_part_found = true;
                report.abstract_definitions = part.abstract_nums.len();
                let resolver = ParagraphResolver::from_numbering_part(&part);
                report.instances = resolver.registry().len();
                log::debug!(
                    "numbering part: {} abstract definitions, {} instances",
                    report.abstract_definitions,
                    report.instances
                );
                resolver
            },
            None => {
                log::debug!("no {} in container, nothing is numbered", NUMBERING_PART);
                ParagraphResolver::default()
            },
        };

        let rewritten = match read_part(&mut archive, DOCUMENT_PART)? {
            Some(xml) => {
                let (bytes, stats) = rewrite_document(&xml, &mut resolver, &self.options)?;
                report.document = Some(stats);
                Some(bytes)
            },
            None => {
                log::warn!("no {} in container, copying it unchanged", DOCUMENT_PART);
                None
            },
        };

        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(bytes.len())));
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            match &rewritten {
                Some(xml) if entry.name() == DOCUMENT_PART => {
                    let options = SimpleFileOptions::default()
                        .compression_method(zip::CompressionMethod::Deflated);
                    writer.start_file(DOCUMENT_PART, options)?;
                    writer.write_all(xml)?;
                },
                _ => writer.raw_copy_file(entry)?,
            }
            report.entries += 1;
        }

        let output = writer.finish()?.into_inner();
        Ok((output, report))
    }

    /// Process `input` and write the result to `output`.
    ///
    /// The output is only written once processing has succeeded.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ProcessReport> {
        let input = input.as_ref();
        let output = output.as_ref();

        let bytes = std::fs::read(input)?;
        let (processed, report) = self.process_bytes(&bytes)?;
        std::fs::write(output, processed)?;

        log::debug!("wrote {} ({} entries)", output.display(), report.entries);
        Ok(report)
    }
}

/// Output path used when none is given: `name.docx` becomes
/// `name_numbered.docx` next to the input.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let mut file_name = input.file_stem().unwrap_or_default().to_os_string();
    file_name.push(OUTPUT_SUFFIX);
    if let Some(extension) = input.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    input.with_file_name(file_name)
}

/// Read a whole entry, `None` when the container has no such entry.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(Error::from(e)),
    };

    let mut content = Vec::with_capacity(initial_capacity(file.size()));
    file.read_to_end(&mut content)?;
    Ok(Some(content))
}

/// The declared size comes from the archive header and is not trusted.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATION)
}
