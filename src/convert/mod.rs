//! Downstream conversion of rewritten documents through pandoc.
//!
//! Pandoc reads list numbers from its own numbering model and drops them for
//! most output formats; running it on a document whose prefixes have been
//! written into the text keeps them.
use crate::common::{Error, Result};
use crate::config::ConvertOptions;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name of the pandoc executable looked up on `PATH`.
pub const PANDOC: &str = "pandoc";

/// Check whether pandoc can be found on `PATH`.
pub fn is_pandoc_available() -> bool {
    which::which(PANDOC).is_ok()
}

/// Path of the converted file: `input` with its extension replaced by the
/// output format name.
pub fn converted_path<P: AsRef<Path>>(input: P, format: &str) -> PathBuf {
    input.as_ref().with_extension(format)
}

/// Convert a `.docx` file with pandoc, returning the path written.
///
/// # Examples
///
/// ```rust,no_run
/// use listnum::ConvertOptions;
/// use listnum::convert::convert_docx;
///
/// let output = convert_docx("report_numbered.docx", &ConvertOptions::new("gfm"))?;
/// assert!(output.ends_with("report_numbered.gfm"));
/// # Ok::<(), listnum::Error>(())
/// ```
pub fn convert_docx<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<PathBuf> {
    run_converter(PANDOC, input.as_ref(), options)
}

fn run_converter(program: &str, input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    let executable = which::which(program).map_err(|e| {
        Error::ToolNotFound(format!(
            "{} ({}); see https://pandoc.org/installing.html",
            program, e
        ))
    })?;

    let output_path = converted_path(input, &options.format);
    let arguments = pandoc_arguments(input, &output_path, options);
    log::debug!(
        "running {} {}",
        executable.display(),
        arguments
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = Command::new(&executable).args(&arguments).output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(Error::ConversionFailed {
            format: options.format.clone(),
            output: format!("{}: {}", output.status, combined.trim()),
        });
    }

    if !combined.trim().is_empty() {
        log::debug!("{} output: {}", program, combined.trim());
    }
    Ok(output_path)
}

fn pandoc_arguments(input: &Path, output: &Path, options: &ConvertOptions) -> Vec<OsString> {
    let mut track_changes = OsString::from("--track-changes=");
    track_changes.push(options.track_changes.as_str());

    vec![
        input.as_os_str().to_owned(),
        "-f".into(),
        "docx".into(),
        "-t".into(),
        options.format.as_str().into(),
        "-o".into(),
        output.as_os_str().to_owned(),
        track_changes,
    ]
}
