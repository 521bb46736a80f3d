//! Configuration types for numbering and conversion.
//!
//! Options can be built in code or loaded from a YAML file:
//!
//! ```yaml
//! clean_revisions: true
//! separator: " "
//! convert:
//!   format: gfm
//!   track_changes: accept
//! ```
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Options for rewriting a document.
///
/// # Examples
///
/// ```rust
/// use listnum::{ConvertOptions, ProcessOptions, TrackChanges};
///
/// // Create with defaults
/// let options = ProcessOptions::default();
/// assert!(options.clean_revisions);
///
/// // Or customize
/// let options = ProcessOptions::new()
///     .with_clean_revisions(false)
///     .with_separator("\t")
///     .with_convert(ConvertOptions::new("html").with_track_changes(TrackChanges::Accept));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Whether to strip numbering left behind in tracked revisions
    pub clean_revisions: bool,
    /// Text written between a list prefix and the paragraph text
    pub separator: String,
    /// Optional downstream conversion of the rewritten document
    pub convert: Option<ConvertOptions>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            clean_revisions: true,
            separator: " ".to_string(),
            convert: None,
        }
    }
}

impl ProcessOptions {
    /// Create a new `ProcessOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether revision numbering is removed before numbering.
    #[inline]
    pub fn with_clean_revisions(mut self, clean: bool) -> Self {
        self.clean_revisions = clean;
        self
    }

    /// Set the prefix separator.
    #[inline]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Request a conversion after rewriting.
    #[inline]
    pub fn with_convert(mut self, convert: ConvertOptions) -> Self {
        self.convert = Some(convert);
        self
    }

    /// Load options from YAML text. Missing keys take their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listnum::{ProcessOptions, TrackChanges};
    ///
    /// let options = ProcessOptions::from_yaml_str("convert:\n  format: html\n")?;
    /// let convert = options.convert.unwrap();
    /// assert_eq!(convert.format, "html");
    /// assert_eq!(convert.track_changes, TrackChanges::All);
    /// # Ok::<(), listnum::Error>(())
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }
}

/// Options for converting a rewritten document with pandoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Pandoc output format, also used as the output file extension
    pub format: String,
    /// How tracked changes are rendered
    #[serde(default)]
    pub track_changes: TrackChanges,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
            track_changes: TrackChanges::default(),
        }
    }
}

impl ConvertOptions {
    /// Create options for the given output format.
    #[inline]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            track_changes: TrackChanges::default(),
        }
    }

    /// Set the tracked changes mode.
    #[inline]
    pub fn with_track_changes(mut self, track_changes: TrackChanges) -> Self {
        self.track_changes = track_changes;
        self
    }
}

/// Pandoc `--track-changes` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackChanges {
    /// Keep insertions, deletions and comments
    #[default]
    All,
    /// Accept every change
    Accept,
    /// Reject every change
    Reject,
}

impl TrackChanges {
    /// Parse a mode name, case-insensitively.
    ///
    /// Unknown names fall back to [`TrackChanges::All`] with a warning.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else if value.eq_ignore_ascii_case("accept") {
            Self::Accept
        } else if value.eq_ignore_ascii_case("reject") {
            Self::Reject
        } else {
            log::warn!("unknown track changes mode '{}', using 'all'", value);
            Self::All
        }
    }

    /// The value passed to pandoc.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

impl From<String> for TrackChanges {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TrackChanges> for String {
    fn from(value: TrackChanges) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TrackChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ProcessOptions::default();
        assert!(options.clean_revisions);
        assert_eq!(options.separator, " ");
        assert!(options.convert.is_none());
        assert_eq!(ConvertOptions::default().format, "markdown");
    }

    #[test]
    fn test_track_changes_parse() {
        assert_eq!(TrackChanges::parse("accept"), TrackChanges::Accept);
        assert_eq!(TrackChanges::parse("REJECT"), TrackChanges::Reject);
        assert_eq!(TrackChanges::parse(" all "), TrackChanges::All);
        assert_eq!(TrackChanges::parse("sometimes"), TrackChanges::All);
        assert_eq!(TrackChanges::Reject.to_string(), "reject");
    }

    #[test]
    fn test_yaml_loading() {
        let yaml = "clean_revisions: false\nseparator: \"\\t\"\nconvert:\n  format: gfm\n  track_changes: Reject\n";
        let options = ProcessOptions::from_yaml_str(yaml).unwrap();
        assert!(!options.clean_revisions);
        assert_eq!(options.separator, "\t");
        assert_eq!(
            options.convert,
            Some(ConvertOptions::new("gfm").with_track_changes(TrackChanges::Reject))
        );
    }

    #[test]
    fn test_yaml_unknown_mode_falls_back() {
        let options =
            ProcessOptions::from_yaml_str("convert:\n  format: html\n  track_changes: maybe\n")
                .unwrap();
        assert_eq!(options.convert.unwrap().track_changes, TrackChanges::All);
    }

    #[test]
    fn test_yaml_partial_and_empty() {
        let options = ProcessOptions::from_yaml_str("separator: \". \"\n").unwrap();
        assert!(options.clean_revisions);
        assert_eq!(options.separator, ". ");
        assert_eq!(ProcessOptions::from_yaml_str("").unwrap(), ProcessOptions::default());
    }

    #[test]
    fn test_yaml_errors() {
        let err = ProcessOptions::from_yaml_str("clean_revisions: [1, 2]\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        let err = ProcessOptions::from_yaml_file("/nonexistent/listnum.yaml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "clean_revisions: false").unwrap();
        let options = ProcessOptions::from_yaml_file(file.path()).unwrap();
        assert!(!options.clean_revisions);
    }
}
