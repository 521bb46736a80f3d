//! Numbering pass over the main document part.
//!
//! `word/document.xml` is parsed into an owned tree, optionally cleaned of
//! revision numbering, and every `w:p` is then visited once in document
//! order (nested paragraphs in tables and text boxes included). Each visit
//! asks the [`ParagraphResolver`] for the paragraph's prefix, writes it into
//! the text and drops the paragraph's numbering properties.
use super::numbering::ParagraphResolver;
use super::paragraph::{
    is_word_element, numbering_reference, prepend_prefix, remove_numbering_properties,
};
use super::revision::remove_revision_numbering;
use crate::common::xml::XmlDocument;
use crate::common::{Error, Result};
use crate::config::ProcessOptions;

/// Counters collected while rewriting one document part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Paragraphs visited
    pub paragraphs: usize,
    /// Paragraphs that received a prefix
    pub numbered: usize,
    /// `w:numPr` blocks removed from revisions before numbering
    pub revision_numbering_removed: usize,
    /// `w:numPr` blocks removed from paragraphs after numbering
    pub numbering_properties_removed: usize,
}

/// Rewrite a main document part, returning the new bytes and statistics.
///
/// `resolver` must be fresh for this document; paragraphs are fed to it in
/// document order exactly once.
///
/// # Examples
///
/// ```rust
/// use listnum::ProcessOptions;
/// use listnum::ooxml::docx::document::rewrite_document;
/// use listnum::ooxml::docx::numbering::ParagraphResolver;
///
/// let numbering = br#"<w:numbering xmlns:w="urn:w">
///   <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:lvlText w:val="%1)"/></w:lvl></w:abstractNum>
///   <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
/// </w:numbering>"#;
/// let document = br#"<w:document xmlns:w="urn:w"><w:body><w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Tea</w:t></w:r></w:p></w:body></w:document>"#;
///
/// let mut resolver = ParagraphResolver::from_numbering_xml(numbering)?;
/// let (xml, stats) = rewrite_document(document, &mut resolver, &ProcessOptions::default())?;
/// let xml = String::from_utf8(xml).unwrap();
/// assert!(xml.contains(r#"<w:t xml:space="preserve">1) Tea</w:t>"#));
/// assert_eq!(stats.numbered, 1);
/// # Ok::<(), listnum::Error>(())
/// ```
pub fn rewrite_document(
    xml_bytes: &[u8],
    resolver: &mut ParagraphResolver,
    options: &ProcessOptions,
) -> Result<(Vec<u8>, DocumentStats)> {
    let mut document = XmlDocument::parse(xml_bytes)?;
    let root = document
        .root_mut()
        .ok_or_else(|| Error::InvalidFormat("document part has no root element".to_string()))?;

    let mut stats = DocumentStats::default();
    if options.clean_revisions {
        stats.revision_numbering_removed = remove_revision_numbering(root);
    }

    root.walk_mut(&mut |element| {
        if !is_word_element(element, "p") {
            return;
        }
        stats.paragraphs += 1;

        let reference = numbering_reference(element);
        let prefix = resolver.resolve(reference.as_ref());
        if !prefix.is_empty() {
            prepend_prefix(element, &prefix, &options.separator);
            stats.numbered += 1;
        }
        stats.numbering_properties_removed += remove_numbering_properties(element);
    });

    log::debug!(
        "document: {} paragraphs, {} numbered, {} revision numbering blocks removed",
        stats.paragraphs,
        stats.numbered,
        stats.revision_numbering_removed
    );

    Ok((document.to_bytes(), stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERING: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

    fn para(level: u8, num_id: u32, text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            level, num_id, text
        )
    }

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn rewrite(body: &str, options: &ProcessOptions) -> (String, DocumentStats) {
        let mut resolver = ParagraphResolver::from_numbering_xml(NUMBERING).unwrap();
        let (bytes, stats) =
            rewrite_document(document(body).as_bytes(), &mut resolver, options).unwrap();
        (String::from_utf8(bytes).unwrap(), stats)
    }

    fn numbered(text: &str) -> String {
        format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text)
    }

    #[test]
    fn test_list_is_materialised() {
        let body = [para(0, 1, "One"), para(1, 1, "Sub"), para(1, 1, "Sub"), para(0, 1, "Two")]
            .concat();
        let (xml, stats) = rewrite(&body, &ProcessOptions::default());

        let expected_body = [
            format!("<w:p><w:pPr></w:pPr>{}</w:p>", numbered("1. One")),
            format!("<w:p><w:pPr></w:pPr>{}</w:p>", numbered("a) Sub")),
            format!("<w:p><w:pPr></w:pPr>{}</w:p>", numbered("b) Sub")),
            format!("<w:p><w:pPr></w:pPr>{}</w:p>", numbered("2. Two")),
        ]
        .concat();
        assert_eq!(xml, document(&expected_body));
        assert_eq!(
            stats,
            DocumentStats {
                paragraphs: 4,
                numbered: 4,
                revision_numbering_removed: 0,
                numbering_properties_removed: 4,
            }
        );
    }

    #[test]
    fn test_unnumbered_paragraphs_are_untouched() {
        let body = r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Title</w:t></w:r></w:p><w:p/>"#;
        let (xml, stats) = rewrite(body, &ProcessOptions::default());
        assert_eq!(xml, document(body));
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.numbered, 0);
    }

    #[test]
    fn test_invalid_reference_loses_numbering_properties() {
        let body = para(4, 1, "Deep");
        let (xml, stats) = rewrite(&body, &ProcessOptions::default());
        assert_eq!(
            xml,
            document(r#"<w:p><w:pPr></w:pPr><w:r><w:t>Deep</w:t></w:r></w:p>"#)
        );
        assert_eq!(stats.numbered, 0);
        assert_eq!(stats.numbering_properties_removed, 1);
    }

    #[test]
    fn test_nested_paragraphs_in_document_order() {
        let body = format!(
            "<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para(0, 1, "Cell"),
            para(0, 1, "After")
        );
        let (xml, stats) = rewrite(&body, &ProcessOptions::default());
        assert!(xml.contains(&numbered("1. Cell")));
        assert!(xml.contains(&numbered("2. After")));
        assert_eq!(stats.paragraphs, 2);
    }

    #[test]
    fn test_custom_separator() {
        let options = ProcessOptions::new().with_separator("\t");
        let (xml, _) = rewrite(&para(0, 1, "Tab"), &options);
        assert!(xml.contains(&numbered("1.\tTab")));
    }

    #[test]
    fn test_revision_cleanup_toggle() {
        let body = r#"<w:p w:rsidDel="00C0FFEE"><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Gone</w:t></w:r></w:p>"#;

        let (xml, stats) = rewrite(body, &ProcessOptions::default());
        assert_eq!(stats.revision_numbering_removed, 1);
        assert_eq!(stats.numbered, 0);
        assert!(xml.contains("<w:t>Gone</w:t>"));

        let (xml, stats) = rewrite(body, &ProcessOptions::new().with_clean_revisions(false));
        assert_eq!(stats.revision_numbering_removed, 0);
        assert!(xml.contains(&numbered("1. Gone")));
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let mut resolver = ParagraphResolver::default();
        let result = rewrite_document(b"<w:document><w:body>", &mut resolver, &ProcessOptions::default());
        assert!(result.is_err());
    }
}
