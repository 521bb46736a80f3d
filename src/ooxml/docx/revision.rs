//! Track changes cleanup for numbering.
//!
//! Word keeps the previous paragraph properties of a tracked formatting change
//! inside `w:pPrChange`/`w:rPrChange`, and deleted paragraphs stay in the
//! body marked with `w:rsidDel`. Numbering properties found there describe
//! lists that are no longer displayed, so they are stripped before the
//! document is numbered.
//!
//! # Example
//!
//! ```rust
//! use listnum::common::xml::XmlDocument;
//! use listnum::ooxml::docx::revision::remove_revision_numbering;
//!
//! let xml = br#"<w:p><w:pPr><w:pPrChange w:id="1"><w:pPr><w:numPr/></w:pPr></w:pPrChange></w:pPr></w:p>"#;
//! let mut doc = XmlDocument::parse(xml)?;
//! assert_eq!(remove_revision_numbering(doc.root_mut().unwrap()), 1);
//! # Ok::<(), listnum::Error>(())
//! ```
use super::paragraph::is_word_element;
use crate::common::xml::XmlElement;

/// Remove every `w:numPr` that belongs to a revision.
///
/// Targets are descendants of `w:pPrChange`, of `w:rPrChange` and of any
/// `w:p` carrying a `w:rsidDel` attribute. Returns the number removed.
pub fn remove_revision_numbering(root: &mut XmlElement) -> usize {
    let removed = strip(root, false);
    if removed > 0 {
        log::debug!("removed {} numbering properties from revisions", removed);
    }
    removed
}

fn strip(element: &mut XmlElement, inside_revision: bool) -> usize {
    let inside_revision = inside_revision || is_revision_container(element);

    let mut removed = 0;
    if inside_revision {
        removed += element.remove_children(|e| is_word_element(e, "numPr"));
    }
    for child in element.child_elements_mut() {
        removed += strip(child, inside_revision);
    }
    removed
}

#[inline]
fn is_revision_container(element: &XmlElement) -> bool {
    is_word_element(element, "pPrChange")
        || is_word_element(element, "rPrChange")
        || (is_word_element(element, "p") && element.attribute("rsidDel").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::XmlDocument;

    fn clean(xml: &str) -> (usize, String) {
        let mut doc = XmlDocument::parse(xml.as_bytes()).unwrap();
        let removed = remove_revision_numbering(doc.root_mut().unwrap());
        (removed, doc.to_xml_string())
    }

    #[test]
    fn test_property_change_numbering_removed() {
        let (removed, xml) = clean(
            r#"<w:body><w:p><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:pPrChange w:id="4"><w:pPr><w:numPr><w:numId w:val="2"/></w:numPr></w:pPr></w:pPrChange></w:pPr></w:p></w:body>"#,
        );
        assert_eq!(removed, 1);
        // the live numbering of the paragraph is untouched
        assert_eq!(
            xml,
            r#"<w:body><w:p><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:pPrChange w:id="4"><w:pPr></w:pPr></w:pPrChange></w:pPr></w:p></w:body>"#
        );
    }

    #[test]
    fn test_run_property_change_numbering_removed() {
        let (removed, _) = clean(
            r#"<w:r><w:rPr><w:rPrChange><w:rPr><w:numPr/><w:numPr/></w:rPr></w:rPrChange></w:rPr></w:r>"#,
        );
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_deleted_paragraph_numbering_removed() {
        let (removed, xml) = clean(
            r#"<w:body><w:p w:rsidDel="00AB12"><w:pPr><w:numPr/></w:pPr></w:p><w:p w:rsidR="00AB12"><w:pPr><w:numPr/></w:pPr></w:p></w:body>"#,
        );
        assert_eq!(removed, 1);
        assert_eq!(
            xml,
            r#"<w:body><w:p w:rsidDel="00AB12"><w:pPr></w:pPr></w:p><w:p w:rsidR="00AB12"><w:pPr><w:numPr/></w:pPr></w:p></w:body>"#
        );
    }

    #[test]
    fn test_document_without_revisions_is_unchanged() {
        let source = r#"<w:body><w:p><w:pPr><w:numPr/></w:pPr></w:p></w:body>"#;
        let (removed, xml) = clean(source);
        assert_eq!(removed, 0);
        assert_eq!(xml, source);
    }
}
