//! Paragraph-level numbering edits on the document tree.
//!
//! A `<w:p>` carries its list membership in `w:pPr/w:numPr`:
//!
//! ```xml
//! <w:p>
//!   <w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr></w:pPr>
//!   <w:r><w:t>Item</w:t></w:r>
//! </w:p>
//! ```
//!
//! The helpers here read that reference, write the rendered prefix into the
//! paragraph text and drop the numbering properties afterwards.
use super::numbering::types::parse_numbering_id;
use super::numbering::{LevelIndex, NumberingReference};
use crate::common::xml::{XmlElement, XmlNode};

/// Namespace prefix used for WordprocessingML elements.
pub const WORD_PREFIX: &str = "w";

/// Check whether `element` is the WordprocessingML element `local_name`.
///
/// Both the conventional `w:` prefix and unprefixed names match.
#[inline]
pub fn is_word_element(element: &XmlElement, local_name: &str) -> bool {
    element.local_name() == local_name && matches!(element.prefix(), None | Some(WORD_PREFIX))
}

/// Read the numbering reference from the paragraph's direct `w:pPr`.
///
/// Returns `None` when the paragraph has no `w:numPr`. A present `w:numPr`
/// with a missing or unparsable `w:ilvl`/`w:numId` yields a reference with
/// the corresponding field unset.
pub fn numbering_reference(paragraph: &XmlElement) -> Option<NumberingReference> {
    let numbering_properties = paragraph
        .find_child(|e| is_word_element(e, "pPr"))?
        .find_child(|e| is_word_element(e, "numPr"))?;

    let value_of = |local_name: &str| {
        numbering_properties
            .find_child(|e| is_word_element(e, local_name))
            .and_then(|e| e.attribute_value("val"))
    };

    Some(NumberingReference {
        level: value_of("ilvl").as_deref().and_then(LevelIndex::parse),
        num_id: value_of("numId").as_deref().and_then(parse_numbering_id),
    })
}

/// Write `prefix` followed by `separator` in front of the paragraph text.
///
/// The text goes into the first `w:t` of the first `w:r`. When that run has
/// no text element, a new run is inserted right after `w:pPr` instead.
pub fn prepend_prefix(paragraph: &mut XmlElement, prefix: &str, separator: &str) {
    let mut lead = String::with_capacity(prefix.len() + separator.len());
    lead.push_str(prefix);
    lead.push_str(separator);

    let is_run = |e: &XmlElement| is_word_element(e, "r");
    let is_text = |e: &XmlElement| is_word_element(e, "t");

    if let Some(text) = paragraph
        .find_descendant_mut(&is_run)
        .and_then(|run| run.find_descendant_mut(&is_text))
    {
        text.insert_child(0, XmlNode::text(&lead));
        text.set_attribute("xml:space", "preserve");
        return;
    }

    let prefix_ns = paragraph.prefix().map(str::to_owned);
    let text = XmlElement::new(qualified(prefix_ns.as_deref(), "t"))
        .with_attribute("xml:space", "preserve")
        .with_child(XmlNode::text(&lead));
    let run = XmlElement::new(qualified(prefix_ns.as_deref(), "r"))
        .with_child(XmlNode::Element(text));

    let index = paragraph
        .position_of_child(|e| is_word_element(e, "pPr"))
        .map_or(0, |position| position + 1);
    paragraph.insert_child(index, XmlNode::Element(run));
}

/// Remove every `w:numPr` from the paragraph's direct `w:pPr`.
///
/// Returns the number of elements removed.
pub fn remove_numbering_properties(paragraph: &mut XmlElement) -> usize {
    paragraph
        .find_child_mut(|e| is_word_element(e, "pPr"))
        .map_or(0, |properties| {
            properties.remove_children(|e| is_word_element(e, "numPr"))
        })
}

fn qualified(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local_name),
        None => local_name.to_owned(),
    }
}
