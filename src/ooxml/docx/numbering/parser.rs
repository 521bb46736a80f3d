//! Streaming reader for the numbering part (`word/numbering.xml`).
//!
//! Produces the raw abstract definitions and numbering instances exactly as
//! they appear in markup. Identifiers are validated here; descriptor values
//! (`numFmt`, `lvlText`, `start`) are kept as text and defaulted later by
//! the catalog.
use super::types::{LevelIndex, parse_numbering_id};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A `w:lvl` element as written in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDescriptor {
    /// Level index (`w:ilvl`)
    pub level: LevelIndex,
    /// First `w:numFmt/@w:val` seen inside the level
    pub format: Option<String>,
    /// First `w:lvlText/@w:val` seen inside the level
    pub text: Option<String>,
    /// First `w:start/@w:val` seen inside the level
    pub start: Option<String>,
}

impl LevelDescriptor {
    /// Create a descriptor with no values set.
    #[inline]
    pub fn new(level: LevelIndex) -> Self {
        Self {
            level,
            format: None,
            text: None,
            start: None,
        }
    }
}

/// A `w:abstractNum` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractNum {
    /// Abstract numbering ID
    pub id: u32,
    /// Levels in document order
    pub levels: Vec<LevelDescriptor>,
}

/// A `w:lvlOverride` element inside a numbering instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOverride {
    /// Overridden level (`w:ilvl`)
    pub level: LevelIndex,
    /// First `w:startOverride/@w:val` seen inside the override
    pub start_override: Option<String>,
    /// Full `w:lvl` redefinition, if present
    pub level_definition: Option<LevelDescriptor>,
}

/// A `w:num` element (numbering instance).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Num {
    /// Numbering ID
    pub id: u32,
    /// Referenced abstract numbering ID
    pub abstract_num_id: u32,
    /// Level overrides in document order
    pub overrides: Vec<LevelOverride>,
}

/// Contents of a numbering part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingPart {
    /// Abstract numbering definitions (templates)
    pub abstract_nums: Vec<AbstractNum>,
    /// Numbering instances (concrete uses)
    pub nums: Vec<Num>,
}

impl NumberingPart {
    /// Parse the numbering part.
    ///
    /// Elements whose identifying attribute is missing or unparsable are
    /// skipped. Malformed markup is an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use listnum::ooxml::docx::numbering::NumberingPart;
    ///
    /// let xml = br#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    ///   <w:abstractNum w:abstractNumId="0">
    ///     <w:lvl w:ilvl="0"><w:numFmt w:val="upperRoman"/><w:lvlText w:val="%1."/></w:lvl>
    ///   </w:abstractNum>
    ///   <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
    /// </w:numbering>"#;
    ///
    /// let part = NumberingPart::parse(xml)?;
    /// assert_eq!(part.abstract_nums.len(), 1);
    /// assert_eq!(part.nums[0].abstract_num_id, 0);
    /// # Ok::<(), listnum::ooxml::OoxmlError>(())
    /// ```
    pub fn parse(xml_bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml_bytes);
        reader.config_mut().trim_text(true);

        let mut state = ParseState::default();
        let mut buf = Vec::with_capacity(1024);
        // elements opened but not yet closed
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    state.open(&e);
                },
                Event::Empty(e) => {
                    state.open(&e);
                    state.close(e.local_name().as_ref());
                },
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    state.close(e.local_name().as_ref());
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if depth > 0 {
            return Err(OoxmlError::Xml(format!(
                "numbering part ends with {} unclosed element(s)",
                depth
            )));
        }

        log::debug!(
            "parsed numbering part: {} abstract definitions, {} instances",
            state.part.abstract_nums.len(),
            state.part.nums.len()
        );
        Ok(state.part)
    }
}

/// Instance being read; `abstract_num_id` is `Some(None)` once an
/// unparsable reference has been seen.
#[derive(Debug)]
struct PendingNum {
    id: u32,
    abstract_num_id: Option<Option<u32>>,
    overrides: Vec<LevelOverride>,
}

#[derive(Debug, Default)]
struct ParseState {
    part: NumberingPart,
    in_abstract: bool,
    in_num: bool,
    in_override: bool,
    in_level: bool,
    // `None` while inside an element whose id did not parse
    abstract_num: Option<AbstractNum>,
    num: Option<PendingNum>,
    level_override: Option<LevelOverride>,
    level: Option<LevelDescriptor>,
}

impl ParseState {
    fn open(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"abstractNum" if !self.in_num => {
                self.in_abstract = true;
                self.abstract_num = attr_value(e, b"abstractNumId")
                    .as_deref()
                    .and_then(parse_numbering_id)
                    .map(|id| AbstractNum {
                        id,
                        levels: Vec::new(),
                    });
            },
            b"lvl" if self.in_abstract || self.in_override => {
                self.in_level = true;
                self.level = attr_value(e, b"ilvl")
                    .as_deref()
                    .and_then(LevelIndex::parse)
                    .map(LevelDescriptor::new);
            },
            b"numFmt" if self.in_level => {
                if let Some(level) = self.level.as_mut()
                    && level.format.is_none()
                {
                    level.format = Some(attr_value(e, b"val").unwrap_or_default());
                }
            },
            b"lvlText" if self.in_level => {
                if let Some(level) = self.level.as_mut()
                    && level.text.is_none()
                {
                    level.text = Some(attr_value(e, b"val").unwrap_or_default());
                }
            },
            b"start" if self.in_level => {
                if let Some(level) = self.level.as_mut()
                    && level.start.is_none()
                {
                    level.start = Some(attr_value(e, b"val").unwrap_or_default());
                }
            },
            b"num" if !self.in_abstract => {
                self.in_num = true;
                self.num = attr_value(e, b"numId")
                    .as_deref()
                    .and_then(parse_numbering_id)
                    .map(|id| PendingNum {
                        id,
                        abstract_num_id: None,
                        overrides: Vec::new(),
                    });
            },
            b"abstractNumId" if self.in_num && !self.in_override => {
                if let Some(num) = self.num.as_mut()
                    && num.abstract_num_id.is_none()
                {
                    num.abstract_num_id = Some(
                        attr_value(e, b"val")
                            .as_deref()
                            .and_then(parse_numbering_id),
                    );
                }
            },
            b"lvlOverride" if self.in_num => {
                self.in_override = true;
                self.level_override = attr_value(e, b"ilvl")
                    .as_deref()
                    .and_then(LevelIndex::parse)
                    .map(|level| LevelOverride {
                        level,
                        start_override: None,
                        level_definition: None,
                    });
            },
            b"startOverride" if self.in_override && !self.in_level => {
                if let Some(level_override) = self.level_override.as_mut()
                    && level_override.start_override.is_none()
                {
                    level_override.start_override =
                        Some(attr_value(e, b"val").unwrap_or_default());
                }
            },
            _ => {},
        }
    }

    fn close(&mut self, local_name: &[u8]) {
        match local_name {
            b"lvl" if self.in_level => {
                self.in_level = false;
                let Some(level) = self.level.take() else {
                    return;
                };
                if self.in_override {
                    if let Some(level_override) = self.level_override.as_mut()
                        && level_override.level_definition.is_none()
                    {
                        level_override.level_definition = Some(level);
                    }
                } else if let Some(abstract_num) = self.abstract_num.as_mut() {
                    abstract_num.levels.push(level);
                }
            },
            b"abstractNum" if self.in_abstract => {
                self.in_abstract = false;
                if let Some(abstract_num) = self.abstract_num.take() {
                    self.part.abstract_nums.push(abstract_num);
                }
            },
            b"lvlOverride" if self.in_override => {
                self.in_override = false;
                if let (Some(level_override), Some(num)) =
                    (self.level_override.take(), self.num.as_mut())
                {
                    num.overrides.push(level_override);
                }
            },
            b"num" if self.in_num => {
                self.in_num = false;
                let Some(num) = self.num.take() else {
                    return;
                };
                match num.abstract_num_id.flatten() {
                    Some(abstract_num_id) => self.part.nums.push(Num {
                        id: num.id,
                        abstract_num_id,
                        overrides: num.overrides,
                    }),
                    None => {
                        log::debug!("numbering instance {} has no abstract reference", num.id)
                    },
                }
            },
            _ => {},
        }
    }
}

/// Read an attribute by local name, so both `w:val` and `val` match.
fn attr_value(e: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value);
            match quick_xml::escape::unescape(&raw) {
                Ok(value) => value.into_owned(),
                Err(_) => raw.into_owned(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERING_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:lvl w:ilvl="0">
      <w:start w:val="3"/>
      <w:numFmt w:val="decimal"/>
      <w:lvlText w:val="%1."/>
    </w:lvl>
    <w:lvl w:ilvl="1">
      <w:numFmt w:val="lowerLetter"/>
      <w:lvlText w:val="%2)"/>
    </w:lvl>
    <w:lvl>
      <w:numFmt w:val="upperRoman"/>
    </w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="x">
    <w:lvl w:ilvl="0"/>
  </w:abstractNum>
  <w:num w:numId="1">
    <w:abstractNumId w:val="0"/>
  </w:num>
  <w:num w:numId="2">
    <w:abstractNumId w:val="0"/>
    <w:lvlOverride w:ilvl="0">
      <w:startOverride w:val="10"/>
    </w:lvlOverride>
    <w:lvlOverride w:ilvl="1">
      <w:lvl w:ilvl="1">
        <w:start w:val="2"/>
        <w:numFmt w:val="upperLetter"/>
        <w:lvlText w:val="(%2)"/>
      </w:lvl>
    </w:lvlOverride>
  </w:num>
  <w:num w:numId="3"/>
</w:numbering>"#;

    #[test]
    fn test_parse_abstract_nums() {
        let part = NumberingPart::parse(NUMBERING_XML).unwrap();
        assert_eq!(part.abstract_nums.len(), 1);

        let abstract_num = &part.abstract_nums[0];
        assert_eq!(abstract_num.id, 0);
        // the level without w:ilvl is skipped
        assert_eq!(abstract_num.levels.len(), 2);

        let first = &abstract_num.levels[0];
        assert_eq!(first.level.get(), 0);
        assert_eq!(first.start.as_deref(), Some("3"));
        assert_eq!(first.format.as_deref(), Some("decimal"));
        assert_eq!(first.text.as_deref(), Some("%1."));

        let second = &abstract_num.levels[1];
        assert_eq!(second.start, None);
        assert_eq!(second.text.as_deref(), Some("%2)"));
    }

    #[test]
    fn test_parse_nums_and_overrides() {
        let part = NumberingPart::parse(NUMBERING_XML).unwrap();
        // numId 3 has no abstract reference
        assert_eq!(part.nums.len(), 2);

        let plain = &part.nums[0];
        assert_eq!((plain.id, plain.abstract_num_id), (1, 0));
        assert!(plain.overrides.is_empty());

        let overridden = &part.nums[1];
        assert_eq!(overridden.overrides.len(), 2);
        assert_eq!(overridden.overrides[0].start_override.as_deref(), Some("10"));
        assert_eq!(overridden.overrides[0].level_definition, None);

        let redefinition = overridden.overrides[1].level_definition.as_ref().unwrap();
        assert_eq!(redefinition.format.as_deref(), Some("upperLetter"));
        assert_eq!(redefinition.text.as_deref(), Some("(%2)"));
        assert_eq!(redefinition.start.as_deref(), Some("2"));
        assert_eq!(overridden.overrides[1].start_override, None);
    }

    #[test]
    fn test_unprefixed_attributes_and_escapes() {
        let xml = br#"<numbering>
  <abstractNum abstractNumId="5">
    <lvl ilvl="0"><lvlText val="&lt;%1&gt;"/></lvl>
  </abstractNum>
</numbering>"#;
        let part = NumberingPart::parse(xml).unwrap();
        assert_eq!(part.abstract_nums[0].id, 5);
        assert_eq!(part.abstract_nums[0].levels[0].text.as_deref(), Some("<%1>"));
    }

    #[test]
    fn test_empty_values_are_kept_as_seen() {
        let xml = br#"<w:numbering xmlns:w="urn:w">
  <w:abstractNum w:abstractNumId="1">
    <w:lvl w:ilvl="0"><w:numFmt w:val=""/><w:numFmt w:val="upperRoman"/></w:lvl>
  </w:abstractNum>
</w:numbering>"#;
        let part = NumberingPart::parse(xml).unwrap();
        assert_eq!(part.abstract_nums[0].levels[0].format.as_deref(), Some(""));
    }

    #[test]
    fn test_malformed_markup_is_fatal() {
        let xml = br#"<w:numbering><w:abstractNum w:abstractNumId="0"></w:numbering>"#;
        assert!(matches!(NumberingPart::parse(xml), Err(OoxmlError::Xml(_))));
    }

    #[test]
    fn test_truncated_part_is_fatal() {
        let xml = br#"<w:numbering><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0">"#;
        assert!(matches!(NumberingPart::parse(xml), Err(OoxmlError::Xml(_))));

        let xml = br#"<w:numbering xmlns:w="urn:w"><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#;
        assert!(matches!(NumberingPart::parse(xml), Err(OoxmlError::Xml(_))));
    }
}
