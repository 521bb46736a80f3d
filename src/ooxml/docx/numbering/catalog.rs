//! Abstract numbering catalog.
//!
//! The catalog maps each abstract numbering id to its per-level styles. It
//! is built once per document and never mutated afterwards; numbering
//! instances copy from it (see [`super::registry`]).
use super::parser::{AbstractNum, LevelDescriptor};
use super::types::{LevelIndex, parse_start_value};
use crate::ooxml::docx::enums::WdNumberFormat;
use std::collections::{BTreeMap, HashMap};

/// Level text used when `w:lvlText` is absent or empty.
pub const DEFAULT_LEVEL_TEXT: &str = "%1.";

/// Start value used when `w:start` is absent or unparsable.
pub const DEFAULT_START_VALUE: i32 = 1;

/// Style of one level of an abstract numbering definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractLevelSpec {
    /// Numeral style
    pub format: WdNumberFormat,
    /// Text template with `%N` placeholders
    pub text: String,
    /// First counter value
    pub start: i32,
}

impl AbstractLevelSpec {
    /// Build a spec from raw markup values, applying defaults.
    pub fn from_descriptor(descriptor: &LevelDescriptor) -> Self {
        let format = descriptor
            .format
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(WdNumberFormat::from_xml_or_default)
            .unwrap_or_default();

        let text = match descriptor.text.as_deref() {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => DEFAULT_LEVEL_TEXT.to_owned(),
        };

        let start = descriptor
            .start
            .as_deref()
            .and_then(parse_start_value)
            .unwrap_or(DEFAULT_START_VALUE);

        Self {
            format,
            text,
            start,
        }
    }
}

impl Default for AbstractLevelSpec {
    fn default() -> Self {
        Self {
            format: WdNumberFormat::Decimal,
            text: DEFAULT_LEVEL_TEXT.to_owned(),
            start: DEFAULT_START_VALUE,
        }
    }
}

/// Immutable mapping of abstract id to level index to [`AbstractLevelSpec`].
#[derive(Debug, Clone, Default)]
pub struct NumberingCatalog {
    abstract_nums: HashMap<u32, BTreeMap<LevelIndex, AbstractLevelSpec>>,
}

impl NumberingCatalog {
    /// Build the catalog from parsed abstract definitions.
    ///
    /// A later definition with a repeated id replaces the earlier one, as does
    /// a repeated level index within one definition.
    pub fn from_abstract_nums(abstract_nums: &[AbstractNum]) -> Self {
        let mut catalog = HashMap::with_capacity(abstract_nums.len());
        for abstract_num in abstract_nums {
            let levels = abstract_num
                .levels
                .iter()
                .map(|descriptor| {
                    (
                        descriptor.level,
                        AbstractLevelSpec::from_descriptor(descriptor),
                    )
                })
                .collect();
            catalog.insert(abstract_num.id, levels);
        }

        Self {
            abstract_nums: catalog,
        }
    }

    /// Get the levels of an abstract definition, ordered by level index.
    #[inline]
    pub fn levels(
        &self,
        abstract_num_id: u32,
    ) -> Option<&BTreeMap<LevelIndex, AbstractLevelSpec>> {
        self.abstract_nums.get(&abstract_num_id)
    }

    /// Get one level of an abstract definition.
    #[inline]
    pub fn level(&self, abstract_num_id: u32, level: LevelIndex) -> Option<&AbstractLevelSpec> {
        self.levels(abstract_num_id)?.get(&level)
    }

    /// Check whether an abstract definition exists.
    #[inline]
    pub fn contains(&self, abstract_num_id: u32) -> bool {
        self.abstract_nums.contains_key(&abstract_num_id)
    }

    /// Get the number of abstract definitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.abstract_nums.len()
    }

    /// Check if the catalog is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.abstract_nums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(index: u8) -> LevelIndex {
        LevelIndex::new(index).unwrap()
    }

    fn descriptor(
        index: u8,
        format: Option<&str>,
        text: Option<&str>,
        start: Option<&str>,
    ) -> LevelDescriptor {
        LevelDescriptor {
            level: level(index),
            format: format.map(str::to_owned),
            text: text.map(str::to_owned),
            start: start.map(str::to_owned),
        }
    }

    #[test]
    fn test_defaults_for_missing_values() {
        let spec = AbstractLevelSpec::from_descriptor(&descriptor(0, None, None, None));
        assert_eq!(spec, AbstractLevelSpec::default());

        let spec =
            AbstractLevelSpec::from_descriptor(&descriptor(0, Some(""), Some(""), Some("")));
        assert_eq!(spec.format, WdNumberFormat::Decimal);
        assert_eq!(spec.text, "%1.");
        assert_eq!(spec.start, 1);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let spec = AbstractLevelSpec::from_descriptor(&descriptor(
            1,
            Some("chineseCounting"),
            Some("%1.%2"),
            Some("one"),
        ));
        assert_eq!(spec.format, WdNumberFormat::Decimal);
        assert_eq!(spec.text, "%1.%2");
        assert_eq!(spec.start, 1);
    }

    #[test]
    fn test_catalog_lookup() {
        let abstract_nums = vec![
            AbstractNum {
                id: 0,
                levels: vec![
                    descriptor(0, Some("upperRoman"), Some("%1."), Some("4")),
                    descriptor(1, Some("lowerLetter"), Some("%2)"), None),
                ],
            },
            AbstractNum {
                id: 7,
                levels: Vec::new(),
            },
        ];

        let catalog = NumberingCatalog::from_abstract_nums(&abstract_nums);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(7));
        assert!(!catalog.contains(1));

        let first = catalog.level(0, level(0)).unwrap();
        assert_eq!(first.format, WdNumberFormat::UpperRoman);
        assert_eq!(first.start, 4);
        assert!(catalog.level(0, level(2)).is_none());
        assert!(catalog.levels(7).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_ids_keep_last_definition() {
        let abstract_nums = vec![
            AbstractNum {
                id: 3,
                levels: vec![descriptor(0, Some("upperLetter"), None, None)],
            },
            AbstractNum {
                id: 3,
                levels: vec![
                    descriptor(0, Some("lowerRoman"), None, None),
                    descriptor(0, Some("lowerLetter"), None, None),
                ],
            },
        ];

        let catalog = NumberingCatalog::from_abstract_nums(&abstract_nums);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.level(3, level(0)).unwrap().format,
            WdNumberFormat::LowerLetter
        );
    }
}
