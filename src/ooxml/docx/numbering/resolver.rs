//! Order-dependent numbering resolution.
//!
//! A [`ParagraphResolver`] is fed every paragraph of one document exactly
//! once, in document order. It owns the live level counters and remembers,
//! per numbering instance, the level rendered last; together these decide
//! whether a paragraph increments, continues or restarts a list.
use super::catalog::NumberingCatalog;
use super::parser::NumberingPart;
use super::registry::NumberingRegistry;
use super::types::{LevelIndex, NumberingReference};
use crate::ooxml::error::Result;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Stateful single-pass resolver of paragraph list prefixes.
///
/// # Examples
///
/// ```rust
/// use listnum::ooxml::docx::numbering::{LevelIndex, NumberingReference, ParagraphResolver};
///
/// let xml = br#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:abstractNum w:abstractNumId="0">
///     <w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
///     <w:lvl w:ilvl="1"><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/></w:lvl>
///   </w:abstractNum>
///   <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
/// </w:numbering>"#;
///
/// let mut resolver = ParagraphResolver::from_numbering_xml(xml)?;
/// let top = NumberingReference::new(LevelIndex::new(0).unwrap(), 1);
/// let nested = NumberingReference::new(LevelIndex::new(1).unwrap(), 1);
///
/// assert_eq!(resolver.resolve(Some(&top)), "1.");
/// assert_eq!(resolver.resolve(Some(&nested)), "a)");
/// assert_eq!(resolver.resolve(Some(&nested)), "b)");
/// assert_eq!(resolver.resolve(Some(&top)), "2.");
/// # Ok::<(), listnum::ooxml::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParagraphResolver {
    registry: NumberingRegistry,
    last_active_levels: HashMap<u32, LevelIndex>,
}

impl ParagraphResolver {
    /// Create a resolver over the given instance definitions.
    #[inline]
    pub fn new(registry: NumberingRegistry) -> Self {
        Self {
            registry,
            last_active_levels: HashMap::new(),
        }
    }

    /// Build catalog and registry from a parsed numbering part.
    pub fn from_numbering_part(part: &NumberingPart) -> Self {
        let catalog = NumberingCatalog::from_abstract_nums(&part.abstract_nums);
        Self::new(NumberingRegistry::build(&catalog, &part.nums))
    }

    /// Parse a numbering part and build a resolver from it.
    pub fn from_numbering_xml(xml_bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_numbering_part(&NumberingPart::parse(xml_bytes)?))
    }

    /// Resolve the prefix of the next paragraph in document order.
    ///
    /// `reference` is the paragraph's numbering properties, `None` when it
    /// has none. Returns an empty string when the paragraph is not numbered.
    /// An invalid reference to an instance id makes the next valid reference
    /// to that instance start fresh.
    pub fn resolve(&mut self, reference: Option<&NumberingReference>) -> String {
        let Some(reference) = reference else {
            return String::new();
        };

        let (level, num_id) = match (reference.level, reference.num_id) {
            (Some(level), Some(num_id)) if self.is_valid(level, num_id) => (level, num_id),
            (_, Some(num_id)) => {
                self.last_active_levels.remove(&num_id);
                return String::new();
            },
            _ => return String::new(),
        };

        let Some(definition) = self.registry.get_mut(num_id) else {
            return String::new();
        };

        if let Some(&last_level) = self.last_active_levels.get(&num_id) {
            match level.cmp(&last_level) {
                // descending into a sub-level continues from its current value
                Ordering::Greater => {},
                Ordering::Equal => {
                    if let Some(counter) = definition.level_mut(level) {
                        counter.increment();
                    }
                },
                Ordering::Less => {
                    if let Some(counter) = definition.level_mut(level) {
                        counter.increment();
                    }
                    definition.reset_levels_below(level);
                },
            }
        }

        let prefix = definition.formatted_number(level).unwrap_or_default();
        self.last_active_levels.insert(num_id, level);

        log::trace!("numId {} level {} -> {:?}", num_id, level, prefix);
        prefix
    }

    /// Resolve a whole sequence of paragraphs in order.
    pub fn resolve_all<'a, I>(&mut self, references: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a NumberingReference>>,
    {
        references
            .into_iter()
            .map(|reference| self.resolve(reference))
            .collect()
    }

    /// The level last rendered for an instance, if continuity is unbroken.
    #[inline]
    pub fn last_active_level(&self, num_id: u32) -> Option<LevelIndex> {
        self.last_active_levels.get(&num_id).copied()
    }

    /// The instance definitions with their live counters.
    #[inline]
    pub fn registry(&self) -> &NumberingRegistry {
        &self.registry
    }

    fn is_valid(&self, level: LevelIndex, num_id: u32) -> bool {
        self.registry
            .get(num_id)
            .is_some_and(|definition| definition.contains_level(level))
    }
}
