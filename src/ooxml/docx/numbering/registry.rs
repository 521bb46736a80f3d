//! Numbering instances and their live level counters.
//!
//! Every `w:num` gets its own [`NumberingDefinition`] holding a private copy
//! of the referenced abstract levels, so two instances sharing one abstract
//! definition count independently.
use super::catalog::{AbstractLevelSpec, NumberingCatalog};
use super::format::format_number;
use super::parser::Num;
use super::types::{LevelIndex, parse_start_value};
use crate::ooxml::docx::enums::WdNumberFormat;
use std::collections::{BTreeMap, HashMap};

/// Counter state of one level of one numbering instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCounter {
    spec: AbstractLevelSpec,
    current: i32,
}

impl LevelCounter {
    /// Create a counter positioned at the spec's start value.
    #[inline]
    pub fn new(spec: AbstractLevelSpec) -> Self {
        let current = spec.start;
        Self { spec, current }
    }

    /// Numeral style of this level.
    #[inline]
    pub fn format(&self) -> WdNumberFormat {
        self.spec.format
    }

    /// Text template of this level.
    #[inline]
    pub fn text(&self) -> &str {
        &self.spec.text
    }

    /// Value the counter restarts from.
    #[inline]
    pub fn start(&self) -> i32 {
        self.spec.start
    }

    /// Current counter value.
    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Advance the counter by one.
    #[inline]
    pub fn increment(&mut self) {
        self.current = self.current.saturating_add(1);
    }

    /// Move the counter back to its start value.
    #[inline]
    pub fn reset(&mut self) {
        self.current = self.spec.start;
    }

    /// Replace both the start and the current value.
    #[inline]
    pub fn set_start(&mut self, start: i32) {
        self.spec.start = start;
        self.current = start;
    }

    /// Replace the whole level style, restarting the counter.
    pub fn redefine(&mut self, spec: AbstractLevelSpec) {
        *self = Self::new(spec);
    }

    /// The current value rendered in this level's numeral style.
    #[inline]
    pub fn format_current(&self) -> String {
        format_number(self.current, self.spec.format)
    }
}

/// Level counters of one numbering instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingDefinition {
    abstract_num_id: u32,
    levels: BTreeMap<LevelIndex, LevelCounter>,
}

impl NumberingDefinition {
    /// Create a definition by copying the given abstract levels.
    pub fn from_abstract_levels(
        abstract_num_id: u32,
        levels: &BTreeMap<LevelIndex, AbstractLevelSpec>,
    ) -> Self {
        Self {
            abstract_num_id,
            levels: levels
                .iter()
                .map(|(&index, spec)| (index, LevelCounter::new(spec.clone())))
                .collect(),
        }
    }

    /// The abstract definition this instance was copied from.
    #[inline]
    pub fn abstract_num_id(&self) -> u32 {
        self.abstract_num_id
    }

    /// Get a level counter.
    #[inline]
    pub fn level(&self, level: LevelIndex) -> Option<&LevelCounter> {
        self.levels.get(&level)
    }

    /// Get a mutable level counter.
    #[inline]
    pub fn level_mut(&mut self, level: LevelIndex) -> Option<&mut LevelCounter> {
        self.levels.get_mut(&level)
    }

    /// Check whether the instance defines a level.
    #[inline]
    pub fn contains_level(&self, level: LevelIndex) -> bool {
        self.levels.contains_key(&level)
    }

    /// Iterate over the level counters in ascending level order.
    pub fn levels(&self) -> impl Iterator<Item = (LevelIndex, &LevelCounter)> {
        self.levels.iter().map(|(&index, counter)| (index, counter))
    }

    /// Reset every counter strictly deeper than `level` to its start value.
    pub fn reset_levels_below(&mut self, level: LevelIndex) {
        for (&index, counter) in self.levels.range_mut(level..) {
            if index > level {
                counter.reset();
            }
        }
    }

    /// Render the text template of `level` against the live counters.
    ///
    /// Placeholders are substituted as literal substrings in ascending level
    /// order: `%1` takes level 0, `%2` level 1, and so on. Placeholders for
    /// levels this instance does not define are left as written. Returns
    /// `None` when `level` is not defined.
    pub fn formatted_number(&self, level: LevelIndex) -> Option<String> {
        let mut text = self.levels.get(&level)?.text().to_owned();

        let mut placeholder = String::with_capacity(3);
        for (index, counter) in &self.levels {
            placeholder.clear();
            placeholder.push('%');
            placeholder.push_str(itoa::Buffer::new().format(index.placeholder_ordinal()));

            if text.contains(placeholder.as_str()) {
                text = text.replace(placeholder.as_str(), &counter.format_current());
            }
        }
        Some(text)
    }
}

/// All numbering instances of a document, keyed by `w:numId`.
#[derive(Debug, Clone, Default)]
pub struct NumberingRegistry {
    definitions: HashMap<u32, NumberingDefinition>,
}

impl NumberingRegistry {
    /// Create an empty registry; every reference resolves to no numbering.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build instance definitions from the catalog.
    ///
    /// Instances that reference an unknown abstract id are dropped. Level
    /// overrides for levels the copy does not contain are ignored. A full
    /// level redefinition is applied before its `startOverride`.
    pub fn build(catalog: &NumberingCatalog, nums: &[Num]) -> Self {
        let mut definitions = HashMap::with_capacity(nums.len());

        for num in nums {
            let Some(abstract_levels) = catalog.levels(num.abstract_num_id) else {
                log::debug!(
                    "dropping numbering instance {}: abstract definition {} not found",
                    num.id,
                    num.abstract_num_id
                );
                continue;
            };

            let mut definition =
                NumberingDefinition::from_abstract_levels(num.abstract_num_id, abstract_levels);

            for level_override in &num.overrides {
                let Some(counter) = definition.level_mut(level_override.level) else {
                    continue;
                };
                if let Some(descriptor) = &level_override.level_definition {
                    counter.redefine(AbstractLevelSpec::from_descriptor(descriptor));
                }
                if let Some(start) = level_override
                    .start_override
                    .as_deref()
                    .and_then(parse_start_value)
                {
                    counter.set_start(start);
                }
            }

            definitions.insert(num.id, definition);
        }

        Self { definitions }
    }

    /// Get an instance definition.
    #[inline]
    pub fn get(&self, num_id: u32) -> Option<&NumberingDefinition> {
        self.definitions.get(&num_id)
    }

    /// Get a mutable instance definition.
    #[inline]
    pub fn get_mut(&mut self, num_id: u32) -> Option<&mut NumberingDefinition> {
        self.definitions.get_mut(&num_id)
    }

    /// Get the number of instance definitions.
    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
