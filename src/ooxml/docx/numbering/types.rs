//! Identifiers shared by the numbering catalog, registry and resolver.
use std::fmt;

/// Zero-based indentation tier of a list (`w:ilvl`).
///
/// Word defines nine levels, so only `0..=8` are representable. Values are
/// validated once, when read from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LevelIndex(u8);

impl LevelIndex {
    /// Deepest level Word supports.
    pub const MAX: LevelIndex = LevelIndex(8);

    /// Create a level index, rejecting values above [`LevelIndex::MAX`].
    #[inline]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX.0 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Parse a level index from attribute text.
    ///
    /// Returns `None` for text that is not an unsigned integer in `0..=8`.
    #[inline]
    pub fn parse(value: &str) -> Option<Self> {
        atoi_simd::parse::<u8>(value.as_bytes())
            .ok()
            .and_then(Self::new)
    }

    /// The raw level number.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The 1-based placeholder ordinal used in level text templates (`%1` for level 0).
    #[inline]
    pub const fn placeholder_ordinal(self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse an abstract or instance numbering id from attribute text.
#[inline]
pub fn parse_numbering_id(value: &str) -> Option<u32> {
    atoi_simd::parse::<u32>(value.as_bytes()).ok()
}

/// Parse a start or override value from attribute text.
#[inline]
pub fn parse_start_value(value: &str) -> Option<i32> {
    atoi_simd::parse::<i32>(value.as_bytes()).ok()
}

/// The numbering properties (`w:numPr`) attached to a paragraph.
///
/// Either side is `None` when its element or attribute is missing or does
/// not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberingReference {
    /// Referenced level (`w:ilvl/@w:val`)
    pub level: Option<LevelIndex>,
    /// Referenced numbering instance (`w:numId/@w:val`)
    pub num_id: Option<u32>,
}

impl NumberingReference {
    /// Create a complete reference.
    #[inline]
    pub fn new(level: LevelIndex, num_id: u32) -> Self {
        Self {
            level: Some(level),
            num_id: Some(num_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_index_bounds() {
        assert_eq!(LevelIndex::parse("0").map(LevelIndex::get), Some(0));
        assert_eq!(LevelIndex::parse("8").map(LevelIndex::get), Some(8));
        assert_eq!(LevelIndex::parse("9"), None);
        assert_eq!(LevelIndex::parse("-1"), None);
        assert_eq!(LevelIndex::parse(""), None);
        assert_eq!(LevelIndex::parse("x"), None);
    }

    #[test]
    fn test_placeholder_ordinal() {
        let level = LevelIndex::new(2).unwrap();
        assert_eq!(level.placeholder_ordinal(), 3);
    }

    #[test]
    fn test_value_parsing() {
        assert_eq!(parse_numbering_id("12"), Some(12));
        assert_eq!(parse_numbering_id("abc"), None);
        assert_eq!(parse_start_value("-4"), Some(-4));
        assert_eq!(parse_start_value("five"), None);
    }
}
