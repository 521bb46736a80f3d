/// Enumerations for Word numbering elements.
///
/// This module provides the enumerations used by the numbering engine,
/// matching the values of the `w:numFmt/@w:val` attribute.
use std::fmt;

/// Specifies the numeral style used to render a list level's counter.
///
/// Only the five styles below are rendered distinctly. Any other `w:numFmt`
/// value (`bullet`, `ordinal`, `decimalZero`, ...) renders as
/// [`WdNumberFormat::Decimal`].
///
/// # Examples
///
/// ```rust
/// use listnum::ooxml::docx::enums::WdNumberFormat;
///
/// let format = WdNumberFormat::LowerRoman;
/// assert_eq!(format.to_xml(), "lowerRoman");
/// assert_eq!(WdNumberFormat::from_xml_or_default("bullet"), WdNumberFormat::Decimal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdNumberFormat {
    /// Arabic numerals (1, 2, 3...)
    Decimal = 0,
    /// Uppercase Roman numerals (I, II, III...)
    UpperRoman = 1,
    /// Lowercase Roman numerals (i, ii, iii...)
    LowerRoman = 2,
    /// Uppercase letters (A, B, C...)
    UpperLetter = 3,
    /// Lowercase letters (a, b, c...)
    LowerLetter = 4,
}

impl WdNumberFormat {
    /// Convert the number format to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::UpperRoman => "upperRoman",
            Self::LowerRoman => "lowerRoman",
            Self::UpperLetter => "upperLetter",
            Self::LowerLetter => "lowerLetter",
        }
    }

    /// Parse number format from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "decimal" => Some(Self::Decimal),
            "upperRoman" => Some(Self::UpperRoman),
            "lowerRoman" => Some(Self::LowerRoman),
            "upperLetter" => Some(Self::UpperLetter),
            "lowerLetter" => Some(Self::LowerLetter),
            _ => None,
        }
    }

    /// Parse number format from XML attribute value, falling back to decimal.
    #[inline]
    pub fn from_xml_or_default(s: &str) -> Self {
        Self::from_xml(s).unwrap_or_default()
    }
}

impl Default for WdNumberFormat {
    #[inline]
    fn default() -> Self {
        Self::Decimal
    }
}

impl fmt::Display for WdNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => write!(f, "Decimal"),
            Self::UpperRoman => write!(f, "Upper Roman"),
            Self::LowerRoman => write!(f, "Lower Roman"),
            Self::UpperLetter => write!(f, "Upper Letter"),
            Self::LowerLetter => write!(f, "Lower Letter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_conversion() {
        for format in [
            WdNumberFormat::Decimal,
            WdNumberFormat::UpperRoman,
            WdNumberFormat::LowerRoman,
            WdNumberFormat::UpperLetter,
            WdNumberFormat::LowerLetter,
        ] {
            assert_eq!(WdNumberFormat::from_xml(format.to_xml()), Some(format));
        }
        assert_eq!(WdNumberFormat::from_xml("bullet"), None);
        assert_eq!(WdNumberFormat::from_xml("UpperRoman"), None);
    }

    #[test]
    fn test_unrecognized_falls_back_to_decimal() {
        assert_eq!(
            WdNumberFormat::from_xml_or_default("decimalZero"),
            WdNumberFormat::Decimal
        );
        assert_eq!(WdNumberFormat::from_xml_or_default(""), WdNumberFormat::Decimal);
        assert_eq!(
            WdNumberFormat::from_xml_or_default("upperLetter"),
            WdNumberFormat::UpperLetter
        );
    }
}
