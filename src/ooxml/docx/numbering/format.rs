//! Integer to numeral conversion for list level counters.

use crate::ooxml::docx::enums::WdNumberFormat;

/// Subtractive Roman numeral table, largest value first.
const ROMAN_NUMERALS: [(i32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `number` in the given numeral style.
///
/// Total and deterministic: Roman styles yield an empty string for values
/// below one, letter styles fall back to decimal outside `1..=26`.
///
/// # Examples
///
/// ```rust
/// use listnum::ooxml::docx::enums::WdNumberFormat;
/// use listnum::ooxml::docx::numbering::format_number;
///
/// assert_eq!(format_number(14, WdNumberFormat::UpperRoman), "XIV");
/// assert_eq!(format_number(3, WdNumberFormat::LowerLetter), "c");
/// assert_eq!(format_number(27, WdNumberFormat::LowerLetter), "27");
/// ```
pub fn format_number(number: i32, format: WdNumberFormat) -> String {
    match format {
        WdNumberFormat::Decimal => format_decimal(number),
        WdNumberFormat::UpperRoman => to_roman(number),
        WdNumberFormat::LowerRoman => to_roman(number).to_ascii_lowercase(),
        WdNumberFormat::UpperLetter => {
            to_letter(number, b'A').unwrap_or_else(|| format_decimal(number))
        },
        WdNumberFormat::LowerLetter => {
            to_letter(number, b'a').unwrap_or_else(|| format_decimal(number))
        },
    }
}

#[inline]
fn format_decimal(number: i32) -> String {
    let mut buffer = itoa::Buffer::new();
    buffer.format(number).to_owned()
}

fn to_roman(mut number: i32) -> String {
    if number <= 0 {
        return String::new();
    }

    let mut result = String::with_capacity(16);
    for &(value, symbol) in &ROMAN_NUMERALS {
        while number >= value {
            result.push_str(symbol);
            number -= value;
        }
    }
    result
}

#[inline]
fn to_letter(number: i32, base: u8) -> Option<String> {
    if (1..=26).contains(&number) {
        Some(char::from(base + (number - 1) as u8).to_string())
    } else {
        None
    }
}
