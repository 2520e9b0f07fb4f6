//! Lexical scan of raw card number input.
//!
//! The scanner accepts ASCII digits, whitespace and the hyphen `-`. Digits
//! are collected in order; whitespace and hyphens are dropped wherever they
//! appear. Anything else stops the scan and is reported.

use crate::digits::Digits;
use crate::error::ValidationError;
use std::fmt;

/// The first character the scanner rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCharacter(pub char);

impl fmt::Display for InvalidCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid character '{}'", self.0.escape_default())
    }
}

impl std::error::Error for InvalidCharacter {}

impl From<InvalidCharacter> for ValidationError {
    fn from(err: InvalidCharacter) -> Self {
        Self::InvalidCharacter { character: err.0 }
    }
}

/// Character classes recognised by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// An ASCII digit `0`-`9`.
    Digit(u8),
    /// Whitespace or `-`, silently discarded.
    Separator,
    /// Anything else.
    Invalid,
}

/// Classifies a single input character.
///
/// Only ASCII digits count as digits; other Unicode digits (e.g. `٣`) are
/// invalid. Whitespace follows the Unicode `White_Space` property.
#[inline]
pub fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit((c as u8) - b'0'),
        '-' => CharClass::Separator,
        c if c.is_whitespace() => CharClass::Separator,
        _ => CharClass::Invalid,
    }
}

/// Scans raw input into a normalized digit sequence.
///
/// Single left-to-right pass. The first character that is not a digit,
/// whitespace or hyphen ends the scan with [`InvalidCharacter`] carrying
/// that character (not its position).
///
/// # Example
///
/// ```
/// use cardcheck::scan::{scan, InvalidCharacter};
///
/// let digits = scan("4532-0151 1283 0366").unwrap();
/// assert_eq!(digits.to_digit_string(), "4532015112830366");
///
/// let err = scan("4532-01x1-y283").unwrap_err();
/// assert_eq!(err, InvalidCharacter('x'));
/// ```
pub fn scan(raw: &str) -> Result<Digits, InvalidCharacter> {
    let mut values = Vec::with_capacity(raw.len());

    for c in raw.chars() {
        match classify(c) {
            CharClass::Digit(d) => values.push(d),
            CharClass::Separator => {}
            CharClass::Invalid => {
                return Err(InvalidCharacter(c));
            }
        }
    }

    Ok(Digits::from_values_unchecked(values))
}

/// Returns the first character the scanner would reject, if any.
///
/// # Example
///
/// ```
/// use cardcheck::scan::first_invalid_char;
///
/// assert_eq!(first_invalid_char("4111 1111"), None);
/// assert_eq!(first_invalid_char("41a1b"), Some('a'));
/// ```
pub fn first_invalid_char(raw: &str) -> Option<char> {
    raw.chars().find(|&c| classify(c) == CharClass::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_plain_digits() {
        let digits = scan("4111111111111111").unwrap();
        assert_eq!(digits.len(), 16);
        assert_eq!(digits.as_slice()[0], 4);
    }

    #[test]
    fn test_scan_drops_separators_anywhere() {
        let digits = scan(" -4-1 \t1\n1--").unwrap();
        assert_eq!(digits.to_digit_string(), "4111");
    }

    #[test]
    fn test_scan_reports_first_invalid() {
        assert_eq!(scan("1234.5678/").unwrap_err(), InvalidCharacter('.'));
        assert_eq!(scan("abc").unwrap_err(), InvalidCharacter('a'));
    }

    #[test]
    fn test_scan_rejects_non_ascii_digits() {
        assert_eq!(scan("12\u{0663}4").unwrap_err(), InvalidCharacter('\u{0663}'));
        assert_eq!(scan("4²").unwrap_err(), InvalidCharacter('²'));
    }

    #[test]
    fn test_scan_accepts_unicode_whitespace() {
        let digits = scan("4111\u{00A0}1111").unwrap();
        assert_eq!(digits.to_digit_string(), "41111111");
    }

    #[test]
    fn test_scan_empty_and_separator_only() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan(" - - ").unwrap().is_empty());
    }

    #[test]
    fn test_first_invalid_char_matches_scan() {
        for input in ["", "4111", "4_1", "x", "12 34-56+"] {
            let expected = scan(input).err().map(|e| e.0);
            assert_eq!(first_invalid_char(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_into_validation_error() {
        let err: ValidationError = scan("41x").unwrap_err().into();
        assert_eq!(err, ValidationError::InvalidCharacter { character: 'x' });
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('7'), CharClass::Digit(7));
        assert_eq!(classify('-'), CharClass::Separator);
        assert_eq!(classify(' '), CharClass::Separator);
        assert_eq!(classify('+'), CharClass::Invalid);
    }
}
