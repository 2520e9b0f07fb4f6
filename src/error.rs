//! Error types for card number checking.
//!
//! [`ValidationError`] covers the recoverable outcomes of a single check
//! (a caller may simply ask for the number again). [`LuhnError`] reports a
//! violated precondition of the checksum engine. Catalog loading has its own
//! error type, [`CatalogError`](crate::catalog::CatalogError).

use std::fmt;

/// Errors that end a single validation attempt.
///
/// None of these are defects: they describe why the given input is not an
/// acceptable card number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input contains a character that is not a digit, whitespace or `-`.
    ///
    /// Only the first such character is reported.
    InvalidCharacter {
        /// The offending character.
        character: char,
    },

    /// The number of digits differs from the configured card length.
    InvalidLength {
        /// Digits found after stripping separators.
        length: usize,
        /// Digits required (16 by default).
        expected: usize,
    },

    /// The digits are well formed but fail the Luhn checksum.
    ChecksumFailed,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character } => {
                write!(
                    f,
                    "invalid character '{}' (only digits, whitespace, and hyphens allowed)",
                    character.escape_default()
                )
            }

            Self::InvalidLength { length, expected } => {
                write!(
                    f,
                    "card number must have {} digits, got {}",
                    expected, length
                )
            }

            Self::ChecksumFailed => {
                write!(f, "invalid checksum (Luhn check failed)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Precondition violations of the checksum engine.
///
/// [`luhn::check`](crate::luhn::check) refuses input it was not built for
/// instead of returning a meaningless pass/fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LuhnError {
    /// No digits were supplied.
    Empty,

    /// The sequence does not have the required length.
    WrongLength {
        /// Digits supplied.
        length: usize,
        /// Digits required.
        expected: usize,
    },

    /// An element is not a digit value in `0..=9`.
    NotADigit {
        /// Index of the element (0-indexed).
        index: usize,
        /// The out-of-range value.
        value: u8,
    },
}

impl fmt::Display for LuhnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no digits to check"),
            Self::WrongLength { length, expected } => {
                write!(
                    f,
                    "checksum requires exactly {} digits, got {}",
                    expected, length
                )
            }
            Self::NotADigit { index, value } => {
                write!(f, "value {} at index {} is not a decimal digit", value, index)
            }
        }
    }
}

impl std::error::Error for LuhnError {}
