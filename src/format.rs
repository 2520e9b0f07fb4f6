//! Card number formatting for display.
//!
//! Outcomes carry the number as `dddd-dddd-dddd-dddd`: groups of four
//! digits joined by hyphens. Formatting never influences validation.
//!
//! # Example
//!
//! ```
//! use cardcheck::format::{format_card_number, format_with_separator};
//! use cardcheck::scan::scan;
//!
//! let digits = scan("4532-0151 1283 0366").unwrap();
//! assert_eq!(format_card_number(&digits), "4532-0151-1283-0366");
//!
//! assert_eq!(
//!     format_with_separator(digits.as_slice(), " "),
//!     "4532 0151 1283 0366"
//! );
//! ```

use crate::digits::{digit_char, Digits};

/// Digits per display group.
pub const GROUP_SIZE: usize = 4;

/// Separator placed between groups in outcomes.
pub const SEPARATOR: &str = "-";

/// Formats a digit sequence as hyphen-separated groups of four.
///
/// A length that is not a multiple of four leaves a shorter final group.
#[inline]
pub fn format_card_number(digits: &Digits) -> String {
    format_with_separator(digits.as_slice(), SEPARATOR)
}

/// Formats digit values in groups of four with a custom separator.
///
/// # Panics
///
/// Panics if any value is greater than 9. [`format_card_number`] takes
/// [`Digits`], which cannot hold such values.
///
/// # Example
///
/// ```
/// use cardcheck::format::format_with_separator;
///
/// assert_eq!(format_with_separator(&[4, 1, 1, 1, 1, 1], " - "), "4111 - 11");
/// assert_eq!(format_with_separator(&[], "-"), "");
/// ```
pub fn format_with_separator(digits: &[u8], separator: &str) -> String {
    let groups = digits.len().div_ceil(GROUP_SIZE);
    let mut result =
        String::with_capacity(digits.len() + groups.saturating_sub(1) * separator.len());

    for (i, group) in digits.chunks(GROUP_SIZE).enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.extend(group.iter().map(|&d| digit_char(d)));
    }

    result
}

/// Removes everything but ASCII digits from a string.
///
/// # Example
///
/// ```
/// use cardcheck::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4532-0151 1283 0366"), "4532015112830366");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
