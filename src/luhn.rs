//! Luhn checksum engine.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) doubles
//! every second digit, folds doubled values of 10 or more back to one digit,
//! and accepts the number iff the total is divisible by 10.
//!
//! For a 16-digit card number the doubled digits are positions 1, 3, ..., 15
//! counted from the left (1-indexed). The general form anchors on the
//! rightmost digit instead, which is the same thing for every even length.
//!
//! The divisor is always 10. A variant that divides by the last digit plus
//! two makes validity depend on an unrelated digit and is not a Luhn check.

use crate::digits::CARD_DIGITS;
use crate::error::LuhnError;

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Checks a 16-digit sequence.
///
/// Fails with [`LuhnError`] instead of guessing when the input is not
/// exactly 16 digit values; run the length gate first.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::check;
///
/// let valid = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];
/// assert_eq!(check(&valid), Ok(true));
///
/// let invalid = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 7];
/// assert_eq!(check(&invalid), Ok(false));
///
/// assert!(check(&[4, 1, 1]).is_err());
/// ```
pub fn check(digits: &[u8]) -> Result<bool, LuhnError> {
    check_with_length(digits, CARD_DIGITS)
}

/// Checks a digit sequence that must have exactly `expected` digits.
pub fn check_with_length(digits: &[u8], expected: usize) -> Result<bool, LuhnError> {
    if digits.is_empty() {
        return Err(LuhnError::Empty);
    }
    if digits.len() != expected {
        return Err(LuhnError::WrongLength {
            length: digits.len(),
            expected,
        });
    }
    if let Some((index, &value)) = digits.iter().enumerate().find(|&(_, &d)| d > 9) {
        return Err(LuhnError::NotADigit { index, value });
    }

    if let Ok(fixed) = <&[u8; CARD_DIGITS]>::try_from(digits) {
        return Ok(validate_16(fixed));
    }
    Ok(compute_checksum(digits) % 10 == 0)
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// The rightmost digit is never doubled; the one left of it is, and so on.
///
/// # Panics
///
/// Panics if any value is greater than 9. [`check_with_length`] reports
/// such values as [`LuhnError::NotADigit`] instead.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Checks a 16-digit card number with the positions unrolled.
///
/// Positions 1, 3, ..., 15 (indices 0, 2, ..., 14) are doubled;
/// positions 2, 4, ..., 16 are taken as they are.
///
/// # Panics
///
/// Panics if a doubled position holds a value greater than 9.
#[inline]
pub fn validate_16(digits: &[u8; 16]) -> bool {
    let sum = DOUBLE_TABLE[digits[0] as usize] as u32
        + digits[1] as u32
        + DOUBLE_TABLE[digits[2] as usize] as u32
        + digits[3] as u32
        + DOUBLE_TABLE[digits[4] as usize] as u32
        + digits[5] as u32
        + DOUBLE_TABLE[digits[6] as usize] as u32
        + digits[7] as u32
        + DOUBLE_TABLE[digits[8] as usize] as u32
        + digits[9] as u32
        + DOUBLE_TABLE[digits[10] as usize] as u32
        + digits[11] as u32
        + DOUBLE_TABLE[digits[12] as usize] as u32
        + digits[13] as u32
        + DOUBLE_TABLE[digits[14] as usize] as u32
        + digits[15] as u32;

    sum % 10 == 0
}

/// Computes the check digit that completes a partial number.
///
/// # Panics
///
/// Panics if any value is greater than 9.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(check_digit(&partial), 6);
/// ```
pub fn check_digit(partial: &[u8]) -> u8 {
    // Every digit moves one place left once the check digit is appended,
    // so the doubling parity flips.
    let sum: u32 = partial
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
