//! Masking for log output.
//!
//! Card numbers are never written to logs in full. PCI-DSS allows the first
//! 6 digits (the issuer prefix) and the last 4 to be shown, which is what
//! these helpers produce.

use crate::digits::digit_char;

/// Masks a digit sequence showing the first 6 and last 4 digits.
///
/// Sequences of 10 digits or fewer keep only the last 4; sequences of 4 or
/// fewer are fully masked.
///
/// # Panics
///
/// Panics if a value that would be shown is greater than 9.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_digits;
///
/// let digits = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];
/// assert_eq!(mask_digits(&digits), "453201******0366");
/// assert_eq!(mask_digits(&[1, 2, 3, 4, 5]), "*2345");
/// ```
pub fn mask_digits(digits: &[u8]) -> String {
    let len = digits.len();
    let mut result = String::with_capacity(len);

    if len <= 4 {
        result.extend(std::iter::repeat('*').take(len));
        return result;
    }

    let head = if len > 10 { 6 } else { 0 };
    let tail_start = len - 4;

    for (i, &d) in digits.iter().enumerate() {
        if i < head || i >= tail_start {
            result.push(digit_char(d));
        } else {
            result.push('*');
        }
    }

    result
}

/// Masks a raw card number string.
///
/// Non-digit characters are dropped before masking.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_number;
///
/// assert_eq!(mask_number("4532-0151-1283-0366"), "453201******0366");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<u8> = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| (c as u8) - b'0')
        .collect();
    mask_digits(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn test_mask_digits_rejects_out_of_range_values() {
        mask_digits(&[4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 208]);
    }

    #[test]
    fn test_mask_sixteen() {
        let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        let masked = mask_digits(&digits);
        assert_eq!(masked, "411111******1111");
        assert_eq!(masked.len(), 16);
    }

    #[test]
    fn test_mask_short() {
        assert_eq!(mask_digits(&[]), "");
        assert_eq!(mask_digits(&[1, 2, 3]), "***");
        assert_eq!(mask_digits(&[1, 2, 3, 4]), "****");
        assert_eq!(mask_digits(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0]), "******7890");
    }

    #[test]
    fn test_mask_number_strips_separators() {
        assert_eq!(mask_number("4111 1111 1111 1111"), "411111******1111");
        assert!(!mask_number("4111111111111111").contains("4111111111111111"));
    }
}
