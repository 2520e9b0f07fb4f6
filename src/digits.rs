//! Normalized digit sequences.
//!
//! A [`Digits`] value is what is left of a raw input once separators are
//! stripped: the decimal digits in their original order, stored as values
//! `0..=9`. It is created once per validation attempt and wiped from memory
//! when dropped.

use std::fmt;
use zeroize::Zeroize;

/// Number of digits a card number must have unless configured otherwise.
pub const CARD_DIGITS: usize = 16;

const DIGIT_CHARS: &[u8; 10] = b"0123456789";

/// ASCII character for a digit value.
///
/// Panics if `d` is greater than 9.
#[inline]
pub(crate) fn digit_char(d: u8) -> char {
    DIGIT_CHARS[d as usize] as char
}

/// An ordered sequence of decimal digit values.
///
/// # Security
///
/// - Storage is zeroed on drop using the `zeroize` crate
/// - `Debug` output is masked
#[derive(Clone, PartialEq, Eq)]
pub struct Digits {
    values: Vec<u8>,
}

impl Digits {
    /// Builds a digit sequence from raw values.
    ///
    /// Returns `None` if any value is outside `0..=9`.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::Digits;
    ///
    /// let digits = Digits::new(vec![4, 0, 0, 5]).unwrap();
    /// assert_eq!(digits.len(), 4);
    /// assert!(Digits::new(vec![4, 10]).is_none());
    /// ```
    pub fn new(values: Vec<u8>) -> Option<Self> {
        if values.iter().all(|&d| d <= 9) {
            Some(Self { values })
        } else {
            None
        }
    }

    /// Wraps values already known to be digits.
    #[inline]
    pub(crate) fn from_values_unchecked(values: Vec<u8>) -> Self {
        debug_assert!(values.iter().all(|&d| d <= 9));
        Self { values }
    }

    /// Returns the digit values.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    /// Returns the number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no digits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the digits as an ASCII string.
    ///
    /// # Security Warning
    ///
    /// This exposes the full number. Never log the result; use
    /// [`mask::mask_digits`](crate::mask::mask_digits) instead.
    pub fn to_digit_string(&self) -> String {
        self.values.iter().map(|&d| digit_char(d)).collect()
    }
}

impl AsRef<[u8]> for Digits {
    fn as_ref(&self) -> &[u8] {
        &self.values
    }
}

// Wipe the digits before the allocation is released
impl Drop for Digits {
    fn drop(&mut self) {
        self.values.zeroize();
    }
}

impl fmt::Debug for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digits")
            .field("masked", &crate::mask::mask_digits(&self.values))
            .field("len", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_digits() {
        assert!(Digits::new(vec![0, 9]).is_some());
        assert!(Digits::new(vec![1, 2, 10]).is_none());
        assert!(Digits::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_to_digit_string() {
        let digits = Digits::new(vec![0, 6, 0, 4]).unwrap();
        assert_eq!(digits.to_digit_string(), "0604");
    }

    #[test]
    fn test_debug_is_masked() {
        let digits = Digits::new(vec![4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6]).unwrap();
        let debug = format!("{:?}", digits);
        assert!(!debug.contains("4532015112830366"));
        assert!(debug.contains("453201******0366"));
    }

    #[test]
    fn test_digit_char() {
        assert_eq!(digit_char(0), '0');
        assert_eq!(digit_char(9), '9');
    }

    #[test]
    #[should_panic]
    fn test_digit_char_rejects_ten() {
        digit_char(10);
    }

    #[test]
    fn test_digits_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Digits>();
    }
}
