//! The validation facade.
//!
//! One call runs the whole pipeline and always ends in exactly one
//! [`ValidationOutcome`]:
//!
//! ```text
//! raw ─ scan ─┬─ invalid char ───────────────────────────── InvalidCharacter
//!             └─ digits ─ length ─┬─ wrong count ────────── InvalidLength
//!                                 └─ ok ─ luhn ─┬─ fail ─── ChecksumFailed
//!                                               └─ pass ─ resolve ─ Valid
//! ```
//!
//! The facade never retries; asking the user again is the caller's job. The
//! issuer catalog is borrowed, never owned, and an unavailable catalog only
//! affects the issuer field of a valid outcome.

use crate::catalog::{CatalogError, IssuerCatalog};
use crate::digits::{Digits, CARD_DIGITS};
use crate::error::ValidationError;
use crate::format::format_card_number;
use crate::luhn;
use crate::mask::{mask_digits, mask_number};
use crate::resolve::resolve;
use crate::scan::scan;
use std::fmt;
use tracing::{debug, warn};

/// Validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Required number of digits.
    pub length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            length: CARD_DIGITS,
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration (16 digits).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required number of digits.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// Returns true if the digit sequence has the default card length of 16.
#[inline]
pub fn check_length(digits: &Digits) -> bool {
    digits.len() == CARD_DIGITS
}

/// What issuer resolution produced for a valid number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", content = "name", rename_all = "snake_case")
)]
pub enum IssuerMatch {
    /// A catalog rule matched.
    Resolved(String),
    /// The catalog was available but no rule matched.
    NoMatch,
    /// No catalog was available, so nothing could be resolved.
    CatalogUnavailable,
}

impl IssuerMatch {
    /// The resolved issuer name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Resolved(name) => Some(name),
            Self::NoMatch | Self::CatalogUnavailable => None,
        }
    }

    /// Returns true if resolution was skipped for lack of a catalog.
    pub fn is_catalog_unavailable(&self) -> bool {
        matches!(self, Self::CatalogUnavailable)
    }
}

/// Discriminant of a [`ValidationOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    /// See [`ValidationOutcome::InvalidCharacter`].
    InvalidCharacter,
    /// See [`ValidationOutcome::InvalidLength`].
    InvalidLength,
    /// See [`ValidationOutcome::ChecksumFailed`].
    ChecksumFailed,
    /// See [`ValidationOutcome::Valid`].
    Valid,
}

impl OutcomeKind {
    /// Stable snake_case name, suitable for logs and machine output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid_character",
            Self::InvalidLength => "invalid_length",
            Self::ChecksumFailed => "checksum_failed",
            Self::Valid => "valid",
        }
    }
}

/// The result of one validation attempt.
///
/// `Debug` output masks the card number.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ValidationOutcome {
    /// The input contains a character other than a digit, whitespace or `-`.
    InvalidCharacter {
        /// The first offending character.
        character: char,
    },
    /// The input has the wrong number of digits.
    InvalidLength {
        /// Digits found.
        length: usize,
        /// Digits required.
        expected: usize,
    },
    /// The number failed the Luhn checksum.
    ChecksumFailed {
        /// The number as `dddd-dddd-dddd-dddd`.
        number: String,
    },
    /// The number passed every check.
    Valid {
        /// The number as `dddd-dddd-dddd-dddd`.
        number: String,
        /// The issuer, or why there is none.
        issuer: IssuerMatch,
    },
}

/// A number that passed validation, split out of a [`ValidationOutcome`].
#[derive(Clone, PartialEq, Eq)]
pub struct ValidCard {
    /// The number as `dddd-dddd-dddd-dddd`.
    pub number: String,
    /// The issuer, or why there is none.
    pub issuer: IssuerMatch,
}

impl fmt::Debug for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character } => f
                .debug_struct("InvalidCharacter")
                .field("character", character)
                .finish(),
            Self::InvalidLength { length, expected } => f
                .debug_struct("InvalidLength")
                .field("length", length)
                .field("expected", expected)
                .finish(),
            Self::ChecksumFailed { number } => f
                .debug_struct("ChecksumFailed")
                .field("number", &mask_number(number))
                .finish(),
            Self::Valid { number, issuer } => f
                .debug_struct("Valid")
                .field("number", &mask_number(number))
                .field("issuer", issuer)
                .finish(),
        }
    }
}

impl fmt::Debug for ValidCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidCard")
            .field("number", &mask_number(&self.number))
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl ValidationOutcome {
    /// The outcome's discriminant.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::InvalidCharacter { .. } => OutcomeKind::InvalidCharacter,
            Self::InvalidLength { .. } => OutcomeKind::InvalidLength,
            Self::ChecksumFailed { .. } => OutcomeKind::ChecksumFailed,
            Self::Valid { .. } => OutcomeKind::Valid,
        }
    }

    /// Returns true for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The rejected character, for `InvalidCharacter`.
    pub fn invalid_character(&self) -> Option<char> {
        match self {
            Self::InvalidCharacter { character } => Some(*character),
            _ => None,
        }
    }

    /// The digit count, for `InvalidLength`.
    pub fn digit_count(&self) -> Option<usize> {
        match self {
            Self::InvalidLength { length, .. } => Some(*length),
            _ => None,
        }
    }

    /// The formatted number, for `ChecksumFailed` and `Valid`.
    pub fn formatted_number(&self) -> Option<&str> {
        match self {
            Self::ChecksumFailed { number } | Self::Valid { number, .. } => Some(number),
            _ => None,
        }
    }

    /// The issuer result, for `Valid`.
    pub fn issuer(&self) -> Option<&IssuerMatch> {
        match self {
            Self::Valid { issuer, .. } => Some(issuer),
            _ => None,
        }
    }

    /// Converts the outcome into a `Result`.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::{validate, IssuerCatalog, ValidationError};
    ///
    /// let catalog = IssuerCatalog::builtin();
    /// let card = validate("4532 0151 1283 0366", &catalog).into_result().unwrap();
    /// assert_eq!(card.number, "4532-0151-1283-0366");
    /// assert_eq!(card.issuer.name(), Some("Visa"));
    ///
    /// let err = validate("4532 0151 1283 0367", &catalog).into_result().unwrap_err();
    /// assert_eq!(err, ValidationError::ChecksumFailed);
    /// ```
    pub fn into_result(self) -> Result<ValidCard, ValidationError> {
        match self {
            Self::InvalidCharacter { character } => {
                Err(ValidationError::InvalidCharacter { character })
            }
            Self::InvalidLength { length, expected } => {
                Err(ValidationError::InvalidLength { length, expected })
            }
            Self::ChecksumFailed { .. } => Err(ValidationError::ChecksumFailed),
            Self::Valid { number, issuer } => Ok(ValidCard { number, issuer }),
        }
    }
}

/// Runs the validation pipeline against a borrowed issuer catalog.
///
/// `Validator` is `Copy` and holds only a shared reference, so one catalog
/// can serve any number of concurrent validations.
///
/// # Example
///
/// ```
/// use cardcheck::{IssuerCatalog, IssuerMatch, ValidationOutcome, Validator};
///
/// let catalog = IssuerCatalog::builtin();
/// let validator = Validator::new(&catalog);
///
/// assert_eq!(
///     validator.validate("4532-0151-1283-0366"),
///     ValidationOutcome::Valid {
///         number: "4532-0151-1283-0366".to_string(),
///         issuer: IssuerMatch::Resolved("Visa".to_string()),
///     }
/// );
/// assert_eq!(
///     validator.validate("4532-0151-1283-036"),
///     ValidationOutcome::InvalidLength { length: 15, expected: 16 }
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'c> {
    catalog: Option<&'c IssuerCatalog>,
    config: ValidatorConfig,
}

impl<'c> Validator<'c> {
    /// Creates a validator that resolves issuers with `catalog`.
    pub fn new(catalog: &'c IssuerCatalog) -> Self {
        Self {
            catalog: Some(catalog),
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a validator for use when no catalog could be loaded.
    ///
    /// Numbers are still checked; valid ones carry
    /// [`IssuerMatch::CatalogUnavailable`].
    pub fn without_catalog() -> Self {
        Self {
            catalog: None,
            config: ValidatorConfig::default(),
        }
    }

    /// Creates a validator from the result of loading a catalog.
    ///
    /// A load failure is logged once here and then surfaces as
    /// [`IssuerMatch::CatalogUnavailable`] on every valid outcome.
    pub fn from_load_result(result: &'c Result<IssuerCatalog, CatalogError>) -> Self {
        match result {
            Ok(catalog) => Self::new(catalog),
            Err(e) => {
                warn!(error = %e, "issuer catalog unavailable, issuers will not be resolved");
                Self::without_catalog()
            }
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The borrowed catalog, if one is available.
    pub fn catalog(&self) -> Option<&'c IssuerCatalog> {
        self.catalog
    }

    /// Validates one raw input.
    pub fn validate(&self, raw: &str) -> ValidationOutcome {
        let digits = match scan(raw) {
            Ok(digits) => digits,
            Err(err) => {
                debug!(outcome = OutcomeKind::InvalidCharacter.as_str(), "rejected input");
                return ValidationOutcome::InvalidCharacter { character: err.0 };
            }
        };

        let expected = self.config.length;
        if digits.len() != expected {
            debug!(
                outcome = OutcomeKind::InvalidLength.as_str(),
                length = digits.len(),
                expected,
                "rejected input"
            );
            return ValidationOutcome::InvalidLength {
                length: digits.len(),
                expected,
            };
        }

        let passed = match luhn::check_with_length(digits.as_slice(), expected) {
            Ok(passed) => passed,
            Err(e) => {
                warn!(error = %e, "checksum precondition violated");
                false
            }
        };

        let number = format_card_number(&digits);
        if !passed {
            debug!(
                outcome = OutcomeKind::ChecksumFailed.as_str(),
                number = %mask_digits(digits.as_slice()),
                "rejected input"
            );
            return ValidationOutcome::ChecksumFailed { number };
        }

        let issuer = match self.catalog {
            Some(catalog) => match resolve(digits.as_slice(), catalog) {
                Some(name) => IssuerMatch::Resolved(name.to_string()),
                None => IssuerMatch::NoMatch,
            },
            None => IssuerMatch::CatalogUnavailable,
        };

        debug!(
            outcome = OutcomeKind::Valid.as_str(),
            number = %mask_digits(digits.as_slice()),
            issuer = ?issuer,
            "accepted input"
        );
        ValidationOutcome::Valid { number, issuer }
    }

    /// Quick yes/no check.
    #[inline]
    pub fn is_valid(&self, raw: &str) -> bool {
        self.validate(raw).is_valid()
    }
}

/// Validates one raw input against a catalog with the default configuration.
///
/// # Example
///
/// ```
/// use cardcheck::{validate, IssuerCatalog, OutcomeKind};
///
/// let catalog = IssuerCatalog::builtin();
/// let outcome = validate("4532-0151-1283-03x6", &catalog);
/// assert_eq!(outcome.kind(), OutcomeKind::InvalidCharacter);
/// assert_eq!(outcome.invalid_character(), Some('x'));
/// ```
#[inline]
pub fn validate(raw: &str, catalog: &IssuerCatalog) -> ValidationOutcome {
    Validator::new(catalog).validate(raw)
}

/// Checks characters, length and checksum without resolving an issuer.
///
/// # Example
///
/// ```
/// use cardcheck::is_valid;
///
/// assert!(is_valid("4532-0151-1283-0366"));
/// assert!(!is_valid("4532-0151-1283-0367"));
/// ```
#[inline]
pub fn is_valid(raw: &str) -> bool {
    Validator::without_catalog().is_valid(raw)
}
