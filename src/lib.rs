//! # cardcheck
//!
//! Payment card number checking for Rust.
//!
//! ## Features
//!
//! - Lexical scan of free-form input (digits, whitespace and hyphens)
//! - 16-digit length gate
//! - Luhn checksum validation
//! - `dddd-dddd-dddd-dddd` formatting
//! - Issuer resolution from a prefix/range catalog, most specific rule first
//! - Card number masking for logs
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{validate, IssuerCatalog, IssuerMatch, ValidationOutcome};
//!
//! let catalog = IssuerCatalog::builtin();
//!
//! match validate("4532 0151 1283 0366", &catalog) {
//!     ValidationOutcome::Valid { number, issuer } => {
//!         assert_eq!(number, "4532-0151-1283-0366");
//!         assert_eq!(issuer, IssuerMatch::Resolved("Visa".to_string()));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//!
//! // Quick boolean check, no issuer lookup
//! assert!(cardcheck::is_valid("4532015112830366"));
//! assert!(!cardcheck::is_valid("4532015112830367"));
//! ```
//!
//! ## Outcomes
//!
//! Every call ends in exactly one [`ValidationOutcome`]. Checks run in a fixed
//! order and the first failure wins:
//!
//! ```rust
//! use cardcheck::{validate, IssuerCatalog, OutcomeKind};
//!
//! let catalog = IssuerCatalog::builtin();
//!
//! assert_eq!(validate("4532-0151-1283-036!", &catalog).kind(), OutcomeKind::InvalidCharacter);
//! assert_eq!(validate("4532-0151-1283-036", &catalog).kind(), OutcomeKind::InvalidLength);
//! assert_eq!(validate("4532-0151-1283-0367", &catalog).kind(), OutcomeKind::ChecksumFailed);
//! assert_eq!(validate("4532-0151-1283-0366", &catalog).kind(), OutcomeKind::Valid);
//! ```
//!
//! ## Issuer Catalogs
//!
//! ```rust
//! use cardcheck::{validate, IssuerCatalog};
//!
//! // Longer rules win regardless of declaration order.
//! let catalog = IssuerCatalog::from_entries([
//!     ("Generic", vec!["4"]),
//!     ("Specific", vec!["453201"]),
//! ])
//! .unwrap();
//!
//! let outcome = validate("4532015112830366", &catalog);
//! assert_eq!(outcome.issuer().and_then(|i| i.name()), Some("Specific"));
//! ```
//!
//! Catalogs can also be loaded from JSON (`catalog-json`) or CSV
//! (`catalog-csv`) documents. When loading fails, numbers are still checked
//! and valid ones report [`IssuerMatch::CatalogUnavailable`]:
//!
//! ```rust
//! use cardcheck::{IssuerMatch, Validator};
//!
//! let outcome = Validator::without_catalog().validate("4532015112830366");
//! assert!(outcome.is_valid());
//! assert_eq!(outcome.issuer(), Some(&IssuerMatch::CatalogUnavailable));
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use cardcheck::{batch, IssuerCatalog, Validator};
//!
//! let catalog = IssuerCatalog::builtin();
//! let validator = Validator::new(&catalog);
//! let cards = ["4532015112830366", "4532015112830367", "oops"];
//!
//! let outcomes = batch::validate_all(&validator, &cards);
//! assert_eq!(outcomes.len(), 3);
//!
//! let (valid, invalid) = batch::count_valid(&validator, &cards);
//! assert_eq!((valid, invalid), (1, 2));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `catalog-json` | JSON issuer catalog loader |
//! | `catalog-csv` | CSV issuer catalog loader |
//! | `parallel` | Rayon-based batch validation |
//! | `cli` | Command-line tool |
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber.
//! Card numbers only ever appear masked.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod catalog;
pub mod digits;
pub mod error;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod resolve;
pub mod scan;
pub mod validate;

// Re-export main types at crate root
pub use catalog::{CatalogBuilder, CatalogError, Issuer, IssuerCatalog, IssuerRule, RuleError};
pub use digits::{Digits, CARD_DIGITS};
pub use error::{LuhnError, ValidationError};
pub use resolve::resolve;
pub use validate::{
    is_valid, validate, IssuerMatch, OutcomeKind, ValidCard, ValidationOutcome, Validator,
    ValidatorConfig,
};
