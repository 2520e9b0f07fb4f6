//! Fuzz target for card validation.
//!
//! Tests that validation never panics and agrees with the scanner.

#![no_main]

use cardcheck::{scan, IssuerCatalog, ValidationOutcome, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let catalog = IssuerCatalog::builtin();
    let outcome = Validator::new(&catalog).validate(data);

    match (&outcome, scan::first_invalid_char(data)) {
        (ValidationOutcome::InvalidCharacter { character }, Some(first)) => {
            assert_eq!(*character, first, "wrong character reported");
        }
        (ValidationOutcome::InvalidCharacter { .. }, None) => {
            panic!("rejected input the scanner accepts");
        }
        (_, Some(_)) => panic!("accepted input the scanner rejects"),
        (_, None) => {}
    }

    // Without a catalog only the issuer field may differ.
    let without = Validator::without_catalog().validate(data);
    assert_eq!(outcome.kind(), without.kind());
    assert_eq!(outcome.formatted_number(), without.formatted_number());
});
