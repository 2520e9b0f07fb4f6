//! Fuzz target for issuer rule parsing.
//!
//! Parsed rules must display back to the same text and never panic on match.

#![no_main]

use cardcheck::IssuerRule;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(rule) = IssuerRule::parse(data) else {
        return;
    };

    assert_eq!(rule.to_string(), data, "display must round-trip");
    assert!(!rule.is_empty());

    let digits: Vec<u8> = data.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
    let _ = rule.matches(&digits);
    let _ = rule.matches(&[]);
});
