//! Issuer resolution by specificity-ordered prefix matching.
//!
//! Issuers are tried in order of their longest rule, longest first, and
//! each issuer's rules likewise. The first rule that matches wins. A 6-digit
//! prefix therefore beats a 1-digit prefix even when the two belong to
//! different issuers, independent of how the catalog was declared.
//!
//! Ties are settled once, when the catalog is built (see
//! [`IssuerCatalog`]): issuers with equally long rules keep declaration
//! order, and within an issuer an exact prefix is tried before a range of
//! the same length.

use crate::catalog::{IssuerCatalog, IssuerRule};

/// A successful resolution: the issuer and the rule that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'c> {
    /// Name of the matching issuer.
    pub issuer: &'c str,
    /// The rule that matched.
    pub rule: &'c IssuerRule,
}

/// Resolves the issuer for a digit sequence.
///
/// Returns `None` when no rule of any issuer matches.
///
/// # Example
///
/// ```
/// use cardcheck::catalog::IssuerCatalog;
/// use cardcheck::resolve::resolve;
///
/// let catalog = IssuerCatalog::from_entries([
///     ("A", vec!["40"]),
///     ("B", vec!["4000-4009"]),
/// ])
/// .unwrap();
///
/// let digits = [4, 0, 0, 5, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2];
/// assert_eq!(resolve(&digits, &catalog), Some("B"));
/// assert_eq!(resolve(&[5, 5], &catalog), None);
/// ```
#[inline]
pub fn resolve<'c>(digits: &[u8], catalog: &'c IssuerCatalog) -> Option<&'c str> {
    resolve_match(digits, catalog).map(|m| m.issuer)
}

/// Resolves the issuer and reports which rule matched.
pub fn resolve_match<'c>(digits: &[u8], catalog: &'c IssuerCatalog) -> Option<Resolution<'c>> {
    catalog.iter_by_specificity().find_map(|issuer| {
        issuer
            .rules_by_specificity()
            .find(|rule| rule.matches(digits))
            .map(|rule| Resolution {
                issuer: issuer.name(),
                rule,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn test_longer_rule_wins_across_issuers() {
        let catalog = IssuerCatalog::from_entries([("A", vec!["40"]), ("B", vec!["4000-4009"])]).unwrap();
        assert_eq!(resolve(&digits("4005123456789012"), &catalog), Some("B"));
        assert_eq!(resolve(&digits("4010123456789012"), &catalog), Some("A"));

        // Declaring B first changes nothing.
        let catalog = IssuerCatalog::from_entries([("B", vec!["4000-4009"]), ("A", vec!["40"])]).unwrap();
        assert_eq!(resolve(&digits("4005123456789012"), &catalog), Some("B"));
    }

    #[test]
    fn test_no_match() {
        let catalog = IssuerCatalog::from_entries([("A", vec!["40"])]).unwrap();
        assert_eq!(resolve(&digits("5105105105105100"), &catalog), None);
        assert_eq!(resolve(&[], &catalog), None);
        assert_eq!(resolve(&digits("40"), &IssuerCatalog::default()), None);
    }

    #[test]
    fn test_equal_length_prefix_before_range() {
        // Both rules are 4 digits long and both match 4005...
        let catalog = IssuerCatalog::from_entries([
            ("Ranged", vec!["4000-4009"]),
            ("Mixed", vec!["4000-4009", "4005"]),
        ])
        .unwrap();

        let found = resolve_match(&digits("4005000000000000"), &catalog).unwrap();
        // Issuer ties keep declaration order.
        assert_eq!(found.issuer, "Ranged");

        let mixed = IssuerCatalog::from_entries([("Mixed", vec!["4000-4009", "4005"])]).unwrap();
        let found = resolve_match(&digits("4005000000000000"), &mixed).unwrap();
        assert_eq!(found.rule, &IssuerRule::Prefix(vec![4, 0, 0, 5]));
    }

    #[test]
    fn test_builtin_issuers() {
        let catalog = IssuerCatalog::builtin();
        let cases = [
            ("4111111111111111", Some("Visa")),
            ("4917610000000000", Some("Visa Electron")),
            ("4405990000000000", Some("Visa Electron")),
            ("5500000000000004", Some("MasterCard")),
            ("5018000000000000", Some("Maestro")),
            ("0604000000000000", Some("Maestro")),
            ("6011111111111117", Some("Discover Card")),
            ("6225000000000000", Some("Discover Card")),
            ("6450000000000000", Some("Discover Card")),
            ("3782822463100050", Some("American Express")),
            ("3056930902590400", Some("Diners Club")),
            ("3095000000000000", Some("Diners Club")),
            ("3900000000000000", Some("Diners Club")),
            ("3530111333300000", Some("JCB")),
            ("6380000000000000", Some("InstaPayment")),
            ("6771000000000000", Some("Laser")),
            ("6334000000000000", Some("Solo")),
            ("5641820000000000", Some("Switch")),
            ("5610591081018250", None),
            ("9999999999999995", None),
        ];

        for (number, expected) in cases {
            assert_eq!(resolve(&digits(number), &catalog), expected, "{number}");
        }
    }

    #[test]
    fn test_builtin_overlaps() {
        let catalog = IssuerCatalog::builtin();
        // Switch's longest rule has 6 digits, Maestro's 4.
        assert_eq!(resolve(&digits("6759000000000000"), &catalog), Some("Switch"));
        // Maestro and Laser both top out at 4 digits; Maestro is declared first.
        assert_eq!(resolve(&digits("6304000000000000"), &catalog), Some("Maestro"));
        // Ordering is per issuer: Visa Electron (longest rule 6 digits, declared
        // first) claims 440504 through its 4-digit 4405 before BNP Fortis is tried.
        assert_eq!(resolve(&digits("4405040000000000"), &catalog), Some("Visa Electron"));
        // One past the upper bound of 622126-622925.
        assert_eq!(resolve(&digits("6229260000000000"), &catalog), None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let catalog = IssuerCatalog::builtin();
        let number = digits("6011000990139424");
        let first = resolve_match(&number, &catalog);
        for _ in 0..10 {
            assert_eq!(resolve_match(&number, &catalog), first);
        }
    }
}
