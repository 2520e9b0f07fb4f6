//! The default issuer table.

use super::{Issuer, IssuerCatalog, IssuerRule};

enum Rule {
    Prefix(&'static str),
    Range(u64, u64, usize),
}

use self::Rule::{Prefix as P, Range as R};

/// Declaration order matters: it breaks ties between issuers whose longest
/// rules have the same length (Maestro before Laser for `6304`).
const BUILTIN_ISSUERS: &[(&str, &[Rule])] = &[
    ("Visa", &[P("4")]),
    ("MasterCard", &[P("51"), P("52"), P("53"), P("54"), P("55")]),
    (
        "Discover Card",
        &[P("6011"), R(622126, 622925, 6), R(644, 649, 3), P("65")],
    ),
    (
        "Maestro",
        &[
            P("5018"),
            P("5020"),
            P("5038"),
            P("5893"),
            P("6304"),
            P("6759"),
            P("6761"),
            P("6762"),
            P("6763"),
            P("0604"),
        ],
    ),
    ("American Express", &[P("34"), P("37")]),
    (
        "Diners Club",
        &[R(300, 305, 3), P("3095"), P("36"), R(38, 39, 2)],
    ),
    ("JCB", &[R(3528, 3589, 4)]),
    ("InstaPayment", &[R(637, 639, 3)]),
    ("Laser", &[P("6304"), P("6706"), P("6771"), P("6709")]),
    ("Solo", &[P("6334"), P("6767")]),
    (
        "Switch",
        &[
            P("4903"),
            P("4905"),
            P("4911"),
            P("4936"),
            P("564182"),
            P("633110"),
            P("6333"),
            P("6759"),
        ],
    ),
    (
        "Visa Electron",
        &[
            P("4026"),
            P("417500"),
            P("4405"),
            P("4508"),
            P("4844"),
            P("4913"),
            P("4917"),
        ],
    ),
    ("BNP Fortis (FR)", &[P("440504")]),
];

impl Rule {
    fn to_issuer_rule(&self) -> IssuerRule {
        match *self {
            Rule::Prefix(digits) => IssuerRule::Prefix(digits.bytes().map(|b| b - b'0').collect()),
            Rule::Range(low, high, width) => IssuerRule::Range { low, high, width },
        }
    }
}

impl IssuerCatalog {
    /// The default catalog of 13 card issuers.
    ///
    /// Every call builds a fresh, independent catalog.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::catalog::IssuerCatalog;
    ///
    /// let catalog = IssuerCatalog::builtin();
    /// assert_eq!(catalog.len(), 13);
    /// assert!(catalog.get("JCB").is_some());
    /// ```
    pub fn builtin() -> Self {
        let issuers = BUILTIN_ISSUERS
            .iter()
            .map(|(name, rules)| {
                Issuer::new(
                    (*name).to_string(),
                    rules.iter().map(Rule::to_issuer_rule).collect(),
                )
            })
            .collect();
        Self::from_issuers(issuers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_are_well_formed() {
        let catalog = IssuerCatalog::builtin();
        for issuer in catalog.iter() {
            assert!(!issuer.rules().is_empty(), "{} has no rules", issuer.name());
            for rule in issuer.rules() {
                let reparsed = IssuerRule::parse(&rule.to_string());
                assert_eq!(reparsed.as_ref(), Ok(rule), "{}: {}", issuer.name(), rule);
            }
        }
    }

    #[test]
    fn test_builtin_declaration_order() {
        let catalog = IssuerCatalog::builtin();
        let names: Vec<&str> = catalog.iter().map(Issuer::name).collect();
        assert_eq!(names.first(), Some(&"Visa"));
        assert_eq!(names.last(), Some(&"BNP Fortis (FR)"));
        assert_eq!(names.len(), 13);
    }

    #[test]
    fn test_builtin_resolution_order() {
        let catalog = IssuerCatalog::builtin();
        let names: Vec<&str> = catalog.iter_by_specificity().map(Issuer::name).collect();
        assert_eq!(
            names,
            [
                "Discover Card",
                "Switch",
                "Visa Electron",
                "BNP Fortis (FR)",
                "Maestro",
                "Diners Club",
                "JCB",
                "Laser",
                "Solo",
                "InstaPayment",
                "MasterCard",
                "American Express",
                "Visa",
            ]
        );
    }

    #[test]
    fn test_builtin_is_fresh_each_call() {
        assert_eq!(IssuerCatalog::builtin(), IssuerCatalog::builtin());
    }
}
