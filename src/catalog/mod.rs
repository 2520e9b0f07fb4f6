//! Issuer catalog: which leading digits belong to which issuer.
//!
//! A catalog maps issuer names to numbering rules. A rule is either an
//! exact prefix (`"6011"`) or an inclusive range over leading digits
//! (`"622126-622925"`). The catalog is built once and is read-only after
//! that; callers own it and lend it to the resolver.
//!
//! # Sources
//!
//! - [`IssuerCatalog::builtin`] - the default table of 13 issuers
//! - [`CatalogBuilder`] / [`IssuerCatalog::from_entries`] - in-memory tables
//! - `JsonCatalogLoader` - JSON documents (requires `catalog-json`)
//! - `CsvCatalogLoader` - CSV documents (requires `catalog-csv`)
//!
//! # Example
//!
//! ```
//! use cardcheck::catalog::IssuerCatalog;
//!
//! let catalog = IssuerCatalog::from_entries([
//!     ("A", vec!["40"]),
//!     ("B", vec!["4000-4009"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! // B's longest rule (4 digits) outranks A's (2 digits).
//! let order: Vec<_> = catalog.iter_by_specificity().map(|i| i.name()).collect();
//! assert_eq!(order, ["B", "A"]);
//! ```

mod builtin;

#[cfg(feature = "catalog-json")]
mod json;

#[cfg(feature = "catalog-csv")]
mod csv;

#[cfg(feature = "catalog-json")]
pub use json::JsonCatalogLoader;

#[cfg(feature = "catalog-csv")]
pub use self::csv::CsvCatalogLoader;

use std::cmp::Reverse;
use std::fmt;
use tracing::debug;

/// Longest rule the catalog accepts for ranges (bounds must fit in a `u64`).
pub const MAX_RANGE_DIGITS: usize = 18;

/// A single issuer numbering rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssuerRule {
    /// Matches numbers starting with these digit values.
    Prefix(Vec<u8>),
    /// Matches numbers whose first `width` digits, read as an integer,
    /// fall within `low..=high`.
    Range {
        /// Lower bound (inclusive).
        low: u64,
        /// Upper bound (inclusive).
        high: u64,
        /// Digit length of both bounds.
        width: usize,
    },
}

impl IssuerRule {
    /// Parses a rule string.
    ///
    /// A bare digit run is an exact prefix; two digit runs of equal length
    /// joined by `-` are an inclusive range.
    ///
    /// # Example
    ///
    /// ```
    /// use cardcheck::catalog::{IssuerRule, RuleError};
    ///
    /// assert_eq!(IssuerRule::parse("34"), Ok(IssuerRule::Prefix(vec![3, 4])));
    /// assert_eq!(
    ///     IssuerRule::parse("644-649"),
    ///     Ok(IssuerRule::Range { low: 644, high: 649, width: 3 })
    /// );
    /// assert_eq!(
    ///     IssuerRule::parse("649-644"),
    ///     Err(RuleError::LowAboveHigh { low: 649, high: 644 })
    /// );
    /// ```
    pub fn parse(rule: &str) -> Result<Self, RuleError> {
        if rule.is_empty() {
            return Err(RuleError::Empty);
        }

        let Some((low, high)) = rule.split_once('-') else {
            return digit_values(rule).map(Self::Prefix);
        };

        if !is_digit_run(low) || !is_digit_run(high) {
            return Err(RuleError::NonNumeric);
        }
        if low.len() != high.len() {
            return Err(RuleError::BoundWidthMismatch {
                low: low.len(),
                high: high.len(),
            });
        }
        if low.len() > MAX_RANGE_DIGITS {
            return Err(RuleError::TooLong {
                length: low.len(),
                maximum: MAX_RANGE_DIGITS,
            });
        }

        let width = low.len();
        let low: u64 = low.parse().map_err(|_| RuleError::NonNumeric)?;
        let high: u64 = high.parse().map_err(|_| RuleError::NonNumeric)?;
        if low > high {
            return Err(RuleError::LowAboveHigh { low, high });
        }

        Ok(Self::Range { low, high, width })
    }

    /// Number of leading digits this rule looks at.
    ///
    /// Longer rules are more specific and are tried first.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Prefix(digits) => digits.len(),
            Self::Range { width, .. } => *width,
        }
    }

    /// Returns true if the rule looks at no digits (never the case for parsed rules).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for range rules.
    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    /// Checks whether a digit sequence satisfies this rule.
    ///
    /// A range rule never matches a sequence shorter than its bounds.
    pub fn matches(&self, digits: &[u8]) -> bool {
        match self {
            Self::Prefix(prefix) => digits.starts_with(prefix),
            Self::Range { low, high, width } => {
                if digits.len() < *width {
                    return false;
                }
                let leading = digits[..*width]
                    .iter()
                    .fold(0u64, |acc, &d| acc * 10 + d as u64);
                (*low..=*high).contains(&leading)
            }
        }
    }
}

impl fmt::Display for IssuerRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix(digits) => {
                for &d in digits {
                    write!(f, "{}", d)?;
                }
                Ok(())
            }
            Self::Range { low, high, width } => {
                write!(f, "{:0w$}-{:0w$}", low, high, w = *width)
            }
        }
    }
}

fn is_digit_run(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digit_values(s: &str) -> Result<Vec<u8>, RuleError> {
    if !is_digit_run(s) {
        return Err(RuleError::NonNumeric);
    }
    Ok(s.bytes().map(|b| b - b'0').collect())
}

/// One issuer and its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    name: String,
    /// Rules in declaration order.
    rules: Vec<IssuerRule>,
    /// Indices into `rules`, most specific first.
    probe_order: Vec<usize>,
}

impl Issuer {
    fn new(name: String, rules: Vec<IssuerRule>) -> Self {
        let mut probe_order: Vec<usize> = (0..rules.len()).collect();
        // Stable: equal-length rules put prefixes before ranges, then keep
        // declaration order.
        probe_order.sort_by_key(|&i| (Reverse(rules[i].len()), rules[i].is_range()));
        Self {
            name,
            rules,
            probe_order,
        }
    }

    /// The issuer's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order.
    #[inline]
    pub fn rules(&self) -> &[IssuerRule] {
        &self.rules
    }

    /// Rules in the order the resolver tries them.
    pub fn rules_by_specificity(&self) -> impl Iterator<Item = &IssuerRule> + '_ {
        self.probe_order.iter().map(move |&i| &self.rules[i])
    }

    /// Length of the most specific rule.
    pub fn longest_rule(&self) -> usize {
        self.rules.iter().map(IssuerRule::len).max().unwrap_or(0)
    }
}

/// An immutable issuer catalog.
///
/// Resolution order is computed once, at construction: issuers sorted by
/// their longest rule, longest first, ties kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuerCatalog {
    /// Issuers in declaration order.
    issuers: Vec<Issuer>,
    /// Indices into `issuers`, most specific first.
    order: Vec<usize>,
}

impl IssuerCatalog {
    fn from_issuers(issuers: Vec<Issuer>) -> Self {
        let mut order: Vec<usize> = (0..issuers.len()).collect();
        order.sort_by_key(|&i| Reverse(issuers[i].longest_rule()));
        Self { issuers, order }
    }

    /// Builds a catalog from `(name, rules)` pairs.
    ///
    /// Pair order is the declaration order. Fails on the first malformed
    /// rule, a repeated name, or an issuer without rules.
    pub fn from_entries<I, N, R, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (N, R)>,
        N: Into<String>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        entries
            .into_iter()
            .fold(CatalogBuilder::new(), |builder, (name, rules)| {
                builder.issuer(name, rules)
            })
            .build()
    }

    /// Returns the number of issuers.
    #[inline]
    pub fn len(&self) -> usize {
        self.issuers.len()
    }

    /// Returns true if the catalog has no issuers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issuers.is_empty()
    }

    /// Looks up an issuer by name.
    pub fn get(&self, name: &str) -> Option<&Issuer> {
        self.issuers.iter().find(|i| i.name == name)
    }

    /// Iterates issuers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Issuer> + '_ {
        self.issuers.iter()
    }

    /// Iterates issuers in resolution order.
    pub fn iter_by_specificity(&self) -> impl Iterator<Item = &Issuer> + '_ {
        self.order.iter().map(move |&i| &self.issuers[i])
    }
}

/// Collects issuer rules and validates them into an [`IssuerCatalog`].
///
/// # Example
///
/// ```
/// use cardcheck::catalog::CatalogBuilder;
///
/// let catalog = CatalogBuilder::new()
///     .issuer("Visa", ["4"])
///     .rule("Discover Card", "6011")
///     .rule("Discover Card", "644-649")
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.get("Discover Card").unwrap().rules().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    entries: Vec<(String, Vec<String>)>,
    duplicate: Option<String>,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an issuer with all of its rules.
    ///
    /// Declaring the same name twice makes [`build`](Self::build) fail.
    pub fn issuer<N, R, S>(mut self, name: N, rules: R) -> Self
    where
        N: Into<String>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        if self.duplicate.is_none() && self.entries.iter().any(|(n, _)| *n == name) {
            self.duplicate = Some(name.clone());
        }
        let rules = rules.into_iter().map(|r| r.as_ref().to_string()).collect();
        self.entries.push((name, rules));
        self
    }

    /// Appends one rule to an issuer, declaring the issuer on first use.
    pub fn rule(mut self, name: impl Into<String>, rule: impl Into<String>) -> Self {
        self.push_rule(name, rule);
        self
    }

    /// Appends one rule in place. See [`rule`](Self::rule).
    pub fn push_rule(&mut self, name: impl Into<String>, rule: impl Into<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, rules)) => rules.push(rule.into()),
            None => self.entries.push((name, vec![rule.into()])),
        }
    }

    /// Validates every rule and builds the catalog.
    pub fn build(self) -> Result<IssuerCatalog, CatalogError> {
        if let Some(name) = self.duplicate {
            return Err(CatalogError::DuplicateIssuer(name));
        }

        let mut issuers = Vec::with_capacity(self.entries.len());
        for (name, raw_rules) in self.entries {
            if raw_rules.is_empty() {
                return Err(CatalogError::EmptyIssuer(name));
            }

            let mut rules = Vec::with_capacity(raw_rules.len());
            for raw in raw_rules {
                match IssuerRule::parse(&raw) {
                    Ok(rule) => rules.push(rule),
                    Err(reason) => {
                        return Err(CatalogError::InvalidRule {
                            issuer: name,
                            rule: raw,
                            reason,
                        })
                    }
                }
            }
            issuers.push(Issuer::new(name, rules));
        }

        let catalog = IssuerCatalog::from_issuers(issuers);
        debug!(issuers = catalog.len(), "issuer catalog built");
        Ok(catalog)
    }
}

/// Why a rule string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule is an empty string.
    Empty,
    /// A prefix or bound is empty or contains a non-digit.
    NonNumeric,
    /// Range bounds have different digit lengths.
    BoundWidthMismatch {
        /// Digits in the lower bound.
        low: usize,
        /// Digits in the upper bound.
        high: usize,
    },
    /// The lower bound exceeds the upper bound.
    LowAboveHigh {
        /// Lower bound.
        low: u64,
        /// Upper bound.
        high: u64,
    },
    /// Range bounds are too long to compare numerically.
    TooLong {
        /// Digits in each bound.
        length: usize,
        /// Maximum supported.
        maximum: usize,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty rule"),
            Self::NonNumeric => write!(f, "expected digits or two digit runs joined by '-'"),
            Self::BoundWidthMismatch { low, high } => write!(
                f,
                "range bounds differ in length ({} vs {} digits)",
                low, high
            ),
            Self::LowAboveHigh { low, high } => {
                write!(f, "range lower bound {} exceeds upper bound {}", low, high)
            }
            Self::TooLong { length, maximum } => write!(
                f,
                "range bounds have {} digits, maximum is {}",
                length, maximum
            ),
        }
    }
}

impl std::error::Error for RuleError {}

/// Error type for catalog loading.
///
/// A caller that cannot load its catalog should still validate numbers;
/// see [`Validator::without_catalog`](crate::Validator::without_catalog).
#[derive(Debug)]
pub enum CatalogError {
    /// Failed to read the catalog source.
    Io(std::io::Error),
    /// The document structure is not a catalog.
    Parse(String),
    /// A rule string is malformed.
    InvalidRule {
        /// Issuer the rule belongs to.
        issuer: String,
        /// The rule as written.
        rule: String,
        /// What is wrong with it.
        reason: RuleError,
    },
    /// The same issuer name was declared twice.
    DuplicateIssuer(String),
    /// An issuer has no rules.
    EmptyIssuer(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(s) => write!(f, "Parse error: {}", s),
            Self::InvalidRule {
                issuer,
                rule,
                reason,
            } => write!(f, "invalid rule '{}' for issuer '{}': {}", rule, issuer, reason),
            Self::DuplicateIssuer(name) => write!(f, "issuer '{}' declared more than once", name),
            Self::EmptyIssuer(name) => write!(f, "issuer '{}' has no rules", name),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidRule { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
