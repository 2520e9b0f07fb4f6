//! JSON issuer catalog loader.
//!
//! # Feature
//!
//! Requires the `catalog-json` feature.
//!
//! # Format
//!
//! An object mapping issuer names to arrays of rule strings. Document order
//! is the declaration order used to break specificity ties.
//!
//! ```json
//! {
//!   "Visa": ["4"],
//!   "Discover Card": ["6011", "622126-622925", "644-649", "65"],
//!   "JCB": ["3528-3589"]
//! }
//! ```

use super::{CatalogBuilder, CatalogError, IssuerCatalog};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// JSON issuer catalog loader.
pub struct JsonCatalogLoader;

impl JsonCatalogLoader {
    /// Loads a catalog from a JSON file.
    ///
    /// A missing file is reported as [`CatalogError::Io`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cardcheck::catalog::JsonCatalogLoader;
    ///
    /// let catalog = JsonCatalogLoader::from_file("issuers.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<IssuerCatalog, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let catalog = Self::parse(&content)?;
        info!(path = %path.display(), issuers = catalog.len(), "loaded JSON issuer catalog");
        Ok(catalog)
    }

    /// Loads a catalog from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<IssuerCatalog, CatalogError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Loads a catalog from a JSON string.
    ///
    /// An issuer name that appears twice is [`CatalogError::DuplicateIssuer`].
    pub fn parse(json: &str) -> Result<IssuerCatalog, CatalogError> {
        let CatalogDocument(builder) = serde_json::from_str(json)
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {}", e)))?;
        builder.build()
    }
}

/// The top-level JSON object, read entry by entry so that document order
/// and repeated keys both reach the builder.
struct CatalogDocument(CatalogBuilder);

impl<'de> Deserialize<'de> for CatalogDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = CatalogDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping issuer names to rule arrays")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = CatalogBuilder::new();
        while let Some((name, rules)) = map.next_entry::<String, Vec<String>>()? {
            builder = builder.issuer(name, rules);
        }
        Ok(CatalogDocument(builder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Issuer, RuleError};

    #[test]
    fn test_parse_catalog() {
        let json = r#"{
            "Visa": ["4"],
            "Discover Card": ["6011", "622126-622925", "644-649", "65"],
            "JCB": ["3528-3589"]
        }"#;

        let catalog = JsonCatalogLoader::parse(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("Discover Card").unwrap().rules().len(), 4);
    }

    #[test]
    fn test_document_order_is_declaration_order() {
        let json = r#"{ "Zeta": ["6304"], "Alpha": ["6304"], "Mid": ["4"] }"#;
        let catalog = JsonCatalogLoader::parse(json).unwrap();

        let declared: Vec<&str> = catalog.iter().map(Issuer::name).collect();
        assert_eq!(declared, ["Zeta", "Alpha", "Mid"]);

        let resolved: Vec<&str> = catalog.iter_by_specificity().map(Issuer::name).collect();
        assert_eq!(resolved, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_empty_object() {
        let catalog = JsonCatalogLoader::parse("{}").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for json in [
            "not valid json",
            r#"["4"]"#,
            r#"{ "Visa": "4" }"#,
            r#"{ "Visa": [4] }"#,
            r#"{ "Visa": [null] }"#,
        ] {
            let err = JsonCatalogLoader::parse(json).unwrap_err();
            assert!(matches!(err, CatalogError::Parse(_)), "{json}: {err:?}");
        }
    }

    #[test]
    fn test_malformed_rule_is_load_error() {
        let err = JsonCatalogLoader::parse(r#"{ "Diners Club": ["305-300"] }"#).unwrap_err();
        match err {
            CatalogError::InvalidRule { issuer, reason, .. } => {
                assert_eq!(issuer, "Diners Club");
                assert_eq!(reason, RuleError::LowAboveHigh { low: 305, high: 300 });
            }
            other => panic!("Expected InvalidRule, got {other:?}"),
        }

        let err = JsonCatalogLoader::parse(r#"{ "X": ["4x"] }"#).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidRule {
                reason: RuleError::NonNumeric,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_issuer_is_load_error() {
        let err = JsonCatalogLoader::parse(r#"{ "A": ["4"], "B": ["5"], "A": ["6"] }"#).unwrap_err();
        match err {
            CatalogError::DuplicateIssuer(name) => assert_eq!(name, "A"),
            other => panic!("Expected DuplicateIssuer, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = JsonCatalogLoader::from_file("/nonexistent/issuers.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{ "American Express": ["34", "37"] }"#;
        let catalog = JsonCatalogLoader::from_reader(&json[..]).unwrap();
        assert!(catalog.get("American Express").is_some());
    }
}
