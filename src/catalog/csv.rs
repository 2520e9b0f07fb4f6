//! CSV issuer catalog loader.
//!
//! # Feature
//!
//! Requires the `catalog-csv` feature.
//!
//! # Format
//!
//! ```csv
//! issuer,rule
//! Visa,4
//! Discover Card,6011
//! Discover Card,622126-622925
//! JCB,3528-3589
//! ```
//!
//! One rule per row. Column order doesn't matter as long as headers are
//! present; extra columns are ignored. Rows of the same issuer are grouped,
//! and issuers are declared in order of first appearance.

use super::{CatalogBuilder, CatalogError, IssuerCatalog};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// CSV issuer catalog loader.
pub struct CsvCatalogLoader;

#[derive(Debug, Deserialize)]
struct CsvRow {
    issuer: String,
    rule: String,
}

impl CsvCatalogLoader {
    /// Loads a catalog from a CSV file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cardcheck::catalog::CsvCatalogLoader;
    ///
    /// let catalog = CsvCatalogLoader::from_file("issuers.csv")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<IssuerCatalog, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), issuers = catalog.len(), "loaded CSV issuer catalog");
        Ok(catalog)
    }

    /// Loads a catalog from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<IssuerCatalog, CatalogError> {
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(reader);

        let mut builder = CatalogBuilder::new();
        for result in csv_reader.deserialize::<CsvRow>() {
            let row = result.map_err(|e| CatalogError::Parse(format!("CSV parse error: {}", e)))?;
            builder.push_rule(row.issuer, row.rule);
        }

        builder.build()
    }

    /// Loads a catalog from a CSV string.
    pub fn parse(csv: &str) -> Result<IssuerCatalog, CatalogError> {
        Self::from_reader(csv.as_bytes())
    }
}
