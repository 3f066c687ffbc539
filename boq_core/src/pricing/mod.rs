//! # Price Book
//!
//! Unit prices and regional multipliers used by the stage calculators.
//!
//! A [`PriceBook`] is immutable once built. The built-in book comes from the
//! [`catalog`] and [`regions`] tables; an override can be loaded from TOML and
//! must price every [`MaterialKey`].
//!
//! ## TOML Format
//!
//! ```toml
//! currency = "XAF"
//!
//! [prices]
//! cement_50kg = 5500
//! "cable_2.5mm_meter" = 500
//! # ... one entry per material code
//!
//! [regions]
//! douala = 1.0
//! garoua = 1.15
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::pricing::{MaterialKey, PriceBook};
//!
//! let book = PriceBook::standard();
//! let douala = book.unit_price(MaterialKey::Cement50kg, "Douala").unwrap();
//! let garoua = book.unit_price(MaterialKey::Cement50kg, "garoua").unwrap();
//! assert!(garoua > douala);
//!
//! // Unknown regions are priced like the reference region
//! assert_eq!(book.region_multiplier("Atlantis"), 1.0);
//! ```

pub mod catalog;
pub mod regions;

pub use catalog::MaterialKey;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Currency of the built-in price table
pub const DEFAULT_CURRENCY: &str = "XAF";

static STANDARD: Lazy<PriceBook> = Lazy::new(PriceBook::default);

/// Immutable price configuration: base prices per material code plus
/// per-region multipliers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBook {
    currency: String,
    prices: BTreeMap<String, f64>,
    regions: BTreeMap<String, f64>,
}

/// On-disk shape of a price book before validation
#[derive(Debug, Deserialize)]
struct PriceBookFile {
    #[serde(default = "default_currency")]
    currency: String,
    prices: BTreeMap<String, f64>,
    #[serde(default)]
    regions: BTreeMap<String, f64>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for PriceBook {
    fn default() -> Self {
        PriceBook {
            currency: DEFAULT_CURRENCY.to_string(),
            prices: MaterialKey::ALL
                .iter()
                .map(|k| (k.code().to_string(), k.base_price()))
                .collect(),
            regions: regions::BUILT_IN_REGIONS
                .iter()
                .map(|(name, factor)| (name.to_string(), *factor))
                .collect(),
        }
    }
}

impl PriceBook {
    /// Shared built-in price book
    pub fn standard() -> &'static PriceBook {
        &STANDARD
    }

    /// Parse and validate a TOML price book.
    ///
    /// Fails with `MaterialNotFound` if any material code is missing and with
    /// `InvalidInput` for negative/non-finite prices or non-positive
    /// multipliers. Region names are normalized to lower case.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let file: PriceBookFile = toml::from_str(source).map_err(|e| CalcError::serialization(e.to_string()))?;

        for key in MaterialKey::ALL {
            match file.prices.get(key.code()) {
                None => return Err(CalcError::material_not_found(key.code())),
                Some(price) if !price.is_finite() || *price < 0.0 => {
                    return Err(CalcError::invalid_input(
                        format!("prices.{}", key.code()),
                        price.to_string(),
                        "Price must be a non-negative number",
                    ));
                }
                Some(_) => {}
            }
        }

        let mut region_table = BTreeMap::new();
        for (name, factor) in file.regions {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("regions.{}", name),
                    factor.to_string(),
                    "Regional multiplier must be positive",
                ));
            }
            region_table.insert(regions::normalize(&name), factor);
        }

        for code in file.prices.keys() {
            if MaterialKey::from_code(code).is_none() {
                tracing::warn!(material = %code, "Ignoring price for unknown material code");
            }
        }

        Ok(PriceBook {
            currency: file.currency,
            prices: file.prices,
            regions: region_table,
        })
    }

    /// Load a TOML price book from disk
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read price book", path.display().to_string(), e.to_string()))?;
        let book = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            regions = book.regions.len(),
            currency = %book.currency,
            "Loaded price book"
        );
        Ok(book)
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Known region names, sorted
    pub fn regions(&self) -> impl Iterator<Item = (&str, f64)> {
        self.regions.iter().map(|(name, factor)| (name.as_str(), *factor))
    }

    /// Reference-region price for a material
    pub fn base_price(&self, key: MaterialKey) -> CalcResult<f64> {
        self.prices
            .get(key.code())
            .copied()
            .ok_or_else(|| CalcError::material_not_found(key.code()))
    }

    /// Price multiplier for a location; unknown locations get 1.0
    pub fn region_multiplier(&self, location: &str) -> f64 {
        let name = regions::normalize(location);
        match self.regions.get(&name) {
            Some(factor) => *factor,
            None => {
                tracing::debug!(location = %name, "Unknown region, using reference prices");
                regions::DEFAULT_MULTIPLIER
            }
        }
    }

    /// Base price × regional multiplier
    pub fn unit_price(&self, key: MaterialKey, location: &str) -> CalcResult<f64> {
        Ok(self.base_price(key)? * self.region_multiplier(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BOOK: &str = include_str!("../../assets/price_book.toml");

    #[test]
    fn test_default_prices_every_material() {
        let book = PriceBook::default();
        for key in MaterialKey::ALL {
            assert_eq!(book.base_price(key).unwrap(), key.base_price());
        }
    }

    #[test]
    fn test_sample_file_matches_built_in() {
        let book = PriceBook::from_toml_str(SAMPLE_BOOK).unwrap();
        assert_eq!(book, PriceBook::default());
    }

    #[test]
    fn test_region_lookup_is_case_insensitive() {
        let book = PriceBook::standard();
        assert_eq!(book.region_multiplier("GAROUA"), 1.15);
        assert_eq!(book.region_multiplier(" bafoussam "), 0.95);
    }

    #[test]
    fn test_unknown_region_defaults() {
        let book = PriceBook::standard();
        assert_eq!(book.region_multiplier("lagos"), 1.0);
        assert_eq!(book.region_multiplier(""), 1.0);
    }

    #[test]
    fn test_unit_price_applies_multiplier() {
        let book = PriceBook::standard();
        let price = book.unit_price(MaterialKey::Cement50kg, "yaounde").unwrap();
        assert!((price - 5_500.0 * 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_missing_material_rejected() {
        let source = SAMPLE_BOOK.replace("cement_50kg = 5500", "");
        let err = PriceBook::from_toml_str(&source).unwrap_err();
        assert_eq!(err, CalcError::material_not_found("cement_50kg"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let source = SAMPLE_BOOK.replace("cement_50kg = 5500", "cement_50kg = -1");
        let err = PriceBook::from_toml_str(&source).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_region_names_normalized() {
        let source = SAMPLE_BOOK.replace("garoua = 1.15", "Garoua = 1.15");
        let book = PriceBook::from_toml_str(&source).unwrap();
        assert_eq!(book.region_multiplier("garoua"), 1.15);
    }

    #[test]
    fn test_malformed_toml() {
        let err = PriceBook::from_toml_str("prices = [").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_missing_file() {
        let err = PriceBook::load(Path::new("/nonexistent/prices.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
