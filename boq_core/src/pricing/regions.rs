//! Regional Price Multipliers
//!
//! Material prices in the catalog are quoted for Douala. Other markets are
//! priced by scaling every unit price by a single factor for the region.

/// Multiplier applied when a location is not in the table
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Built-in region table: lower-case region name → price multiplier
pub const BUILT_IN_REGIONS: [(&str, f64); 12] = [
    ("douala", 1.00),
    ("yaounde", 1.05),
    ("bafoussam", 0.95),
    ("bamenda", 1.00),
    ("buea", 1.00),
    ("limbe", 1.00),
    ("kribi", 1.05),
    ("ebolowa", 1.05),
    ("bertoua", 1.10),
    ("ngaoundere", 1.10),
    ("garoua", 1.15),
    ("maroua", 1.15),
];

/// Normalize a free-form location for table lookup
/// (trimmed, lower-case).
pub fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keys_are_normalized() {
        for (name, _) in BUILT_IN_REGIONS {
            assert_eq!(normalize(name), name);
        }
    }

    #[test]
    fn test_multipliers_within_market_range() {
        for (name, factor) in BUILT_IN_REGIONS {
            assert!((0.95..=1.15).contains(&factor), "{} out of range", name);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Yaounde "), "yaounde");
    }
}
