//! Material Catalog
//!
//! Every priced material the stage calculators can reference. Base prices are
//! XAF reference values for Douala; regional adjustment happens in
//! [`PriceBook`](super::PriceBook).

use serde::{Deserialize, Serialize};

/// Material identifiers used as price-table keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialKey {
    // Concrete and aggregates
    #[serde(rename = "cement_50kg")]
    Cement50kg,
    #[serde(rename = "sand_tonne")]
    SandTonne,
    #[serde(rename = "gravel_tonne")]
    GravelTonne,
    // Reinforcement
    #[serde(rename = "steel_10mm_tonne")]
    Steel10mmTonne,
    #[serde(rename = "steel_12mm_tonne")]
    Steel12mmTonne,
    #[serde(rename = "steel_16mm_tonne")]
    Steel16mmTonne,
    // Walling
    #[serde(rename = "sandcrete_block_6inch")]
    SandcreteBlock6Inch,
    // Roofing
    #[serde(rename = "aluminum_sheet")]
    AluminumSheet,
    #[serde(rename = "timber_4x2_meter")]
    Timber4x2Meter,
    #[serde(rename = "timber_4x4_meter")]
    Timber4x4Meter,
    // Openings
    #[serde(rename = "door_standard")]
    DoorStandard,
    #[serde(rename = "door_luxury")]
    DoorLuxury,
    #[serde(rename = "window_standard_sqm")]
    WindowStandardSqm,
    #[serde(rename = "window_luxury_sqm")]
    WindowLuxurySqm,
    // Plumbing
    #[serde(rename = "pvc_pipe_half_inch")]
    PvcPipeHalfInch,
    #[serde(rename = "pvc_pipe_1inch")]
    PvcPipe1Inch,
    #[serde(rename = "pvc_pipe_2inch")]
    PvcPipe2Inch,
    #[serde(rename = "water_tank_1000l")]
    WaterTank1000L,
    // Electrical
    #[serde(rename = "socket")]
    Socket,
    #[serde(rename = "switch")]
    Switch,
    #[serde(rename = "cable_2.5mm_meter")]
    Cable2_5mmMeter,
    #[serde(rename = "cable_4mm_meter")]
    Cable4mmMeter,
    #[serde(rename = "distribution_board")]
    DistributionBoard,
    // Finishing
    #[serde(rename = "paint_bucket")]
    PaintBucket,
    #[serde(rename = "floor_tiles_sqm")]
    FloorTilesSqm,
}

impl MaterialKey {
    /// All material keys, in catalog order
    pub const ALL: [MaterialKey; 25] = [
        MaterialKey::Cement50kg,
        MaterialKey::SandTonne,
        MaterialKey::GravelTonne,
        MaterialKey::Steel10mmTonne,
        MaterialKey::Steel12mmTonne,
        MaterialKey::Steel16mmTonne,
        MaterialKey::SandcreteBlock6Inch,
        MaterialKey::AluminumSheet,
        MaterialKey::Timber4x2Meter,
        MaterialKey::Timber4x4Meter,
        MaterialKey::DoorStandard,
        MaterialKey::DoorLuxury,
        MaterialKey::WindowStandardSqm,
        MaterialKey::WindowLuxurySqm,
        MaterialKey::PvcPipeHalfInch,
        MaterialKey::PvcPipe1Inch,
        MaterialKey::PvcPipe2Inch,
        MaterialKey::WaterTank1000L,
        MaterialKey::Socket,
        MaterialKey::Switch,
        MaterialKey::Cable2_5mmMeter,
        MaterialKey::Cable4mmMeter,
        MaterialKey::DistributionBoard,
        MaterialKey::PaintBucket,
        MaterialKey::FloorTilesSqm,
    ];

    /// Price-table key (e.g., "cement_50kg")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialKey::Cement50kg => "cement_50kg",
            MaterialKey::SandTonne => "sand_tonne",
            MaterialKey::GravelTonne => "gravel_tonne",
            MaterialKey::Steel10mmTonne => "steel_10mm_tonne",
            MaterialKey::Steel12mmTonne => "steel_12mm_tonne",
            MaterialKey::Steel16mmTonne => "steel_16mm_tonne",
            MaterialKey::SandcreteBlock6Inch => "sandcrete_block_6inch",
            MaterialKey::AluminumSheet => "aluminum_sheet",
            MaterialKey::Timber4x2Meter => "timber_4x2_meter",
            MaterialKey::Timber4x4Meter => "timber_4x4_meter",
            MaterialKey::DoorStandard => "door_standard",
            MaterialKey::DoorLuxury => "door_luxury",
            MaterialKey::WindowStandardSqm => "window_standard_sqm",
            MaterialKey::WindowLuxurySqm => "window_luxury_sqm",
            MaterialKey::PvcPipeHalfInch => "pvc_pipe_half_inch",
            MaterialKey::PvcPipe1Inch => "pvc_pipe_1inch",
            MaterialKey::PvcPipe2Inch => "pvc_pipe_2inch",
            MaterialKey::WaterTank1000L => "water_tank_1000l",
            MaterialKey::Socket => "socket",
            MaterialKey::Switch => "switch",
            MaterialKey::Cable2_5mmMeter => "cable_2.5mm_meter",
            MaterialKey::Cable4mmMeter => "cable_4mm_meter",
            MaterialKey::DistributionBoard => "distribution_board",
            MaterialKey::PaintBucket => "paint_bucket",
            MaterialKey::FloorTilesSqm => "floor_tiles_sqm",
        }
    }

    /// Parse a price-table key
    pub fn from_code(code: &str) -> Option<Self> {
        MaterialKey::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// Human-readable description
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialKey::Cement50kg => "Cement (50kg bag)",
            MaterialKey::SandTonne => "Sharp sand",
            MaterialKey::GravelTonne => "Gravel",
            MaterialKey::Steel10mmTonne => "Reinforcement steel 10mm",
            MaterialKey::Steel12mmTonne => "Reinforcement steel 12mm",
            MaterialKey::Steel16mmTonne => "Reinforcement steel 16mm",
            MaterialKey::SandcreteBlock6Inch => "Sandcrete block 6\"",
            MaterialKey::AluminumSheet => "Aluminum roofing sheet",
            MaterialKey::Timber4x2Meter => "Timber 4x2",
            MaterialKey::Timber4x4Meter => "Timber 4x4",
            MaterialKey::DoorStandard => "Door (standard)",
            MaterialKey::DoorLuxury => "Door (luxury)",
            MaterialKey::WindowStandardSqm => "Window (standard)",
            MaterialKey::WindowLuxurySqm => "Window (luxury)",
            MaterialKey::PvcPipeHalfInch => "PVC pipe 1/2\"",
            MaterialKey::PvcPipe1Inch => "PVC pipe 1\"",
            MaterialKey::PvcPipe2Inch => "PVC pipe 2\"",
            MaterialKey::WaterTank1000L => "Water tank 1000L",
            MaterialKey::Socket => "Power socket",
            MaterialKey::Switch => "Light switch",
            MaterialKey::Cable2_5mmMeter => "Cable 2.5mm",
            MaterialKey::Cable4mmMeter => "Cable 4mm",
            MaterialKey::DistributionBoard => "Distribution board",
            MaterialKey::PaintBucket => "Paint (20L bucket)",
            MaterialKey::FloorTilesSqm => "Floor tiles",
        }
    }

    /// Unit the base price refers to
    pub fn price_unit(&self) -> &'static str {
        match self {
            MaterialKey::Cement50kg => "bag",
            MaterialKey::SandTonne | MaterialKey::GravelTonne => "tonne",
            MaterialKey::Steel10mmTonne | MaterialKey::Steel12mmTonne | MaterialKey::Steel16mmTonne => "tonne",
            MaterialKey::SandcreteBlock6Inch => "piece",
            MaterialKey::AluminumSheet => "sheet",
            MaterialKey::Timber4x2Meter | MaterialKey::Timber4x4Meter => "meter",
            MaterialKey::DoorStandard | MaterialKey::DoorLuxury => "piece",
            MaterialKey::WindowStandardSqm | MaterialKey::WindowLuxurySqm => "sqm",
            MaterialKey::PvcPipeHalfInch | MaterialKey::PvcPipe1Inch | MaterialKey::PvcPipe2Inch => "meter",
            MaterialKey::WaterTank1000L => "piece",
            MaterialKey::Socket | MaterialKey::Switch => "piece",
            MaterialKey::Cable2_5mmMeter | MaterialKey::Cable4mmMeter => "meter",
            MaterialKey::DistributionBoard => "piece",
            MaterialKey::PaintBucket => "bucket",
            MaterialKey::FloorTilesSqm => "sqm",
        }
    }

    /// Built-in reference price (XAF, Douala)
    pub fn base_price(&self) -> f64 {
        match self {
            MaterialKey::Cement50kg => 5_500.0,
            MaterialKey::SandTonne => 12_000.0,
            MaterialKey::GravelTonne => 15_000.0,
            MaterialKey::Steel10mmTonne => 680_000.0,
            MaterialKey::Steel12mmTonne => 660_000.0,
            MaterialKey::Steel16mmTonne => 650_000.0,
            MaterialKey::SandcreteBlock6Inch => 350.0,
            MaterialKey::AluminumSheet => 6_500.0,
            MaterialKey::Timber4x2Meter => 600.0,
            MaterialKey::Timber4x4Meter => 1_200.0,
            MaterialKey::DoorStandard => 45_000.0,
            MaterialKey::DoorLuxury => 120_000.0,
            MaterialKey::WindowStandardSqm => 35_000.0,
            MaterialKey::WindowLuxurySqm => 75_000.0,
            MaterialKey::PvcPipeHalfInch => 900.0,
            MaterialKey::PvcPipe1Inch => 1_500.0,
            MaterialKey::PvcPipe2Inch => 3_000.0,
            MaterialKey::WaterTank1000L => 85_000.0,
            MaterialKey::Socket => 2_500.0,
            MaterialKey::Switch => 2_000.0,
            MaterialKey::Cable2_5mmMeter => 500.0,
            MaterialKey::Cable4mmMeter => 800.0,
            MaterialKey::DistributionBoard => 45_000.0,
            MaterialKey::PaintBucket => 25_000.0,
            MaterialKey::FloorTilesSqm => 8_000.0,
        }
    }
}

impl std::fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_parse_back() {
        let codes: HashSet<_> = MaterialKey::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), MaterialKey::ALL.len());
        for key in MaterialKey::ALL {
            assert_eq!(MaterialKey::from_code(key.code()), Some(key));
        }
        assert_eq!(MaterialKey::from_code("marble_slab"), None);
    }

    #[test]
    fn test_base_prices_positive() {
        for key in MaterialKey::ALL {
            assert!(key.base_price() > 0.0, "{} has no price", key);
        }
    }

    #[test]
    fn test_serde_uses_price_codes() {
        let json = serde_json::to_string(&MaterialKey::Steel12mmTonne).unwrap();
        assert_eq!(json, "\"steel_12mm_tonne\"");
        let key: MaterialKey = serde_json::from_str("\"cable_2.5mm_meter\"").unwrap();
        assert_eq!(key, MaterialKey::Cable2_5mmMeter);
    }
}
