//! # Plan Data Structures
//!
//! A [`Plan`] is the input to the estimator: an ordered list of floors, each
//! holding rooms with metric dimensions, plus the construction-method choices
//! and the location used for regional pricing.
//!
//! ## Structure
//!
//! ```text
//! Plan
//! ├── floors: Vec<Floor>
//! │   └── rooms: Vec<Room> (length_m, width_m, height_m)
//! ├── foundation_type / wall_type / roofing_type / finishing_level
//! └── location
//! ```
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "name": "Starter bungalow",
//!   "house_type": "bungalow",
//!   "floors": [
//!     {
//!       "number": 0,
//!       "name": "Ground Floor",
//!       "rooms": [
//!         { "name": "Bedroom 1", "room_type": "bedroom", "length_m": 5.0, "width_m": 4.0 }
//!       ]
//!     }
//!   ],
//!   "foundation_type": "strip",
//!   "wall_type": "sandcrete",
//!   "roofing_type": "aluminum",
//!   "finishing_level": "standard",
//!   "location": "douala"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, SquareMeters};

/// Ratio applied to net floor area to account for wall footprint.
pub const BUILT_AREA_FACTOR: f64 = 1.15;

/// Upper bound on any derived plan area. Keeps every take-off quantity
/// well inside `u64`.
pub const MAX_TOTAL_AREA_M2: f64 = 1e12;

/// Ceiling height used when a room does not specify one.
pub const DEFAULT_CEILING_HEIGHT_M: f64 = 3.0;

fn default_height() -> f64 {
    DEFAULT_CEILING_HEIGHT_M
}

// ============================================================================
// Geometry
// ============================================================================

/// A single room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Display name (e.g., "Master Bedroom")
    pub name: String,

    /// Semantic type, free-form (e.g., "bedroom", "master_bathroom", "kitchen")
    pub room_type: String,

    /// Floor length in meters
    pub length_m: f64,

    /// Floor width in meters
    pub width_m: f64,

    /// Ceiling height in meters
    #[serde(default = "default_height")]
    pub height_m: f64,
}

impl Room {
    /// Create a room with the default ceiling height.
    pub fn new(name: impl Into<String>, room_type: impl Into<String>, length_m: f64, width_m: f64) -> Self {
        Room {
            name: name.into(),
            room_type: room_type.into(),
            length_m,
            width_m,
            height_m: DEFAULT_CEILING_HEIGHT_M,
        }
    }

    /// Builder: override the ceiling height
    pub fn with_height(mut self, height_m: f64) -> Self {
        self.height_m = height_m;
        self
    }

    /// Floor area = length × width
    pub fn floor_area(&self) -> SquareMeters {
        Meters(self.length_m) * Meters(self.width_m)
    }

    /// Wall area = 2 × (length + width) × height
    pub fn wall_area(&self) -> SquareMeters {
        (Meters(self.length_m) + Meters(self.width_m)) * 2.0 * Meters(self.height_m)
    }

    /// Whether this room carries bathroom plumbing ("bath" anywhere in the type)
    pub fn is_bathroom(&self) -> bool {
        self.room_type.to_lowercase().contains("bath")
    }

    /// Whether this room carries kitchen plumbing
    pub fn is_kitchen(&self) -> bool {
        self.room_type.to_lowercase().contains("kitchen")
    }
}

/// One storey of the building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor number; 0- or 1-based is up to the caller
    pub number: u32,

    /// Display name (e.g., "Ground Floor")
    pub name: String,

    /// Rooms on this floor, in display order
    pub rooms: Vec<Room>,
}

impl Floor {
    /// Create an empty floor.
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Floor {
            number,
            name: name.into(),
            rooms: Vec::new(),
        }
    }

    /// Builder: append a room
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Sum of the rooms' floor areas
    pub fn floor_area(&self) -> SquareMeters {
        self.rooms.iter().map(Room::floor_area).sum()
    }
}

// ============================================================================
// Method selections
// ============================================================================

/// Building form. Echoed into estimates and reports only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseType {
    #[default]
    Bungalow,
    Duplex,
    Storey,
}

impl HouseType {
    pub fn display_name(&self) -> &'static str {
        match self {
            HouseType::Bungalow => "Bungalow",
            HouseType::Duplex => "Duplex",
            HouseType::Storey => "Storey Building",
        }
    }
}

/// Foundation construction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationType {
    Strip,
    Raft,
    Pile,
}

impl FoundationType {
    pub const ALL: [FoundationType; 3] = [FoundationType::Strip, FoundationType::Raft, FoundationType::Pile];

    /// Lowercase code as it appears in plan files
    pub fn code(&self) -> &'static str {
        match self {
            FoundationType::Strip => "strip",
            FoundationType::Raft => "raft",
            FoundationType::Pile => "pile",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FoundationType::Strip => "Strip Foundation",
            FoundationType::Raft => "Raft Foundation",
            FoundationType::Pile => "Pile Foundation",
        }
    }
}

/// Walling material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    Sandcrete,
    Brick,
    Concrete,
}

impl WallType {
    pub const ALL: [WallType; 3] = [WallType::Sandcrete, WallType::Brick, WallType::Concrete];

    pub fn code(&self) -> &'static str {
        match self {
            WallType::Sandcrete => "sandcrete",
            WallType::Brick => "brick",
            WallType::Concrete => "concrete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WallType::Sandcrete => "Sandcrete Block",
            WallType::Brick => "Brick",
            WallType::Concrete => "Cast Concrete",
        }
    }
}

/// Roof covering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofingType {
    Aluminum,
    Tiles,
    Concrete,
}

impl RoofingType {
    pub const ALL: [RoofingType; 3] = [RoofingType::Aluminum, RoofingType::Tiles, RoofingType::Concrete];

    pub fn code(&self) -> &'static str {
        match self {
            RoofingType::Aluminum => "aluminum",
            RoofingType::Tiles => "tiles",
            RoofingType::Concrete => "concrete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoofingType::Aluminum => "Aluminum Sheets",
            RoofingType::Tiles => "Roof Tiles",
            RoofingType::Concrete => "Concrete Slab",
        }
    }
}

/// Quality tier for doors, windows and floor finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishingLevel {
    Basic,
    #[default]
    Standard,
    Luxury,
}

impl FinishingLevel {
    pub const ALL: [FinishingLevel; 3] = [FinishingLevel::Basic, FinishingLevel::Standard, FinishingLevel::Luxury];

    pub fn code(&self) -> &'static str {
        match self {
            FinishingLevel::Basic => "basic",
            FinishingLevel::Standard => "standard",
            FinishingLevel::Luxury => "luxury",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FinishingLevel::Basic => "Basic",
            FinishingLevel::Standard => "Standard",
            FinishingLevel::Luxury => "Luxury",
        }
    }
}

// ============================================================================
// Plan
// ============================================================================

/// A building layout plus construction choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name for reports
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub house_type: HouseType,

    /// Floors, lowest first
    pub floors: Vec<Floor>,

    pub foundation_type: FoundationType,
    pub wall_type: WallType,
    pub roofing_type: RoofingType,
    pub finishing_level: FinishingLevel,

    /// Region name used for price adjustment (case-insensitive)
    pub location: String,
}

impl Plan {
    /// Create a plan with the common method selections
    /// (strip / sandcrete / aluminum / standard) and no floors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use boq_core::plan::{Floor, Plan, Room};
    ///
    /// let plan = Plan::new("Studio", "douala")
    ///     .with_floor(Floor::new(0, "Ground Floor").with_room(Room::new("Studio", "bedroom", 5.0, 4.0)));
    ///
    /// assert!(plan.validate().is_ok());
    /// assert_eq!(plan.total_floor_area().0, 20.0);
    /// ```
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Plan {
            name: name.into(),
            house_type: HouseType::default(),
            floors: Vec::new(),
            foundation_type: FoundationType::Strip,
            wall_type: WallType::Sandcrete,
            roofing_type: RoofingType::Aluminum,
            finishing_level: FinishingLevel::Standard,
            location: location.into(),
        }
    }

    /// Builder: append a floor
    pub fn with_floor(mut self, floor: Floor) -> Self {
        self.floors.push(floor);
        self
    }

    /// Builder: set the finishing level
    pub fn with_finishing(mut self, level: FinishingLevel) -> Self {
        self.finishing_level = level;
        self
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|f| f.rooms.len()).sum()
    }

    /// All rooms across all floors, lowest floor first
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.floors.iter().flat_map(|f| f.rooms.iter())
    }

    /// Net floor area over all floors
    pub fn total_floor_area(&self) -> SquareMeters {
        self.rooms().map(Room::floor_area).sum()
    }

    /// Gross wall area over all rooms
    pub fn total_wall_area(&self) -> SquareMeters {
        self.rooms().map(Room::wall_area).sum()
    }

    /// Floor area inflated for wall footprint
    pub fn total_built_area(&self) -> SquareMeters {
        self.total_floor_area() * BUILT_AREA_FACTOR
    }

    /// Validate geometry before any quantity take-off runs.
    ///
    /// Rejects a plan with no floors, a floor without rooms, any dimension
    /// that is not a finite, strictly positive number, or derived areas above
    /// [`MAX_TOTAL_AREA_M2`].
    pub fn validate(&self) -> CalcResult<()> {
        if self.floors.is_empty() {
            return Err(CalcError::invalid_input(
                "floors",
                "[]",
                "A plan needs at least one floor",
            ));
        }

        for (fi, floor) in self.floors.iter().enumerate() {
            if floor.rooms.is_empty() {
                return Err(CalcError::invalid_input(
                    format!("floors[{}].rooms", fi),
                    "[]",
                    format!("Floor '{}' has no rooms", floor.name),
                ));
            }

            for (ri, room) in floor.rooms.iter().enumerate() {
                for (field, value) in [
                    ("length_m", room.length_m),
                    ("width_m", room.width_m),
                    ("height_m", room.height_m),
                ] {
                    if !value.is_finite() || value <= 0.0 {
                        return Err(CalcError::invalid_input(
                            format!("floors[{}].rooms[{}].{}", fi, ri, field),
                            value.to_string(),
                            format!("Room '{}' dimensions must be positive", room.name),
                        ));
                    }
                }
            }
        }

        for (field, area) in [
            ("total_floor_area", self.total_floor_area().0),
            ("total_wall_area", self.total_wall_area().0),
            ("total_built_area", self.total_built_area().0),
        ] {
            if !area.is_finite() || area > MAX_TOTAL_AREA_M2 {
                return Err(CalcError::invalid_input(
                    field,
                    area.to_string(),
                    format!("Derived area must be finite and at most {:e} m²", MAX_TOTAL_AREA_M2),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_room_plan() -> Plan {
        Plan::new("Test", "douala")
            .with_floor(Floor::new(0, "Ground").with_room(Room::new("Bed", "bedroom", 5.0, 4.0)))
    }

    #[test]
    fn test_room_areas() {
        let room = Room::new("Bed", "bedroom", 5.0, 4.0);
        assert_eq!(room.floor_area().0, 20.0);
        assert_eq!(room.wall_area().0, 54.0);
    }

    #[test]
    fn test_built_area() {
        let plan = single_room_plan();
        assert!((plan.total_built_area().0 - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_wet_room_matching() {
        assert!(Room::new("En-suite", "Master_Bathroom", 2.0, 2.0).is_bathroom());
        assert!(Room::new("Kitchen", "open kitchen", 3.0, 3.0).is_kitchen());
        assert!(!Room::new("Lounge", "living_room", 3.0, 3.0).is_bathroom());
    }

    #[test]
    fn test_default_height_from_json() {
        let json = r#"{ "name": "Bed", "room_type": "bedroom", "length_m": 4.0, "width_m": 3.0 }"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.height_m, DEFAULT_CEILING_HEIGHT_M);
    }

    #[test]
    fn test_validate_rejects_empty_plan() {
        let plan = Plan::new("Empty", "douala");
        let err = plan.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_validate_rejects_empty_floor() {
        let plan = single_room_plan().with_floor(Floor::new(1, "Upper"));
        match plan.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "floors[1].rooms"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let mut plan = single_room_plan();
            plan.floors[0].rooms[0].height_m = bad;
            match plan.validate() {
                Err(CalcError::InvalidInput { field, .. }) => {
                    assert_eq!(field, "floors[0].rooms[0].height_m")
                }
                other => panic!("expected InvalidInput for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_overflowing_area() {
        let mut plan = single_room_plan();
        plan.floors[0].rooms[0] = Room::new("Hangar", "store", 1e200, 1e200);
        match plan.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "total_floor_area"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        plan.floors[0].rooms[0] = Room::new("Field", "store", 1e7, 1e6);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(serde_json::to_string(&FoundationType::Raft).unwrap(), "\"raft\"");
        let roof: RoofingType = serde_json::from_str("\"aluminum\"").unwrap();
        assert_eq!(roof, RoofingType::Aluminum);
        assert!(serde_json::from_str::<WallType>("\"mud\"").is_err());
    }

    #[test]
    fn test_plan_roundtrip() {
        let plan = single_room_plan();
        let json = serde_json::to_string_pretty(&plan).unwrap();
        let roundtrip: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, roundtrip);
    }
}
