//! # Plan Templates
//!
//! Ready-made plans for common house layouts. Every template uses methods
//! with full take-off support, so it always estimates cleanly.
//!
//! ```rust
//! use boq_core::templates;
//!
//! for info in templates::list() {
//!     let plan = templates::get(info.name, "kribi").unwrap();
//!     assert!(plan.validate().is_ok());
//! }
//! ```

use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::plan::{Floor, HouseType, Plan, Room};

/// Catalog entry for a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: &'static str,
    pub description: &'static str,
}

const TEMPLATES: [TemplateInfo; 3] = [
    TemplateInfo {
        name: "bungalow_2bed",
        description: "Single-storey, 2 bedrooms, living room, kitchen, 1 bathroom",
    },
    TemplateInfo {
        name: "bungalow_3bed",
        description: "Single-storey, 3 bedrooms (1 en-suite), living/dining, kitchen, 2 bathrooms",
    },
    TemplateInfo {
        name: "duplex_4bed",
        description: "Two-storey, living and kitchen downstairs, 4 bedrooms and 2 bathrooms upstairs",
    },
];

/// All available templates
pub fn list() -> &'static [TemplateInfo] {
    &TEMPLATES
}

/// Build a template plan priced for `location`.
pub fn get(name: &str, location: &str) -> CalcResult<Plan> {
    let plan = match name {
        "bungalow_2bed" => bungalow_2bed(location),
        "bungalow_3bed" => bungalow_3bed(location),
        "duplex_4bed" => duplex_4bed(location),
        _ => return Err(CalcError::template_not_found(name)),
    };
    Ok(plan)
}

fn bungalow_2bed(location: &str) -> Plan {
    Plan::new("2-Bedroom Bungalow", location).with_floor(
        Floor::new(0, "Ground Floor")
            .with_room(Room::new("Living Room", "living_room", 5.0, 4.5))
            .with_room(Room::new("Kitchen", "kitchen", 3.5, 3.0))
            .with_room(Room::new("Bedroom 1", "bedroom", 4.0, 3.5))
            .with_room(Room::new("Bedroom 2", "bedroom", 3.5, 3.5))
            .with_room(Room::new("Bathroom", "bathroom", 2.5, 2.0)),
    )
}

fn bungalow_3bed(location: &str) -> Plan {
    Plan::new("3-Bedroom Bungalow", location).with_floor(
        Floor::new(0, "Ground Floor")
            .with_room(Room::new("Living/Dining", "living_room", 6.0, 5.0))
            .with_room(Room::new("Kitchen", "kitchen", 4.0, 3.0))
            .with_room(Room::new("Master Bedroom", "bedroom", 4.5, 4.0))
            .with_room(Room::new("En-suite", "master_bathroom", 2.5, 2.0))
            .with_room(Room::new("Bedroom 2", "bedroom", 4.0, 3.5))
            .with_room(Room::new("Bedroom 3", "bedroom", 3.5, 3.5))
            .with_room(Room::new("Bathroom", "bathroom", 2.5, 2.0)),
    )
}

fn duplex_4bed(location: &str) -> Plan {
    let mut plan = Plan::new("4-Bedroom Duplex", location)
        .with_floor(
            Floor::new(0, "Ground Floor")
                .with_room(Room::new("Living Room", "living_room", 6.0, 5.0))
                .with_room(Room::new("Dining", "dining", 4.0, 3.5))
                .with_room(Room::new("Kitchen", "kitchen", 4.0, 3.5))
                .with_room(Room::new("Guest Toilet", "bathroom", 2.0, 1.5)),
        )
        .with_floor(
            Floor::new(1, "First Floor")
                .with_room(Room::new("Master Bedroom", "bedroom", 5.0, 4.0))
                .with_room(Room::new("Bedroom 2", "bedroom", 4.0, 3.5))
                .with_room(Room::new("Bedroom 3", "bedroom", 4.0, 3.5))
                .with_room(Room::new("Bedroom 4", "bedroom", 3.5, 3.5))
                .with_room(Room::new("Bathroom", "bathroom", 2.5, 2.0)),
        );
    plan.house_type = HouseType::Duplex;
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::estimate;

    #[test]
    fn test_every_template_estimates() {
        for info in list() {
            let plan = get(info.name, "douala").unwrap();
            let result = estimate(&plan).unwrap();
            assert!(result.total_project_cost > 0.0, "{} has no cost", info.name);
        }
    }

    #[test]
    fn test_location_applied() {
        let plan = get("bungalow_2bed", "maroua").unwrap();
        assert_eq!(plan.location, "maroua");
        assert_eq!(estimate(&plan).unwrap().region_multiplier, 1.15);
    }

    #[test]
    fn test_duplex_shape() {
        let plan = get("duplex_4bed", "douala").unwrap();
        assert_eq!(plan.house_type, HouseType::Duplex);
        assert_eq!(plan.floor_count(), 2);
        assert_eq!(plan.room_count(), 9);
    }

    #[test]
    fn test_unknown_template() {
        match get("castle", "douala") {
            Err(CalcError::TemplateNotFound { name }) => assert_eq!(name, "castle"),
            other => panic!("expected TemplateNotFound, got {:?}", other),
        }
    }
}
