//! Property-based tests for plan estimates.
//!
//! - Same plan, same estimate
//! - Stage totals add up to the materials cost
//! - Labor and project totals follow from materials cost
//! - Growing any room dimension never lowers quantities, area or cost
//! - Regional multiplier scales every price and nothing else
//! - Quantities are never rounded down

use proptest::prelude::*;

use boq_core::estimate::{calculate, LABOR_RATIO};
use boq_core::plan::{FinishingLevel, Floor, Plan, Room};
use boq_core::pricing::{MaterialKey, PriceBook};
use boq_core::StageKind;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_room_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("bedroom"),
        Just("living_room"),
        Just("kitchen"),
        Just("bathroom"),
        Just("master_bathroom"),
        Just("store"),
    ]
}

fn arb_room() -> impl Strategy<Value = Room> {
    (arb_room_type(), 0.5f64..20.0, 0.5f64..20.0, 2.4f64..4.0).prop_map(|(kind, l, w, h)| {
        Room::new(format!("{} {:.1}x{:.1}", kind, l, w), kind, l, w).with_height(h)
    })
}

fn arb_floor(number: u32) -> impl Strategy<Value = Floor> {
    prop::collection::vec(arb_room(), 1..6).prop_map(move |rooms| Floor {
        number,
        name: format!("Floor {}", number),
        rooms,
    })
}

fn arb_finishing() -> impl Strategy<Value = FinishingLevel> {
    prop_oneof![
        Just(FinishingLevel::Basic),
        Just(FinishingLevel::Standard),
        Just(FinishingLevel::Luxury),
    ]
}

fn arb_location() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("douala"), Just("Yaounde"), Just("garoua"), Just("bafoussam"), Just("unmapped town")]
}

fn arb_plan() -> impl Strategy<Value = Plan> {
    (
        prop::collection::vec(arb_floor(0), 1..4),
        arb_finishing(),
        arb_location(),
    )
        .prop_map(|(floors, finishing, location)| {
            let mut plan = Plan::new("Generated", location).with_finishing(finishing);
            for (i, mut floor) in floors.into_iter().enumerate() {
                floor.number = i as u32;
                plan = plan.with_floor(floor);
            }
            plan
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_estimate_is_deterministic(plan in arb_plan()) {
        let a = calculate(&plan, PriceBook::standard()).unwrap();
        let b = calculate(&plan, PriceBook::standard()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_stage_totals_are_additive(plan in arb_plan()) {
        let result = calculate(&plan, PriceBook::standard()).unwrap();
        prop_assert_eq!(result.stages.len(), 7);

        for stage in &result.stages {
            let items: f64 = stage.items.iter().map(|i| i.total_price()).sum();
            prop_assert_eq!(stage.total_cost, items);
            for item in &stage.items {
                prop_assert_eq!(item.total_price(), item.quantity() as f64 * item.unit_price());
            }
        }

        let stages: f64 = result.stages.iter().map(|s| s.total_cost).sum();
        prop_assert_eq!(result.total_materials_cost, stages);
    }

    #[test]
    fn prop_cost_identity(plan in arb_plan()) {
        let result = calculate(&plan, PriceBook::standard()).unwrap();
        prop_assert_eq!(result.labor_cost, result.total_materials_cost * LABOR_RATIO);
        prop_assert_eq!(result.total_project_cost, result.total_materials_cost + result.labor_cost);
        prop_assert_eq!(result.total_duration_days, 93);
        prop_assert!(result.total_materials_cost > 0.0);
    }

    #[test]
    fn prop_larger_room_never_needs_less(
        plan in arb_plan(),
        dimension in 0usize..3,
        grow in 0.0f64..5.0,
    ) {
        let mut bigger = plan.clone();
        let room = &mut bigger.floors[0].rooms[0];
        match dimension {
            0 => room.length_m += grow,
            1 => room.width_m += grow,
            _ => room.height_m += grow,
        }

        let before = calculate(&plan, PriceBook::standard()).unwrap();
        let after = calculate(&bigger, PriceBook::standard()).unwrap();

        let before_qty: Vec<u64> = before.items().map(|i| i.quantity()).collect();
        let after_qty: Vec<u64> = after.items().map(|i| i.quantity()).collect();
        prop_assert_eq!(before_qty.len(), after_qty.len());
        for (b, a) in before_qty.iter().zip(after_qty.iter()) {
            prop_assert!(a >= b, "quantity dropped from {} to {}", b, a);
        }

        prop_assert!(after.total_built_area_m2 >= before.total_built_area_m2);
        prop_assert!(after.total_materials_cost >= before.total_materials_cost);
        prop_assert!(after.total_project_cost >= before.total_project_cost);
    }

    #[test]
    fn prop_region_scales_prices_only(plan in arb_plan()) {
        let book = PriceBook::standard();
        let mut base = plan.clone();
        base.location = "douala".to_string();
        let mut far = plan.clone();
        far.location = "maroua".to_string();

        let base_result = calculate(&base, book).unwrap();
        let far_result = calculate(&far, book).unwrap();
        let m = book.region_multiplier("maroua");

        let base_items: Vec<_> = base_result.items().collect();
        let far_items: Vec<_> = far_result.items().collect();
        prop_assert_eq!(base_items.len(), far_items.len());
        for (b, f) in base_items.iter().zip(far_items.iter()) {
            prop_assert_eq!(b.quantity(), f.quantity());
            prop_assert!((f.unit_price() - b.unit_price() * m).abs() <= 1e-9 * b.unit_price().max(1.0));
        }

        let ratio = far_result.total_materials_cost / base_result.total_materials_cost;
        prop_assert!((ratio - m).abs() < 1e-9);
    }

    #[test]
    fn prop_quantities_round_up(plan in arb_plan()) {
        let result = calculate(&plan, PriceBook::standard()).unwrap();

        let blocks = result
            .stage(StageKind::Blockwork)
            .and_then(|s| s.item(MaterialKey::SandcreteBlock6Inch))
            .unwrap()
            .quantity() as f64;
        prop_assert!(blocks >= result.total_wall_area_m2 * 10.0 - 1e-9);

        let tiles = result
            .stage(StageKind::Finishing)
            .and_then(|s| s.item(MaterialKey::FloorTilesSqm))
            .unwrap()
            .quantity() as f64;
        prop_assert!(tiles >= result.total_floor_area_m2);
        prop_assert!(tiles < result.total_floor_area_m2 + 1.0);
    }
}
