//! # Plan Estimate
//!
//! Runs the seven stage take-offs over a [`Plan`] and rolls them up into
//! project totals.
//!
//! ## Assumptions
//!
//! - Built area = net floor area × 1.15
//! - Labor = 45% of materials cost (fixed)
//! - Stages run strictly one after another; total duration is the sum of the
//!   fixed stage durations
//!
//! ## Example
//!
//! ```rust
//! use boq_core::estimate::estimate;
//! use boq_core::plan::{Floor, Plan, Room};
//!
//! let plan = Plan::new("Studio", "douala")
//!     .with_floor(Floor::new(0, "Ground Floor").with_room(Room::new("Studio", "bedroom", 5.0, 4.0)));
//!
//! let result = estimate(&plan).unwrap();
//! assert_eq!(result.stages.len(), 7);
//! assert_eq!(result.total_duration_days, 93);
//! assert!((result.total_project_cost - result.total_materials_cost * 1.45).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{calculate_stage, ConstructionStage, MaterialItem, StageContext, StageKind};
use crate::errors::CalcResult;
use crate::plan::Plan;
use crate::pricing::PriceBook;

/// Labor cost as a fraction of materials cost
pub const LABOR_RATIO: f64 = 0.45;

/// Full bill of quantities and cost roll-up for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEstimate {
    /// The plan this estimate was computed from
    pub plan: Plan,

    /// Currency of every price in this estimate
    pub currency: String,

    /// Regional multiplier applied to all unit prices
    pub region_multiplier: f64,

    pub floor_count: usize,
    pub room_count: usize,

    /// Net floor area (m²)
    pub total_floor_area_m2: f64,

    /// Floor area × 1.15 (m²)
    pub total_built_area_m2: f64,

    /// Gross wall area (m²)
    pub total_wall_area_m2: f64,

    /// One entry per stage, in build order
    pub stages: Vec<ConstructionStage>,

    pub total_materials_cost: f64,
    pub labor_cost: f64,
    pub total_project_cost: f64,
    pub total_duration_days: u32,
}

impl PlanEstimate {
    /// Look up a stage result
    pub fn stage(&self, kind: StageKind) -> Option<&ConstructionStage> {
        self.stages.iter().find(|s| s.stage == kind)
    }

    /// Every line item across all stages, in stage order
    pub fn items(&self) -> impl Iterator<Item = &MaterialItem> {
        self.stages.iter().flat_map(|s| s.items.iter())
    }
}

/// Estimate a plan against a price book.
///
/// Geometry is validated before any stage runs. A method choice without
/// take-off rules (e.g. pile foundations) fails the whole estimate with
/// `UnsupportedMethod` instead of contributing a zero-cost stage.
pub fn calculate(plan: &Plan, prices: &PriceBook) -> CalcResult<PlanEstimate> {
    let span = tracing::info_span!("estimate", plan = %plan.name, location = %plan.location);
    let _guard = span.enter();

    plan.validate()?;

    let ctx = StageContext::new(plan, prices);
    let stages = StageKind::ALL
        .iter()
        .map(|kind| calculate_stage(*kind, &ctx))
        .collect::<CalcResult<Vec<_>>>()?;

    let total_materials_cost: f64 = stages.iter().map(|s| s.total_cost).sum();
    let labor_cost = total_materials_cost * LABOR_RATIO;
    let total_duration_days = stages.iter().map(|s| s.duration_days).sum();

    let estimate = PlanEstimate {
        plan: plan.clone(),
        currency: prices.currency().to_string(),
        region_multiplier: ctx.multiplier(),
        floor_count: plan.floor_count(),
        room_count: plan.room_count(),
        total_floor_area_m2: plan.total_floor_area().0,
        total_built_area_m2: plan.total_built_area().0,
        total_wall_area_m2: plan.total_wall_area().0,
        stages,
        total_materials_cost,
        labor_cost,
        total_project_cost: total_materials_cost + labor_cost,
        total_duration_days,
    };

    tracing::info!(
        materials = estimate.total_materials_cost,
        total = estimate.total_project_cost,
        days = estimate.total_duration_days,
        "Estimate complete"
    );
    Ok(estimate)
}

/// Estimate a plan with the built-in price book.
pub fn estimate(plan: &Plan) -> CalcResult<PlanEstimate> {
    calculate(plan, PriceBook::standard())
}

/// Cost of the same plan priced in another region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalEstimate {
    pub location: String,
    pub multiplier: f64,
    pub total_materials_cost: f64,
    pub total_project_cost: f64,
}

/// Price one plan in several locations, in the order given.
pub fn compare_regions<S: AsRef<str>>(
    plan: &Plan,
    prices: &PriceBook,
    locations: &[S],
) -> CalcResult<Vec<RegionalEstimate>> {
    locations
        .iter()
        .map(|location| {
            let mut local = plan.clone();
            local.location = location.as_ref().to_string();
            let result = calculate(&local, prices)?;
            Ok(RegionalEstimate {
                location: local.location,
                multiplier: result.region_multiplier,
                total_materials_cost: result.total_materials_cost,
                total_project_cost: result.total_project_cost,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::{single_bedroom, two_storey};
    use crate::errors::CalcError;
    use crate::plan::{FoundationType, HouseType, Room};
    use crate::pricing::MaterialKey;

    #[test]
    fn test_worked_example() {
        let mut plan = single_bedroom();
        plan.house_type = HouseType::Bungalow;
        let result = estimate(&plan).unwrap();

        assert_eq!(result.total_floor_area_m2, 20.0);
        assert!((result.total_built_area_m2 - 23.0).abs() < 1e-9);
        assert_eq!(result.region_multiplier, 1.0);

        let foundation = result.stage(StageKind::Foundation).unwrap();
        assert_eq!(foundation.item(MaterialKey::Cement50kg).unwrap().quantity(), 58);

        let blockwork = result.stage(StageKind::Blockwork).unwrap();
        assert_eq!(blockwork.item(MaterialKey::SandcreteBlock6Inch).unwrap().quantity(), 540);

        let roofing = result.stage(StageKind::Roofing).unwrap();
        assert_eq!(roofing.item(MaterialKey::AluminumSheet).unwrap().quantity(), 16);
    }

    #[test]
    fn test_stages_in_fixed_order() {
        let result = estimate(&two_storey()).unwrap();
        let kinds: Vec<StageKind> = result.stages.iter().map(|s| s.stage).collect();
        assert_eq!(kinds, StageKind::ALL.to_vec());
        assert_eq!(result.total_duration_days, 93);
    }

    #[test]
    fn test_additivity() {
        let result = estimate(&two_storey()).unwrap();
        let stage_sum: f64 = result.stages.iter().map(|s| s.total_cost).sum();
        assert_eq!(result.total_materials_cost, stage_sum);
        for stage in &result.stages {
            let item_sum: f64 = stage.items.iter().map(|i| i.total_price()).sum();
            assert_eq!(stage.total_cost, item_sum);
        }
    }

    #[test]
    fn test_labor_and_total() {
        let result = estimate(&two_storey()).unwrap();
        assert_eq!(result.labor_cost, result.total_materials_cost * LABOR_RATIO);
        assert_eq!(result.total_project_cost, result.total_materials_cost + result.labor_cost);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut plan = single_bedroom();
        plan.floors[0].rooms[0].width_m = 0.0;
        assert_eq!(estimate(&plan).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_geometry_checked_before_methods() {
        let mut plan = single_bedroom();
        plan.foundation_type = FoundationType::Pile;
        plan.floors[0].rooms.clear();
        assert_eq!(estimate(&plan).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unsupported_method_fails_whole_estimate() {
        let mut plan = single_bedroom();
        plan.foundation_type = FoundationType::Pile;
        match estimate(&plan) {
            Err(CalcError::UnsupportedMethod { stage, method }) => {
                assert_eq!(stage, "Foundation & Groundwork");
                assert_eq!(method, "pile");
            }
            other => panic!("expected UnsupportedMethod, got {:?}", other),
        }
    }

    #[test]
    fn test_tiny_room_still_costs_something() {
        let mut plan = single_bedroom();
        plan.floors[0].rooms[0] = Room::new("Closet", "store", 0.01, 0.01);
        let result = estimate(&plan).unwrap();
        assert!(result.total_materials_cost.is_finite());
        assert!(result.total_materials_cost > 0.0);
        for stage in &result.stages {
            assert!(stage.total_cost.is_finite());
        }
    }

    #[test]
    fn test_huge_room_rejected_before_take_off() {
        let mut plan = single_bedroom();
        plan.floors[0].rooms[0] = Room::new("Hangar", "store", 1e200, 1e200);
        assert_eq!(estimate(&plan).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_large_plan_survives_json() {
        let mut plan = single_bedroom();
        plan.floors[0].rooms[0] = Room::new("Warehouse", "store", 1e5, 1e5);
        let result = estimate(&plan).unwrap();
        assert!(result.total_project_cost.is_finite());
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: PlanEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.total_duration_days, 93);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let plan = two_storey();
        let a = serde_json::to_string(&estimate(&plan).unwrap()).unwrap();
        let b = serde_json::to_string(&estimate(&plan).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_compare_regions() {
        let plan = single_bedroom();
        let rows = compare_regions(&plan, PriceBook::standard(), &["douala", "garoua", "nowhere"]).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].multiplier, 1.0);
        let ratio = rows[1].total_materials_cost / rows[0].total_materials_cost;
        assert!((ratio - 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_serialization() {
        let result = estimate(&single_bedroom()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("total_project_cost"));
        assert!(json.contains("Foundation & Groundwork"));
        let roundtrip: PlanEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.stages.len(), 7);
        assert_eq!(roundtrip.total_duration_days, result.total_duration_days);
    }
}
