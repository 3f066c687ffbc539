//! # Roofing
//!
//! Roof area is the built area plus a 20% overhang allowance. Aluminum sheets
//! cover 1.8 m² each; the timber frame is taken off in running meters.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::{CalcError, CalcResult};
use crate::plan::RoofingType;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Roofing;

/// Roof area per m² of built area
pub const OVERHANG_FACTOR: f64 = 1.2;
/// Effective coverage of one aluminum sheet (m²)
pub const SHEET_COVERAGE_M2: f64 = 1.8;

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    match ctx.plan.roofing_type {
        RoofingType::Aluminum => {}
        other @ (RoofingType::Tiles | RoofingType::Concrete) => {
            return Err(CalcError::unsupported_method(STAGE.display_name(), other.code()));
        }
    }

    let roof_area = ctx.plan.total_built_area().0 * OVERHANG_FACTOR;

    Ok(vec![
        ctx.line(STAGE, MaterialKey::AluminumSheet, ceil_qty(roof_area / SHEET_COVERAGE_M2))?,
        ctx.line(STAGE, MaterialKey::Timber4x2Meter, ceil_qty(roof_area * 2.0))?,
        ctx.line(STAGE, MaterialKey::Timber4x4Meter, ceil_qty(roof_area * 0.5))?,
    ])
}
