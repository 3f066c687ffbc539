//! # Finishing
//!
//! Plaster and paint are proportional to wall area; floor tiles cover the net
//! floor area. Luxury finishing carries a 1.5× tile price.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::CalcResult;
use crate::plan::FinishingLevel;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Finishing;

/// m² of wall plastered per bag of cement
pub const PLASTER_M2_PER_BAG: f64 = 12.0;
/// m² of wall plastered per tonne of sand
pub const PLASTER_M2_PER_TONNE: f64 = 20.0;
/// m² of wall covered per 20 L paint bucket
pub const PAINT_M2_PER_BUCKET: f64 = 40.0;
/// Tile price factor at luxury finishing
pub const LUXURY_TILE_FACTOR: f64 = 1.5;

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    let plan = ctx.plan;
    let wall_area = plan.total_wall_area().0;
    let floor_area = plan.total_floor_area().0;

    let tile_factor = match plan.finishing_level {
        FinishingLevel::Luxury => LUXURY_TILE_FACTOR,
        FinishingLevel::Basic | FinishingLevel::Standard => 1.0,
    };

    Ok(vec![
        ctx.priced_line(
            STAGE,
            MaterialKey::Cement50kg,
            "Cement (plaster)",
            "bag",
            ceil_qty(wall_area / PLASTER_M2_PER_BAG),
            1.0,
        )?,
        ctx.priced_line(
            STAGE,
            MaterialKey::SandTonne,
            "Sharp sand (plaster)",
            "tonne",
            ceil_qty(wall_area / PLASTER_M2_PER_TONNE),
            1.0,
        )?,
        ctx.line(STAGE, MaterialKey::PaintBucket, ceil_qty(wall_area / PAINT_M2_PER_BUCKET))?,
        ctx.priced_line(
            STAGE,
            MaterialKey::FloorTilesSqm,
            MaterialKey::FloorTilesSqm.display_name(),
            "sqm",
            ceil_qty(floor_area),
            tile_factor,
        )?,
    ])
}
