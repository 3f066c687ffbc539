//! # Blockwork & Walling
//!
//! Wall area is the sum over all rooms of `2 × (length + width) × height`.
//! Sandcrete walls take 10 blocks per m², with mortar proportional to the
//! block count. Brick and cast-concrete walls have no take-off rules yet.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::{CalcError, CalcResult};
use crate::plan::WallType;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Blockwork;

/// 6" sandcrete blocks per m² of wall
pub const BLOCKS_PER_M2: f64 = 10.0;
/// Mortar cement bags per block
pub const MORTAR_CEMENT_PER_BLOCK: f64 = 0.15;
/// Mortar sand tonnes per block
pub const MORTAR_SAND_PER_BLOCK: f64 = 0.025;

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    match ctx.plan.wall_type {
        WallType::Sandcrete => {}
        other @ (WallType::Brick | WallType::Concrete) => {
            return Err(CalcError::unsupported_method(STAGE.display_name(), other.code()));
        }
    }

    let wall_area = ctx.plan.total_wall_area().0;
    let blocks = ceil_qty(wall_area * BLOCKS_PER_M2);

    Ok(vec![
        ctx.line(STAGE, MaterialKey::SandcreteBlock6Inch, blocks)?,
        ctx.priced_line(
            STAGE,
            MaterialKey::Cement50kg,
            "Cement (mortar)",
            "bag",
            ceil_qty(blocks as f64 * MORTAR_CEMENT_PER_BLOCK),
            1.0,
        )?,
        ctx.priced_line(
            STAGE,
            MaterialKey::SandTonne,
            "Sharp sand (mortar)",
            "tonne",
            ceil_qty(blocks as f64 * MORTAR_SAND_PER_BLOCK),
            1.0,
        )?,
    ])
}
