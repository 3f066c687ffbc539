//! # Electrical
//!
//! Two sockets and two switches per room, cable runs per room, and one
//! distribution board per floor.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::CalcResult;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Electrical;

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    let rooms = ctx.plan.room_count() as u64;
    let floors = ctx.plan.floor_count() as u64;

    Ok(vec![
        ctx.line(STAGE, MaterialKey::Socket, rooms * 2)?,
        ctx.line(STAGE, MaterialKey::Switch, rooms * 2)?,
        ctx.line(STAGE, MaterialKey::Cable2_5mmMeter, ceil_qty(rooms as f64 * 30.0))?,
        ctx.line(STAGE, MaterialKey::Cable4mmMeter, ceil_qty(rooms as f64 * 15.0))?,
        ctx.line(STAGE, MaterialKey::DistributionBoard, floors)?,
    ])
}
