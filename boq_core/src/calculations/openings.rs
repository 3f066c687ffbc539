//! # Doors & Windows
//!
//! - External doors: one per floor, priced at 1.5× the door price
//! - Internal doors: total rooms minus floor count
//! - Windows: 15% of net floor area, in m²
//!
//! Luxury finishing uses the luxury door/window prices; basic and standard
//! share the standard tier.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::CalcResult;
use crate::plan::FinishingLevel;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::DoorsWindows;

/// Price factor for external (security) doors
pub const EXTERNAL_DOOR_FACTOR: f64 = 1.5;
/// Glazed area per m² of floor area
pub const WINDOW_TO_FLOOR_RATIO: f64 = 0.15;

fn price_tier(level: FinishingLevel) -> (MaterialKey, MaterialKey) {
    match level {
        FinishingLevel::Luxury => (MaterialKey::DoorLuxury, MaterialKey::WindowLuxurySqm),
        FinishingLevel::Basic | FinishingLevel::Standard => {
            (MaterialKey::DoorStandard, MaterialKey::WindowStandardSqm)
        }
    }
}

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    let plan = ctx.plan;
    let (door, window) = price_tier(plan.finishing_level);

    let floors = plan.floor_count() as u64;
    let rooms = plan.room_count() as u64;
    let window_area = plan.total_floor_area().0 * WINDOW_TO_FLOOR_RATIO;

    Ok(vec![
        ctx.priced_line(STAGE, door, "External door", "piece", floors, EXTERNAL_DOOR_FACTOR)?,
        ctx.priced_line(STAGE, door, "Internal door", "piece", rooms.saturating_sub(floors), 1.0)?,
        ctx.line(STAGE, window, ceil_qty(window_area))?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::{single_bedroom, two_storey};
    use crate::pricing::PriceBook;

    #[test]
    fn test_door_counts() {
        let plan = two_storey();
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[0].quantity(), 2); // external, one per floor
        assert_eq!(items[1].quantity(), 2); // 4 rooms - 2 floors
    }

    #[test]
    fn test_external_door_surcharge() {
        let plan = single_bedroom();
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[0].unit_price(), 45_000.0 * 1.5);
        assert_eq!(items[1].quantity(), 0);
    }

    #[test]
    fn test_window_area_rounded_up() {
        // 62 m² × 0.15 = 9.3 → 10 m²
        let plan = two_storey();
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[2].quantity(), 10);
        assert_eq!(items[2].unit(), "sqm");
    }

    #[test]
    fn test_luxury_tier() {
        let plan = single_bedroom().with_finishing(FinishingLevel::Luxury);
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[0].material(), MaterialKey::DoorLuxury);
        assert_eq!(items[2].material(), MaterialKey::WindowLuxurySqm);
    }

    #[test]
    fn test_basic_uses_standard_tier() {
        let plan = single_bedroom().with_finishing(FinishingLevel::Basic);
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[0].material(), MaterialKey::DoorStandard);
    }
}
