//! # Plumbing
//!
//! Pipe runs scale with the number of wet rooms (any room whose type mentions
//! "bath" or "kitchen"). Multi-storey plans get one 1000 L overhead tank.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::CalcResult;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Plumbing;

/// Meters of pipe per wet room, by diameter
const PIPE_RUNS: [(MaterialKey, f64); 3] = [
    (MaterialKey::PvcPipeHalfInch, 25.0),
    (MaterialKey::PvcPipe1Inch, 15.0),
    (MaterialKey::PvcPipe2Inch, 10.0),
];

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    let plan = ctx.plan;
    let bathrooms = plan.rooms().filter(|r| r.is_bathroom()).count();
    let kitchens = plan.rooms().filter(|r| r.is_kitchen()).count();
    let wet_rooms = (bathrooms + kitchens) as f64;

    let mut items = PIPE_RUNS
        .iter()
        .map(|(pipe, meters)| ctx.line(STAGE, *pipe, ceil_qty(wet_rooms * meters)))
        .collect::<CalcResult<Vec<_>>>()?;

    let tanks = if plan.floor_count() > 1 { 1 } else { 0 };
    items.push(ctx.line(STAGE, MaterialKey::WaterTank1000L, tanks)?);

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::{single_bedroom, two_storey};
    use crate::plan::Room;
    use crate::pricing::PriceBook;

    #[test]
    fn test_wet_room_pipe_runs() {
        // kitchen + bathroom = 2 wet rooms
        let plan = two_storey();
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        let qty: Vec<u64> = items.iter().map(|i| i.quantity()).collect();
        assert_eq!(qty, vec![50, 30, 20, 1]);
    }

    #[test]
    fn test_no_wet_rooms_single_floor() {
        let plan = single_bedroom();
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert!(items.iter().all(|i| i.quantity() == 0));
        assert_eq!(items.len(), 4);
    }

    #[test]
    fn test_substring_room_types() {
        let mut plan = single_bedroom();
        plan.floors[0].rooms.push(Room::new("En-suite", "master_bathroom", 2.0, 2.0));
        plan.floors[0].rooms.push(Room::new("Pantry", "kitchen_store", 2.0, 2.0));
        let ctx = StageContext::new(&plan, PriceBook::standard());
        let items = calculate(&ctx).unwrap();
        assert_eq!(items[0].quantity(), 50);
        assert_eq!(items[3].quantity(), 0);
    }
}
