//! # Stage Calculators
//!
//! One quantity take-off per construction stage. Each stage module exposes
//!
//! - `calculate(&StageContext) -> CalcResult<Vec<MaterialItem>>`
//!
//! which derives quantities from plan geometry, rounds them **up** to whole
//! purchase units, and prices them through the [`PriceBook`] at the plan's
//! location. Stage calculators are independent; [`crate::estimate`] composes
//! them in [`StageKind::ALL`] order.
//!
//! ## Available Stages
//!
//! - [`foundation`] - Foundation & groundwork (strip, raft)
//! - [`blockwork`] - Walling (sandcrete)
//! - [`roofing`] - Roof covering and timber (aluminum)
//! - [`openings`] - Doors & windows
//! - [`plumbing`] - Pipework and storage tank
//! - [`electrical`] - Wiring and fittings
//! - [`finishing`] - Plaster, paint and floor tiles

pub mod blockwork;
pub mod electrical;
pub mod finishing;
pub mod foundation;
pub mod openings;
pub mod plumbing;
pub mod roofing;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::plan::Plan;
use crate::pricing::{MaterialKey, PriceBook};

/// Round a raw take-off quantity up to the next whole purchase unit.
///
/// ```rust
/// use boq_core::calculations::ceil_qty;
///
/// assert_eq!(ceil_qty(57.5), 58);
/// assert_eq!(ceil_qty(540.0), 540);
/// assert_eq!(ceil_qty(0.0001), 1);
/// ```
pub fn ceil_qty(raw: f64) -> u64 {
    raw.ceil() as u64
}

// ============================================================================
// Stages
// ============================================================================

/// Construction stages in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Foundation,
    Blockwork,
    Roofing,
    DoorsWindows,
    Plumbing,
    Electrical,
    Finishing,
}

impl StageKind {
    /// All stages in the fixed build order
    pub const ALL: [StageKind; 7] = [
        StageKind::Foundation,
        StageKind::Blockwork,
        StageKind::Roofing,
        StageKind::DoorsWindows,
        StageKind::Plumbing,
        StageKind::Electrical,
        StageKind::Finishing,
    ];

    /// 1-based position in the build sequence
    pub fn order(&self) -> u8 {
        match self {
            StageKind::Foundation => 1,
            StageKind::Blockwork => 2,
            StageKind::Roofing => 3,
            StageKind::DoorsWindows => 4,
            StageKind::Plumbing => 5,
            StageKind::Electrical => 6,
            StageKind::Finishing => 7,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StageKind::Foundation => "Foundation & Groundwork",
            StageKind::Blockwork => "Blockwork & Walling",
            StageKind::Roofing => "Roofing",
            StageKind::DoorsWindows => "Doors & Windows",
            StageKind::Plumbing => "Plumbing",
            StageKind::Electrical => "Electrical",
            StageKind::Finishing => "Finishing",
        }
    }

    /// Fixed duration estimate. Not derived from plan size.
    pub fn duration_days(&self) -> u32 {
        match self {
            StageKind::Foundation => 14,
            StageKind::Blockwork => 21,
            StageKind::Roofing => 10,
            StageKind::DoorsWindows => 7,
            StageKind::Plumbing => 10,
            StageKind::Electrical => 10,
            StageKind::Finishing => 21,
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Line items
// ============================================================================

/// One priced BOQ line. Built only through [`StageContext`], so
/// `total_price == quantity × unit_price` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    category: String,
    material: MaterialKey,
    name: String,
    unit: String,
    quantity: u64,
    unit_price: f64,
    total_price: f64,
}

impl MaterialItem {
    /// Stage display name this line belongs to
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn material(&self) -> MaterialKey {
        self.material
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of the quantity (bag, tonne, kg, piece, ...)
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Whole purchase units
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Region-adjusted price per unit
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }
}

/// Take-off result for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionStage {
    pub stage: StageKind,
    pub name: String,
    pub order: u8,
    pub items: Vec<MaterialItem>,
    /// Sum of item totals, in item order
    pub total_cost: f64,
    pub duration_days: u32,
}

impl ConstructionStage {
    pub fn new(stage: StageKind, items: Vec<MaterialItem>) -> Self {
        let total_cost = items.iter().map(MaterialItem::total_price).sum();
        ConstructionStage {
            stage,
            name: stage.display_name().to_string(),
            order: stage.order(),
            items,
            total_cost,
            duration_days: stage.duration_days(),
        }
    }

    /// Find a line by material
    pub fn item(&self, material: MaterialKey) -> Option<&MaterialItem> {
        self.items.iter().find(|i| i.material == material)
    }
}

// ============================================================================
// Context
// ============================================================================

/// Borrowed inputs shared by every stage calculator.
pub struct StageContext<'a> {
    pub plan: &'a Plan,
    pub prices: &'a PriceBook,
    multiplier: f64,
}

impl<'a> StageContext<'a> {
    pub fn new(plan: &'a Plan, prices: &'a PriceBook) -> Self {
        StageContext {
            plan,
            prices,
            multiplier: prices.region_multiplier(&plan.location),
        }
    }

    /// Regional multiplier resolved for the plan's location
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Price a line in the material's catalog unit.
    pub fn line(&self, stage: StageKind, material: MaterialKey, quantity: u64) -> CalcResult<MaterialItem> {
        self.priced_line(stage, material, material.display_name(), material.price_unit(), quantity, 1.0)
    }

    /// Price a line with an explicit name, unit and price factor.
    ///
    /// `price_factor` scales the catalog price before the regional
    /// multiplier: stage surcharges (luxury tiles, external doors) and unit
    /// conversions (tonne → kg) go through here.
    pub fn priced_line(
        &self,
        stage: StageKind,
        material: MaterialKey,
        name: &str,
        unit: &str,
        quantity: u64,
        price_factor: f64,
    ) -> CalcResult<MaterialItem> {
        let unit_price = self.prices.base_price(material)? * price_factor * self.multiplier;
        Ok(MaterialItem {
            category: stage.display_name().to_string(),
            material,
            name: name.to_string(),
            unit: unit.to_string(),
            quantity,
            unit_price,
            total_price: quantity as f64 * unit_price,
        })
    }
}

/// Run the take-off for one stage.
pub fn calculate_stage(stage: StageKind, ctx: &StageContext) -> CalcResult<ConstructionStage> {
    let items = match stage {
        StageKind::Foundation => foundation::calculate(ctx)?,
        StageKind::Blockwork => blockwork::calculate(ctx)?,
        StageKind::Roofing => roofing::calculate(ctx)?,
        StageKind::DoorsWindows => openings::calculate(ctx)?,
        StageKind::Plumbing => plumbing::calculate(ctx)?,
        StageKind::Electrical => electrical::calculate(ctx)?,
        StageKind::Finishing => finishing::calculate(ctx)?,
    };

    let result = ConstructionStage::new(stage, items);
    tracing::debug!(
        stage = %stage,
        items = result.items.len(),
        total_cost = result.total_cost,
        "Stage take-off complete"
    );
    Ok(result)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::plan::{Floor, Plan, Room};

    /// Single 5m × 4m × 3m bedroom in Douala
    pub fn single_bedroom() -> Plan {
        Plan::new("Single bedroom", "douala")
            .with_floor(Floor::new(0, "Ground Floor").with_room(Room::new("Bedroom", "bedroom", 5.0, 4.0)))
    }

    /// Two floors: bedroom + kitchen downstairs, bathroom + bedroom upstairs
    pub fn two_storey() -> Plan {
        Plan::new("Two storey", "douala")
            .with_floor(
                Floor::new(0, "Ground Floor")
                    .with_room(Room::new("Kitchen", "kitchen", 4.0, 3.0))
                    .with_room(Room::new("Living", "living_room", 6.0, 5.0)),
            )
            .with_floor(
                Floor::new(1, "First Floor")
                    .with_room(Room::new("Bath", "bathroom", 2.0, 2.0))
                    .with_room(Room::new("Bedroom", "bedroom", 4.0, 4.0)),
            )
    }
}
