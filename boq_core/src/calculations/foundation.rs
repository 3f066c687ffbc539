//! # Foundation & Groundwork
//!
//! Concrete, aggregates and reinforcement for the foundation, proportional to
//! the built area (floor area × 1.15).
//!
//! | Material | Strip | Raft |
//! |---|---|---|
//! | Cement (bags/m²) | 2.5 | 4.0 |
//! | Sand (t/m²) | 0.8 | 1.5 |
//! | Gravel (t/m²) | 1.2 | 2.0 |
//! | Steel 10mm (kg/m²) | 15 | - |
//! | Steel 12mm (kg/m²) | 20 | 35 |
//! | Steel 16mm (kg/m²) | - | 25 |
//!
//! Steel is priced per tonne and taken off in kg. Pile foundations have no
//! take-off rules and are rejected.

use super::{ceil_qty, MaterialItem, StageContext, StageKind};
use crate::errors::{CalcError, CalcResult};
use crate::plan::FoundationType;
use crate::pricing::MaterialKey;

const STAGE: StageKind = StageKind::Foundation;

/// Quantities per m² of built area
struct FoundationRates {
    cement_bags: f64,
    sand_t: f64,
    gravel_t: f64,
    /// (bar size, kg per m²)
    steel_kg: [(MaterialKey, f64); 2],
}

const STRIP: FoundationRates = FoundationRates {
    cement_bags: 2.5,
    sand_t: 0.8,
    gravel_t: 1.2,
    steel_kg: [(MaterialKey::Steel10mmTonne, 15.0), (MaterialKey::Steel12mmTonne, 20.0)],
};

const RAFT: FoundationRates = FoundationRates {
    cement_bags: 4.0,
    sand_t: 1.5,
    gravel_t: 2.0,
    steel_kg: [(MaterialKey::Steel12mmTonne, 35.0), (MaterialKey::Steel16mmTonne, 25.0)],
};

const KG_PER_TONNE: f64 = 1000.0;

pub fn calculate(ctx: &StageContext) -> CalcResult<Vec<MaterialItem>> {
    let rates = match ctx.plan.foundation_type {
        FoundationType::Strip => &STRIP,
        FoundationType::Raft => &RAFT,
        FoundationType::Pile => {
            return Err(CalcError::unsupported_method(
                STAGE.display_name(),
                FoundationType::Pile.code(),
            ))
        }
    };

    let area = ctx.plan.total_built_area().0;

    let mut items = vec![
        ctx.line(STAGE, MaterialKey::Cement50kg, ceil_qty(area * rates.cement_bags))?,
        ctx.line(STAGE, MaterialKey::SandTonne, ceil_qty(area * rates.sand_t))?,
        ctx.line(STAGE, MaterialKey::GravelTonne, ceil_qty(area * rates.gravel_t))?,
    ];

    for (bar, kg_per_m2) in rates.steel_kg {
        items.push(ctx.priced_line(
            STAGE,
            bar,
            bar.display_name(),
            "kg",
            ceil_qty(area * kg_per_m2),
            1.0 / KG_PER_TONNE,
        )?);
    }

    Ok(items)
}
