//! # boq_core - House Plan Bill of Quantities Engine
//!
//! `boq_core` turns a house plan (floors, rooms, construction method choices
//! and a location) into a priced bill of quantities: seven construction
//! stages, each a list of material lines with whole-unit quantities, plus
//! labor, total cost and a duration estimate.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: estimates are pure functions of a plan and a price book
//! - **JSON-First**: every input and output type is serde-serializable
//! - **Rich Errors**: structured error types, not just strings
//! - **Fail Loudly**: unsupported method choices are errors, never zero-cost guesses
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::estimate::estimate;
//! use boq_core::plan::{Floor, Plan, Room};
//!
//! let plan = Plan::new("Starter Home", "yaounde")
//!     .with_floor(
//!         Floor::new(0, "Ground Floor")
//!             .with_room(Room::new("Living Room", "living_room", 5.0, 4.0))
//!             .with_room(Room::new("Kitchen", "kitchen", 3.0, 3.0)),
//!     );
//!
//! let result = estimate(&plan).unwrap();
//! println!("Total: {:.0} {}", result.total_project_cost, result.currency);
//! ```
//!
//! ## Modules
//!
//! - [`plan`] - Plan, floors, rooms and construction method enums
//! - [`pricing`] - Material catalog, regional multipliers, TOML price books
//! - [`calculations`] - The seven stage take-offs
//! - [`estimate`] - Plan aggregation and regional comparison
//! - [`document`] - Plan documents (plan + identity + last estimate)
//! - [`file_io`] - `.boq` files with atomic saves and locking
//! - [`pdf`] - PDF bill of quantities
//! - [`templates`] - Built-in example plans
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod document;
pub mod errors;
pub mod estimate;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod pdf;
pub mod plan;
pub mod pricing;
pub mod templates;
pub mod units;

pub use calculations::{ConstructionStage, MaterialItem, StageKind};
pub use document::PlanDocument;
pub use errors::{CalcError, CalcResult};
pub use estimate::{calculate, compare_regions, estimate, PlanEstimate, RegionalEstimate};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_document, load_plan, save_document, FileLock};
pub use plan::{Floor, Plan, Room};
pub use pricing::{MaterialKey, PriceBook};
