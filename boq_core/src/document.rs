//! # Plan Documents
//!
//! A `PlanDocument` is the root container that gets saved to `.boq` files:
//! the plan as drawn, plus the last estimate computed for it.
//!
//! ## Structure
//!
//! ```text
//! PlanDocument
//! ├── meta: DocumentMeta (version, plan id, owner, title, timestamps)
//! ├── plan: Plan (floors, rooms, method choices, location)
//! └── estimate: Option<PlanEstimate> (None until recalculated)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::document::PlanDocument;
//! use boq_core::pricing::PriceBook;
//! use boq_core::templates;
//!
//! let plan = templates::get("bungalow_2bed", "yaounde").unwrap();
//! let mut doc = PlanDocument::new("owner-42", plan);
//! assert!(doc.estimate.is_none());
//!
//! doc.recalculate(PriceBook::standard()).unwrap();
//! assert!(doc.estimate.is_some());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CalcResult;
use crate::estimate::{calculate, PlanEstimate};
use crate::plan::Plan;
use crate::pricing::PriceBook;

/// Current schema version for .boq files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root document container, serialized to `.boq` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    pub meta: DocumentMeta,

    pub plan: Plan,

    /// Last computed estimate. Cleared whenever the plan changes.
    #[serde(default)]
    pub estimate: Option<PlanEstimate>,
}

impl PlanDocument {
    /// Create a document for a plan, with a fresh plan id.
    ///
    /// The title is taken from the plan name.
    pub fn new(owner_id: impl Into<String>, plan: Plan) -> Self {
        let now = Utc::now();
        PlanDocument {
            meta: DocumentMeta {
                version: SCHEMA_VERSION.to_string(),
                plan_id: Uuid::new_v4(),
                owner_id: owner_id.into(),
                title: plan.name.clone(),
                created: now,
                modified: now,
            },
            plan,
            estimate: None,
        }
    }

    /// Recompute and store the estimate.
    ///
    /// On error the previous estimate is left untouched.
    pub fn recalculate(&mut self, prices: &PriceBook) -> CalcResult<&PlanEstimate> {
        let estimate = calculate(&self.plan, prices)?;
        self.touch();
        Ok(&*self.estimate.insert(estimate))
    }

    /// Replace the plan. Any stored estimate is dropped as stale.
    pub fn set_plan(&mut self, plan: Plan) {
        self.plan = plan;
        self.estimate = None;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Document header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub plan_id: Uuid,

    /// Opaque owner reference, never read by the calculator
    pub owner_id: String,

    pub title: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}
