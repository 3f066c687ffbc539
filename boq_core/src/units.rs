//! # Unit Types
//!
//! Thin newtype wrappers for the metric quantities used in plan geometry.
//! They keep lengths and areas from being mixed up while serializing as bare
//! numbers.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::units::{Meters, SquareMeters};
//!
//! let area: SquareMeters = Meters(5.0) * Meters(4.0);
//! assert_eq!(area, SquareMeters(20.0));
//! assert_eq!((area + SquareMeters(2.0)).0, 22.0);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Mul};

// ============================================================================
// Length
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Add for Meters {
    type Output = Meters;

    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;

    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl Mul for Meters {
    type Output = SquareMeters;

    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Area
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Add for SquareMeters {
    type Output = SquareMeters;

    fn add(self, rhs: SquareMeters) -> SquareMeters {
        SquareMeters(self.0 + rhs.0)
    }
}

impl Mul<f64> for SquareMeters {
    type Output = SquareMeters;

    fn mul(self, rhs: f64) -> SquareMeters {
        SquareMeters(self.0 * rhs)
    }
}

impl Sum for SquareMeters {
    fn sum<I: Iterator<Item = SquareMeters>>(iter: I) -> SquareMeters {
        iter.fold(SquareMeters(0.0), |acc, a| acc + a)
    }
}

impl std::fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} m²", self.0)
    }
}
