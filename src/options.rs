//! Compiler options

use serde::{Deserialize, Serialize};

/// Tunable constants used while compiling a structure into analysis input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Distance tolerance in metres for split-point dedupe and load matching
    pub distance_tolerance: f64,
    /// Half-angle of the diagonal wind sectors (degrees)
    pub wind_sector_half_angle: f64,
    /// Minimum unobstructed share of a member's span for it to count as facing
    pub facing_clear_ratio: f64,
    /// Largest section dimension (mm) still fire-proofed as a box
    pub fire_proofing_boxed_limit: f64,
    /// Decimal places used by the equal-areas point-in-triangle test
    pub area_decimals: i32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            distance_tolerance: 1e-3,
            wind_sector_half_angle: 90.0,
            facing_clear_ratio: 0.5,
            fire_proofing_boxed_limit: 300.0,
            area_decimals: 5,
        }
    }
}

impl CompileOptions {
    /// Set the distance tolerance (metres)
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.distance_tolerance = tol;
        self
    }

    /// Set the diagonal wind sector half-angle (degrees)
    pub fn with_wind_half_angle(mut self, degrees: f64) -> Self {
        self.wind_sector_half_angle = degrees;
        self
    }

    /// Set the facing clear-span ratio
    pub fn with_facing_ratio(mut self, ratio: f64) -> Self {
        self.facing_clear_ratio = ratio;
        self
    }

    /// Set the boxed fire-proofing limit (mm)
    pub fn with_boxed_limit(mut self, limit_mm: f64) -> Self {
        self.fire_proofing_boxed_limit = limit_mm;
        self
    }
}
