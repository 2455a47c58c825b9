//! Steel grades echoed to the design checker

use serde::{Deserialize, Serialize};

/// Structural steel grade (N/mm², kg/m³)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub grade: String,
    /// Modulus of elasticity
    pub e: f64,
    /// Yield strength
    pub fy: f64,
    /// Ultimate tensile strength
    pub fu: f64,
    pub density: f64,
}

impl Material {
    pub fn new(grade: &str, fy: f64, fu: f64) -> Self {
        Self {
            grade: grade.to_string(),
            e: 200_000.0,
            fy,
            fu,
            density: 7850.0,
        }
    }

    /// A36 structural steel
    pub fn steel() -> Self {
        Self::new("A36", 250.0, 400.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
