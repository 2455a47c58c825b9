//! Analysis node - a unique point of the discretized structure

use serde::{Deserialize, Serialize};

use super::BoundaryCondition;
use crate::geometry::PointKey;

/// A node as written to the analysis document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate (mm)
    pub x: f64,
    /// Y coordinate (mm)
    pub y: f64,
    /// Z coordinate (mm)
    pub z: f64,
    /// Comma-joined names of the elements meeting here
    pub members: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<BoundaryCondition>,
}

impl Node {
    /// Create a node at a grid key
    pub fn at(key: PointKey) -> Self {
        let [x, y, z] = key.to_mm();
        Self {
            x,
            y,
            z,
            members: String::new(),
            boundary: None,
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Append an incident element name
    pub fn add_member(&mut self, name: &str) {
        if !self.members.is_empty() {
            self.members.push(',');
        }
        self.members.push_str(name);
    }

    /// Set the boundary condition unless one is already present
    pub fn support_once(&mut self, condition: BoundaryCondition) -> bool {
        if self.boundary.is_some() {
            return false;
        }
        self.boundary = Some(condition);
        true
    }

    /// Calculate distance to another node (mm)
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
