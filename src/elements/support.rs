//! Frames and support conditions

use serde::{Deserialize, Serialize};

/// Support type entered on a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportType {
    Fix,
    Pin,
}

/// Boundary condition attached to a base node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryCondition {
    Fixed,
    Pinned,
}

impl From<SupportType> for BoundaryCondition {
    fn from(support: SupportType) -> Self {
        match support {
            SupportType::Fix => BoundaryCondition::Fixed,
            SupportType::Pin => BoundaryCondition::Pinned,
        }
    }
}

impl BoundaryCondition {
    /// Restrained DOFs [DX, DY, DZ, RX, RY, RZ]
    pub fn restraints(self) -> [bool; 6] {
        match self {
            BoundaryCondition::Fixed => [true; 6],
            BoundaryCondition::Pinned => [true, true, true, false, false, false],
        }
    }
}

/// A frame (or support group) owning base columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,
    pub support_type: SupportType,
}

impl Frame {
    pub fn new(name: &str, support_type: SupportType) -> Self {
        Self {
            name: name.to_string(),
            support_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_support() {
        let bc = BoundaryCondition::from(SupportType::Fix);
        assert_eq!(bc, BoundaryCondition::Fixed);
        assert!(bc.restraints().iter().all(|r| *r));
    }

    #[test]
    fn test_pinned_support() {
        let bc = BoundaryCondition::from(SupportType::Pin);
        assert_eq!(bc.restraints(), [true, true, true, false, false, false]);
    }
}
