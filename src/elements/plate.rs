//! Base plates and splice flanges attached to members

use serde::{Deserialize, Serialize};

use crate::plates::{BoltLayout, PlateSize, StiffenerLayout};

/// Where the plate sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateKind {
    /// Column base plate
    Base,
    /// Flange plate at a member splice
    Splice,
}

/// A bolted plate to be tension-checked (mm)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateSpec {
    pub name: String,
    pub kind: PlateKind,
    /// Member the plate belongs to
    pub member: String,
    /// Plate length along the member's local depth at 0° orientation
    pub length: f64,
    pub width: f64,
    pub bolts: BoltLayout,
    #[serde(default)]
    pub stiffeners: StiffenerLayout,
}

impl PlateSpec {
    pub fn base(name: &str, member: &str, length: f64, width: f64, bolts: BoltLayout) -> Self {
        Self {
            name: name.to_string(),
            kind: PlateKind::Base,
            member: member.to_string(),
            length,
            width,
            bolts,
            stiffeners: StiffenerLayout::default(),
        }
    }

    pub fn splice(name: &str, member: &str, length: f64, width: f64, bolts: BoltLayout) -> Self {
        Self {
            kind: PlateKind::Splice,
            ..Self::base(name, member, length, width, bolts)
        }
    }

    pub fn with_stiffeners(mut self, stiffeners: StiffenerLayout) -> Self {
        self.stiffeners = stiffeners;
        self
    }

    pub fn size(&self) -> PlateSize {
        PlateSize {
            length: self.length,
            width: self.width,
        }
    }
}
