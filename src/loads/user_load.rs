//! Loads as entered by the user, keyed by distance along a member

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::LoadCategory;

/// Where along the member a load sits (metres from the member start)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LoadShape {
    Point { distance: f64 },
    Udl { distance: f64, length: f64 },
}

/// A point load or UDL on a named member or pipe run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoad {
    /// Member or pipe run the load was entered on
    pub element: String,
    pub category: LoadCategory,
    pub shape: LoadShape,
    /// [FX, FY, FZ, MX, MY, MZ]; per unit length for a UDL
    pub components: [f64; 6],
}

impl UserLoad {
    /// Create a point load
    pub fn point(element: &str, category: LoadCategory, distance: f64, components: [f64; 6]) -> Self {
        Self {
            element: element.to_string(),
            category,
            shape: LoadShape::Point { distance },
            components,
        }
    }

    /// Create a uniformly distributed load over `[distance, distance + length]`
    pub fn udl(
        element: &str,
        category: LoadCategory,
        distance: f64,
        length: f64,
        components: [f64; 6],
    ) -> Self {
        Self {
            element: element.to_string(),
            category,
            shape: LoadShape::Udl { distance, length },
            components,
        }
    }

    /// Create a downward (negative Y) point load
    pub fn downward(element: &str, category: LoadCategory, distance: f64, magnitude: f64) -> Self {
        Self::point(element, category, distance, [0.0, -magnitude.abs(), 0.0, 0.0, 0.0, 0.0])
    }

    /// Create a downward (negative Y) UDL
    pub fn downward_udl(
        element: &str,
        category: LoadCategory,
        distance: f64,
        length: f64,
        intensity: f64,
    ) -> Self {
        Self::udl(
            element,
            category,
            distance,
            length,
            [0.0, -intensity.abs(), 0.0, 0.0, 0.0, 0.0],
        )
    }

    /// Distances that become split points on the loaded member
    pub fn split_distances(&self) -> Vec<f64> {
        match self.shape {
            LoadShape::Point { distance } => vec![distance],
            LoadShape::Udl { distance, length } => vec![distance, distance + length],
        }
    }
}

/// A pressure over a rectangular plan region between two beams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlanketLoad {
    pub name: String,
    pub category: LoadCategory,
    /// Beam the region starts from
    pub from_member: String,
    /// Beam the region extends to
    pub to_member: String,
    /// Start of the region along both beams (metres)
    pub distance: f64,
    /// Extent of the region along both beams (metres)
    pub width: f64,
    /// Downward pressure (force per square metre)
    pub pressure: f64,
}

/// Height band above the base that receives fire-proofing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireProofingBand {
    /// Height above base elevation (metres)
    pub height: f64,
}

/// Environmental wind parameters echoed to the checker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindParameters {
    pub code: String,
    pub basic_speed: f64,
    #[serde(default)]
    pub factors: BTreeMap<String, f64>,
}

/// Everything the user entered on the loads side
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadsConfig {
    #[serde(default)]
    pub loads: Vec<UserLoad>,
    #[serde(default)]
    pub blankets: Vec<BlanketLoad>,
    #[serde(default)]
    pub fire_proofing: Option<FireProofingBand>,
    #[serde(default)]
    pub wind: Option<WindParameters>,
}

impl LoadsConfig {
    /// Loads entered on `element`, in entry order
    pub fn loads_on<'a>(&'a self, element: &'a str) -> impl Iterator<Item = &'a UserLoad> + 'a {
        self.loads.iter().filter(move |l| l.element == element)
    }
}
