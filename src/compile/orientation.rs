//! Element orientation lookup

use std::collections::HashMap;

use crate::geometry::{self, Vec3};
use crate::model::StructureModel;

/// Read-only source of member local z-axes, keyed by member name.
///
/// The caller owns whatever scene or table backs it; the compiler only
/// queries it.
pub trait OrientationProvider {
    fn local_axis(&self, name: &str) -> Option<Vec3>;
}

impl OrientationProvider for HashMap<String, Vec3> {
    fn local_axis(&self, name: &str) -> Option<Vec3> {
        self.get(name).copied()
    }
}

/// Orientation derived from member geometry and rotation angle only
#[derive(Debug, Clone, Default)]
pub struct GeometricOrientation {
    axes: HashMap<String, Vec3>,
}

impl GeometricOrientation {
    pub fn from_model(model: &StructureModel) -> Self {
        let axes = model
            .members
            .iter()
            .map(|m| {
                (
                    m.name.clone(),
                    geometry::local_z_axis(&m.start, &m.end, m.orientation),
                )
            })
            .collect();
        Self { axes }
    }
}

impl OrientationProvider for GeometricOrientation {
    fn local_axis(&self, name: &str) -> Option<Vec3> {
        self.axes.get(name).copied()
    }
}
