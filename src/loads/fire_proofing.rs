//! Fire-proofing quantities derived from element geometry

use log::debug;
use serde::{Deserialize, Serialize};

use super::FireProofingBand;
use crate::compile::ElementGeometry;
use crate::geometry::MM_PER_M;

/// An element inside the fire-proofing band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireProofedElement {
    pub element: usize,
    /// Length inside the band (mm)
    pub covered_length: f64,
}

/// Fire-proofed elements bucketed by encasement type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireProofingLoads {
    /// Band height above base (mm)
    pub height: f64,
    pub boxed: Vec<FireProofedElement>,
    pub profiled: Vec<FireProofedElement>,
}

/// Collect structural elements intersecting `[base, base + height]`.
///
/// Sloped and vertical elements are clipped at the band edges; horizontal
/// elements count in full when inside the band. Sections whose larger
/// dimension is at most `boxed_limit` (mm) are boxed, the rest profiled.
pub fn fire_proofing(
    elements: &[ElementGeometry],
    band: &FireProofingBand,
    base_elevation: f64,
    boxed_limit: f64,
    tol: f64,
) -> FireProofingLoads {
    let bottom = base_elevation;
    let top = base_elevation + band.height;
    let mut result = FireProofingLoads {
        height: band.height * MM_PER_M,
        ..Default::default()
    };

    for element in elements.iter().filter(|e| e.kind.is_structural()) {
        let y0 = element.start.y.min(element.end.y);
        let y1 = element.start.y.max(element.end.y);
        let length = element.length();

        let covered = if y1 - y0 <= tol {
            if y0 < bottom - tol || y0 > top + tol {
                continue;
            }
            length
        } else {
            let overlap = y1.min(top) - y0.max(bottom);
            if overlap <= tol {
                continue;
            }
            length * overlap / (y1 - y0)
        };

        let entry = FireProofedElement {
            element: element.label,
            covered_length: covered * MM_PER_M,
        };
        if element.max_dimension() <= boxed_limit {
            result.boxed.push(entry);
        } else {
            result.profiled.push(entry);
        }
    }

    debug!(
        "Fire-proofing: {} boxed, {} profiled",
        result.boxed.len(),
        result.profiled.len()
    );
    result
}
