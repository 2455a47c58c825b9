//! Symmetric bolt grids

use serde::{Deserialize, Serialize};

/// Bolt pattern of a plate (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltLayout {
    pub diameter: f64,
    /// Distance of the first row from the plate centre along the length
    pub offset_length: f64,
    /// Row-to-row spacing along the length
    pub spacing_length: f64,
    pub offset_width: f64,
    pub spacing_width: f64,
}

impl BoltLayout {
    /// Same offset and spacing on both axes
    pub fn square(diameter: f64, offset: f64, spacing: f64) -> Self {
        Self {
            diameter,
            offset_length: offset,
            spacing_length: spacing,
            offset_width: offset,
            spacing_width: spacing,
        }
    }

    /// Bolt centres `(along length, along width)` relative to the plate
    /// centre, clipped to the plate half dimensions
    pub fn grid(&self, length: f64, width: f64) -> Vec<(f64, f64)> {
        let rows = axis_positions(self.offset_length, self.spacing_length, length / 2.0);
        let cols = axis_positions(self.offset_width, self.spacing_width, width / 2.0);
        rows.iter()
            .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
            .collect()
    }
}

/// `±offset, ±(offset + k·spacing)` up to `half`, ascending
fn axis_positions(offset: f64, spacing: f64, half: f64) -> Vec<f64> {
    const EPS: f64 = 1e-9;
    let mut positive = Vec::new();
    let mut p = offset.abs();
    while p <= half + EPS {
        positive.push(p);
        if spacing <= EPS {
            break;
        }
        p += spacing;
    }

    let mut all: Vec<f64> = positive.iter().rev().map(|p| -p).collect();
    for p in positive {
        if p.abs() > EPS || all.last().map_or(true, |l| l.abs() > EPS) {
            all.push(p);
        }
    }
    all
}
