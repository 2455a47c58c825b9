//! Peripheral cells of a rectangular plan region
//!
//! A blanket load spans a rectangle between two reference beams. The beams
//! framing that rectangle are stitched into straight runs, the runs form a
//! grid, and each grid rectangle becomes a cell listing the elements on its
//! four sides.

use std::collections::VecDeque;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::compile::{ElementGeometry, ItemKind};
use crate::elements::{MemberKind, StructuralMember};
use crate::geometry::{self, Axis, PlanAxis, Vec3, MM_PER_M};

/// One rectangle of the beam grid with its bounding element labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeripheralCell {
    /// Side at the smallest z
    pub front: Vec<usize>,
    /// Side at the largest z
    pub back: Vec<usize>,
    /// Side at the smallest x
    pub left: Vec<usize>,
    /// Side at the largest x
    pub right: Vec<usize>,
    /// `[x_min, z_min, x_max, z_max]` in mm
    pub bounds: [f64; 4],
}

impl PeripheralCell {
    /// `(x extent, z extent)` in mm
    pub fn extents(&self) -> (f64, f64) {
        (self.bounds[2] - self.bounds[0], self.bounds[3] - self.bounds[1])
    }
}

/// Resolved cells, plus the lower-left corners (mm, `[x, z]`) that had no
/// valid diagonal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub cells: Vec<PeripheralCell>,
    pub skipped: Vec<[f64; 2]>,
}

/// A straight chain of collinear beams along one plan axis (metres)
#[derive(Debug, Clone)]
struct Run {
    axis: PlanAxis,
    /// Coordinate on the other plan axis
    fixed: f64,
    lo: f64,
    hi: f64,
    /// (label, lo, hi) of each element
    elements: Vec<(usize, f64, f64)>,
}

impl Run {
    fn from_element(e: &ElementGeometry, axis: PlanAxis) -> Self {
        let (a, b) = (axis.coord(&e.start), axis.coord(&e.end));
        let fixed = match axis {
            PlanAxis::X => e.start.z,
            PlanAxis::Z => e.start.x,
        };
        Self {
            axis,
            fixed,
            lo: a.min(b),
            hi: a.max(b),
            elements: vec![(e.label, a.min(b), a.max(b))],
        }
    }

    fn touches(&self, other: &Run, tol: f64) -> bool {
        self.axis == other.axis
            && (self.fixed - other.fixed).abs() <= tol
            && ((self.hi - other.lo).abs() <= tol || (other.hi - self.lo).abs() <= tol)
    }

    fn absorb(&mut self, other: Run) {
        self.lo = self.lo.min(other.lo);
        self.hi = self.hi.max(other.hi);
        self.elements.extend(other.elements);
    }

    fn has_endpoint(&self, at: f64, tol: f64) -> bool {
        self.elements
            .iter()
            .any(|(_, lo, hi)| (lo - at).abs() <= tol || (hi - at).abs() <= tol)
    }

    /// Labels of elements lying within `[from, to]`
    fn between(&self, from: f64, to: f64, tol: f64) -> Vec<usize> {
        let mut inside: Vec<(usize, f64, f64)> = self
            .elements
            .iter()
            .copied()
            .filter(|(_, lo, hi)| *lo >= from - tol && *hi <= to + tol)
            .collect();
        inside.sort_by(|a, b| a.1.total_cmp(&b.1));
        inside.into_iter().map(|(label, _, _)| label).collect()
    }
}

/// Merge touching runs until nothing changes
fn stitch(runs: Vec<Run>, tol: f64) -> Vec<Run> {
    let mut arena: Vec<Option<Run>> = runs.into_iter().map(Some).collect();
    let mut worklist: VecDeque<usize> = (0..arena.len()).collect();

    while let Some(id) = worklist.pop_front() {
        let Some(current) = arena[id].clone() else {
            continue;
        };
        let partner = arena.iter().enumerate().find_map(|(j, slot)| match slot {
            Some(other) if j != id && current.touches(other, tol) => Some(j),
            _ => None,
        });
        if let Some(j) = partner {
            if let Some(other) = arena[j].take() {
                if let Some(run) = arena[id].as_mut() {
                    run.absorb(other);
                }
                worklist.push_back(id);
            }
        }
    }

    arena.into_iter().flatten().collect()
}

/// Resolve the region `[distance, distance + width]` along the `from` and
/// `to` members into cells of the beam grid at the `from` elevation
pub fn resolve(
    from: &StructuralMember,
    to: &StructuralMember,
    distance: f64,
    width: f64,
    elements: &[ElementGeometry],
    tol: f64,
) -> Resolution {
    let corners = [
        geometry::point_at(&from.start, &from.end, distance),
        geometry::point_at(&from.start, &from.end, distance + width),
        geometry::point_at(&to.start, &to.end, distance),
        geometry::point_at(&to.start, &to.end, distance + width),
    ];
    let x_min = corners.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
    let x_max = corners.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
    let z_min = corners.iter().map(|c| c.z).fold(f64::INFINITY, f64::min);
    let z_max = corners.iter().map(|c| c.z).fold(f64::NEG_INFINITY, f64::max);
    let elevation = from.start.y;

    let inside = |p: &Vec3| {
        p.x >= x_min - tol && p.x <= x_max + tol && p.z >= z_min - tol && p.z <= z_max + tol
    };

    let runs: Vec<Run> = elements
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                ItemKind::Structural(MemberKind::Beam | MemberKind::Cantilever)
            )
        })
        .filter(|e| (e.start.y - elevation).abs() <= tol && (e.end.y - elevation).abs() <= tol)
        .filter(|e| inside(&e.start) && inside(&e.end))
        .filter_map(|e| match geometry::classify(&e.start, &e.end, tol) {
            Axis::X => Some(Run::from_element(e, PlanAxis::X)),
            Axis::Z => Some(Run::from_element(e, PlanAxis::Z)),
            _ => None,
        })
        .collect();
    let found = runs.len();

    let runs: Vec<Run> = stitch(runs, tol)
        .into_iter()
        .filter(|r| match r.axis {
            PlanAxis::X => r.lo <= x_min + tol && r.hi >= x_max - tol,
            PlanAxis::Z => r.lo <= z_min + tol && r.hi >= z_max - tol,
        })
        .collect();

    // grid lines: X-runs sit at fixed z, Z-runs at fixed x
    let mut rows: Vec<&Run> = runs.iter().filter(|r| r.axis == PlanAxis::X).collect();
    let mut cols: Vec<&Run> = runs.iter().filter(|r| r.axis == PlanAxis::Z).collect();
    rows.sort_by(|a, b| a.fixed.total_cmp(&b.fixed));
    cols.sort_by(|a, b| a.fixed.total_cmp(&b.fixed));
    trace!(
        "Blanket region: {} beams, {} rows, {} columns",
        found,
        rows.len(),
        cols.len()
    );

    // present[j][i]: row j and column i meet at an element end point
    let present: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| {
            cols.iter()
                .map(|col| row.has_endpoint(col.fixed, tol) && col.has_endpoint(row.fixed, tol))
                .collect()
        })
        .collect();

    let right_of = |j: usize, i: usize| ((i + 1)..cols.len()).find(|&k| present[j][k]);
    let above = |j: usize, i: usize| ((j + 1)..rows.len()).find(|&k| present[k][i]);

    let mut resolution = Resolution::default();
    // rows ascend in z and columns in x, so this visits corners lowest-first
    let worklist = (0..rows.len()).flat_map(|j| (0..cols.len()).map(move |i| (j, i)));
    for (j, i) in worklist {
        if !present[j][i] {
            continue;
        }
        let (Some(i2), Some(j2)) = (right_of(j, i), above(j, i)) else {
            continue;
        };
        let diagonal_ok = present[j2][i2] && above(j, i2) == Some(j2) && right_of(j2, i) == Some(i2);
        let (x0, x1) = (cols[i].fixed, cols[i2].fixed);
        let (z0, z1) = (rows[j].fixed, rows[j2].fixed);
        if !diagonal_ok {
            warn!(
                "Blanket cell at ({:.3}, {:.3}) has no diagonal corner; skipped",
                x0, z0
            );
            resolution.skipped.push([x0 * MM_PER_M, z0 * MM_PER_M]);
            continue;
        }
        resolution.cells.push(PeripheralCell {
            front: rows[j].between(x0, x1, tol),
            back: rows[j2].between(x0, x1, tol),
            left: cols[i].between(z0, z1, tol),
            right: cols[i2].between(z0, z1, tol),
            bounds: [x0 * MM_PER_M, z0 * MM_PER_M, x1 * MM_PER_M, z1 * MM_PER_M],
        });
    }

    debug!(
        "Blanket region resolved into {} cells ({} skipped)",
        resolution.cells.len(),
        resolution.skipped.len()
    );
    resolution
}
