//! Wind exposure analysis
//!
//! For each of the eight plan directions the analyzer reports the projected
//! structure length across the wind, the exposed and facing structural
//! elements, and the pipe tiers the wind meets.
//!
//! Angles are measured in plan from +X toward +Z and name the side the wind
//! comes from.

mod facing;
mod sector;

pub use facing::{facing_elements, uncovered_length};
pub use sector::Sector;

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::compile::{ElementGeometry, ItemKind};
use crate::geometry::{self, Vec2, Vec3, MM_PER_M};
use crate::options::CompileOptions;

/// The eight analysed directions (degrees)
pub const WIND_DIRECTIONS: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// Axis-aligned plan extent of the structure (metres)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlanBounds {
    /// Bounds over every element end point; `None` without elements
    pub fn from_elements(elements: &[ElementGeometry]) -> Option<Self> {
        let mut points = elements
            .iter()
            .flat_map(|e| [geometry::plan(&e.start), geometry::plan(&e.end)]);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.inf(&p), hi.sup(&p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Half the plan diagonal
    pub fn radius(&self) -> f64 {
        (self.max - self.min).norm() / 2.0
    }

    /// Extent seen across a wind from `angle_deg` (mm)
    pub fn projected_length(&self, angle_deg: f64) -> f64 {
        let extent = self.max - self.min;
        let rad = angle_deg.to_radians();
        (extent.x * rad.sin().abs() + extent.y * rad.cos().abs()) * MM_PER_M
    }
}

/// Pipe run met by the wind within one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRun {
    pub pipe: String,
    pub elements: Vec<usize>,
}

/// Pipe runs at one elevation, windward-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeTier {
    /// Elevation (mm)
    pub elevation: f64,
    pub runs: Vec<TierRun>,
}

/// Wind data for one direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindDirectionBlock {
    pub angle: f64,
    /// Structure length across the wind (mm)
    pub length: f64,
    pub exposed: Vec<usize>,
    pub facing: Vec<usize>,
    pub pipe_tiers: Vec<PipeTier>,
}

/// Runs the per-direction exposure analysis over emitted elements
pub struct WindAnalyzer<'a> {
    options: &'a CompileOptions,
}

impl<'a> WindAnalyzer<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self { options }
    }

    /// One block per direction in [`WIND_DIRECTIONS`]; empty without elements
    pub fn analyze(&self, elements: &[ElementGeometry]) -> Vec<WindDirectionBlock> {
        let Some(bounds) = PlanBounds::from_elements(elements) else {
            return Vec::new();
        };
        let structural: Vec<&ElementGeometry> =
            elements.iter().filter(|e| e.kind.is_structural()).collect();

        WIND_DIRECTIONS
            .iter()
            .map(|&angle| {
                let exposed = self.exposed(&structural, &bounds, angle);
                let wind = geometry::plan_direction(angle);
                let facing = facing_elements(
                    &exposed,
                    &wind,
                    self.options.facing_clear_ratio,
                    self.options.distance_tolerance,
                );
                let block = WindDirectionBlock {
                    angle,
                    length: bounds.projected_length(angle),
                    exposed: exposed.iter().map(|e| e.label).collect(),
                    facing,
                    pipe_tiers: pipe_tiers(elements, &wind),
                };
                debug!(
                    "Wind {:>3}°: {} exposed, {} facing, {} pipe tiers",
                    angle,
                    block.exposed.len(),
                    block.facing.len(),
                    block.pipe_tiers.len()
                );
                block
            })
            .collect()
    }

    fn exposed<'e>(
        &self,
        structural: &[&'e ElementGeometry],
        bounds: &PlanBounds,
        angle: f64,
    ) -> Vec<&'e ElementGeometry> {
        if angle % 90.0 == 0.0 {
            let wind = geometry::plan_direction(angle);
            let wind3 = Vec3::new(wind.x, 0.0, wind.y);
            structural
                .iter()
                .copied()
                .filter(|e| {
                    let axis = e.end - e.start;
                    let length = axis.norm();
                    length > 0.0 && (axis.dot(&wind3) / length).abs() < 1e-6
                })
                .collect()
        } else {
            let sector = Sector::new(
                bounds.center(),
                bounds.radius(),
                angle,
                self.options.wind_sector_half_angle,
            );
            let decimals = self.options.area_decimals;
            structural
                .iter()
                .copied()
                .filter(|e| {
                    sector.contains(&geometry::plan(&e.start), decimals)
                        || sector.contains(&geometry::plan(&e.end), decimals)
                })
                .collect()
        }
    }
}

/// Pipe runs grouped by elevation, skipping runs parallel to the wind
pub fn pipe_tiers(elements: &[ElementGeometry], wind: &Vec2) -> Vec<PipeTier> {
    // elevation (mm) -> pipe name -> (windward position, labels)
    let mut tiers: BTreeMap<i64, BTreeMap<&str, (f64, Vec<usize>)>> = BTreeMap::new();

    for e in elements.iter().filter(|e| e.kind == ItemKind::Pipe) {
        let plan = geometry::plan(&e.end) - geometry::plan(&e.start);
        let length = plan.norm();
        if length > 0.0 && (plan.dot(wind) / length).abs() > 1.0 - 1e-6 {
            continue;
        }
        let elevation = ((e.start.y + e.end.y) / 2.0 * MM_PER_M).round() as i64;
        let windward = ((geometry::plan(&e.start) + geometry::plan(&e.end)) / 2.0).dot(wind);
        let run = tiers
            .entry(elevation)
            .or_default()
            .entry(e.parent.as_str())
            .or_insert((windward, Vec::new()));
        run.0 = run.0.max(windward);
        run.1.push(e.label);
    }

    tiers
        .into_iter()
        .map(|(elevation, runs)| {
            let mut runs: Vec<(&str, (f64, Vec<usize>))> = runs.into_iter().collect();
            runs.sort_by(|a, b| b.1 .0.total_cmp(&a.1 .0));
            PipeTier {
                elevation: elevation as f64,
                runs: runs
                    .into_iter()
                    .map(|(pipe, (_, elements))| TierRun {
                        pipe: pipe.to_string(),
                        elements,
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::MemberKind;
    use approx::assert_abs_diff_eq;

    fn element(label: usize, kind: ItemKind, parent: &str, start: Vec3, end: Vec3) -> ElementGeometry {
        ElementGeometry {
            label,
            name: format!("{}#{}", parent, label),
            parent: parent.to_string(),
            kind,
            start,
            end,
            nodes: [1, 2],
            depth: 250.0,
            width: 250.0,
        }
    }

    fn rack() -> Vec<ElementGeometry> {
        let col = ItemKind::Structural(MemberKind::Column);
        let beam = ItemKind::Structural(MemberKind::Beam);
        vec![
            element(1, col, "C1", Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 5.0, 0.0)),
            element(2, col, "C2", Vec3::new(6.0, 0.0, 0.0), Vec3::new(6.0, 5.0, 0.0)),
            element(3, col, "C3", Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 5.0, 4.0)),
            element(4, col, "C4", Vec3::new(6.0, 0.0, 4.0), Vec3::new(6.0, 5.0, 4.0)),
            element(5, beam, "BX", Vec3::new(0.0, 5.0, 0.0), Vec3::new(6.0, 5.0, 0.0)),
            element(6, beam, "BZ", Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 5.0, 4.0)),
            element(7, ItemKind::Pipe, "P1", Vec3::new(0.0, 5.3, 1.0), Vec3::new(6.0, 5.3, 1.0)),
            element(8, ItemKind::Pipe, "P2", Vec3::new(0.0, 5.3, 3.0), Vec3::new(6.0, 5.3, 3.0)),
        ]
    }

    #[test]
    fn test_bounds_and_length() {
        let bounds = PlanBounds::from_elements(&rack()).unwrap();
        assert_abs_diff_eq!(bounds.center().x, 3.0);
        assert_abs_diff_eq!(bounds.center().y, 2.0);
        assert_abs_diff_eq!(bounds.radius(), 52f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounds.projected_length(0.0), 4000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.projected_length(90.0), 6000.0, epsilon = 1e-9);
        assert!(PlanBounds::from_elements(&[]).is_none());
    }

    #[test]
    fn test_eight_blocks() {
        let options = CompileOptions::default();
        let blocks = WindAnalyzer::new(&options).analyze(&rack());
        assert_eq!(blocks.len(), 8);
        let angles: Vec<f64> = blocks.iter().map(|b| b.angle).collect();
        assert_eq!(angles, WIND_DIRECTIONS.to_vec());
    }

    #[test]
    fn test_cardinal_selects_perpendicular_members() {
        let options = CompileOptions::default();
        let blocks = WindAnalyzer::new(&options).analyze(&rack());
        // wind along X: columns and the Z beam
        assert_eq!(blocks[0].exposed, vec![1, 2, 3, 4, 6]);
        // wind along Z: columns and the X beam
        assert_eq!(blocks[2].exposed, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_diagonal_exposure_on_oblong_plan() {
        let options = CompileOptions::default();
        let blocks = WindAnalyzer::new(&options).analyze(&rack());

        let exposed: Vec<(f64, Vec<usize>)> = blocks
            .iter()
            .filter(|b| b.angle % 90.0 != 0.0)
            .map(|b| (b.angle, b.exposed.clone()))
            .collect();
        assert_eq!(
            exposed,
            vec![
                (45.0, vec![2, 4, 5]),
                (135.0, vec![1, 3, 5, 6]),
                (225.0, vec![1, 3, 5, 6]),
                (315.0, vec![2, 4, 5]),
            ]
        );
    }

    #[test]
    fn test_diagonal_facing_on_oblong_plan() {
        let options = CompileOptions::default();
        let blocks = WindAnalyzer::new(&options).analyze(&rack());
        assert_eq!(blocks[1].facing, vec![2, 4, 5]);
        // the Z beam lies upwind of the X beam and hides most of it
        assert_eq!(blocks[3].facing, vec![1, 3, 6]);
        assert_eq!(blocks[5].facing, vec![1, 3, 5, 6]);
        assert_eq!(blocks[7].facing, vec![2, 4, 5]);
    }

    #[test]
    fn test_narrow_sector_keeps_windward_corner() {
        let options = CompileOptions::default().with_wind_half_angle(45.0);
        let blocks = WindAnalyzer::new(&options).analyze(&rack());
        assert_eq!(blocks[1].exposed, vec![4]);
        assert_eq!(blocks[5].exposed, vec![1, 5, 6]);
    }

    #[test]
    fn test_pipe_tiers_windward_first() {
        let elements = rack();
        // wind from +Z: P2 (z = 3) meets the wind before P1
        let tiers = pipe_tiers(&elements, &geometry::plan_direction(90.0));
        assert_eq!(tiers.len(), 1);
        assert_abs_diff_eq!(tiers[0].elevation, 5300.0);
        let order: Vec<&str> = tiers[0].runs.iter().map(|r| r.pipe.as_str()).collect();
        assert_eq!(order, vec!["P2", "P1"]);

        // wind along the pipes: nothing met
        assert!(pipe_tiers(&elements, &geometry::plan_direction(0.0)).is_empty());
    }
}
