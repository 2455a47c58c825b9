//! Pipe runs resting on the rack

use serde::{Deserialize, Serialize};

use super::Section;
use crate::geometry::{self, Vec3};

/// A pipe support: where a pipe run bears on a beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeSupport {
    pub name: String,
    /// Supporting beam
    pub beam: String,
    /// Distance along the pipe from its start (metres)
    pub distance: f64,
}

/// A straight pipe run (metres, diameter and wall in mm)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeRun {
    pub name: String,
    pub start: Vec3,
    pub end: Vec3,
    pub outer_diameter: f64,
    pub thickness: f64,
    #[serde(default)]
    pub supports: Vec<PipeSupport>,
}

impl PipeRun {
    pub fn new(name: &str, start: Vec3, end: Vec3, outer_diameter: f64, thickness: f64) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
            outer_diameter,
            thickness,
            supports: Vec::new(),
        }
    }

    /// Add a support on `beam` at `distance` along the pipe
    pub fn with_support(mut self, name: &str, beam: &str, distance: f64) -> Self {
        self.supports.push(PipeSupport {
            name: name.to_string(),
            beam: beam.to_string(),
            distance,
        });
        self
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Point on the pipe centreline at a support
    pub fn support_point(&self, support: &PipeSupport) -> Vec3 {
        geometry::point_at(&self.start, &self.end, support.distance)
    }

    /// Section used for the pipe elements
    pub fn section(&self) -> Section {
        Section::pipe(&self.name, self.outer_diameter, self.thickness)
    }
}

/// Point on the beam `start -> end` directly below (or above) `pipe_point`
///
/// The plan position of the pipe point is projected onto the beam axis and
/// the beam's own elevation at that position is kept.
pub fn beam_bearing_point(start: &Vec3, end: &Vec3, pipe_point: &Vec3) -> Vec3 {
    let flat_start = Vec3::new(start.x, 0.0, start.z);
    let flat_end = Vec3::new(end.x, 0.0, end.z);
    let flat_point = Vec3::new(pipe_point.x, 0.0, pipe_point.z);
    let plan_length = (flat_end - flat_start).norm();
    if plan_length < 1e-12 {
        return *start;
    }
    let t = geometry::distance_along(&flat_start, &flat_end, &flat_point) / plan_length;
    start + (end - start) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_support_point() {
        let pipe = PipeRun::new(
            "P1",
            Vec3::new(0.0, 6.3, 1.0),
            Vec3::new(0.0, 6.3, 13.0),
            168.3,
            7.1,
        )
        .with_support("PS1", "B1", 6.0);
        let p = pipe.support_point(&pipe.supports[0]);
        assert_abs_diff_eq!(p.z, 7.0);
        assert_abs_diff_eq!(p.y, 6.3);
    }

    #[test]
    fn test_beam_bearing_point() {
        let p = beam_bearing_point(
            &Vec3::new(-3.0, 6.0, 7.0),
            &Vec3::new(3.0, 6.0, 7.0),
            &Vec3::new(1.0, 6.3, 7.0),
        );
        assert_abs_diff_eq!(p.x, 1.0);
        assert_abs_diff_eq!(p.y, 6.0);
        assert_abs_diff_eq!(p.z, 7.0);
    }
}
