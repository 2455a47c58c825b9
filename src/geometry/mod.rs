//! Geometry utilities shared by every compile stage
//!
//! Model input is in metres with Y pointing up; the plan is the X/Z plane.
//! Node coordinates leave the compiler in millimetres on an integer grid
//! (see [`PointKey`]).

mod key;
mod triangle;

pub use key::PointKey;
pub use triangle::{heron_area, point_in_triangle};

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

pub type Vec3 = Vector3<f64>;
pub type Vec2 = Vector2<f64>;

/// Millimetres per model unit
pub const MM_PER_M: f64 = 1000.0;

/// Round `value` to `decimals` decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Direction class of a straight member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Runs along global X
    X,
    /// Runs along global Z
    Z,
    /// Runs along global Y
    Vertical,
    /// Anything else (sloped or skewed in plan)
    Inclined,
}

/// Horizontal axis a member mostly runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanAxis {
    X,
    Z,
}

impl PlanAxis {
    /// Coordinate of `p` along this axis
    pub fn coord(self, p: &Vec3) -> f64 {
        match self {
            PlanAxis::X => p.x,
            PlanAxis::Z => p.z,
        }
    }
}

/// Classify the direction of the segment `start -> end`
pub fn classify(start: &Vec3, end: &Vec3, tol: f64) -> Axis {
    let d = end - start;
    let (dx, dy, dz) = (d.x.abs() <= tol, d.y.abs() <= tol, d.z.abs() <= tol);
    match (dx, dy, dz) {
        (true, _, true) => Axis::Vertical,
        (_, true, true) => Axis::X,
        (true, true, _) => Axis::Z,
        _ => Axis::Inclined,
    }
}

/// Plan axis with the larger extent; X wins ties
pub fn dominant_plan_axis(start: &Vec3, end: &Vec3) -> PlanAxis {
    let d = end - start;
    if d.x.abs() >= d.z.abs() {
        PlanAxis::X
    } else {
        PlanAxis::Z
    }
}

/// Plan projection (x, z)
pub fn plan(p: &Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}

/// Unit plan vector at `degrees` measured from +X toward +Z
pub fn plan_direction(degrees: f64) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Scalar position of the projection of `p` on the line `start -> end`,
/// measured from `start` in the same units as the input
pub fn distance_along(start: &Vec3, end: &Vec3, p: &Vec3) -> f64 {
    let axis = end - start;
    let length = axis.norm();
    if length < 1e-12 {
        return 0.0;
    }
    (p - start).dot(&axis) / length
}

/// Point at distance `d` from `start` toward `end`
pub fn point_at(start: &Vec3, end: &Vec3, d: f64) -> Vec3 {
    let axis = end - start;
    let length = axis.norm();
    if length < 1e-12 {
        return *start;
    }
    start + axis * (d / length)
}

/// Shortest distance from `p` to the finite segment `start -> end`
pub fn distance_to_segment(start: &Vec3, end: &Vec3, p: &Vec3) -> f64 {
    let length = (end - start).norm();
    let d = distance_along(start, end, p).clamp(0.0, length);
    (p - point_at(start, end, d)).norm()
}

/// Local z-axis of a frame element
///
/// Local x runs along the member. For non-vertical members z is
/// perpendicular to x and global Y; vertical members use global X. The pair
/// is then rotated about local x by `rotation_deg`.
pub fn local_z_axis(start: &Vec3, end: &Vec3, rotation_deg: f64) -> Vec3 {
    let d = end - start;
    let length = d.norm();
    if length < 1e-12 {
        return Vec3::z();
    }
    let x = d / length;

    let (y, z) = if x.x.abs() < 1e-10 && x.z.abs() < 1e-10 {
        let y = if x.y > 0.0 { Vec3::z() } else { -Vec3::z() };
        (y, Vec3::x())
    } else {
        let z = x.cross(&Vec3::y()).normalize();
        (z.cross(&x), z)
    };

    if rotation_deg.abs() < 1e-10 {
        return z;
    }
    let r = rotation_deg.to_radians();
    (-y * r.sin() + z * r.cos()).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_567, 3), 1.235);
        assert_eq!(round_to(-0.000_04, 4), -0.0);
    }

    #[test]
    fn test_classify() {
        let o = Vec3::zeros();
        assert_eq!(classify(&o, &Vec3::new(0.0, 4.0, 0.0), 1e-3), Axis::Vertical);
        assert_eq!(classify(&o, &Vec3::new(6.0, 0.0, 0.0), 1e-3), Axis::X);
        assert_eq!(classify(&o, &Vec3::new(0.0, 0.0, -6.0), 1e-3), Axis::Z);
        assert_eq!(classify(&o, &Vec3::new(3.0, 4.0, 0.0), 1e-3), Axis::Inclined);
    }

    #[test]
    fn test_distance_along_and_point_at() {
        let a = Vec3::new(1.0, 2.0, 0.0);
        let b = Vec3::new(7.0, 2.0, 0.0);
        assert_abs_diff_eq!(distance_along(&a, &b, &Vec3::new(3.5, 5.0, 1.0)), 2.5);
        let p = point_at(&a, &b, 2.5);
        assert_abs_diff_eq!(p.x, 3.5);
        assert_abs_diff_eq!(distance_to_segment(&a, &b, &Vec3::new(3.5, 5.0, 0.0)), 3.0);
    }

    #[test]
    fn test_local_z_axis() {
        let o = Vec3::zeros();
        let z = local_z_axis(&o, &Vec3::new(6.0, 0.0, 0.0), 0.0);
        assert_abs_diff_eq!(z.z, 1.0, epsilon = 1e-12);

        let column = local_z_axis(&o, &Vec3::new(0.0, 5.0, 0.0), 0.0);
        assert_abs_diff_eq!(column.x, 1.0, epsilon = 1e-12);

        let rotated = local_z_axis(&o, &Vec3::new(6.0, 0.0, 0.0), 90.0);
        assert_abs_diff_eq!(rotated.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.dot(&z), 0.0, epsilon = 1e-12);
    }
}
