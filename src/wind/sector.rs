//! Triangular wind sectors for diagonal directions

use crate::geometry::{self, point_in_triangle, Vec2};

/// Plan triangle selecting the windward part of the structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    /// Vertex on the wind axis
    pub apex: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

impl Sector {
    /// Sector for wind from `angle_deg` over a plan circle of `radius`.
    ///
    /// At a half-angle of 90° or more the triangle has its base on the line
    /// through `center` across the wind and its apex 2r upwind, so it holds
    /// the whole windward half of the circle. Below 90° it is the wedge of
    /// directions within `half_angle_deg` of the wind seen from `center`,
    /// closed 2r upwind.
    pub fn new(center: Vec2, radius: f64, angle_deg: f64, half_angle_deg: f64) -> Self {
        let wind = geometry::plan_direction(angle_deg);
        let reach = 2.0 * radius;
        if half_angle_deg >= 90.0 {
            let across = Vec2::new(-wind.y, wind.x);
            Self {
                apex: center + wind * reach,
                left: center + across * reach,
                right: center - across * reach,
            }
        } else {
            let side = reach / half_angle_deg.to_radians().cos();
            Self {
                apex: center,
                left: center + geometry::plan_direction(angle_deg + half_angle_deg) * side,
                right: center + geometry::plan_direction(angle_deg - half_angle_deg) * side,
            }
        }
    }

    /// Equal-areas containment test, compared at `decimals` places
    pub fn contains(&self, p: &Vec2, decimals: i32) -> bool {
        point_in_triangle(&self.apex, &self.left, &self.right, p, decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wind::WIND_DIRECTIONS;

    #[test]
    fn test_apex_inside_and_far_point_outside() {
        let center = Vec2::new(3.0, 4.0);
        let radius = 5.0;
        for angle in WIND_DIRECTIONS {
            for half in [45.0, 90.0] {
                let sector = Sector::new(center, radius, angle, half);
                assert!(sector.contains(&sector.apex, 5), "apex at {}", angle);

                let far = center - geometry::plan_direction(angle) * (10.0 * radius);
                assert!(!sector.contains(&far, 5), "far point at {}", angle);
            }
        }
    }

    #[test]
    fn test_windward_half_of_circle_inside() {
        let center = Vec2::new(3.0, 2.0);
        let radius = 52f64.sqrt() / 2.0;
        for angle in WIND_DIRECTIONS {
            let sector = Sector::new(center, radius, angle, 90.0);
            let wind = geometry::plan_direction(angle);
            for step in 0..36 {
                let p = center + geometry::plan_direction(step as f64 * 10.0) * radius;
                let upwind = (p - center).dot(&wind);
                if upwind > 1e-6 {
                    assert!(sector.contains(&p, 5), "{:?} at {}", p, angle);
                } else if upwind < -1e-6 {
                    assert!(!sector.contains(&p, 5), "{:?} at {}", p, angle);
                }
            }
        }
    }

    #[test]
    fn test_narrow_wedge_about_wind_axis() {
        let sector = Sector::new(Vec2::zeros(), 1.0, 45.0, 30.0);
        assert!(sector.contains(&(geometry::plan_direction(45.0) * 0.1), 5));
        assert!(sector.contains(&(geometry::plan_direction(70.0) * 0.9), 5));
        assert!(!sector.contains(&(geometry::plan_direction(90.0) * 0.9), 5));
    }

    #[test]
    fn test_point_just_inside_windward_edge() {
        let sector = Sector::new(Vec2::zeros(), 1.0, 45.0, 90.0);
        let toward = geometry::plan_direction(45.0) * 0.9;
        assert!(sector.contains(&toward, 5));
        let behind = geometry::plan_direction(45.0) * -0.5;
        assert!(!sector.contains(&behind, 5));
    }
}
