//! Bolt-group tension check for base plates and splice flanges
//!
//! The bolt grid is split into rectangular zones around the supporting
//! I-profile. Each zone is summarised by its bolt count and lever arm; the
//! zone with the largest moment (count x lever arm) governs.

mod bolts;
mod zones;

pub use bolts::BoltLayout;
pub use zones::ZoneResult;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::elements::{PlateKind, PlateSpec, Section};
use zones::{build_zones, ProfileDims};

/// Plate outline (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateSize {
    pub length: f64,
    pub width: f64,
}

/// Stiffener counts along each plate axis (0, 1 or 2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StiffenerLayout {
    pub along_length: u8,
    pub along_width: u8,
}

/// How the profile sits on the plate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// 0° / 180°: profile depth along the plate length
    One,
    /// 90° / 270°: profile depth along the plate width
    Two,
    /// Any other orientation
    Three,
}

impl Method {
    pub fn from_orientation(degrees: f64) -> Self {
        const EPS: f64 = 1e-6;
        let a = degrees.rem_euclid(180.0);
        if a < EPS || 180.0 - a < EPS {
            Method::One
        } else if (a - 90.0).abs() < EPS {
            Method::Two
        } else {
            Method::Three
        }
    }
}

/// Outcome of a tension check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionCheckResult {
    pub method: Method,
    pub bolt_count: usize,
    /// Zeroed when no zone holds a bolt
    pub governing: ZoneResult,
    pub zones: Vec<ZoneResult>,
}

/// Check a bolt group on a plate against the supporting profile
pub fn tension_check(
    bolts: &BoltLayout,
    plate: PlateSize,
    stiffeners: &StiffenerLayout,
    profile: &Section,
    orientation_deg: f64,
) -> TensionCheckResult {
    let method = Method::from_orientation(orientation_deg);
    let grid = bolts.grid(plate.length, plate.width);

    // profile axes: u along the depth, v along the flange
    let (lu, lv, web_line, flange_line, points): (f64, f64, u8, u8, Vec<(f64, f64)>) = match method {
        Method::One => (
            plate.length,
            plate.width,
            stiffeners.along_length,
            stiffeners.along_width,
            grid,
        ),
        Method::Two => (
            plate.width,
            plate.length,
            stiffeners.along_width,
            stiffeners.along_length,
            grid.into_iter().map(|(l, w)| (w, l)).collect(),
        ),
        Method::Three => {
            let fewest = stiffeners.along_length.min(stiffeners.along_width);
            (plate.length, plate.width, fewest, fewest, grid)
        }
    };

    let dims = ProfileDims {
        depth: profile.depth,
        flange_width: profile.width,
        flange_thickness: profile.flange_thickness,
        web_thickness: profile.web_thickness,
    };
    let zones: Vec<ZoneResult> = build_zones(&dims, lu, lv, web_line, flange_line)
        .iter()
        .filter_map(|z| z.evaluate(&points))
        .collect();
    trace!("{:?}: {} bolts, {} loaded zones", method, points.len(), zones.len());

    let governing = zones
        .iter()
        .max_by(|a, b| {
            a.moment
                .total_cmp(&b.moment)
                .then(a.lever_arm.total_cmp(&b.lever_arm))
        })
        .cloned()
        .unwrap_or_default();

    TensionCheckResult {
        method,
        bolt_count: points.len(),
        governing,
        zones,
    }
}

/// A checked plate, as written to the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateCheck {
    pub name: String,
    pub kind: PlateKind,
    pub member: String,
    pub bolt_diameter: f64,
    pub result: TensionCheckResult,
}

/// Run the tension check for a plate on its member
pub fn check_plate(plate: &PlateSpec, profile: &Section, orientation_deg: f64) -> PlateCheck {
    let result = tension_check(
        &plate.bolts,
        plate.size(),
        &plate.stiffeners,
        profile,
        orientation_deg,
    );
    debug!(
        "Plate '{}' on '{}': governing moment {:.1} over {} bolts",
        plate.name, plate.member, result.governing.moment, result.governing.bolt_count
    );
    PlateCheck {
        name: plate.name.clone(),
        kind: plate.kind,
        member: plate.member.clone(),
        bolt_diameter: plate.bolts.diameter,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn profile() -> Section {
        Section::wide_flange("W12x65", "American", 300.0, 200.0, 15.0, 10.0)
    }

    #[test]
    fn test_method_from_orientation() {
        assert_eq!(Method::from_orientation(0.0), Method::One);
        assert_eq!(Method::from_orientation(180.0), Method::One);
        assert_eq!(Method::from_orientation(-180.0), Method::One);
        assert_eq!(Method::from_orientation(90.0), Method::Two);
        assert_eq!(Method::from_orientation(270.0), Method::Two);
        assert_eq!(Method::from_orientation(45.0), Method::Three);
    }

    #[test]
    fn test_governing_outer_zone() {
        // rows at ±200 (outside the 150 flange face), columns at ±100
        let bolts = BoltLayout {
            diameter: 24.0,
            offset_length: 200.0,
            spacing_length: 0.0,
            offset_width: 100.0,
            spacing_width: 0.0,
        };
        let plate = PlateSize { length: 500.0, width: 400.0 };
        let result = tension_check(&bolts, plate, &StiffenerLayout::default(), &profile(), 0.0);

        assert_eq!(result.method, Method::One);
        assert_eq!(result.bolt_count, 4);
        assert_eq!(result.governing.bolt_count, 2);
        assert_abs_diff_eq!(result.governing.lever_arm, 50.0);
        assert_abs_diff_eq!(result.governing.moment, 100.0);
        assert_eq!(result.governing.supported_sides, 1);
    }

    #[test]
    fn test_method_two_swaps_axes() {
        let bolts = BoltLayout {
            diameter: 24.0,
            offset_length: 100.0,
            spacing_length: 0.0,
            offset_width: 200.0,
            spacing_width: 0.0,
        };
        let plate = PlateSize { length: 400.0, width: 500.0 };
        let result = tension_check(&bolts, plate, &StiffenerLayout::default(), &profile(), 90.0);
        assert_eq!(result.method, Method::Two);
        assert_abs_diff_eq!(result.governing.moment, 100.0);
    }

    #[test]
    fn test_no_bolts_gives_zero_result() {
        let bolts = BoltLayout::square(24.0, 400.0, 100.0);
        let plate = PlateSize { length: 500.0, width: 400.0 };
        let result = tension_check(&bolts, plate, &StiffenerLayout::default(), &profile(), 0.0);
        assert_eq!(result.bolt_count, 0);
        assert!(result.zones.is_empty());
        assert_eq!(result.governing, ZoneResult::default());
    }

    #[test]
    fn test_web_line_stiffeners_split_outer_zone() {
        // web-line stiffeners split the outer zone; both halves tie exactly
        let bolts = BoltLayout {
            diameter: 20.0,
            offset_length: 200.0,
            spacing_length: 0.0,
            offset_width: 100.0,
            spacing_width: 0.0,
        };
        let plate = PlateSize { length: 500.0, width: 400.0 };
        let stiffeners = StiffenerLayout { along_length: 2, along_width: 0 };
        let result = tension_check(&bolts, plate, &stiffeners, &profile(), 0.0);
        assert_eq!(result.zones.len(), 2);
        assert_eq!(result.governing.supported_sides, 2);
        assert_abs_diff_eq!(result.governing.lever_arm, 100.0);
        assert_abs_diff_eq!(result.governing.moment, 100.0);
    }

    #[test]
    fn test_check_plate_block() {
        let plate = PlateSpec::base("BP1", "C1", 500.0, 400.0, BoltLayout::square(24.0, 200.0, 0.0));
        let check = check_plate(&plate, &profile(), 0.0);
        assert_eq!(check.name, "BP1");
        assert_eq!(check.kind, PlateKind::Base);
        assert!(check.result.governing.moment > 0.0);
    }
}
