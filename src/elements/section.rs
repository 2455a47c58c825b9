//! Cross-section properties (millimetre units)

use serde::{Deserialize, Serialize};

/// Shape family of a rolled or fabricated section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionShape {
    IShape,
    Box,
    Pipe,
}

/// Cover plates welded to the flanges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverPlates {
    pub width: f64,
    pub thickness: f64,
}

/// Classification sent to the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionClass {
    Profile,
    ProfileWithPlates,
    FabProfile,
    CombinedSection,
    Pipe,
}

/// Cross-section properties for frame elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub designation: String,
    /// Country library or fabrication code (e.g. "American", "FAB", "COMB")
    pub country_code: String,
    pub shape: SectionShape,
    /// Depth in mm
    pub depth: f64,
    /// Flange width in mm
    pub width: f64,
    pub flange_thickness: f64,
    pub web_thickness: f64,
    /// Area in mm²
    pub a: f64,
    /// Strong-axis moment of inertia in mm⁴
    pub iy: f64,
    /// Weak-axis moment of inertia in mm⁴
    pub iz: f64,
    /// Torsional constant in mm⁴
    pub j: f64,
    #[serde(default)]
    pub plates: Option<CoverPlates>,
}

impl Section {
    /// Create a wide flange (I) section
    pub fn wide_flange(
        designation: &str,
        country_code: &str,
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        let bf = flange_width;
        let tf = flange_thickness;
        let tw = web_thickness;
        let d = depth;
        let hw = d - 2.0 * tf;

        let a = 2.0 * bf * tf + hw * tw;
        let iy = (bf * d.powi(3) - (bf - tw) * hw.powi(3)) / 12.0;
        let iz = (2.0 * tf * bf.powi(3) + hw * tw.powi(3)) / 12.0;
        let j = (2.0 * bf * tf.powi(3) + hw * tw.powi(3)) / 3.0;

        Self {
            designation: designation.to_string(),
            country_code: country_code.to_string(),
            shape: SectionShape::IShape,
            depth: d,
            width: bf,
            flange_thickness: tf,
            web_thickness: tw,
            a,
            iy,
            iz,
            j,
            plates: None,
        }
    }

    /// Create a hollow circular (pipe) section
    pub fn pipe(designation: &str, outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = (r_o - wall_thickness).max(0.0);

        let a = std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2));
        let i = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;

        Self {
            designation: designation.to_string(),
            country_code: String::new(),
            shape: SectionShape::Pipe,
            depth: outer_diameter,
            width: outer_diameter,
            flange_thickness: wall_thickness,
            web_thickness: wall_thickness,
            a,
            iy: i,
            iz: i,
            j: 2.0 * i,
            plates: None,
        }
    }

    /// Create a box/tube section
    pub fn box_section(designation: &str, width: f64, depth: f64, wall_thickness: f64) -> Self {
        let t = wall_thickness;
        let b = width;
        let d = depth;
        let bi = b - 2.0 * t;
        let di = d - 2.0 * t;

        let am = (b - t) * (d - t);
        let s = 2.0 * (b + d) - 4.0 * t;

        Self {
            designation: designation.to_string(),
            country_code: String::new(),
            shape: SectionShape::Box,
            depth: d,
            width: b,
            flange_thickness: t,
            web_thickness: t,
            a: b * d - bi * di,
            iy: (b * d.powi(3) - bi * di.powi(3)) / 12.0,
            iz: (d * b.powi(3) - di * bi.powi(3)) / 12.0,
            j: 4.0 * am.powi(2) * t / s,
            plates: None,
        }
    }

    /// Add flange cover plates
    pub fn with_plates(mut self, width: f64, thickness: f64) -> Self {
        self.plates = Some(CoverPlates { width, thickness });
        self
    }

    /// Set the library/fabrication code
    pub fn with_code(mut self, code: &str) -> Self {
        self.country_code = code.to_string();
        self
    }

    /// Classification derived from the country/fabrication code
    pub fn classify(&self) -> SectionClass {
        let code = self.country_code.to_ascii_uppercase();
        if code.starts_with("FAB") {
            SectionClass::FabProfile
        } else if code.starts_with("COMB") {
            SectionClass::CombinedSection
        } else if self.plates.is_some() {
            SectionClass::ProfileWithPlates
        } else if self.shape == SectionShape::Pipe {
            SectionClass::Pipe
        } else {
            SectionClass::Profile
        }
    }

    /// Larger of depth and width (mm)
    pub fn max_dimension(&self) -> f64 {
        self.depth.max(self.width)
    }
}
