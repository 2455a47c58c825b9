//! Tension zones of a plate around an I-profile

use serde::{Deserialize, Serialize};

/// Supporting edge of a zone on one axis: bolts lie on the `+` side when
/// `positive` is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Edge {
    pub at: f64,
    pub positive: bool,
}

/// Rectangular zone in profile axes (u along depth, v along flange)
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Zone {
    pub u: (f64, f64),
    pub v: (f64, f64),
    pub u_edge: Option<Edge>,
    pub v_edge: Option<Edge>,
    pub sides: u8,
    /// The upper `v` bound belongs to the neighbouring zone
    pub v_open: bool,
}

impl Zone {
    fn contains(&self, (u, v): (f64, f64)) -> bool {
        const EPS: f64 = 1e-9;
        let below_top = if self.v_open { v < self.v.1 - EPS } else { v <= self.v.1 + EPS };
        u >= self.u.0 - EPS && u <= self.u.1 + EPS && v >= self.v.0 - EPS && below_top
    }

    /// Summarise the bolts falling inside; `None` when the zone is empty
    pub fn evaluate(&self, bolts: &[(f64, f64)]) -> Option<ZoneResult> {
        let inside: Vec<(f64, f64)> = bolts.iter().copied().filter(|b| self.contains(*b)).collect();
        if inside.is_empty() {
            return None;
        }
        let n = inside.len() as f64;
        let cu = inside.iter().map(|b| b.0).sum::<f64>() / n;
        let cv = inside.iter().map(|b| b.1).sum::<f64>() / n;

        let arm = |edge: Option<Edge>, c: f64| {
            edge.map_or(0.0, |e| {
                let d = if e.positive { c - e.at } else { e.at - c };
                d.max(0.0)
            })
        };
        let lever_arm = arm(self.u_edge, cu).max(arm(self.v_edge, cv));

        Some(ZoneResult {
            bolt_count: inside.len(),
            lever_arm,
            moment: n * lever_arm,
            supported_sides: self.sides,
            width: self.v.1 - self.v.0,
            height: self.u.1 - self.u.0,
        })
    }
}

/// Aggregate of one tension zone (mm)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    pub bolt_count: usize,
    pub lever_arm: f64,
    /// Bolt count times lever arm
    pub moment: f64,
    pub supported_sides: u8,
    /// Extent along the flange
    pub width: f64,
    /// Extent along the depth
    pub height: f64,
}

/// Profile dimensions the zones are built from (mm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ProfileDims {
    pub depth: f64,
    pub flange_width: f64,
    pub flange_thickness: f64,
    pub web_thickness: f64,
}

/// Build the tension-side zones for a plate of `lu` x `lv` (profile axes).
///
/// `web_line` and `flange_line` count the stiffeners extending the web and
/// the flange beyond the profile.
pub(crate) fn build_zones(p: &ProfileDims, lu: f64, lv: f64, web_line: u8, flange_line: u8) -> Vec<Zone> {
    let mut zones = Vec::new();
    let (half_u, half_v) = (lu / 2.0, lv / 2.0);
    let flange_out = p.depth / 2.0;
    let flange_in = p.depth / 2.0 - p.flange_thickness;
    let web_face = p.web_thickness / 2.0;
    let tip = p.flange_width / 2.0;

    let outer_edge = Some(Edge { at: flange_out, positive: true });
    if half_u > flange_out {
        if web_line >= 2 {
            zones.push(Zone {
                u: (flange_out, half_u),
                v: (0.0, half_v),
                u_edge: outer_edge,
                v_edge: Some(Edge { at: 0.0, positive: true }),
                sides: 2,
                v_open: false,
            });
            zones.push(Zone {
                u: (flange_out, half_u),
                v: (-half_v, 0.0),
                u_edge: outer_edge,
                v_edge: Some(Edge { at: 0.0, positive: false }),
                sides: 2,
                v_open: true,
            });
        } else {
            zones.push(Zone {
                u: (flange_out, half_u),
                v: (-half_v, half_v),
                u_edge: outer_edge,
                v_edge: None,
                sides: 1,
                v_open: false,
            });
        }
    }

    let inner_edge = Some(Edge { at: flange_in, positive: false });
    let web_edge = Some(Edge { at: web_face, positive: true });
    if flange_in > 0.0 && half_v > web_face {
        let u = (0.0, flange_in.min(half_u));
        if flange_line >= 2 && half_v > tip {
            zones.push(Zone {
                u,
                v: (web_face, tip),
                u_edge: inner_edge,
                v_edge: web_edge,
                sides: 3,
                v_open: true,
            });
            zones.push(Zone {
                u,
                v: (tip, half_v),
                u_edge: inner_edge,
                v_edge: None,
                sides: 1,
                v_open: false,
            });
        } else {
            zones.push(Zone {
                u,
                v: (web_face, half_v),
                u_edge: inner_edge,
                v_edge: web_edge,
                sides: 2,
                v_open: false,
            });
        }
    }
    zones
}
