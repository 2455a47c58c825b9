//! Facing-member selection by windward occlusion

use log::trace;

use crate::compile::{ElementGeometry, ItemKind};
use crate::elements::MemberKind;
use crate::geometry::{Vec2, MM_PER_M};

/// Occlusion group: only elements of the same group shield each other
fn group(kind: ItemKind) -> u8 {
    match kind {
        ItemKind::Structural(MemberKind::Column) => 0,
        ItemKind::Structural(MemberKind::Beam | MemberKind::Cantilever) => 1,
        ItemKind::Structural(MemberKind::Bracing(_)) => 2,
        ItemKind::Structural(MemberKind::Staircase) => 3,
        ItemKind::Pipe | ItemKind::PipeConnector => 4,
    }
}

/// Plan footprint of an element seen along the wind
#[derive(Debug, Clone, Copy)]
struct Footprint {
    /// Extent across the wind (metres)
    lo: f64,
    hi: f64,
    /// Position along the wind; larger is further windward
    windward: f64,
    y_lo: f64,
    y_hi: f64,
}

impl Footprint {
    fn of(element: &ElementGeometry, wind: &Vec2) -> Self {
        let across = Vec2::new(-wind.y, wind.x);
        let a = Vec2::new(element.start.x, element.start.z);
        let b = Vec2::new(element.end.x, element.end.z);
        let half = element.width / MM_PER_M / 2.0;
        let (pa, pb) = (a.dot(&across), b.dot(&across));
        Self {
            lo: pa.min(pb) - half,
            hi: pa.max(pb) + half,
            windward: ((a + b) / 2.0).dot(wind),
            y_lo: element.start.y.min(element.end.y),
            y_hi: element.start.y.max(element.end.y),
        }
    }
}

/// Length of `[lo, hi]` left after removing every interval in `cuts`
pub fn uncovered_length(lo: f64, hi: f64, cuts: &mut [(f64, f64)]) -> f64 {
    cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut covered = 0.0;
    let mut reach = lo;
    for &(a, b) in cuts.iter() {
        let a = a.max(reach);
        let b = b.min(hi);
        if b > a {
            covered += b - a;
            reach = b;
        }
    }
    (hi - lo - covered).max(0.0)
}

/// Labels of the candidates that keep at least `ratio` of their cross-wind
/// extent clear of compatible elements lying further windward
pub fn facing_elements(
    candidates: &[&ElementGeometry],
    wind: &Vec2,
    ratio: f64,
    tol: f64,
) -> Vec<usize> {
    let prints: Vec<Footprint> = candidates.iter().map(|e| Footprint::of(e, wind)).collect();
    let mut facing = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        let me = prints[i];
        let total = me.hi - me.lo;
        if total <= tol {
            facing.push(candidate.label);
            continue;
        }

        let mut cuts: Vec<(f64, f64)> = candidates
            .iter()
            .zip(&prints)
            .enumerate()
            .filter(|(j, (other, p))| {
                *j != i
                    && group(other.kind) == group(candidate.kind)
                    && p.windward > me.windward + tol
                    && p.y_lo <= me.y_hi + tol
                    && me.y_lo <= p.y_hi + tol
            })
            .map(|(_, (_, p))| (p.lo, p.hi))
            .collect();

        let clear = uncovered_length(me.lo, me.hi, &mut cuts);
        if clear / total >= ratio {
            facing.push(candidate.label);
        } else {
            trace!("'{}' shielded: {:.3} of {:.3} clear", candidate.name, clear, total);
        }
    }
    facing
}
