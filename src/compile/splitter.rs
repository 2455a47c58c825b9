//! Member splitting: cuts members into finite elements at every connection
//! and load point

use std::collections::HashMap;

use log::{trace, warn};

use crate::elements::{beam_bearing_point, MemberReleases, PipeRun, StructuralMember};
use crate::geometry::{self, PlanAxis, PointKey, Vec3};
use crate::loads::{LoadShape, UserLoad};
use crate::model::StructureModel;

/// How load distances on a member are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceBasis {
    /// Straight-line distance from the member start
    AlongMember,
    /// Offset from the member start along a plan axis
    PlanAxis(PlanAxis),
}

impl DistanceBasis {
    /// Measure of the point `d` along `start -> end` in this basis
    fn measure(self, start: &Vec3, end: &Vec3, d: f64) -> f64 {
        match self {
            DistanceBasis::AlongMember => d,
            DistanceBasis::PlanAxis(axis) => {
                let p = geometry::point_at(start, end, d);
                (axis.coord(&p) - axis.coord(start)).abs()
            }
        }
    }

    /// Inverse of [`Self::measure`]
    fn to_along(self, start: &Vec3, end: &Vec3, measure: f64) -> f64 {
        match self {
            DistanceBasis::AlongMember => measure,
            DistanceBasis::PlanAxis(axis) => {
                let span = (axis.coord(end) - axis.coord(start)).abs();
                if span < 1e-12 {
                    measure
                } else {
                    measure * (end - start).norm() / span
                }
            }
        }
    }
}

/// Anything straight that can be cut into segments
pub trait Splittable {
    fn name(&self) -> &str;
    fn start(&self) -> Vec3;
    fn end(&self) -> Vec3;
    fn releases(&self) -> Option<MemberReleases>;
    fn distance_basis(&self) -> DistanceBasis;
}

impl Splittable for StructuralMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) -> Vec3 {
        self.start
    }

    fn end(&self) -> Vec3 {
        self.end
    }

    fn releases(&self) -> Option<MemberReleases> {
        self.releases
    }

    fn distance_basis(&self) -> DistanceBasis {
        if self.kind.is_horizontal_framing() {
            DistanceBasis::PlanAxis(geometry::dominant_plan_axis(&self.start, &self.end))
        } else {
            DistanceBasis::AlongMember
        }
    }
}

impl Splittable for PipeRun {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&self) -> Vec3 {
        self.start
    }

    fn end(&self) -> Vec3 {
        self.end
    }

    fn releases(&self) -> Option<MemberReleases> {
        None
    }

    fn distance_basis(&self) -> DistanceBasis {
        DistanceBasis::AlongMember
    }
}

/// Loads resolved onto one segment
#[derive(Debug, Clone, Default)]
pub struct SegmentLoads<'a> {
    /// Point loads landing on the segment start node
    pub point_start: Vec<&'a UserLoad>,
    /// Point loads landing on the segment end node
    pub point_end: Vec<&'a UserLoad>,
    /// UDLs covering the whole segment
    pub udl: Vec<&'a UserLoad>,
}

impl SegmentLoads<'_> {
    pub fn is_empty(&self) -> bool {
        self.point_start.is_empty() && self.point_end.is_empty() && self.udl.is_empty()
    }
}

/// A slice of a member between two consecutive split points
#[derive(Debug, Clone)]
pub struct SplitSegment<'a> {
    /// Parent name, or `parent.index` when the parent was cut
    pub name: String,
    pub parent: String,
    /// 1-based position within the parent
    pub index: usize,
    pub start: Vec3,
    pub end: Vec3,
    /// Distance of the segment start from the parent start (metres)
    pub start_distance: f64,
    pub end_distance: f64,
    pub releases: MemberReleases,
    pub loads: SegmentLoads<'a>,
}

impl SplitSegment<'_> {
    /// Length in metres
    pub fn length(&self) -> f64 {
        self.end_distance - self.start_distance
    }

    pub fn start_key(&self) -> PointKey {
        PointKey::from_metres(&self.start)
    }

    pub fn end_key(&self) -> PointKey {
        PointKey::from_metres(&self.end)
    }
}

/// Segment end point nearest to `point`, if one lies within `tol`
pub fn nearest_boundary(segments: &[SplitSegment<'_>], point: &Vec3, tol: f64) -> Option<Vec3> {
    segments
        .iter()
        .flat_map(|s| [s.start, s.end])
        .map(|b| ((b - point).norm(), b))
        .filter(|(d, _)| *d <= tol)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, b)| b)
}

/// Cut `member` at every attachment point lying on it and at every load
/// distance, then attach the loads to the resulting segments.
///
/// `attachments` are candidate points (metres); only those within `tol` of
/// the member and strictly inside it become cuts.
pub fn split<'a, M: Splittable>(
    member: &M,
    attachments: &[Vec3],
    loads: &[&'a UserLoad],
    tol: f64,
) -> Vec<SplitSegment<'a>> {
    let start = member.start();
    let end = member.end();
    let length = (end - start).norm();
    let basis = member.distance_basis();

    let mut interior: Vec<f64> = Vec::new();
    for p in attachments {
        if geometry::distance_to_segment(&start, &end, p) <= tol {
            interior.push(geometry::distance_along(&start, &end, p));
        }
    }
    for load in loads {
        for measure in load.split_distances() {
            interior.push(basis.to_along(&start, &end, measure));
        }
    }
    interior.retain(|d| *d > tol && *d < length - tol);
    interior.sort_by(|a, b| a.total_cmp(b));

    let mut cuts = vec![0.0];
    for d in interior {
        if cuts.last().is_some_and(|last| d - last > tol) {
            cuts.push(d);
        }
    }
    cuts.push(length);

    let count = cuts.len() - 1;
    let releases = member.releases().unwrap_or_default();
    let mut segments: Vec<SplitSegment<'a>> = cuts
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let name = if count == 1 {
                member.name().to_string()
            } else {
                format!("{}.{}", member.name(), i + 1)
            };
            SplitSegment {
                name,
                parent: member.name().to_string(),
                index: i + 1,
                start: if i == 0 { start } else { geometry::point_at(&start, &end, w[0]) },
                end: if i + 1 == count { end } else { geometry::point_at(&start, &end, w[1]) },
                start_distance: w[0],
                end_distance: w[1],
                releases: releases.restricted(i == 0, i + 1 == count),
                loads: SegmentLoads::default(),
            }
        })
        .collect();

    for load in loads {
        if !attach(&mut segments, load, basis, &start, &end, tol) {
            warn!(
                "Load on '{}' at {:?} matches no split point; dropped",
                member.name(),
                load.shape
            );
        }
    }

    trace!("Split '{}' into {} segment(s)", member.name(), segments.len());
    segments
}

fn attach<'a>(
    segments: &mut [SplitSegment<'a>],
    load: &'a UserLoad,
    basis: DistanceBasis,
    start: &Vec3,
    end: &Vec3,
    tol: f64,
) -> bool {
    let last = segments.len() - 1;
    match load.shape {
        LoadShape::Point { distance } => {
            for (i, seg) in segments.iter_mut().enumerate() {
                if (basis.measure(start, end, seg.start_distance) - distance).abs() <= tol {
                    seg.loads.point_start.push(load);
                    return true;
                }
                if i == last && (basis.measure(start, end, seg.end_distance) - distance).abs() <= tol {
                    seg.loads.point_end.push(load);
                    return true;
                }
            }
            false
        }
        LoadShape::Udl { distance, length } => {
            let mut attached = false;
            for seg in segments.iter_mut() {
                let s = basis.measure(start, end, seg.start_distance);
                let e = basis.measure(start, end, seg.end_distance);
                if distance - tol <= s && e <= distance + length + tol {
                    seg.loads.udl.push(load);
                    attached = true;
                }
            }
            attached
        }
    }
}

/// Points where other members and pipe supports touch each member
#[derive(Debug, Clone, Default)]
pub struct ConnectionIndex {
    points: HashMap<String, Vec<Vec3>>,
    neighbours: HashMap<String, Vec<String>>,
}

impl ConnectionIndex {
    /// Collect connection points from member connectivity (both directions)
    /// and from pipe supports bearing on beams
    pub fn build(model: &StructureModel) -> Self {
        let mut index = Self::default();

        for member in &model.members {
            for other_name in &member.connected {
                match model.member(other_name) {
                    Some(other) => {
                        index.add_point(&member.name, other.start);
                        index.add_point(&member.name, other.end);
                        index.add_point(&other.name, member.start);
                        index.add_point(&other.name, member.end);
                        index.link(&member.name, &other.name);
                    }
                    None => warn!(
                        "'{}' lists unknown connected member '{}'",
                        member.name, other_name
                    ),
                }
            }
        }

        for pipe in &model.pipes {
            for support in &pipe.supports {
                match model.member(&support.beam) {
                    Some(beam) => {
                        let p = beam_bearing_point(&beam.start, &beam.end, &pipe.support_point(support));
                        index.add_point(&beam.name, p);
                    }
                    None => warn!(
                        "Pipe support '{}' rests on unknown beam '{}'",
                        support.name, support.beam
                    ),
                }
            }
        }

        index
    }

    pub fn add_point(&mut self, member: &str, point: Vec3) {
        self.points.entry(member.to_string()).or_default().push(point);
    }

    /// Candidate cut points for `member`
    pub fn points_for(&self, member: &str) -> &[Vec3] {
        self.points.get(member).map(Vec::as_slice).unwrap_or(&[])
    }

    fn link(&mut self, a: &str, b: &str) {
        for (from, to) in [(a, b), (b, a)] {
            let list = self.neighbours.entry(from.to_string()).or_default();
            if !list.iter().any(|n| n == to) {
                list.push(to.to_string());
            }
        }
    }

    /// Members connected to `member`, in either direction
    pub fn neighbours_of(&self, member: &str) -> &[String] {
        self.neighbours.get(member).map(Vec::as_slice).unwrap_or(&[])
    }
}
