//! Element and connectivity assembly
//!
//! Turns the ordered list of discretized items into beam elements and member
//! records, writes incident names onto nodes and sets base boundary
//! conditions.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::nodes::NodeSet;
use super::orientation::OrientationProvider;
use super::splitter::{SegmentLoads, SplitSegment};
use crate::elements::{
    BoundaryCondition, MemberKind, MemberReleases, PipeRun, Section, SectionClass, StructuralMember,
};
use crate::error::{CompileError, CompileResult};
use crate::geometry::{self, PointKey, Vec3};
use crate::model::StructureModel;

/// What a discretized item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Structural(MemberKind),
    Pipe,
    PipeConnector,
}

impl ItemKind {
    pub fn is_structural(self) -> bool {
        matches!(self, ItemKind::Structural(_))
    }
}

/// One element-to-be, in emission order
#[derive(Debug, Clone)]
pub struct AssemblyItem<'a> {
    pub name: String,
    /// Member, pipe run or connector the item belongs to
    pub parent: String,
    pub kind: ItemKind,
    pub start: Vec3,
    pub end: Vec3,
    pub releases: MemberReleases,
    pub section: Section,
    pub section_label: String,
    pub orientation: f64,
    pub frame: Option<String>,
    /// Names written into the incident lists of the start and end nodes
    pub start_tag: String,
    pub end_tag: String,
    pub loads: SegmentLoads<'a>,
}

impl<'a> AssemblyItem<'a> {
    /// Item for one segment of a structural member
    pub fn structural(segment: SplitSegment<'a>, member: &StructuralMember, section: &Section) -> Self {
        Self {
            start_tag: segment.name.clone(),
            end_tag: segment.name.clone(),
            name: segment.name,
            parent: member.name.clone(),
            kind: ItemKind::Structural(member.kind),
            start: segment.start,
            end: segment.end,
            releases: segment.releases,
            section: section.clone(),
            section_label: member.section.clone(),
            orientation: member.orientation,
            frame: member.frame.clone(),
            loads: segment.loads,
        }
    }

    /// Item for one segment of a pipe run
    pub fn pipe(segment: SplitSegment<'a>, pipe: &PipeRun) -> Self {
        Self {
            start_tag: segment.name.clone(),
            end_tag: segment.name.clone(),
            name: segment.name,
            parent: pipe.name.clone(),
            kind: ItemKind::Pipe,
            start: segment.start,
            end: segment.end,
            releases: segment.releases,
            section: pipe.section(),
            section_label: pipe.name.clone(),
            orientation: 0.0,
            frame: None,
            loads: segment.loads,
        }
    }

    /// Connector from the beam bearing point up (or down) to the pipe
    pub fn connector(name: &str, pipe: &PipeRun, beam_point: Vec3, pipe_point: Vec3) -> Self {
        Self {
            name: name.to_string(),
            parent: name.to_string(),
            kind: ItemKind::PipeConnector,
            start: beam_point,
            end: pipe_point,
            releases: MemberReleases::none(),
            section: pipe.section(),
            section_label: pipe.name.clone(),
            orientation: 0.0,
            frame: None,
            start_tag: name.to_string(),
            end_tag: format!("{}/{}", pipe.name, name),
            loads: SegmentLoads::default(),
        }
    }

    pub fn start_key(&self) -> PointKey {
        PointKey::from_metres(&self.start)
    }

    pub fn end_key(&self) -> PointKey {
        PointKey::from_metres(&self.end)
    }
}

/// Beam element record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamElement {
    pub label: usize,
    /// Start and end node labels
    pub nodes: [usize; 2],
    /// Local z-axis (unit vector)
    pub local_axis: [f64; 3],
    pub releases: [bool; 12],
    pub section: String,
}

/// Section record sent alongside each element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub label: usize,
    pub name: String,
    pub classification: SectionClass,
    pub section: Section,
    /// Length in mm
    pub length: f64,
}

/// Geometry of an emitted element, kept for the downstream stages
#[derive(Debug, Clone)]
pub struct ElementGeometry {
    pub label: usize,
    pub name: String,
    pub parent: String,
    pub kind: ItemKind,
    /// Metres
    pub start: Vec3,
    pub end: Vec3,
    pub nodes: [usize; 2],
    /// Section depth and width (mm)
    pub depth: f64,
    pub width: f64,
}

impl ElementGeometry {
    pub fn max_dimension(&self) -> f64 {
        self.depth.max(self.width)
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Output of the assembler
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub elements: Vec<BeamElement>,
    pub members: Vec<MemberRecord>,
    pub geometry: Vec<ElementGeometry>,
}

/// Emit one element per item, in order
pub fn assemble(
    items: &[AssemblyItem<'_>],
    nodes: &mut NodeSet,
    model: &StructureModel,
    orientation: &dyn OrientationProvider,
) -> CompileResult<Assembly> {
    let base_y = PointKey::from_metres(&Vec3::new(0.0, model.base_elevation, 0.0)).y;
    let mut assembly = Assembly::default();

    for item in items {
        let label = assembly.elements.len() + 1;
        let start_key = item.start_key();
        let end_key = item.end_key();
        let start = resolve(nodes, &item.name, &start_key)?;
        let end = resolve(nodes, &item.name, &end_key)?;

        for (node, tag) in [(start, &item.start_tag), (end, &item.end_tag)] {
            if let Some(n) = nodes.node_mut(node) {
                n.add_member(tag);
            }
        }

        if let ItemKind::Structural(kind) = item.kind {
            if kind.is_ground_bearing() {
                let condition = item
                    .frame
                    .as_deref()
                    .and_then(|f| model.frame_support(f))
                    .map(BoundaryCondition::from)
                    .unwrap_or(BoundaryCondition::Pinned);
                for (node, key) in [(start, start_key), (end, end_key)] {
                    if key.y != base_y {
                        continue;
                    }
                    if let Some(n) = nodes.node_mut(node) {
                        if n.support_once(condition) {
                            trace!("Node {} supported as {:?} by '{}'", node, condition, item.name);
                        }
                    }
                }
            }
        }

        let axis = local_axis(item, orientation);
        assembly.elements.push(BeamElement {
            label,
            nodes: [start, end],
            local_axis: [axis.x, axis.y, axis.z],
            releases: item.releases.as_array(),
            section: item.section_label.clone(),
        });

        let classification = match item.kind {
            ItemKind::Structural(_) => item.section.classify(),
            ItemKind::Pipe | ItemKind::PipeConnector => SectionClass::Pipe,
        };
        let length = match (nodes.node(start), nodes.node(end)) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => 0.0,
        };
        assembly.members.push(MemberRecord {
            label,
            name: item.name.clone(),
            classification,
            section: item.section.clone(),
            length,
        });

        assembly.geometry.push(ElementGeometry {
            label,
            name: item.name.clone(),
            parent: item.parent.clone(),
            kind: item.kind,
            start: item.start,
            end: item.end,
            nodes: [start, end],
            depth: item.section.depth,
            width: item.section.width,
        });
    }

    debug!(
        "Assembled {} elements over {} nodes",
        assembly.elements.len(),
        nodes.len()
    );
    Ok(assembly)
}

fn resolve(nodes: &NodeSet, element: &str, key: &PointKey) -> CompileResult<usize> {
    nodes.label(key).ok_or_else(|| CompileError::NodeNotFound {
        element: element.to_string(),
        point: [key.x, key.y, key.z],
    })
}

fn local_axis(item: &AssemblyItem<'_>, orientation: &dyn OrientationProvider) -> Vec3 {
    match item.kind {
        ItemKind::Pipe | ItemKind::PipeConnector => geometry::local_z_axis(&item.start, &item.end, 0.0),
        ItemKind::Structural(_) => match orientation.local_axis(&item.parent) {
            Some(axis) if axis.norm() > 1e-12 => axis.normalize(),
            _ => {
                warn!(
                    "No orientation for '{}'; using member geometry",
                    item.parent
                );
                geometry::local_z_axis(&item.start, &item.end, item.orientation)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::splitter::split;
    use crate::elements::{Frame, SupportType};
    use std::collections::HashMap;

    fn model() -> StructureModel {
        let mut model = StructureModel::new("Rack");
        model.add_frame(Frame::new("F1", SupportType::Fix)).unwrap();
        model
            .add_section("W", Section::wide_flange("W", "American", 250.0, 250.0, 14.0, 9.0))
            .unwrap();
        model
            .add_section("FAB", Section::wide_flange("FAB400", "FAB", 400.0, 200.0, 16.0, 10.0))
            .unwrap();
        for (name, section) in [("C1", "W"), ("C2", "FAB")] {
            let top = if name == "C1" { 5.0 } else { 4.0 };
            model
                .add_member(
                    StructuralMember::new(
                        name,
                        MemberKind::Column,
                        Vec3::zeros(),
                        Vec3::new(0.0, top, 0.0),
                        section,
                    )
                    .in_frame("F1"),
                )
                .unwrap();
        }
        model
    }

    fn items(model: &StructureModel) -> Vec<AssemblyItem<'static>> {
        model
            .members
            .iter()
            .flat_map(|m| {
                let section = model.section(&m.section).unwrap().clone();
                split(m, &[], &[], 1e-3)
                    .into_iter()
                    .map(move |s| AssemblyItem::structural(s, m, &section))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_shared_base_node() {
        let model = model();
        let items = items(&model);
        let mut nodes = NodeSet::build(items.iter().flat_map(|i| [i.start_key(), i.end_key()]));
        let orientation: HashMap<String, Vec3> = HashMap::new();
        let assembly = assemble(&items, &mut nodes, &model, &orientation).unwrap();

        assert_eq!(nodes.len(), 3);
        let base = nodes.node(1).unwrap();
        assert_eq!(base.members, "C1,C2");
        assert_eq!(base.boundary, Some(BoundaryCondition::Fixed));
        assert_eq!(nodes.node(2).unwrap().boundary, None);

        let labels: Vec<usize> = assembly.elements.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![1, 2]);
        assert_eq!(assembly.elements[0].nodes, [1, 3]);
        assert_eq!(assembly.elements[1].nodes, [1, 2]);
        assert_eq!(assembly.members[0].classification, SectionClass::Profile);
        assert_eq!(assembly.members[1].classification, SectionClass::FabProfile);
        assert!((assembly.members[0].length - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_frame_pins_base() {
        let mut model = model();
        for m in model.members.iter_mut() {
            m.frame = None;
        }
        let items = items(&model);
        let mut nodes = NodeSet::build(items.iter().flat_map(|i| [i.start_key(), i.end_key()]));
        let orientation = HashMap::new();
        assemble(&items, &mut nodes, &model, &orientation).unwrap();
        assert_eq!(nodes.node(1).unwrap().boundary, Some(BoundaryCondition::Pinned));
    }

    #[test]
    fn test_missing_node_is_fatal() {
        let model = model();
        let items = items(&model);
        let mut nodes = NodeSet::build(vec![items[0].start_key(), items[0].end_key()]);
        let orientation = HashMap::new();
        let err = assemble(&items, &mut nodes, &model, &orientation).unwrap_err();
        assert!(matches!(err, CompileError::NodeNotFound { .. }));
    }

    #[test]
    fn test_connector_tags() {
        let pipe = PipeRun::new(
            "P1",
            Vec3::new(0.0, 5.3, 1.0),
            Vec3::new(6.0, 5.3, 1.0),
            168.3,
            7.1,
        );
        let item = AssemblyItem::connector(
            "S1",
            &pipe,
            Vec3::new(3.0, 5.0, 1.0),
            Vec3::new(3.0, 5.3, 1.0),
        );
        assert_eq!(item.start_tag, "S1");
        assert_eq!(item.end_tag, "P1/S1");
        assert_eq!(item.kind, ItemKind::PipeConnector);
    }
}
