//! Geometry-to-analysis-model compiler
//!
//! Stages, in order:
//! 1. split every member at its connections and load points
//! 2. number the structural nodes, then append pipe nodes
//! 3. assemble elements in emission order
//! 4. map loads, resolve blankets, fire-proofing, wind and plates
//! 5. collect everything into an [`AnalysisInput`]

mod assembler;
mod nodes;
mod orientation;
mod splitter;

pub use assembler::{
    assemble, Assembly, AssemblyItem, BeamElement, ElementGeometry, ItemKind, MemberRecord,
};
pub use nodes::NodeSet;
pub use orientation::{GeometricOrientation, OrientationProvider};
pub use splitter::{
    nearest_boundary, split, ConnectionIndex, DistanceBasis, SegmentLoads, SplitSegment, Splittable,
};

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::blanket;
use crate::document::{AnalysisInput, BlanketBlock, DesignEcho, SupportRecord};
use crate::elements::{beam_bearing_point, PlateKind, StructuralMember};
use crate::error::{CompileError, CompileResult};
use crate::geometry::PointKey;
use crate::loads::{fire_proofing, LoadMapper, UserLoad};
use crate::model::StructureModel;
use crate::options::CompileOptions;
use crate::plates::check_plate;
use crate::wind::WindAnalyzer;

/// Compiles structure models into analysis input documents
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile one model
    pub fn compile(
        &self,
        model: &StructureModel,
        orientation: &dyn OrientationProvider,
    ) -> CompileResult<AnalysisInput> {
        let tol = self.options.distance_tolerance;
        model.validate(tol)?;
        info!("Compiling {}", model.summary());

        let items = self.discretize(model)?;

        let structural_points = items
            .iter()
            .filter(|i| i.kind.is_structural())
            .flat_map(|i| [i.start_key(), i.end_key()]);
        let mut nodes = NodeSet::build(structural_points);
        let pipe_points: Vec<PointKey> = items
            .iter()
            .filter(|i| !i.kind.is_structural())
            .flat_map(|i| [i.start_key(), i.end_key()])
            .collect();
        let appended = nodes.extend(pipe_points);
        debug!("{} nodes ({} from pipes)", nodes.len(), appended);

        let assembly = assemble(&items, &mut nodes, model, orientation)?;

        let mut mapper = LoadMapper::new();
        for (item, geometry) in items.iter().zip(&assembly.geometry) {
            if !item.loads.is_empty() {
                mapper.map_segment(&item.loads, geometry.nodes[0], geometry.nodes[1], geometry.label);
            }
        }

        let mut blanket_cells = Vec::new();
        for load in &model.loads.blankets {
            let mut block = BlanketBlock {
                name: load.name.clone(),
                category: load.category,
                pressure: load.pressure,
                cells: Vec::new(),
                skipped: Vec::new(),
                unresolved: None,
            };
            match (model.member(&load.from_member), model.member(&load.to_member)) {
                (Some(from), Some(to)) => {
                    let resolution =
                        blanket::resolve(from, to, load.distance, load.width, &assembly.geometry, tol);
                    mapper.apply_blanket(load, &resolution.cells);
                    block.cells = resolution.cells;
                    block.skipped = resolution.skipped;
                }
                (from, _) => {
                    let missing = if from.is_none() { &load.from_member } else { &load.to_member };
                    warn!("Blanket '{}' names unknown member '{}'; skipped", load.name, missing);
                    block.unresolved = Some(format!("unknown member '{}'", missing));
                }
            }
            blanket_cells.push(block);
        }

        let fire = model.loads.fire_proofing.map(|band| {
            fire_proofing(
                &assembly.geometry,
                &band,
                model.base_elevation,
                self.options.fire_proofing_boxed_limit,
                tol,
            )
        });

        let wind = WindAnalyzer::new(&self.options).analyze(&assembly.geometry);

        let mut base_plates = Vec::new();
        let mut splice_plates = Vec::new();
        for plate in &model.plates {
            let member = model
                .member(&plate.member)
                .ok_or_else(|| CompileError::MemberNotFound(plate.member.clone()))?;
            let check = check_plate(plate, model.section(&member.section)?, member.orientation);
            match plate.kind {
                PlateKind::Base => base_plates.push(check),
                PlateKind::Splice => splice_plates.push(check),
            }
        }

        let supports = nodes
            .iter()
            .filter_map(|(label, node)| {
                node.boundary.map(|condition| SupportRecord {
                    node: label,
                    condition,
                    restraints: condition.restraints(),
                })
            })
            .collect();

        let document = AnalysisInput {
            model: model.name.clone(),
            nodes: nodes.into_nodes().into_iter().enumerate().map(|(i, n)| (i + 1, n)).collect(),
            beam_elements: assembly.elements.into_iter().map(|e| (e.label, e)).collect(),
            members: assembly.members,
            supports,
            loads: mapper.into_maps(),
            fire_proofing: fire,
            wind,
            base_plates,
            splice_plates,
            blanket_cells,
            design: DesignEcho {
                material: model.design.material.clone(),
                design_code: model.design.design_code.clone(),
                code_parameters: model.design.code_parameters.clone(),
                wind: model.loads.wind.clone(),
            },
        };
        info!("Compiled {}", document.summary());
        Ok(document)
    }

    /// Split members and pipes into items in emission order: columns, beams,
    /// cantilevers, bracings, staircases, then each pipe run followed by its
    /// connectors
    fn discretize<'m>(&self, model: &'m StructureModel) -> CompileResult<Vec<AssemblyItem<'m>>> {
        let tol = self.options.distance_tolerance;
        let connections = ConnectionIndex::build(model);

        let mut members: Vec<&StructuralMember> = model.members.iter().collect();
        members.sort_by_key(|m| m.kind.emission_rank());

        let mut split_members = Vec::with_capacity(members.len());
        for member in members {
            let loads: Vec<&UserLoad> = model.loads.loads_on(&member.name).collect();
            let segments = split(member, connections.points_for(&member.name), &loads, tol);
            split_members.push((member, segments));
        }
        let position: HashMap<&str, usize> = split_members
            .iter()
            .map(|(m, _)| *m)
            .enumerate()
            .map(|(i, m)| (m.name.as_str(), i))
            .collect();
        snap_member_ends(&mut split_members, &position, &connections, tol);

        let mut items = Vec::new();
        for (member, segments) in &split_members {
            let section = model.section(&member.section)?;
            for segment in segments {
                items.push(AssemblyItem::structural(segment.clone(), member, section));
            }
        }

        for pipe in &model.pipes {
            let attachments: Vec<_> = pipe.supports.iter().map(|s| pipe.support_point(s)).collect();
            let loads: Vec<&UserLoad> = model.loads.loads_on(&pipe.name).collect();
            let segments = split(pipe, &attachments, &loads, tol);

            let mut connectors = Vec::new();
            for support in &pipe.supports {
                let Some(&at) = position.get(support.beam.as_str()) else {
                    warn!("Pipe support '{}' has no beam '{}'", support.name, support.beam);
                    continue;
                };
                let (beam, beam_segments) = &split_members[at];
                let pipe_point = pipe.support_point(support);
                let pipe_point = nearest_boundary(&segments, &pipe_point, tol).unwrap_or(pipe_point);
                let bearing = beam_bearing_point(&beam.start, &beam.end, &pipe_point);
                let beam_point = nearest_boundary(beam_segments, &bearing, tol).unwrap_or(bearing);
                if PointKey::from_metres(&beam_point) == PointKey::from_metres(&pipe_point) {
                    debug!("Pipe support '{}' sits on its beam; no connector", support.name);
                    continue;
                }
                connectors.push(AssemblyItem::connector(&support.name, pipe, beam_point, pipe_point));
            }

            items.extend(segments.into_iter().map(|segment| AssemblyItem::pipe(segment, pipe)));
            items.extend(connectors);
        }

        debug!("Discretized '{}' into {} items", model.name, items.len());
        Ok(items)
    }
}

/// Move each member end that lies within `tol` of a node on a connected
/// member, but rounds to another grid point, onto that node
fn snap_member_ends(
    split_members: &mut [(&StructuralMember, Vec<SplitSegment<'_>>)],
    position: &HashMap<&str, usize>,
    connections: &ConnectionIndex,
    tol: f64,
) {
    for i in 0..split_members.len() {
        let member = split_members[i].0;
        let segments = &split_members[i].1;
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            continue;
        };
        let mut ends = [first.start, last.end];
        for end in ends.iter_mut() {
            let point = *end;
            let target = connections
                .neighbours_of(&member.name)
                .iter()
                .filter_map(|n| position.get(n.as_str()))
                .filter_map(|&j| nearest_boundary(&split_members[j].1, &point, tol))
                .min_by(|a, b| (a - point).norm().total_cmp(&(b - point).norm()));
            if let Some(target) = target {
                if PointKey::from_metres(&target) != PointKey::from_metres(&point) {
                    debug!("Snapped an end of '{}' onto a connected member's node", member.name);
                    *end = target;
                }
            }
        }

        let segments = &mut split_members[i].1;
        if let Some(first) = segments.first_mut() {
            first.start = ends[0];
        }
        if let Some(last) = segments.last_mut() {
            last.end = ends[1];
        }
    }
}

/// Compile several models independently and concatenate the documents
pub fn compile_project(
    models: &[StructureModel],
    options: &CompileOptions,
    orientation: &dyn OrientationProvider,
) -> CompileResult<Vec<AnalysisInput>> {
    let compiler = Compiler::new(options.clone());
    models
        .iter()
        .map(|model| compiler.compile(model, orientation))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Frame, MemberKind, PipeRun, Section, SupportType};
    use crate::geometry::Vec3;
    use crate::loads::LoadCategory;

    fn portal() -> StructureModel {
        let mut model = StructureModel::new("Portal");
        model.add_frame(Frame::new("F1", SupportType::Fix)).unwrap();
        model
            .add_section("W10x49", Section::wide_flange("W10x49", "American", 254.0, 254.0, 14.2, 8.6))
            .unwrap();
        model
            .add_member(
                StructuralMember::new("C1", MemberKind::Column, Vec3::zeros(), Vec3::new(0.0, 5.0, 0.0), "W10x49")
                    .in_frame("F1"),
            )
            .unwrap();
        model
            .add_member(
                StructuralMember::new(
                    "C2",
                    MemberKind::Column,
                    Vec3::new(6.0, 0.0, 0.0),
                    Vec3::new(6.0, 5.0, 0.0),
                    "W10x49",
                )
                .in_frame("F1"),
            )
            .unwrap();
        model
            .add_member(
                StructuralMember::new(
                    "B1",
                    MemberKind::Beam,
                    Vec3::new(0.0, 5.0, 0.0),
                    Vec3::new(6.0, 5.0, 0.0),
                    "W10x49",
                )
                .with_connections(&["C1", "C2"]),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_portal_compiles() {
        let model = portal();
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();

        assert_eq!(doc.node_count(), 4);
        assert_eq!(doc.element_count(), 3);
        assert_eq!(doc.supports.len(), 2);
        assert_eq!(doc.wind.len(), 8);
        let labels: Vec<usize> = doc.beam_elements.keys().copied().collect();
        assert_eq!(labels, vec![1, 2, 3]);
        assert_eq!(doc.members[2].name, "B1");
    }

    #[test]
    fn test_pipe_nodes_follow_structural_nodes() {
        let mut model = portal();
        model
            .add_pipe(
                PipeRun::new("P1", Vec3::new(0.0, 5.3, 0.0), Vec3::new(6.0, 5.3, 0.0), 168.3, 7.1)
                    .with_support("S1", "B1", 3.0),
            )
            .unwrap();
        model
            .add_load(UserLoad::downward("P1", LoadCategory::DirectPiping, 3.0, 12.0))
            .unwrap();
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();

        // 4 frame nodes + beam cut at x = 3; pipe adds its ends and midpoint
        assert_eq!(doc.node_count(), 8);
        assert_eq!(doc.element_count(), 2 + 2 + 2 + 1);
        let beam_mid = &doc.nodes[&4];
        assert_eq!(beam_mid.coords(), [3000.0, 5000.0, 0.0]);
        assert_eq!(beam_mid.members, "B1.1,B1.2,S1");
        let pipe_mid = doc.nodes.values().find(|n| n.coords() == [3000.0, 5300.0, 0.0]).unwrap();
        assert_eq!(pipe_mid.members, "P1.1,P1.2,P1/S1");
        assert_eq!(doc.loads.direct_piping.point.len(), 1);
    }

    fn node_at<'d>(doc: &'d AnalysisInput, coords: [f64; 3]) -> Option<&'d crate::elements::Node> {
        doc.nodes.values().find(|n| n.coords() == coords)
    }

    fn cross_beam(name: &str, x: f64, z_end: f64) -> StructuralMember {
        StructuralMember::new(
            name,
            MemberKind::Beam,
            Vec3::new(x, 5.0, 0.0),
            Vec3::new(x, 5.0, z_end),
            "W10x49",
        )
        .with_connections(&["B1"])
    }

    #[test]
    fn test_portal_facing_blocks() {
        let model = portal();
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();
        // wind from +X: C2 hides C1, the beam runs along the wind
        assert_eq!(doc.wind[0].exposed, vec![1, 2]);
        assert_eq!(doc.wind[0].facing, vec![2]);
        // wind from +Z: everything lies in one windward line
        assert_eq!(doc.wind[2].facing, vec![1, 2, 3]);
    }

    #[test]
    fn test_connector_lands_on_merged_beam_cut() {
        let mut model = portal();
        model.add_member(cross_beam("BZ", 3.0, 3.0)).unwrap();
        // bears 0.6 mm from the BZ cut: same cut, different grid point
        model
            .add_pipe(
                PipeRun::new("P1", Vec3::new(3.0006, 5.3, -1.0), Vec3::new(3.0006, 5.3, 2.0), 168.3, 7.1)
                    .with_support("S1", "B1", 1.0),
            )
            .unwrap();
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();

        assert!(node_at(&doc, [3001.0, 5000.0, 0.0]).is_none());
        let joint = node_at(&doc, [3000.0, 5000.0, 0.0]).unwrap();
        let names: Vec<&str> = joint.members.split(',').collect();
        for name in ["B1.1", "B1.2", "BZ", "S1"] {
            assert!(names.contains(&name), "{} missing from {:?}", name, names);
        }
        let pipe_side = node_at(&doc, [3001.0, 5300.0, 0.0]).unwrap();
        assert!(pipe_side.members.split(',').any(|n| n == "P1/S1"));
    }

    #[test]
    fn test_connected_end_snaps_to_surviving_cut() {
        let mut model = portal();
        model.add_member(cross_beam("BZ", 3.0, 3.0)).unwrap();
        model.add_member(cross_beam("BY", 3.0006, -3.0)).unwrap();
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();

        assert_eq!(doc.node_count(), 7);
        assert!(node_at(&doc, [3001.0, 5000.0, 0.0]).is_none());
        let joint = node_at(&doc, [3000.0, 5000.0, 0.0]).unwrap();
        assert!(joint.members.split(',').any(|n| n == "BY"));
        assert!(joint.members.split(',').any(|n| n == "BZ"));
    }

    #[test]
    fn test_blanket_with_unknown_member_is_skipped() {
        let mut model = portal();
        model.loads.blankets.push(crate::loads::BlanketLoad {
            name: "Deck".to_string(),
            category: LoadCategory::Live,
            from_member: "B1".to_string(),
            to_member: "B9".to_string(),
            distance: 0.0,
            width: 6.0,
            pressure: 2.5,
        });
        let orientation = GeometricOrientation::from_model(&model);
        let doc = Compiler::default().compile(&model, &orientation).unwrap();

        assert_eq!(doc.blanket_cells.len(), 1);
        let block = &doc.blanket_cells[0];
        assert!(block.cells.is_empty());
        assert_eq!(block.unresolved.as_deref(), Some("unknown member 'B9'"));
    }

    #[test]
    fn test_compile_project_keeps_models_apart() {
        let a = portal();
        let mut b = portal();
        b.name = "Second".to_string();
        let orientation = GeometricOrientation::from_model(&a);
        let docs = compile_project(&[a, b], &CompileOptions::default(), &orientation).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].model, "Second");
        assert_eq!(docs[0].node_count(), docs[1].node_count());
    }
}
