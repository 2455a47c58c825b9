//! Rack Analysis - compiles parametric steel structures into FE analysis input
//!
//! A pipe rack or open frame is described by continuous members (columns,
//! beams, cantilevers, bracings, staircases), pipe runs resting on beams,
//! bolted plates and user loads. The compiler turns that into:
//! - A numbered node set on a millimetre grid with base supports
//! - Beam elements with local axes, releases and classified sections
//! - Per-category point and distributed load maps
//! - Wind exposure data for eight plan directions
//! - Bolt-group tension checks and blanket-load cells
//!
//! ## Example
//! ```rust
//! use rack_analysis::prelude::*;
//!
//! let mut model = StructureModel::new("Rack A");
//! model.add_frame(Frame::new("F1", SupportType::Fix)).unwrap();
//! model
//!     .add_section("W10x49", Section::wide_flange("W10x49", "American", 254.0, 254.0, 14.2, 8.6))
//!     .unwrap();
//!
//! let column = |name: &str, x: f64| {
//!     StructuralMember::new(name, MemberKind::Column, Vec3::new(x, 0.0, 0.0), Vec3::new(x, 5.0, 0.0), "W10x49")
//!         .in_frame("F1")
//! };
//! model.add_member(column("C1", 0.0)).unwrap();
//! model.add_member(column("C2", 6.0)).unwrap();
//! model
//!     .add_member(
//!         StructuralMember::new("B1", MemberKind::Beam, Vec3::new(0.0, 5.0, 0.0), Vec3::new(6.0, 5.0, 0.0), "W10x49")
//!             .with_connections(&["C1", "C2"]),
//!     )
//!     .unwrap();
//! model.add_load(UserLoad::downward("B1", LoadCategory::Dead, 3.0, 25.0)).unwrap();
//!
//! let orientation = GeometricOrientation::from_model(&model);
//! let input = Compiler::new(CompileOptions::default())
//!     .compile(&model, &orientation)
//!     .unwrap();
//! assert_eq!(input.element_count(), 4);
//! ```

pub mod blanket;
pub mod compile;
pub mod document;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod loads;
pub mod model;
pub mod options;
pub mod plates;
pub mod wind;

// Re-export common types
pub mod prelude {
    pub use crate::blanket::{resolve, PeripheralCell, Resolution};
    pub use crate::compile::{
        compile_project, Compiler, GeometricOrientation, NodeSet, OrientationProvider,
        SplitSegment,
    };
    pub use crate::document::AnalysisInput;
    pub use crate::elements::{
        BracingKind, Frame, Material, MemberKind, MemberReleases, Node, PipeRun, PlateKind,
        PlateSpec, Section, SectionClass, StructuralMember, SupportType,
    };
    pub use crate::error::{CompileError, CompileResult};
    pub use crate::geometry::{PointKey, Vec2, Vec3};
    pub use crate::loads::{BlanketLoad, FireProofingBand, LoadAggregate, LoadCategory, UserLoad};
    pub use crate::model::StructureModel;
    pub use crate::options::CompileOptions;
    pub use crate::plates::{tension_check, BoltLayout, PlateSize, StiffenerLayout, TensionCheckResult};
    pub use crate::wind::{WindAnalyzer, WindDirectionBlock};
}
