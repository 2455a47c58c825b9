//! Structural elements module

mod material;
mod member;
mod node;
mod pipe;
mod plate;
mod section;
mod support;

pub use material::Material;
pub use member::{BracingKind, MemberKind, MemberReleases, StructuralMember};
pub use node::Node;
pub use pipe::{beam_bearing_point, PipeRun, PipeSupport};
pub use plate::{PlateKind, PlateSpec};
pub use section::{CoverPlates, Section, SectionClass, SectionShape};
pub use support::{BoundaryCondition, Frame, SupportType};
