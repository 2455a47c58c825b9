//! Structure model - the parametric input to the compiler

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::elements::{Frame, Material, PipeRun, PlateSpec, Section, StructuralMember, SupportType};
use crate::error::{CompileError, CompileResult};
use crate::loads::{BlanketLoad, LoadsConfig, UserLoad};

/// Material and design-code data echoed to the external checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignParameters {
    pub material: Material,
    pub design_code: String,
    #[serde(default)]
    pub code_parameters: BTreeMap<String, f64>,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            material: Material::steel(),
            design_code: "AISC 360-10".to_string(),
            code_parameters: BTreeMap::new(),
        }
    }
}

/// One pipe rack or open frame as entered by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureModel {
    pub name: String,
    /// Elevation of the column bases (metres)
    #[serde(default)]
    pub base_elevation: f64,
    #[serde(default)]
    pub frames: Vec<Frame>,
    pub members: Vec<StructuralMember>,
    pub sections: HashMap<String, Section>,
    #[serde(default)]
    pub pipes: Vec<PipeRun>,
    #[serde(default)]
    pub plates: Vec<PlateSpec>,
    #[serde(default)]
    pub loads: LoadsConfig,
    #[serde(default)]
    pub design: DesignParameters,
}

impl StructureModel {
    /// Create an empty model
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_elevation: 0.0,
            frames: Vec::new(),
            members: Vec::new(),
            sections: HashMap::new(),
            pipes: Vec::new(),
            plates: Vec::new(),
            loads: LoadsConfig::default(),
            design: DesignParameters::default(),
        }
    }

    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a support frame
    pub fn add_frame(&mut self, frame: Frame) -> CompileResult<()> {
        if self.frames.iter().any(|f| f.name == frame.name) {
            return Err(CompileError::DuplicateName(frame.name));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Add a section under `name`
    pub fn add_section(&mut self, name: &str, section: Section) -> CompileResult<()> {
        if self.sections.contains_key(name) {
            return Err(CompileError::DuplicateName(name.to_string()));
        }
        self.sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Add a structural member; its section must already exist
    pub fn add_member(&mut self, member: StructuralMember) -> CompileResult<()> {
        if !self.sections.contains_key(&member.section) {
            return Err(CompileError::SectionNotFound(member.section.clone()));
        }
        if self.is_name_taken(&member.name) {
            return Err(CompileError::DuplicateName(member.name));
        }
        self.members.push(member);
        Ok(())
    }

    /// Add a pipe run; every support must rest on a known member
    pub fn add_pipe(&mut self, pipe: PipeRun) -> CompileResult<()> {
        if self.is_name_taken(&pipe.name) {
            return Err(CompileError::DuplicateName(pipe.name));
        }
        for support in &pipe.supports {
            if self.member(&support.beam).is_none() {
                return Err(CompileError::MemberNotFound(support.beam.clone()));
            }
        }
        self.pipes.push(pipe);
        Ok(())
    }

    /// Add a base plate or splice flange on a known member
    pub fn add_plate(&mut self, plate: PlateSpec) -> CompileResult<()> {
        if self.member(&plate.member).is_none() {
            return Err(CompileError::MemberNotFound(plate.member.clone()));
        }
        if self.plates.iter().any(|p| p.name == plate.name) {
            return Err(CompileError::DuplicateName(plate.name));
        }
        self.plates.push(plate);
        Ok(())
    }

    /// Add a user load on a member or pipe run
    pub fn add_load(&mut self, load: UserLoad) -> CompileResult<()> {
        if !self.is_name_taken(&load.element) {
            return Err(CompileError::MemberNotFound(load.element.clone()));
        }
        self.loads.loads.push(load);
        Ok(())
    }

    /// Add a blanket load between two beams
    pub fn add_blanket(&mut self, blanket: BlanketLoad) -> CompileResult<()> {
        for name in [&blanket.from_member, &blanket.to_member] {
            if self.member(name).is_none() {
                return Err(CompileError::MemberNotFound(name.clone()));
            }
        }
        self.loads.blankets.push(blanket);
        Ok(())
    }

    // ========================
    // Lookups
    // ========================

    pub fn member(&self, name: &str) -> Option<&StructuralMember> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn pipe(&self, name: &str) -> Option<&PipeRun> {
        self.pipes.iter().find(|p| p.name == name)
    }

    pub fn section(&self, name: &str) -> CompileResult<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| CompileError::SectionNotFound(name.to_string()))
    }

    /// Support type of a frame, if the frame is known
    pub fn frame_support(&self, frame: &str) -> Option<SupportType> {
        self.frames
            .iter()
            .find(|f| f.name == frame)
            .map(|f| f.support_type)
    }

    fn is_name_taken(&self, name: &str) -> bool {
        self.member(name).is_some() || self.pipe(name).is_some()
    }

    /// Check a deserialized model before compiling it
    pub fn validate(&self, tol: f64) -> CompileResult<()> {
        let mut seen = std::collections::HashSet::new();
        for name in self
            .members
            .iter()
            .map(|m| m.name.as_str())
            .chain(self.pipes.iter().map(|p| p.name.as_str()))
        {
            if !seen.insert(name) {
                return Err(CompileError::DuplicateName(name.to_string()));
            }
        }

        for member in &self.members {
            if member.length() <= tol {
                return Err(CompileError::InvalidGeometry(format!(
                    "member '{}' has zero length",
                    member.name
                )));
            }
            if !self.sections.contains_key(&member.section) {
                return Err(CompileError::SectionNotFound(member.section.clone()));
            }
        }

        for pipe in &self.pipes {
            if pipe.length() <= tol {
                return Err(CompileError::InvalidGeometry(format!(
                    "pipe run '{}' has zero length",
                    pipe.name
                )));
            }
            if pipe.outer_diameter <= 0.0 || pipe.thickness <= 0.0 {
                return Err(CompileError::InvalidInput(format!(
                    "pipe run '{}' needs a positive diameter and wall thickness",
                    pipe.name
                )));
            }
        }

        for support in self.pipes.iter().flat_map(|p| &p.supports) {
            if self.member(&support.beam).is_none() {
                return Err(CompileError::MemberNotFound(support.beam.clone()));
            }
        }
        for load in &self.loads.loads {
            if !self.is_name_taken(&load.element) {
                return Err(CompileError::MemberNotFound(load.element.clone()));
            }
        }

        for plate in &self.plates {
            if self.member(&plate.member).is_none() {
                return Err(CompileError::MemberNotFound(plate.member.clone()));
            }
            if plate.length <= 0.0 || plate.width <= 0.0 {
                return Err(CompileError::InvalidInput(format!(
                    "plate '{}' needs positive dimensions",
                    plate.name
                )));
            }
        }

        Ok(())
    }

    /// Get model summary
    pub fn summary(&self) -> String {
        format!(
            "Model '{}': {} members, {} sections, {} pipe runs, {} plates, {} loads",
            self.name,
            self.members.len(),
            self.sections.len(),
            self.pipes.len(),
            self.plates.len(),
            self.loads.loads.len()
        )
    }
}
