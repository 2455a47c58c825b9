//! The analysis-input document handed to the external solver

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::blanket::PeripheralCell;
use crate::compile::{BeamElement, MemberRecord};
use crate::elements::{BoundaryCondition, Material, Node};
use crate::error::CompileResult;
use crate::loads::{FireProofingLoads, LoadCategory, LoadMaps, WindParameters};
use crate::plates::PlateCheck;
use crate::wind::WindDirectionBlock;

/// Restrained node
#[derive(Debug, Clone, Serialize)]
pub struct SupportRecord {
    pub node: usize,
    pub condition: BoundaryCondition,
    /// [DX, DY, DZ, RX, RY, RZ]
    pub restraints: [bool; 6],
}

/// Cells one blanket load was resolved into
#[derive(Debug, Clone, Serialize)]
pub struct BlanketBlock {
    pub name: String,
    pub category: LoadCategory,
    pub pressure: f64,
    pub cells: Vec<PeripheralCell>,
    /// Lower-left corners (mm) that could not be closed into a cell
    pub skipped: Vec<[f64; 2]>,
    /// Why the whole region was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<String>,
}

/// Design data passed through to the checker
#[derive(Debug, Clone, Serialize)]
pub struct DesignEcho {
    pub material: Material,
    pub design_code: String,
    pub code_parameters: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindParameters>,
}

/// Compiled analysis input for one structure
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisInput {
    pub model: String,
    pub nodes: BTreeMap<usize, Node>,
    pub beam_elements: BTreeMap<usize, BeamElement>,
    pub members: Vec<MemberRecord>,
    pub supports: Vec<SupportRecord>,
    pub loads: LoadMaps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_proofing: Option<FireProofingLoads>,
    pub wind: Vec<WindDirectionBlock>,
    pub base_plates: Vec<PlateCheck>,
    pub splice_plates: Vec<PlateCheck>,
    pub blanket_cells: Vec<BlanketBlock>,
    pub design: DesignEcho,
}

impl AnalysisInput {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.beam_elements.len()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> CompileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as JSON
    pub fn write_to(&self, path: impl AsRef<Path>) -> CompileResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// One-line overview for logs
    pub fn summary(&self) -> String {
        format!(
            "'{}': {} nodes, {} elements, {} supports, {} plates, {} blanket cells",
            self.model,
            self.node_count(),
            self.element_count(),
            self.supports.len(),
            self.base_plates.len() + self.splice_plates.len(),
            self.blanket_cells.iter().map(|b| b.cells.len()).sum::<usize>()
        )
    }
}
