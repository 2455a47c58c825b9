//! Error types for the analysis-model compiler

use thiserror::Error;

/// Main error type for compile operations
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("No node at {point:?} for element '{element}'")]
    NodeNotFound { element: String, point: [i64; 3] },

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;
