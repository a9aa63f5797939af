//! Error types for the pixel-probe debugger

use crate::stage::{SourceLanguage, Stage};
use thiserror::Error;

/// Main error type for debug binding and execution
#[derive(Error, Debug)]
pub enum DebugError {
    #[error("Shader compilation failed ({language} {stage}, entry '{entry}'): {message}")]
    Compilation {
        stage: Stage,
        language: SourceLanguage,
        entry: String,
        message: String,
    },

    #[error("Unresolved semantic: {0}")]
    UnresolvedSemantic(String),

    #[error("Vertex output structure not cached; run the vertex stage first")]
    MissingStructureDescriptor,

    #[error("Vertex {vertex} has no cached output '{name}'")]
    MissingVertexOutput { vertex: usize, name: String },

    #[error("Vertex output structure has no SV_Position member")]
    MissingPositionOutput,

    #[error("Resource '{resource}' is {bound:?} but its cached copy is {cached:?}")]
    ResourceSizeMismatch {
        resource: String,
        cached: (u32, u32),
        bound: (u32, u32),
    },

    #[error("Value '{name}' expected {expected} components, got {found}")]
    ValueShape {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Local vertex index {0} is outside the triangle")]
    VertexIndex(usize),

    #[error("Vertex id {0} does not fit the 32-bit vertex index builtin")]
    VertexIdRange(u64),

    #[error("No shader source bound")]
    NoSource,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DebugError {
    /// Whether this error aborts the current bind/execute pass
    ///
    /// Unresolved names are a skip policy, everything else stops the pass.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::UnresolvedSemantic(_))
    }
}

/// Result type alias for debugger operations
pub type Result<T> = std::result::Result<T, DebugError>;
