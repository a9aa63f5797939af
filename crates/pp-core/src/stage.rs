//! Shader stage and source language tags

use serde::{Deserialize, Serialize};

/// Pipeline stage whose entry point is being debugged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stage {
    Vertex,
    Pixel,
}

/// Source language family of the debugged program
///
/// Determines whether inputs are bound through entry-point argument
/// semantics or through `in`/`out` globals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    #[default]
    Hlsl,
    Glsl,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Pixel => write!(f, "pixel"),
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hlsl => write!(f, "HLSL"),
            Self::Glsl => write!(f, "GLSL"),
        }
    }
}
