//! Debug request state owned by the caller

use crate::layout::{InputLayoutItem, VertexRecord};
use crate::named::NamedValue;
use crate::types::{StructDecl, Variable};
use crate::value::Value;
use glam::{Vec2, Vec4};
use std::collections::HashMap;

/// Key under which an HLSL vertex entry point's result is cached
pub const RETURN_KEY: &str = "return";

/// Outputs of one vertex-stage run, keyed by output name
pub type VertexOutputs = HashMap<String, Value>;

/// Draw item that produced the debugged fragment
#[derive(Debug, Clone, Default)]
pub struct DrawPass {
    /// Name used to look up bound resources
    pub name: String,
    pub input_layout: Vec<InputLayoutItem>,
    pub uniforms: Vec<NamedValue>,
}

/// Everything known about one debugged fragment and its triangle
#[derive(Debug, Clone)]
pub struct FragmentContext {
    pub vertices: [VertexRecord; 3],
    /// Index of the provoking vertex within the draw
    pub vertex_id: u32,
    /// Vertices per primitive; zero means use the session default
    pub vertex_count: u32,
    /// Fragment position relative to the triangle, in `[0, 1]` screen space
    pub relative_coordinate: Vec2,
    /// Window-space fragment coordinate
    pub coordinate: Vec2,
    /// Cached vertex-stage outputs, one map per triangle vertex
    pub vertex_outputs: [VertexOutputs; 3],
    /// Clamped color produced by the last pixel-stage run
    pub debug_color: Vec4,
}

impl FragmentContext {
    pub fn new(vertices: [VertexRecord; 3]) -> Self {
        Self {
            vertices,
            vertex_id: 0,
            vertex_count: 3,
            relative_coordinate: Vec2::ZERO,
            coordinate: Vec2::ZERO,
            vertex_outputs: Default::default(),
            debug_color: Vec4::ZERO,
        }
    }

    /// Cached output `name` of all three vertices, if every vertex has it
    pub fn outputs_named(&self, name: &str) -> Option<[&Value; 3]> {
        Some([
            self.vertex_outputs[0].get(name)?,
            self.vertex_outputs[1].get(name)?,
            self.vertex_outputs[2].get(name)?,
        ])
    }

    /// Drop every cached vertex-stage output
    pub fn clear_outputs(&mut self) {
        for outputs in &mut self.vertex_outputs {
            outputs.clear();
        }
    }
}

/// Shape of the vertex entry point's return value
#[derive(Debug, Clone, PartialEq)]
pub enum OutputLayout {
    /// Bare clip-space position
    Vector,
    /// Structure with one member per output slot
    Struct(StructDecl),
}

impl OutputLayout {
    pub fn members(&self) -> &[Variable] {
        match self {
            Self::Vector => &[],
            Self::Struct(s) => &s.members,
        }
    }
}
