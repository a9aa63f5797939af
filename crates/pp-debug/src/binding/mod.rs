//! Language-specific binding strategies
//!
//! HLSL-like programs receive their inputs as entry-point arguments tagged
//! with semantics; GLSL-like programs read `in` globals by slot and write
//! `out` globals. Both share the uniform pass in [`uniforms`].

pub mod glsl;
pub mod hlsl;
pub mod uniforms;

use crate::engine::{ResourceProvider, ShaderEngine};
use crate::fragment::{DrawPass, FragmentContext, OutputLayout};
use crate::layout::semantic_key;
use crate::texture::TextureCache;
use crate::types::ProgramInfo;
use crate::value::Value;
use bitflags::bitflags;
use glam::Vec4;
use pp_core::{DebugError, Result, SourceLanguage, Stage};
use tracing::trace;

pub use glsl::GlslBinding;
pub use hlsl::HlslBinding;

bitflags! {
    /// Builtin variables registered for the bound program
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Builtins: u8 {
        const VERTEX_ID = 0x01;
        const POSITION = 0x02;
        const FRONT_FACE = 0x04;
        const FRAG_COORD = 0x08;
    }
}

/// State visible to one bind pass
pub struct BindContext<'a> {
    pub engine: &'a mut dyn ShaderEngine,
    pub program: &'a ProgramInfo,
    pub language: SourceLanguage,
    pub stage: Stage,
    pub entry: &'a str,
    pub pass: &'a DrawPass,
    pub fragment: &'a mut FragmentContext,
    /// Which of the triangle's vertices is being debugged
    pub local_index: usize,
    pub textures: &'a mut TextureCache,
    pub resources: &'a mut dyn ResourceProvider,
    /// Argument list for the entry point, rebuilt by every pass
    pub args: &'a mut Vec<Value>,
    pub output_layout: Option<&'a OutputLayout>,
    pub builtins: Builtins,
    pub vertices_per_primitive: u32,
    pub trace_bindings: bool,
}

impl BindContext<'_> {
    /// Draw-wide index of the vertex being debugged
    ///
    /// The provoking vertex index is rounded down to the start of its
    /// primitive and offset by the local index. The result must fit the
    /// signed 32-bit builtin.
    pub fn vertex_index(&self) -> Result<i32> {
        let count = match self.fragment.vertex_count {
            0 => self.vertices_per_primitive.max(1),
            n => n,
        };
        let base = u64::from((self.fragment.vertex_id / count) * count);
        let index = base + self.local_index as u64;
        i32::try_from(index).map_err(|_| DebugError::VertexIdRange(index))
    }

    pub fn install_global(&mut self, name: &str, value: Value) {
        if self.trace_bindings {
            trace!("global {} = {}", name, value.describe());
        }
        self.engine.set_global_value(name, value);
    }

    pub fn install_semantic(&mut self, semantic: &str, value: Value) {
        if self.trace_bindings {
            trace!("semantic {} = {}", semantic, value.describe());
        }
        self.engine.set_semantic_value(&semantic_key(semantic), value);
    }
}

/// State visible while publishing an execution result
pub struct OutputContext<'a> {
    pub engine: &'a mut dyn ShaderEngine,
    pub program: &'a ProgramInfo,
    pub stage: Stage,
    pub entry: &'a str,
    pub fragment: &'a mut FragmentContext,
    pub local_index: usize,
    pub output_layout: &'a mut Option<OutputLayout>,
}

impl OutputContext<'_> {
    /// Publish the fragment's debug color, clamped to `[0, 1]`
    pub fn publish_color(&mut self, color: Vec4) {
        let color = color.clamp(Vec4::ZERO, Vec4::ONE);
        trace!("debug color = {:?}", color);
        self.fragment.debug_color = color;
    }
}

/// Per-language binding rules
pub trait BindingStrategy {
    fn language(&self) -> SourceLanguage;

    /// Register builtin placeholders right after a successful compile
    fn register_builtins(&self, engine: &mut dyn ShaderEngine, stage: Stage) -> Builtins;

    /// Install uniforms and textures
    fn bind_globals(&self, cx: &mut BindContext<'_>) -> Result<()> {
        uniforms::bind_uniforms(cx)
    }

    /// Install stage inputs: attributes, interpolated outputs and builtins
    fn bind_inputs(&self, cx: &mut BindContext<'_>) -> Result<()>;

    /// Cache vertex outputs or publish the fragment color
    fn publish_outputs(&self, cx: &mut OutputContext<'_>, result: Value) -> Result<()>;
}

/// Strategy for a language tag
pub fn strategy_for(language: SourceLanguage) -> &'static dyn BindingStrategy {
    match language {
        SourceLanguage::Hlsl => &HlslBinding,
        SourceLanguage::Glsl => &GlslBinding,
    }
}
