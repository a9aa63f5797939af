//! Collaborator interfaces
//!
//! The compiler/interpreter and the GPU resource provider live outside this
//! crate. The debugger only talks to them through these traits.

use crate::types::{ProgramInfo, TypeShape};
use crate::value::Value;
use pp_core::{SourceLanguage, Stage};

/// Compile request handed to the shader engine
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    pub language: SourceLanguage,
    pub stage: Stage,
    pub entry: &'a str,
    pub source: &'a str,
}

/// Shader compiler plus bytecode interpreter
///
/// Semantic names are always passed lowercase, so an engine may store them
/// verbatim and still match `SV_Position` against `sv_position`.
pub trait ShaderEngine {
    /// Compile `source`, replacing the current program on success
    ///
    /// On failure the returned message is the compiler's diagnostic text.
    fn compile(&mut self, request: &CompileRequest<'_>) -> Result<ProgramInfo, String>;

    /// Run `entry` with the given arguments and return its result
    fn execute(&mut self, entry: &str, args: &[Value]) -> Value;

    /// Declare a global the program does not declare itself
    fn add_global(&mut self, name: &str);

    fn global_value(&self, name: &str) -> Option<Value>;

    fn set_global_value(&mut self, name: &str, value: Value);

    fn semantic_value(&self, semantic: &str) -> Option<Value>;

    fn set_semantic_value(&mut self, semantic: &str, value: Value);

    /// Shape of a declared type name
    ///
    /// The default understands the builtin scalar, vector and matrix names
    /// of both languages.
    fn type_shape(&self, type_name: &str) -> Option<TypeShape> {
        TypeShape::parse(type_name)
    }
}

/// Bound GPU resources of a draw item
pub trait ResourceProvider {
    /// Resource names bound to `owner`, in slot order
    fn bound_textures(&self, owner: &str) -> Vec<String>;

    /// Current backing size of a render target or static image
    fn texture_size(&self, resource: &str) -> Option<(u32, u32)>;

    /// Blocking read-back of the resource as tightly packed RGBA8
    fn read_pixels(&mut self, resource: &str, width: u32, height: u32, out: &mut [u8]);
}
