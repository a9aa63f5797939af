//! Shader debug execution context builder
//!
//! This crate prepares an interpreted shader program to run for one chosen
//! vertex or fragment of a draw:
//! - Binding uniforms, sampled textures and stage inputs into the interpreter
//! - Resolving vertex inputs against the active input layout by semantic
//! - Perspective-correct interpolation of cached vertex outputs
//! - Caching vertex results and publishing the fragment's debug color
//!
//! The compiler/interpreter and the GPU resource provider are supplied by
//! the caller through [`ShaderEngine`] and [`ResourceProvider`].

pub mod binding;
pub mod engine;
pub mod fragment;
pub mod interpolate;
pub mod layout;
pub mod named;
pub mod session;
pub mod texture;
pub mod types;
pub mod value;

pub use binding::{strategy_for, BindingStrategy, Builtins, GlslBinding, HlslBinding};
pub use engine::{CompileRequest, ResourceProvider, ShaderEngine};
pub use fragment::{DrawPass, FragmentContext, OutputLayout};
pub use layout::{AttributeKind, InputLayoutItem, VertexRecord};
pub use named::{NamedValue, NamedValueKind, RawComponents};
pub use session::DebugSession;
pub use texture::{Texture, TextureCache};
pub use types::{FunctionDecl, ProgramInfo, ScalarKind, StorageQualifier, StructDecl, TypeShape, Variable};
pub use value::{Matrix, Scalar, StructValue, Value, Vector};
