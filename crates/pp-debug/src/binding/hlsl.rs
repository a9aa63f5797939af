//! HLSL-like binding: entry-point arguments resolved by semantic

use super::{BindContext, BindingStrategy, Builtins, OutputContext};
use crate::engine::ShaderEngine;
use crate::fragment::{OutputLayout, RETURN_KEY};
use crate::interpolate::{blend_vec4, interpolate_or_flat, perspective_weights};
use crate::layout::{resolve, semantic_key};
use crate::types::Variable;
use crate::value::{StructValue, Value};
use glam::Vec4;
use pp_core::{DebugError, Result, SourceLanguage, Stage};
use tracing::{debug, trace, warn};

pub const SV_VERTEX_ID: &str = "SV_VertexID";
pub const SV_POSITION: &str = "SV_Position";
pub const SV_IS_FRONT_FACE: &str = "SV_IsFrontFace";

/// Binding rules for programs that take inputs as semantic-tagged arguments
#[derive(Debug, Clone, Copy, Default)]
pub struct HlslBinding;

impl HlslBinding {
    /// Value for an input tagged `semantic` with declared type `type_name`
    ///
    /// In the vertex stage a semantic present in the input layout reads the
    /// matching vertex attribute. Everything else reads the interpreter's
    /// semantic store, which holds builtins and interpolated outputs.
    fn input_value(cx: &BindContext<'_>, semantic: &str, type_name: &str) -> Value {
        let shape = cx.engine.type_shape(type_name);

        if cx.stage == Stage::Vertex {
            if let Some(item) = resolve(&cx.pass.input_layout, semantic) {
                let attr = cx.fragment.vertices[cx.local_index].attribute(item.value);
                return match shape {
                    Some(shape) => Value::from_vec4(shape, attr),
                    None => {
                        warn!("Input '{}' has unsupported type '{}'", semantic, type_name);
                        Value::Void
                    }
                };
            }
        }

        match cx.engine.semantic_value(&semantic_key(semantic)) {
            Some(value) => value,
            None => {
                trace!("Semantic '{}' unresolved, using zero", semantic);
                shape.map(Value::zeroed).unwrap_or_default()
            }
        }
    }

    /// Value for one entry-point argument
    ///
    /// Arguments without a semantic are structures whose members each carry
    /// their own semantic. Only one level of nesting is resolved.
    fn argument_value(cx: &BindContext<'_>, arg: &Variable) -> Value {
        if arg.has_semantic() {
            return Self::input_value(cx, &arg.semantic, &arg.type_name);
        }

        let Some(decl) = cx.program.structure(&arg.type_name) else {
            warn!("Argument '{}' has no semantic and '{}' is not a structure", arg.name, arg.type_name);
            return Value::Void;
        };

        let fields = decl
            .members
            .iter()
            .map(|member| {
                if member.has_semantic() {
                    Self::input_value(cx, &member.semantic, &member.type_name)
                } else {
                    // TODO: resolve structures nested deeper than one level
                    warn!(
                        "Member '{}.{}' has no semantic; nested structures are not bound",
                        decl.name, member.name
                    );
                    cx.engine
                        .type_shape(&member.type_name)
                        .map(Value::zeroed)
                        .unwrap_or_default()
                }
            })
            .collect();

        Value::Struct(StructValue {
            type_name: decl.name.clone(),
            fields,
        })
    }

    fn bind_arguments(cx: &mut BindContext<'_>) {
        let program = cx.program;
        let Some(func) = program.function(cx.entry) else {
            warn!("Entry point '{}' not found in program", cx.entry);
            return;
        };

        let view: &BindContext<'_> = cx;
        let args: Vec<Value> = func
            .arguments
            .iter()
            .map(|arg| Self::argument_value(view, arg))
            .collect();
        trace!("Bound {} arguments for '{}'", args.len(), cx.entry);
        *cx.args = args;
    }

    /// Interpolate the cached vertex outputs and publish them by semantic
    fn bind_interpolated(cx: &mut BindContext<'_>) -> Result<()> {
        let Some(layout) = cx.output_layout else {
            return Err(DebugError::MissingStructureDescriptor);
        };

        let position_index = match layout {
            OutputLayout::Vector => None,
            OutputLayout::Struct(decl) => Some(
                decl.member_by_semantic(SV_POSITION)
                    .ok_or(DebugError::MissingPositionOutput)?,
            ),
        };

        let mut results = Vec::with_capacity(3);
        for (vertex, outputs) in cx.fragment.vertex_outputs.iter().enumerate() {
            let value = outputs.get(RETURN_KEY).ok_or_else(|| DebugError::MissingVertexOutput {
                vertex,
                name: RETURN_KEY.to_string(),
            })?;
            results.push(value.clone());
        }

        let clip: [Vec4; 3] = std::array::from_fn(|i| match position_index {
            None => results[i].as_vec4(),
            Some(p) => results[i].field(p).map_or(Vec4::ZERO, Value::as_vec4),
        });
        let weights = perspective_weights(clip, cx.fragment.relative_coordinate);
        trace!("Interpolation weights {:?}", weights);

        for (index, member) in layout.members().iter().enumerate() {
            let void = Value::Void;
            let values = [0, 1, 2].map(|i| results[i].field(index).unwrap_or(&void));
            let value = interpolate_or_flat(values, member.flat, weights);
            cx.install_semantic(&member.semantic, value);
        }

        if position_index.is_none() {
            let position = blend_vec4(clip, weights);
            cx.install_semantic(SV_POSITION, Value::float4(position));
        }

        Ok(())
    }
}

impl BindingStrategy for HlslBinding {
    fn language(&self) -> SourceLanguage {
        SourceLanguage::Hlsl
    }

    fn register_builtins(&self, engine: &mut dyn ShaderEngine, stage: Stage) -> Builtins {
        match stage {
            Stage::Vertex => {
                engine.set_semantic_value(&semantic_key(SV_VERTEX_ID), Value::int(0));
                engine.set_semantic_value(&semantic_key(SV_POSITION), Value::float4(Vec4::ZERO));
                Builtins::VERTEX_ID | Builtins::POSITION
            }
            Stage::Pixel => {
                engine.set_semantic_value(&semantic_key(SV_IS_FRONT_FACE), Value::bool(false));
                Builtins::FRONT_FACE
            }
        }
    }

    fn bind_inputs(&self, cx: &mut BindContext<'_>) -> Result<()> {
        cx.args.clear();

        match cx.stage {
            Stage::Vertex => {
                let index = cx.vertex_index()?;
                cx.install_semantic(SV_VERTEX_ID, Value::int(index));
            }
            Stage::Pixel => Self::bind_interpolated(cx)?,
        }

        Self::bind_arguments(cx);
        debug!("Bound {} inputs for {} stage", cx.args.len(), cx.stage);
        Ok(())
    }

    fn publish_outputs(&self, cx: &mut OutputContext<'_>, result: Value) -> Result<()> {
        let program = cx.program;
        let return_type = program
            .function(cx.entry)
            .map(|f| f.return_type.as_str())
            .unwrap_or_default();
        let output_struct = program.structure(return_type);

        match cx.stage {
            Stage::Vertex => {
                cx.fragment.vertex_outputs[cx.local_index].insert(RETURN_KEY.to_string(), result);
                *cx.output_layout = Some(match output_struct {
                    Some(decl) => OutputLayout::Struct(decl.clone()),
                    None => OutputLayout::Vector,
                });
                trace!("Cached output of vertex {}", cx.local_index);
            }
            Stage::Pixel => {
                if return_type.is_empty() {
                    debug!("Entry point '{}' returns nothing, color unchanged", cx.entry);
                    return Ok(());
                }
                let color = match output_struct {
                    Some(_) => result.field(0).map_or(Vec4::ZERO, Value::as_vec4),
                    None => result.as_vec4(),
                };
                cx.publish_color(color);
            }
        }
        Ok(())
    }
}
