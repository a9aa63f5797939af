//! GLSL-like binding: `in`/`out` globals resolved by slot and name

use super::{BindContext, BindingStrategy, Builtins, OutputContext};
use crate::engine::ShaderEngine;
use crate::interpolate::{interpolate_or_flat, perspective_weights};
use crate::types::StorageQualifier;
use crate::value::Value;
use glam::Vec4;
use pp_core::{DebugError, Result, SourceLanguage, Stage};
use tracing::{debug, trace, warn};

pub const GL_VERTEX_ID: &str = "gl_VertexID";
pub const GL_POSITION: &str = "gl_Position";
pub const GL_FRAG_COORD: &str = "gl_FragCoord";
pub const GL_FRONT_FACING: &str = "gl_FrontFacing";

/// Binding rules for programs that read `in` globals and write `out` globals
#[derive(Debug, Clone, Copy, Default)]
pub struct GlslBinding;

impl GlslBinding {
    /// Read vertex attributes into `in` globals by input slot
    ///
    /// Globals without an explicit slot take their position among the `in`
    /// declarations.
    fn bind_attributes(cx: &mut BindContext<'_>) -> Result<()> {
        let program = cx.program;
        let pass = cx.pass;
        let layout = &pass.input_layout;
        let vertex = cx.fragment.vertices[cx.local_index];

        for (index, glob) in program.globals_with(StorageQualifier::In).enumerate() {
            let slot = glob.input_slot.unwrap_or(index as u32) as usize;
            let Some(item) = layout.get(slot) else {
                trace!("Input '{}' slot {} outside the input layout", glob.name, slot);
                continue;
            };
            let Some(shape) = cx.engine.type_shape(&glob.type_name) else {
                warn!("Input '{}' has unsupported type '{}'", glob.name, glob.type_name);
                continue;
            };
            let value = Value::from_vec4(shape, vertex.attribute(item.value));
            cx.install_global(&glob.name, value);
        }

        let index = cx.vertex_index()?;
        cx.install_global(GL_VERTEX_ID, Value::int(index));
        Ok(())
    }

    /// Interpolate the cached vertex outputs into `in` globals of the same name
    fn bind_interpolated(cx: &mut BindContext<'_>) -> Result<()> {
        let program = cx.program;

        let mut clip = [Vec4::ZERO; 3];
        for (vertex, outputs) in cx.fragment.vertex_outputs.iter().enumerate() {
            let position = outputs.get(GL_POSITION).ok_or_else(|| DebugError::MissingVertexOutput {
                vertex,
                name: GL_POSITION.to_string(),
            })?;
            clip[vertex] = position.as_vec4();
        }
        let weights = perspective_weights(clip, cx.fragment.relative_coordinate);
        trace!("Interpolation weights {:?}", weights);

        for glob in program.globals_with(StorageQualifier::In) {
            let Some(values) = cx.fragment.outputs_named(&glob.name) else {
                trace!("Input '{}' missing from a vertex output, left unbound", glob.name);
                continue;
            };
            let value = interpolate_or_flat(values, glob.flat, weights);
            cx.install_global(&glob.name, value);
        }

        let coord = cx.fragment.coordinate;
        cx.install_global(GL_FRAG_COORD, Value::float4(coord.extend(0.0).extend(0.0)));
        Ok(())
    }
}

impl BindingStrategy for GlslBinding {
    fn language(&self) -> SourceLanguage {
        SourceLanguage::Glsl
    }

    fn register_builtins(&self, engine: &mut dyn ShaderEngine, stage: Stage) -> Builtins {
        match stage {
            Stage::Vertex => {
                engine.add_global(GL_VERTEX_ID);
                engine.set_global_value(GL_VERTEX_ID, Value::int(0));
                engine.add_global(GL_POSITION);
                engine.set_global_value(GL_POSITION, Value::float4(Vec4::ZERO));
                Builtins::VERTEX_ID | Builtins::POSITION
            }
            Stage::Pixel => {
                engine.add_global(GL_FRAG_COORD);
                engine.set_global_value(GL_FRAG_COORD, Value::float4(Vec4::ZERO));
                engine.add_global(GL_FRONT_FACING);
                engine.set_global_value(GL_FRONT_FACING, Value::bool(false));
                Builtins::FRAG_COORD | Builtins::FRONT_FACE
            }
        }
    }

    fn bind_inputs(&self, cx: &mut BindContext<'_>) -> Result<()> {
        cx.args.clear();

        match cx.stage {
            Stage::Vertex => Self::bind_attributes(cx)?,
            Stage::Pixel => Self::bind_interpolated(cx)?,
        }

        debug!("Bound inputs for {} stage", cx.stage);
        Ok(())
    }

    fn publish_outputs(&self, cx: &mut OutputContext<'_>, _result: Value) -> Result<()> {
        let program = cx.program;

        match cx.stage {
            Stage::Vertex => {
                let mut cached = 0usize;
                let position = cx.engine.global_value(GL_POSITION).unwrap_or_default();
                let outputs = &mut cx.fragment.vertex_outputs[cx.local_index];
                outputs.insert(GL_POSITION.to_string(), position);

                for glob in program.globals_with(StorageQualifier::Out) {
                    match cx.engine.global_value(&glob.name) {
                        Some(value) => {
                            outputs.insert(glob.name.clone(), value);
                            cached += 1;
                        }
                        None => trace!("Output '{}' has no value", glob.name),
                    }
                }
                trace!("Cached {} outputs of vertex {}", cached, cx.local_index);
            }
            Stage::Pixel => {
                let color = program
                    .globals_with(StorageQualifier::Out)
                    .filter_map(|glob| cx.engine.global_value(&glob.name))
                    .last();
                match color {
                    Some(value) => cx.publish_color(value.as_vec4()),
                    None => debug!("No output written by '{}', color unchanged", cx.entry),
                }
            }
        }
        Ok(())
    }
}
