//! Uniform and texture binding shared by both languages

use super::BindContext;
use crate::types::{is_texture_type, StorageQualifier};
use crate::value::Value;
use pp_core::Result;
use tracing::{debug, trace, warn};

/// Install every uniform the draw item supplies a value for
///
/// Texture-like uniforms take the resource bound at their explicit slot, or
/// at the next implicit sampler index. Other uniforms are matched by name
/// against the draw item's named values. Uniforms without a match keep
/// whatever value the interpreter already holds.
pub fn bind_uniforms(cx: &mut BindContext<'_>) -> Result<()> {
    let program = cx.program;
    let pass = cx.pass;
    let bound = cx.resources.bound_textures(&pass.name);

    let mut sampler_id = 0u32;
    let mut installed = 0usize;

    for glob in program.globals_with(StorageQualifier::Uniform) {
        if is_texture_type(&glob.type_name) {
            let slot = glob.input_slot.unwrap_or(sampler_id);
            sampler_id += 1;

            let Some(resource) = bound.get(slot as usize) else {
                trace!("Sampler '{}' slot {} has no bound resource", glob.name, slot);
                continue;
            };
            let texture = cx.textures.acquire(cx.stage, slot, resource, &mut *cx.resources)?;
            cx.install_global(&glob.name, Value::Texture(texture));
            installed += 1;
            continue;
        }

        let Some(named) = pass.uniforms.iter().find(|v| v.name == glob.name) else {
            trace!("Uniform '{}' has no named value, left unbound", glob.name);
            continue;
        };
        match named.to_value(cx.language) {
            Ok(value) => {
                cx.install_global(&glob.name, value);
                installed += 1;
            }
            Err(e) => warn!("Uniform '{}' skipped: {}", glob.name, e),
        }
    }

    debug!("Bound {} uniforms for {} stage", installed, cx.stage);
    Ok(())
}
