//! Interpolation and color publication laws

mod common;

use common::{fragment, pass, MockEngine, MockResources};
use glam::{Vec2, Vec3, Vec4};
use pp_core::{SourceLanguage, Stage};
use pp_debug::interpolate::{barycentric_weights, interpolate, interpolate_or_flat, perspective_weights, screen_project};
use pp_debug::{DebugSession, FunctionDecl, ProgramInfo, StorageQualifier, Value, Variable};
use proptest::prelude::*;

fn clip_vertex() -> impl Strategy<Value = Vec4> {
    (-1.0f32..1.0, -1.0f32..1.0, 0.0f32..1.0, 0.25f32..4.0)
        .prop_map(|(x, y, z, w)| Vec4::new(x * w, y * w, z, w))
}

fn float4() -> impl Strategy<Value = Vec4> {
    prop::array::uniform4(-100.0f32..100.0).prop_map(Vec4::from_array)
}

/// Twice the signed screen-space area of the projected triangle
fn screen_area(clip: [Vec4; 3]) -> f32 {
    let [a, b, c] = clip.map(screen_project);
    (b - a).perp_dot(c - a)
}

/// Point inside the projected triangle
fn inside(clip: [Vec4; 3], mix: Vec3) -> Vec2 {
    let mix = mix / (mix.x + mix.y + mix.z);
    let [a, b, c] = clip.map(screen_project);
    a * mix.x + b * mix.y + c * mix.z
}

proptest! {
    #[test]
    fn prop_barycentric_weights_sum_to_one(
        clip in prop::array::uniform3(clip_vertex()),
        p in (0.0f32..1.0, 0.0f32..1.0),
    ) {
        prop_assume!(screen_area(clip).abs() > 1e-2);
        let [a, b, c] = clip.map(screen_project);
        let w = barycentric_weights(a, b, c, Vec2::new(p.0, p.1));
        prop_assert!((w.x + w.y + w.z - 1.0).abs() < 1e-3, "weights {:?}", w);
    }

    #[test]
    fn prop_constant_outputs_interpolate_to_themselves(
        clip in prop::array::uniform3(clip_vertex()),
        mix in (0.05f32..1.0, 0.05f32..1.0, 0.05f32..1.0),
        v in float4(),
    ) {
        prop_assume!(screen_area(clip).abs() > 1e-2);
        let p = inside(clip, Vec3::new(mix.0, mix.1, mix.2));
        let weights = perspective_weights(clip, p);

        let value = Value::float4(v);
        let result = interpolate(&value, &value, &value, weights);
        let tolerance = 1e-3 * (1.0 + v.abs().max_element());
        prop_assert!(result.as_vec4().abs_diff_eq(v, tolerance), "{:?} != {:?}", result, v);
    }

    #[test]
    fn prop_flat_takes_third_value(
        values in prop::array::uniform3(-1000.0f32..1000.0),
        weights in (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0),
    ) {
        let [a, b, c] = values.map(Value::float);
        let result = interpolate_or_flat([&a, &b, &c], true, Vec3::new(weights.0, weights.1, weights.2));
        prop_assert_eq!(result, c);
    }

    #[test]
    fn prop_debug_color_is_clamped(color in float4()) {
        let mut engine = MockEngine::new();
        engine.queue(
            ProgramInfo {
                globals: vec![Variable::new("fragColor", "vec4").with_storage(StorageQualifier::Out)],
                functions: vec![FunctionDecl {
                    name: "main".to_string(),
                    return_type: String::new(),
                    arguments: Vec::new(),
                }],
                structures: Vec::new(),
            },
            move |globals, _| {
                globals.insert("fragColor".to_string(), Value::float4(color));
                Value::Void
            },
        );
        let mut session = DebugSession::new(engine);
        session
            .set_source(SourceLanguage::Glsl, Stage::Pixel, "main", "void main() {}")
            .unwrap();

        let mut frag = fragment();
        let corners = [Vec4::new(-1.0, -1.0, 0.0, 1.0), Vec4::new(1.0, -1.0, 0.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0)];
        for (outputs, clip) in frag.vertex_outputs.iter_mut().zip(corners) {
            outputs.insert("gl_Position".to_string(), Value::float4(clip));
        }
        let mut res = MockResources::default();
        session.debug_pixel(&mut frag, &pass(), &mut res).unwrap();

        prop_assert_eq!(frag.debug_color, color.clamp(Vec4::ZERO, Vec4::ONE));
        for c in frag.debug_color.to_array() {
            prop_assert!((0.0..=1.0).contains(&c));
        }
    }
}
