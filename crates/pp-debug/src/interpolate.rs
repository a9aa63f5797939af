//! Perspective-correct interpolation across the debugged triangle

use crate::value::{Scalar, Value, Vector};
use glam::{Vec2, Vec3, Vec4};
use tracing::warn;

/// Project a clip-space position to `[0, 1]` screen space
pub fn screen_project(clip: Vec4) -> Vec2 {
    let ndc = clip / clip.w;
    (ndc.truncate().truncate() + Vec2::ONE) * 0.5
}

/// Barycentric weights of `p` relative to triangle `a`, `b`, `c`
///
/// The weights sum to one. The triangle must not be degenerate.
pub fn barycentric_weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let factor = 1.0 / (ab.x * ac.y - ab.y * ac.x);
    let s = (ac.y * ap.x - ac.x * ap.y) * factor;
    let t = (ab.x * ap.y - ab.y * ap.x) * factor;
    Vec3::new(1.0 - s - t, s, t)
}

/// Weights for a fragment at relative screen coordinate `p`
///
/// The barycentric weights are divided by each vertex's clip-space `w` and
/// left un-normalized; [`interpolate`] divides by their sum.
pub fn perspective_weights(clip: [Vec4; 3], p: Vec2) -> Vec3 {
    let weights = barycentric_weights(
        screen_project(clip[0]),
        screen_project(clip[1]),
        screen_project(clip[2]),
        p,
    );
    weights * Vec3::new(1.0 / clip[0].w, 1.0 / clip[1].w, 1.0 / clip[2].w)
}

/// Blend four-component values with un-normalized weights
pub fn blend_vec4(values: [Vec4; 3], weights: Vec3) -> Vec4 {
    (values[0] * weights.x + values[1] * weights.y + values[2] * weights.z)
        / (weights.x + weights.y + weights.z)
}

fn blend_f32(values: [f32; 3], weights: Vec3) -> f32 {
    (values[0] * weights.x + values[1] * weights.y + values[2] * weights.z)
        / (weights.x + weights.y + weights.z)
}

/// Interpolate three per-vertex values, dispatching on the first one's type
///
/// Integer and boolean scalars are averaged without weights. Floats and
/// vectors are blended; vector results keep the first value's component
/// kind and length. Other values produce `Void`.
pub fn interpolate(v1: &Value, v2: &Value, v3: &Value, weights: Vec3) -> Value {
    match v1 {
        Value::Scalar(Scalar::Float(a)) => {
            let b = v2.as_scalar().map_or(0.0, Scalar::as_f32);
            let c = v3.as_scalar().map_or(0.0, Scalar::as_f32);
            Value::float(blend_f32([*a, b, c], weights))
        }
        Value::Scalar(a) => {
            // integer outputs are expected to be flat
            warn!("Interpolating integer value {:?}, using unweighted mean", a);
            let b = v2.as_scalar().map_or(0, Scalar::as_i64);
            let c = v3.as_scalar().map_or(0, Scalar::as_i64);
            Value::Scalar(Scalar::from_i64(a.kind(), (a.as_i64() + b + c) / 3))
        }
        Value::Vector(first) => {
            let blended = blend_vec4([first.to_vec4(), v2.as_vec4(), v3.as_vec4()], weights);
            Vector::from_f32(first.kind(), &blended.to_array()[..first.len()])
                .map(Value::Vector)
                .unwrap_or_default()
        }
        _ => Value::Void,
    }
}

/// Flat attributes take the provoking (last) vertex's value unchanged
pub fn interpolate_or_flat(values: [&Value; 3], flat: bool, weights: Vec3) -> Value {
    if flat {
        values[2].clone()
    } else {
        interpolate(values[0], values[1], values[2], weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarKind;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_screen_project() {
        assert_eq!(screen_project(Vec4::new(-1.0, -1.0, 0.0, 1.0)), Vec2::ZERO);
        assert_eq!(screen_project(Vec4::new(2.0, 2.0, 0.5, 2.0)), Vec2::ONE);
        assert_eq!(screen_project(Vec4::new(0.0, 0.0, 0.0, 4.0)), Vec2::splat(0.5));
    }

    #[test]
    fn test_barycentric_corners() {
        let (a, b, c) = (Vec2::ZERO, Vec2::X, Vec2::Y);
        assert_eq!(barycentric_weights(a, b, c, a), Vec3::X);
        assert_eq!(barycentric_weights(a, b, c, b), Vec3::Y);
        assert_eq!(barycentric_weights(a, b, c, c), Vec3::Z);
    }

    #[test]
    fn test_centroid_weights() {
        let clip = [
            Vec4::new(-1.0, -1.0, 0.0, 1.0),
            Vec4::new(1.0, -1.0, 0.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        ];
        let centroid = (screen_project(clip[0]) + screen_project(clip[1]) + screen_project(clip[2])) / 3.0;
        let w = perspective_weights(clip, centroid);
        assert!(close(w.x, 1.0 / 3.0) && close(w.y, 1.0 / 3.0) && close(w.z, 1.0 / 3.0));
    }

    #[test]
    fn test_perspective_divides_by_w() {
        let clip = [
            Vec4::new(-2.0, -2.0, 0.0, 2.0),
            Vec4::new(1.0, -1.0, 0.0, 1.0),
            Vec4::new(0.0, 4.0, 0.0, 4.0),
        ];
        let p = Vec2::new(0.5, 0.25);
        let flat = barycentric_weights(
            screen_project(clip[0]),
            screen_project(clip[1]),
            screen_project(clip[2]),
            p,
        );
        let w = perspective_weights(clip, p);
        assert!(close(w.x, flat.x / 2.0));
        assert!(close(w.y, flat.y));
        assert!(close(w.z, flat.z / 4.0));
    }

    #[test]
    fn test_interpolate_float() {
        let v = interpolate(&Value::float(0.0), &Value::float(3.0), &Value::float(6.0), Vec3::ONE);
        assert_eq!(v, Value::float(3.0));
    }

    #[test]
    fn test_interpolate_integer_is_unweighted_mean() {
        let v = interpolate(&Value::int(1), &Value::int(2), &Value::int(7), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(v, Value::int(3));
    }

    #[test]
    fn test_interpolate_vector_keeps_kind_and_len() {
        let a = Value::Vector(Vector::from_f32(ScalarKind::Float, &[0.0, 1.0]).unwrap());
        let b = Value::Vector(Vector::from_f32(ScalarKind::Float, &[2.0, 1.0]).unwrap());
        let c = Value::Vector(Vector::from_f32(ScalarKind::Float, &[4.0, 1.0]).unwrap());
        let v = interpolate(&a, &b, &c, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(v, Value::Vector(Vector::from_f32(ScalarKind::Float, &[2.5, 1.0]).unwrap()));
    }

    #[test]
    fn test_flat_takes_last_vertex() {
        let (a, b, c) = (Value::float(1.0), Value::float(2.0), Value::float(9.0));
        assert_eq!(interpolate_or_flat([&a, &b, &c], true, Vec3::X), c);
    }

    #[test]
    fn test_struct_values_do_not_interpolate() {
        assert!(interpolate(&Value::Void, &Value::Void, &Value::Void, Vec3::ONE).is_void());
    }
}
