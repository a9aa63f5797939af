//! Benchmarks for fragment interpolation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::{Vec2, Vec4};
use pp_debug::interpolate::{interpolate, perspective_weights};
use pp_debug::{ScalarKind, Value, Vector};

fn clip_positions() -> [Vec4; 3] {
    [
        Vec4::new(-2.0, -2.0, 0.5, 2.0),
        Vec4::new(1.0, -1.0, 0.5, 1.0),
        Vec4::new(0.0, 3.0, 0.5, 3.0),
    ]
}

fn bench_weights(c: &mut Criterion) {
    let clip = clip_positions();
    c.bench_function("perspective_weights", |b| {
        b.iter(|| perspective_weights(black_box(clip), black_box(Vec2::new(0.4, 0.3))))
    });
}

fn bench_interpolate_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");
    let weights = perspective_weights(clip_positions(), Vec2::new(0.4, 0.3));

    for len in [1usize, 2, 3, 4] {
        let make = |base: f32| {
            let data: Vec<f32> = (0..len).map(|i| base + i as f32).collect();
            match len {
                1 => Value::float(base),
                _ => Vector::from_f32(ScalarKind::Float, &data)
                    .map(Value::Vector)
                    .unwrap_or_default(),
            }
        };
        let values = [make(0.0), make(10.0), make(20.0)];

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("float", len), &values, |b, values| {
            b.iter(|| interpolate(&values[0], &values[1], &values[2], black_box(weights)))
        });
    }

    group.finish();
}

fn bench_fragment_outputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment_outputs");
    let clip = clip_positions();

    for outputs in [4usize, 16, 32] {
        let values: Vec<[Value; 3]> = (0..outputs)
            .map(|i| {
                let base = Vec4::splat(i as f32);
                [
                    Value::float4(base),
                    Value::float4(base + Vec4::ONE),
                    Value::float4(base * 2.0),
                ]
            })
            .collect();

        group.throughput(Throughput::Elements(outputs as u64));
        group.bench_with_input(BenchmarkId::new("varyings", outputs), &values, |b, values| {
            b.iter(|| {
                let weights = perspective_weights(clip, black_box(Vec2::new(0.25, 0.5)));
                for [v1, v2, v3] in values {
                    black_box(interpolate(v1, v2, v3, weights));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_weights,
    bench_interpolate_values,
    bench_fragment_outputs
);
criterion_main!(benches);
