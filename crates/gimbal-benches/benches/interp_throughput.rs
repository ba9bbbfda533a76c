// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gimbal_geom::interp::{self, Method};
use gimbal_math::{Basis, Prng, Transform2D, Transform3D, Vec2, Vec3};

fn random_unit_axis(rng: &mut Prng) -> Vec3 {
    let v = Vec3::new(
        rng.next_range(-1.0, 1.0),
        rng.next_range(-1.0, 1.0),
        rng.next_range(-1.0, 1.0),
    );
    if v.length_squared() < 1e-6 {
        Vec3::UNIT_Y
    } else {
        v.normalize()
    }
}

/// Pairs of transforms with a mix of pure rotations, scaled rotations and
/// sheared bases so every interpolation path is hit.
fn build_pairs(n: usize, seed: u64) -> Vec<(Transform3D, Transform3D)> {
    let mut rng = Prng::from_seed_u64(seed);
    (0..n)
        .map(|i| {
            let a = Basis::from_axis_angle(random_unit_axis(&mut rng), rng.next_range(-3.0, 3.0));
            let b = Basis::from_axis_angle(random_unit_axis(&mut rng), rng.next_range(-3.0, 3.0));
            let (a, b) = match i % 3 {
                0 => (a, b),
                1 => (
                    a.scaled_columns(&Vec3::new(1.0, 2.0, 0.5)),
                    b.scaled_columns(&Vec3::new(2.0, 1.0, 1.5)),
                ),
                _ => {
                    let mut sheared = b;
                    sheared.set_column(1, b.column(1) + b.column(0) * 0.5);
                    (a, sheared)
                }
            };
            let origin = Vec3::new(rng.next_f32(), rng.next_f32(), rng.next_f32());
            (Transform3D::new(a, Vec3::ZERO), Transform3D::new(b, origin))
        })
        .collect()
}

fn bench_find_method(c: &mut Criterion) {
    let mut group = c.benchmark_group("interp_find_method");
    for &n in &[16usize, 256, 4_096] {
        let pairs = build_pairs(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut slerps = 0usize;
                for (prev, curr) in pairs {
                    if interp::find_method(&prev.basis, &curr.basis) != Method::Lerp {
                        slerps += 1;
                    }
                }
                criterion::black_box(slerps);
            });
        });
    }
    group.finish();
}

fn bench_interpolate_transform_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("interp_transform_3d");
    for &n in &[16usize, 256, 4_096] {
        let pairs = build_pairs(n, 0xb1e2d);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
            b.iter(|| {
                // Fold into a checksum so the blends cannot be optimized away.
                let mut sum = 0.0f32;
                for (prev, curr) in pairs {
                    let out = interp::interpolate_transform_3d(prev, curr, 0.37);
                    sum += interp::checksum_transform_3d(&out);
                }
                criterion::black_box(sum);
            });
        });
    }
    group.finish();
}

fn bench_interpolate_via_method(c: &mut Criterion) {
    let pairs = build_pairs(1_024, 0x7e57);
    let mut group = c.benchmark_group("interp_via_method");
    group.throughput(Throughput::Elements(pairs.len() as u64));
    for method in [Method::Lerp, Method::Slerp, Method::ScaledSlerp] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{method:?}")), &method, |b, &method| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (prev, curr) in &pairs {
                    let out = interp::interpolate_transform_3d_via_method(prev, curr, 0.5, method);
                    sum += interp::checksum_transform_3d(&out);
                }
                criterion::black_box(sum);
            });
        });
    }
    group.finish();
}

fn bench_interpolate_transform_2d(c: &mut Criterion) {
    let mut rng = Prng::from_seed_u64(0x2d);
    let pairs: Vec<(Transform2D, Transform2D)> = (0..1_024)
        .map(|_| {
            let a = Transform2D::from_rotation(rng.next_range(-3.0, 3.0), Vec2::ZERO);
            let b = Transform2D::from_rotation_scale_skew(
                rng.next_range(-3.0, 3.0),
                Vec2::new(rng.next_range(0.5, 2.0), rng.next_range(0.5, 2.0)),
                rng.next_range(-0.3, 0.3),
                Vec2::new(rng.next_f32(), rng.next_f32()),
            );
            (a, b)
        })
        .collect();
    let mut group = c.benchmark_group("interp_transform_2d");
    group.throughput(Throughput::Elements(pairs.len() as u64));
    group.bench_function("blend", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for (prev, curr) in &pairs {
                sum += interp::interpolate_transform_2d(prev, curr, 0.5).origin().x();
            }
            criterion::black_box(sum);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_find_method,
    bench_interpolate_transform_3d,
    bench_interpolate_via_method,
    bench_interpolate_transform_2d
);
criterion_main!(benches);
