//! Criterion benchmarks for the distance and time-of-impact queries.

use criterion::{criterion_group, criterion_main, Criterion};
use sweep2d::{continuous_collision, polygon_distance, Body, F32, Vec2};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(F32::from_f32(x), F32::from_f32(y))
}

fn octagon(radius: f32) -> Vec<Vec2> {
    (0..8)
        .map(|i| {
            let a = i as f32 / 8.0 * std::f32::consts::TAU;
            v(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn bench_polygon_distance(c: &mut Criterion) {
    let a = octagon(1.0);
    let b: Vec<Vec2> = octagon(1.3).iter().map(|&p| p + v(5.0, 2.0)).collect();
    c.bench_function("polygon_distance/octagon_pair", |bencher| {
        bencher.iter(|| polygon_distance(std::hint::black_box(&a), std::hint::black_box(&b)))
    });
}

fn bench_continuous_collision(c: &mut Criterion) {
    let mut head_on_a = Body::new(&[v(-1.0, -1.0), v(1.0, -1.0), v(1.0, 1.0), v(-1.0, 1.0)])
        .unwrap();
    head_on_a.vel = v(10.0, 0.0);
    head_on_a.inv_mass = F32::ONE;
    let mut head_on_b = head_on_a;
    head_on_b.center = v(10.0, 0.0);
    head_on_b.vel = Vec2::ZERO;

    c.bench_function("continuous_collision/head_on_squares", |bencher| {
        bencher.iter(|| {
            continuous_collision(
                std::hint::black_box(&head_on_a),
                std::hint::black_box(&head_on_b),
                F32::ZERO,
            )
        })
    });

    let mut spinning = Body::new(&octagon(1.0)).unwrap();
    spinning.angular_vel = F32::FRAC_PI_4;
    spinning.vel = v(4.0, 0.0);
    spinning.inv_mass = F32::ONE;
    let mut target = Body::new(&octagon(1.0)).unwrap();
    target.center = v(6.0, 0.5);
    target.inv_mass = F32::ONE;

    c.bench_function("continuous_collision/spinning_octagon", |bencher| {
        bencher.iter(|| {
            continuous_collision(
                std::hint::black_box(&spinning),
                std::hint::black_box(&target),
                F32::ZERO,
            )
        })
    });
}

criterion_group!(benches, bench_polygon_distance, bench_continuous_collision);
criterion_main!(benches);
