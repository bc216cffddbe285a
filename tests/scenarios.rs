//! End-to-end properties of the collision queries: determinism, agreement
//! between SAT and GJK, witness validity, and the time-of-impact contract
//! on concrete scenarios.

use rand::{rngs::StdRng, Rng, SeedableRng};
use sweep2d::{
    continuous_collision, polygon_distance, sat_intersect, segment_intersect, Body, Feature, F32,
    Vec2, TOLERANCE,
};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(F32::from_f32(x), F32::from_f32(y))
}

fn square_body(cx: f32, cy: f32, half: f32) -> Body {
    let mut body = Body::new(&[
        v(-half, -half),
        v(half, -half),
        v(half, half),
        v(-half, half),
    ])
    .unwrap();
    body.center = v(cx, cy);
    body.inv_mass = F32::ONE;
    body
}

/// Random convex CCW polygon: jittered angles on a circle.
fn random_polygon(rng: &mut StdRng) -> Vec<Vec2> {
    let n = rng.gen_range(3..=8usize);
    let radius = rng.gen_range(0.5..2.0f32);
    let cx = rng.gen_range(-5.0..5.0f32);
    let cy = rng.gen_range(-5.0..5.0f32);
    (0..n)
        .map(|i| {
            let a = (i as f32 + 0.15 + 0.7 * rng.gen::<f32>()) / n as f32 * std::f32::consts::TAU;
            v(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

fn random_body(rng: &mut StdRng) -> Body {
    let n = rng.gen_range(3..=8usize);
    let radius = rng.gen_range(0.5..1.5f32);
    let local: Vec<Vec2> = (0..n)
        .map(|i| {
            let a = (i as f32 + 0.15 + 0.7 * rng.gen::<f32>()) / n as f32 * std::f32::consts::TAU;
            v(radius * a.cos(), radius * a.sin())
        })
        .collect();
    let mut body = Body::new(&local).unwrap();
    body.center = v(rng.gen_range(-6.0..6.0), rng.gen_range(-6.0..6.0));
    body.inv_mass = F32::ONE;
    body
}

#[test]
fn determinism_repeated_queries_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut a = random_body(&mut rng);
        let mut b = random_body(&mut rng);
        a.vel = (b.center - a.center) * F32::from_f32(1.5);
        b.vel = v(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        a.angular_vel = F32::from_f32(rng.gen_range(-1.0..1.0));

        let first = continuous_collision(&a, &b, F32::ZERO);
        let second = continuous_collision(&a, &b, F32::ZERO);
        match (first, second) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                assert_eq!(x.t.to_bits(), y.t.to_bits());
                assert_eq!(x.feature_a, y.feature_a);
                assert_eq!(x.feature_b, y.feature_b);
                assert_eq!(x.point.x.to_bits(), y.point.x.to_bits());
                assert_eq!(x.point.y.to_bits(), y.point.y.to_bits());
            }
            _ => panic!("hit flag changed between identical queries"),
        }
    }
}

#[test]
fn sat_and_gjk_agree_on_separation() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let a = random_polygon(&mut rng);
        let b = random_polygon(&mut rng);
        let distance = polygon_distance(&a, &b).distance;
        match sat_intersect(&a, &b) {
            None => assert!(
                distance > F32::ZERO,
                "SAT separated but GJK distance is zero"
            ),
            Some(mtv) => {
                if distance == F32::ZERO {
                    // Genuine overlap must show a non-negative SAT overlap.
                    assert!(mtv.overlap >= -TOLERANCE);
                }
            }
        }
        if distance == F32::ZERO {
            assert!(
                sat_intersect(&a, &b).is_some(),
                "GJK overlap but SAT separated"
            );
        }
    }
}

#[test]
fn distance_is_symmetric_to_the_last_bit() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..300 {
        let a = random_polygon(&mut rng);
        let b = random_polygon(&mut rng);
        let ab = polygon_distance(&a, &b).distance;
        let ba = polygon_distance(&b, &a).distance;
        assert_eq!(ab.to_bits(), ba.to_bits());
    }
}

#[test]
fn witnesses_are_consistent_with_the_distance() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..300 {
        let a = random_polygon(&mut rng);
        let b = random_polygon(&mut rng);
        let result = polygon_distance(&a, &b);
        if result.distance == F32::ZERO {
            continue;
        }

        let gap = result.closest_a.distance(result.closest_b);
        assert_eq!(gap.to_bits(), result.distance.to_bits());
        assert!(feature_distance(result.closest_a, result.feature_a, &a) < 1e-3);
        assert!(feature_distance(result.closest_b, result.feature_b, &b) < 1e-3);
    }
}

/// f64 distance from a point to its claimed witness feature.
fn feature_distance(p: Vec2, feature: Feature, polygon: &[Vec2]) -> f64 {
    let px = p.x.to_f32() as f64;
    let py = p.y.to_f32() as f64;
    match feature {
        Feature::Vertex(i) => {
            let (ax, ay) = (polygon[i].x.to_f32() as f64, polygon[i].y.to_f32() as f64);
            ((px - ax).powi(2) + (py - ay).powi(2)).sqrt()
        }
        Feature::Edge(i, j) => {
            let (ax, ay) = (polygon[i].x.to_f32() as f64, polygon[i].y.to_f32() as f64);
            let (bx, by) = (polygon[j].x.to_f32() as f64, polygon[j].y.to_f32() as f64);
            let (ex, ey) = (bx - ax, by - ay);
            let len_sq = ex * ex + ey * ey;
            let t = (((px - ax) * ex + (py - ay) * ey) / len_sq).clamp(0.0, 1.0);
            let (cx, cy) = (ax + t * ex, ay + t * ey);
            ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
        }
    }
}

#[test]
fn toi_sandwich_around_the_impact_time() {
    let mut a = square_body(0.0, 0.0, 1.0);
    a.vel = v(10.0, 0.0);
    let b = square_body(10.0, 0.0, 1.0);

    let impact = continuous_collision(&a, &b, F32::ZERO).expect("hit");
    let t = impact.t;

    // Shortly before impact the bodies are separated.
    let before = F32::from_f32(t.to_f32() - 0.05);
    let pa = a.polygon_at(before);
    let pb = b.polygon_at(before);
    assert!(polygon_distance(&pa, &pb).distance > F32::ZERO);

    // Shortly after, they intersect.
    let after = F32::from_f32(t.to_f32() + 0.05);
    let pa = a.polygon_at(after);
    let pb = b.polygon_at(after);
    let mtv = sat_intersect(&pa, &pb).expect("intersecting after impact");
    assert!(mtv.overlap > TOLERANCE);
}

#[test]
fn toi_is_idempotent_at_the_contact_time() {
    let mut a = square_body(0.0, 0.0, 1.0);
    a.vel = v(10.0, 0.0);
    let b = square_body(10.0, 0.0, 1.0);

    let impact = continuous_collision(&a, &b, F32::ZERO).expect("hit");
    let again = continuous_collision(&a, &b, impact.t).expect("hit again");
    assert_eq!(again.t.to_bits(), impact.t.to_bits());
}

#[test]
fn toi_random_approaches_hit_inside_the_interval() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut hits = 0;
    for _ in 0..50 {
        let mut a = random_body(&mut rng);
        let mut b = random_body(&mut rng);
        // Fling A straight at B fast enough to cover the gap.
        a.vel = (b.center - a.center) * F32::TWO;
        b.vel = Vec2::ZERO;

        let start_distance = {
            let pa = a.polygon_at(F32::ZERO);
            let pb = b.polygon_at(F32::ZERO);
            polygon_distance(&pa, &pb).distance
        };
        if start_distance == F32::ZERO {
            continue;
        }

        if let Some(impact) = continuous_collision(&a, &b, F32::ZERO) {
            hits += 1;
            let t = impact.t.to_f32();
            assert!((0.0..=1.0).contains(&t), "t = {t}");

            // Before the impact the bodies are separated; the approach is a
            // straight center-to-center run, so separation is monotone.
            if t > 0.06 {
                let before = F32::from_f32(t - 0.05);
                let pa = a.polygon_at(before);
                let pb = b.polygon_at(before);
                assert!(polygon_distance(&pa, &pb).distance > F32::ZERO);
            }
        }
    }
    assert!(hits > 10, "only {hits} head-on approaches hit");
}

#[test]
fn scenario_stationary_bodies_never_collide() {
    let a = square_body(0.0, 0.0, 1.0);
    let b = square_body(10.0, 0.0, 1.0);
    assert!(continuous_collision(&a, &b, F32::ZERO).is_none());
}

#[test]
fn scenario_triangles_head_on() {
    let mut a = Body::new(&[v(0.0, 0.0), v(2.0, 0.0), v(1.0, 2.0)]).unwrap();
    a.vel = v(5.0, 0.0);
    a.inv_mass = F32::ONE;
    let mut b = Body::new(&[v(10.0, 0.0), v(12.0, 0.0), v(11.0, 2.0)]).unwrap();
    b.vel = v(-5.0, 0.0);
    b.inv_mass = F32::ONE;

    let impact = continuous_collision(&a, &b, F32::ZERO).expect("hit");
    assert!((impact.t.to_f32() - 0.8).abs() < 0.01);
}

#[test]
fn scenario_overlapping_start_is_rescued() {
    let a = square_body(5.0, 5.0, 1.0);
    let b = square_body(5.5, 5.0, 1.0);

    let impact = continuous_collision(&a, &b, F32::ZERO).expect("rescued");
    assert_eq!(impact.t.to_f32(), 0.0);
    assert!(impact.point.x.to_f32().is_finite());
}

#[test]
fn scenario_touching_start_hits_immediately() {
    let a = square_body(0.0, 0.0, 1.0);
    let b = square_body(2.0, 0.0, 1.0);

    let impact = continuous_collision(&a, &b, F32::ZERO).expect("touching is a hit");
    assert_eq!(impact.t.to_f32(), 0.0);
}

#[test]
fn segment_intersection_agrees_with_f64_reference() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut checked = 0;
    for _ in 0..1000 {
        let p: Vec<f32> = (0..8).map(|_| rng.gen_range(-5.0..5.0f32)).collect();
        let (a0, a1) = (v(p[0], p[1]), v(p[2], p[3]));
        let (b0, b1) = (v(p[4], p[5]), v(p[6], p[7]));

        // f64 reference solve of a0 + s·va = b0 + t·vb.
        let (vax, vay) = ((p[2] - p[0]) as f64, (p[3] - p[1]) as f64);
        let (vbx, vby) = ((p[6] - p[4]) as f64, (p[7] - p[5]) as f64);
        let (abx, aby) = ((p[4] - p[0]) as f64, (p[5] - p[1]) as f64);
        let det = vax * (-vby) - vay * (-vbx);
        // Near-parallel pairs amplify rounding differences between the f32
        // and f64 solves; only well-conditioned systems are decisive.
        if det.abs() < 0.1 {
            continue;
        }
        let s = (abx * (-vby) - aby * (-vbx)) / det;
        let t = (vax * aby - vay * abx) / det;

        let result = segment_intersect(a0, a1, b0, b1);
        let margin = 1e-2;
        let inside =
            s > margin && s < 1.0 - margin && t > margin && t < 1.0 - margin;
        let outside = s < -margin || s > 1.0 + margin || t < -margin || t > 1.0 + margin;
        if inside {
            let hit = result.expect("reference says the segments cross");
            assert!((hit.ta.to_f32() as f64 - s).abs() < 1e-3);
            assert!((hit.tb.to_f32() as f64 - t).abs() < 1e-3);
            let ix = p[0] as f64 + s * vax;
            let iy = p[1] as f64 + s * vay;
            assert!((hit.point.x.to_f32() as f64 - ix).abs() < 1e-3);
            assert!((hit.point.y.to_f32() as f64 - iy).abs() < 1e-3);
            checked += 1;
        } else if outside {
            assert!(result.is_none(), "reference says no crossing");
            checked += 1;
        }
    }
    assert!(checked > 500, "only {checked} decisive pairs");
}
