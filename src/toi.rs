//! Bilateral-advancement time-of-impact queries.
//!
//! Finds the earliest time in `[t_start, 1]` at which two moving convex
//! polygons touch. A separation function `s(t)` is built from the current
//! GJK witness features and the conservative time advances until `s`
//! enters the tolerance band; bisection locates each crossing from the
//! positive side. SAT backs the loop up twice: it rescues queries that
//! start overlapping, and it verifies that each advanced state really sits
//! on the contact boundary.
//!
//! The approach follows Erin Catto's bilateral advancement formulation of
//! continuous collision detection (GDC 2013).

use tracing::warn;

use crate::body::Body;
use crate::contact::{Feature, Impact, TOLERANCE};
use crate::float::F32;
use crate::gjk::{polygon_distance, support_index};
use crate::math::Vec2;
use crate::sat::sat_intersect;

pub const MAX_TOI_ITERS: usize = 20;
pub const MAX_BISECT_ITERS: usize = 20;

/// Outcome of one advancement step along the current separation axis.
enum Advance {
    Hit(Impact),
    Miss,
    /// New conservative time at the separation boundary.
    Advanced(F32),
}

/// Earliest time of impact between two moving bodies over `[t_start, 1]`.
///
/// Returns `None` when the swept volumes never touch, and also when an
/// iteration budget runs out (a diagnostic is traced; a false negative is
/// recoverable on the next step, a false positive would inject spurious
/// impulses). Bodies that already overlap at `t_start` are handled by the
/// SAT rescue path and report a hit at `t_start`.
pub fn continuous_collision(body_a: &Body, body_b: &Body, t_start: F32) -> Option<Impact> {
    let polygon_a = body_a.polygon_at(t_start);
    let polygon_b = body_b.polygon_at(t_start);

    let gjk = polygon_distance(&polygon_a, &polygon_b);
    if gjk.distance == F32::ZERO {
        // The caller violated the separated-start precondition.
        return rescue_overlap(body_a, body_b, t_start);
    }

    let mut t1 = t_start;
    let mut feature_a = gjk.feature_a;
    let mut feature_b = gjk.feature_b;
    let mut closest_a = gjk.closest_a;

    for _ in 0..MAX_TOI_ITERS {
        let advance = match (feature_a, feature_b) {
            (Feature::Vertex(ia), Feature::Vertex(ib)) => {
                advance_point_point(body_a, body_b, ia, ib, t1, feature_a, feature_b)
            }
            (Feature::Edge(e0, e1), Feature::Vertex(ip)) => advance_point_edge(
                body_a,
                (e0, e1),
                body_b,
                ip,
                t1,
                feature_a,
                feature_b,
                closest_a,
            ),
            (Feature::Vertex(ip), Feature::Edge(e0, e1)) => advance_point_edge(
                body_b,
                (e0, e1),
                body_a,
                ip,
                t1,
                feature_a,
                feature_b,
                closest_a,
            ),
            (Feature::Edge(e0, e1), Feature::Edge(eb0, _)) => {
                debug_assert!(false, "polygon_distance produced an edge-edge witness pair");
                // Arbitrary promotion: keep A's edge, take B's first edge
                // vertex as the point witness.
                feature_b = Feature::Vertex(eb0);
                advance_point_edge(
                    body_a,
                    (e0, e1),
                    body_b,
                    eb0,
                    t1,
                    feature_a,
                    feature_b,
                    closest_a,
                )
            }
        };

        match advance {
            Advance::Hit(impact) => return Some(impact),
            Advance::Miss => return None,
            Advance::Advanced(t) => t1 = t,
        }

        // The advanced state must sit on the contact boundary. GJK alone
        // cannot confirm that (it collapses any overlap to distance zero),
        // so check with SAT and its overlap magnitude.
        let polygon_a = body_a.polygon_at(t1);
        let polygon_b = body_b.polygon_at(t1);
        if let Some(mtv) = sat_intersect(&polygon_a, &polygon_b) {
            if mtv.overlap < TOLERANCE {
                return Some(Impact {
                    t: t1,
                    feature_a,
                    feature_b,
                    point: closest_a,
                });
            }
            // Tolerances should make this unreachable.
            warn!(
                overlap = mtv.overlap.to_f32(),
                "time-of-impact advancement went too deep"
            );
            return None;
        }

        // Still separated: select the next witness pair.
        let gjk = polygon_distance(&polygon_a, &polygon_b);
        debug_assert!(
            gjk.distance != F32::ZERO,
            "SAT reported separation but GJK found overlap"
        );
        feature_a = gjk.feature_a;
        feature_b = gjk.feature_b;
        closest_a = gjk.closest_a;
    }

    warn!(
        "time-of-impact advancement exceeded {} iterations",
        MAX_TOI_ITERS
    );
    None
}

/// Advance along a fixed axis between two vertex witnesses.
fn advance_point_point(
    body_a: &Body,
    body_b: &Body,
    index_a: usize,
    index_b: usize,
    t1: F32,
    feature_a: Feature,
    feature_b: Feature,
) -> Advance {
    let a0 = body_a.vertex_at(index_a, t1);
    let b0 = body_b.vertex_at(index_b, t1);
    let u = b0 - a0;
    if u.length() < TOLERANCE {
        // The witness vertices already touch.
        return Advance::Hit(Impact {
            t: t1,
            feature_a,
            feature_b,
            point: b0,
        });
    }
    let u = u.normalize();

    // Probe the deepest points along the axis at the end of the interval.
    let t2 = F32::ONE;
    let polygon_a = body_a.polygon_at(t2);
    let polygon_b = body_b.polygon_at(t2);
    let deep_a = support_index(&polygon_a, u);
    let deep_b = support_index(&polygon_b, -u);
    let s = (polygon_b[deep_b] - polygon_a[deep_a]).dot(u);

    if s > TOLERANCE {
        // The deepest points never reach the separating plane.
        return Advance::Miss;
    }
    if s < -TOLERANCE {
        // A crossing exists in (t1, t2). The support indices stay pinned
        // through bisection so the separation function is stable.
        let separation = |t: F32| {
            let pa = body_a.vertex_at(deep_a, t);
            let pb = body_b.vertex_at(deep_b, t);
            (pb - pa).dot(u)
        };
        return match bisect(t1, t2, separation) {
            Some(root) => Advance::Advanced(root),
            None => Advance::Miss,
        };
    }
    Advance::Advanced(t2)
}

/// Advance along the edge body's outward face normal, recomputed at each
/// probe time.
#[allow(clippy::too_many_arguments)]
fn advance_point_edge(
    edge_body: &Body,
    edge: (usize, usize),
    point_body: &Body,
    point_index: usize,
    t1: F32,
    feature_a: Feature,
    feature_b: Feature,
    impact_point: Vec2,
) -> Advance {
    let (edge0, normal) = edge_plane(edge_body, edge, t1);
    let point = point_body.vertex_at(point_index, t1);
    let s = point.dot(normal) - edge0.dot(normal);
    if s.abs() < TOLERANCE {
        // The witness point already sits on the face plane.
        return Advance::Hit(Impact {
            t: t1,
            feature_a,
            feature_b,
            point: impact_point,
        });
    }

    let t2 = F32::ONE;
    let (edge0, normal) = edge_plane(edge_body, edge, t2);
    let polygon_point = point_body.polygon_at(t2);
    let deepest = support_index(&polygon_point, -normal);
    let s = polygon_point[deepest].dot(normal) - edge0.dot(normal);

    if s > TOLERANCE {
        return Advance::Miss;
    }
    if s < -TOLERANCE {
        // Pin the deepest vertex; the plane itself moves with the edge body.
        let separation = |t: F32| {
            let (edge0, normal) = edge_plane(edge_body, edge, t);
            let p = point_body.vertex_at(deepest, t);
            p.dot(normal) - edge0.dot(normal)
        };
        return match bisect(t1, t2, separation) {
            Some(root) => Advance::Advanced(root),
            None => Advance::Miss,
        };
    }
    Advance::Advanced(t2)
}

/// The witness edge's anchor point and outward unit normal at time `t`.
/// Orientation is resolved against the edge body's center.
fn edge_plane(edge_body: &Body, edge: (usize, usize), t: F32) -> (Vec2, Vec2) {
    let edge0 = edge_body.vertex_at(edge.0, t);
    let edge1 = edge_body.vertex_at(edge.1, t);
    let e = edge1 - edge0;
    let normal = if e.cross(edge0 - edge_body.center_at(t)) > F32::ZERO {
        Vec2::scalar_cross(F32::ONE, e)
    } else {
        e.cross_scalar(F32::ONE)
    };
    (edge0, normal.normalize())
}

/// Bisection root-finding on the separation function over `[lo, hi]`,
/// approaching the root from the positive side.
fn bisect(mut lo: F32, mut hi: F32, separation: impl Fn(F32) -> F32) -> Option<F32> {
    for _ in 0..MAX_BISECT_ITERS {
        let mid = (lo + hi) / F32::TWO;
        let s = separation(mid);
        if s.abs() < TOLERANCE {
            return Some(mid);
        }
        if s > F32::ZERO {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    warn!(
        "bisection exceeded {} iterations without finding the contact",
        MAX_BISECT_ITERS
    );
    None
}

/// Recovery for queries whose bodies already overlap at the start time:
/// push the lighter body out along the SAT minimum translation vector,
/// then read fresh witness features off the separated pair.
fn rescue_overlap(body_a: &Body, body_b: &Body, t: F32) -> Option<Impact> {
    warn!("bodies overlap at the start of a time-of-impact query");

    let mut polygon_a = body_a.polygon_at(t);
    let mut polygon_b = body_b.polygon_at(t);
    let Some(mtv) = sat_intersect(&polygon_a, &polygon_b) else {
        debug_assert!(false, "GJK reported overlap but SAT found a separating axis");
        return None;
    };

    let push = mtv.axis * (mtv.overlap * F32::from_f32(1.1));
    // Move the lighter body; an infinite-mass body (inv_mass zero) never
    // moves unless both are infinite, in which case A does.
    if body_a.inv_mass < body_b.inv_mass {
        polygon_b.translate(-push);
    } else {
        polygon_a.translate(push);
    }

    let gjk = polygon_distance(&polygon_a, &polygon_b);
    if gjk.distance == F32::ZERO {
        warn!("bodies still overlap after the SAT separation push");
    }
    Some(Impact {
        t,
        feature_a: gjk.feature_a,
        feature_b: gjk.feature_b,
        point: gjk.closest_a,
    })
}
