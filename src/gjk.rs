//! GJK closest-distance engine with witness-feature extraction.
//!
//! Finds the point on the Minkowski difference `A ⊖ B` closest to the
//! origin, tracking which source vertices built each simplex vertex so the
//! closest pair can be reported as polygon features (vertex or edge on
//! each body). Barycentric coordinates stay unnormalized inside the loop;
//! the single division by the shared divisor happens once at the end, so a
//! degenerate zero-length simplex edge can never divide by zero.

use crate::contact::{Distance, Feature};
use crate::float::F32;
use crate::math::Vec2;

pub const MAX_GJK_ITERS: usize = 20;

/// One vertex of the Minkowski-difference simplex.
#[derive(Clone, Copy, Debug, Default)]
struct SimplexVertex {
    /// Support vertex on A.
    point_a: Vec2,
    index_a: usize,
    /// Support vertex on B.
    point_b: Vec2,
    index_b: usize,
    /// Minkowski-difference point, `point_b − point_a`.
    point: Vec2,
    /// Unnormalized barycentric weight of the origin at this vertex.
    b_coord: F32,
}

/// Closest distance between two convex polygons, with closest points and
/// witness features on each. Returns distance zero when the polygons
/// overlap; the closest points coincide and the features are placeholders
/// in that case.
pub fn polygon_distance(polygon_a: &[Vec2], polygon_b: &[Vec2]) -> Distance {
    let mut simplex = [SimplexVertex::default(); 3];
    let mut simplex_size = 1usize;
    let mut divisor = F32::ONE;

    // Arbitrary starting simplex: the Minkowski vertex built from the first
    // vertex of each polygon.
    simplex[0] = SimplexVertex {
        point_a: polygon_a[0],
        index_a: 0,
        point_b: polygon_b[0],
        index_b: 0,
        point: polygon_b[0] - polygon_a[0],
        b_coord: F32::ONE,
    };

    let mut iter = 0;
    while iter < MAX_GJK_ITERS {
        // Snapshot the active vertex-index pairs for duplicate detection.
        let mut previous = [(0usize, 0usize); 3];
        for (slot, vertex) in previous.iter_mut().zip(&simplex[..simplex_size]) {
            *slot = (vertex.index_a, vertex.index_b);
        }
        let previous = &previous[..simplex_size];

        // Drop simplex vertices that no longer support the closest point.
        match simplex_size {
            1 => {}
            2 => simplex_size = solve_simplex2(&mut simplex, &mut divisor),
            3 => simplex_size = solve_simplex3(&mut simplex, &mut divisor),
            _ => unreachable!(),
        }

        // Still a triangle after reduction: the origin is inside, overlap.
        if simplex_size == 3 {
            break;
        }

        let d = search_direction(&simplex, simplex_size);
        if d.dot(d) == F32::ZERO {
            // The origin lies on the simplex.
            break;
        }

        let index_a = support_index(polygon_a, -d);
        let index_b = support_index(polygon_b, d);

        iter += 1;

        // Two iterations producing the same support pair means no further
        // progress is possible in floating point.
        if previous.contains(&(index_a, index_b)) {
            break;
        }

        simplex[simplex_size] = SimplexVertex {
            point_a: polygon_a[index_a],
            index_a,
            point_b: polygon_b[index_b],
            index_b,
            point: polygon_b[index_b] - polygon_a[index_a],
            b_coord: F32::ZERO,
        };
        simplex_size += 1;
    }

    let (closest_a, closest_b) = closest_points(&simplex, simplex_size, divisor);
    let (feature_a, feature_b) = match simplex_size {
        1 => (
            Feature::Vertex(simplex[0].index_a),
            Feature::Vertex(simplex[0].index_b),
        ),
        2 => extract_features(&simplex),
        // Overlapping: no meaningful witness pair exists.
        _ => (Feature::Vertex(0), Feature::Vertex(0)),
    };

    Distance {
        distance: closest_a.distance(closest_b),
        closest_a,
        closest_b,
        feature_a,
        feature_b,
    }
}

/// Index of the polygon vertex farthest along `d`. First vertex wins ties.
pub(crate) fn support_index(polygon: &[Vec2], d: Vec2) -> usize {
    let mut farthest_index = 0;
    let mut farthest_value = polygon[0].dot(d);
    for (i, &v) in polygon.iter().enumerate().skip(1) {
        let value = v.dot(d);
        if value > farthest_value {
            farthest_value = value;
            farthest_index = i;
        }
    }
    farthest_index
}

/// Direction from the current simplex toward the origin.
fn search_direction(simplex: &[SimplexVertex; 3], simplex_size: usize) -> Vec2 {
    match simplex_size {
        1 => -simplex[0].point,
        2 => {
            // Segment normal on the side the origin is on.
            let ab = simplex[1].point - simplex[0].point;
            if ab.cross(-simplex[0].point) > F32::ZERO {
                Vec2::scalar_cross(F32::ONE, ab)
            } else {
                ab.cross_scalar(F32::ONE)
            }
        }
        _ => Vec2::ZERO,
    }
}

/// Closest point on segment AB to the origin. Returns the reduced simplex
/// size; weights and divisor describe the surviving vertices.
fn solve_simplex2(simplex: &mut [SimplexVertex; 3], divisor: &mut F32) -> usize {
    let a = simplex[0].point;
    let b = simplex[1].point;

    // Unnormalized barycentric coordinates of the origin on AB.
    let u = (-b).dot(a - b);
    let v = (-a).dot(b - a);

    // Origin in A's vertex region.
    if v <= F32::ZERO {
        simplex[0].b_coord = F32::ONE;
        *divisor = F32::ONE;
        return 1;
    }
    // Origin in B's vertex region.
    if u <= F32::ZERO {
        simplex[0] = simplex[1];
        simplex[0].b_coord = F32::ONE;
        *divisor = F32::ONE;
        return 1;
    }

    // Origin projects inside the segment.
    simplex[0].b_coord = u;
    simplex[1].b_coord = v;
    let e = b - a;
    *divisor = e.dot(e);
    2
}

/// Closest point on triangle ABC to the origin. Returns the reduced
/// simplex size; size 3 means the origin is inside the triangle.
fn solve_simplex3(simplex: &mut [SimplexVertex; 3], divisor: &mut F32) -> usize {
    let a = simplex[0].point;
    let b = simplex[1].point;
    let c = simplex[2].point;

    // Segment barycentric coordinates for the vertex-region tests.
    let u_ab = (-b).dot(a - b);
    let v_ab = (-a).dot(b - a);

    let u_bc = (-c).dot(b - c);
    let v_bc = (-b).dot(c - b);

    let u_ca = (-a).dot(c - a);
    let v_ca = (-c).dot(a - c);

    // Origin in A's vertex region.
    if v_ab <= F32::ZERO && u_ca <= F32::ZERO {
        simplex[0].b_coord = F32::ONE;
        *divisor = F32::ONE;
        return 1;
    }
    // Origin in B's vertex region.
    if u_ab <= F32::ZERO && v_bc <= F32::ZERO {
        simplex[0] = simplex[1];
        simplex[0].b_coord = F32::ONE;
        *divisor = F32::ONE;
        return 1;
    }
    // Origin in C's vertex region.
    if u_bc <= F32::ZERO && v_ca <= F32::ZERO {
        simplex[0] = simplex[2];
        simplex[0].b_coord = F32::ONE;
        *divisor = F32::ONE;
        return 1;
    }

    // Triangle barycentric coordinates, sharing one signed area.
    let area = (b - a).cross(c - a);
    let u_abc = b.cross(c);
    let v_abc = c.cross(a);
    let w_abc = a.cross(b);

    // Origin in edge region AB.
    if u_ab > F32::ZERO && v_ab > F32::ZERO && w_abc * area <= F32::ZERO {
        simplex[0].b_coord = u_ab;
        simplex[1].b_coord = v_ab;
        let e = b - a;
        *divisor = e.dot(e);
        return 2;
    }
    // Origin in edge region BC.
    if u_bc > F32::ZERO && v_bc > F32::ZERO && u_abc * area <= F32::ZERO {
        simplex[0] = simplex[1];
        simplex[1] = simplex[2];
        simplex[0].b_coord = u_bc;
        simplex[1].b_coord = v_bc;
        let e = c - b;
        *divisor = e.dot(e);
        return 2;
    }
    // Origin in edge region CA. Keep the CA order for winding.
    if u_ca > F32::ZERO && v_ca > F32::ZERO && v_abc * area <= F32::ZERO {
        simplex[1] = simplex[0];
        simplex[0] = simplex[2];
        simplex[0].b_coord = u_ca;
        simplex[1].b_coord = v_ca;
        let e = a - c;
        *divisor = e.dot(e);
        return 2;
    }

    // Origin inside the triangle; its area is guaranteed non-zero here.
    simplex[0].b_coord = u_abc;
    simplex[1].b_coord = v_abc;
    simplex[2].b_coord = w_abc;
    *divisor = area;
    3
}

/// Reconstruct the closest points from the barycentric weights.
fn closest_points(simplex: &[SimplexVertex; 3], simplex_size: usize, divisor: F32) -> (Vec2, Vec2) {
    match simplex_size {
        1 => (simplex[0].point_a, simplex[0].point_b),
        2 => {
            let s = F32::ONE / divisor;
            let a = (s * simplex[0].b_coord) * simplex[0].point_a
                + (s * simplex[1].b_coord) * simplex[1].point_a;
            let b = (s * simplex[0].b_coord) * simplex[0].point_b
                + (s * simplex[1].b_coord) * simplex[1].point_b;
            (a, b)
        }
        _ => {
            let s = F32::ONE / divisor;
            let a = (s * simplex[0].b_coord) * simplex[0].point_a
                + (s * simplex[1].b_coord) * simplex[1].point_a
                + (s * simplex[2].b_coord) * simplex[2].point_a;
            (a, a)
        }
    }
}

/// Witness features for a two-vertex simplex.
fn extract_features(simplex: &[SimplexVertex; 3]) -> (Feature, Feature) {
    if simplex[0].index_b == simplex[1].index_b {
        // B contributed one vertex, A an edge.
        return (
            Feature::Edge(simplex[0].index_a, simplex[1].index_a),
            Feature::Vertex(simplex[0].index_b),
        );
    }
    if simplex[0].index_a == simplex[1].index_a {
        return (
            Feature::Vertex(simplex[0].index_a),
            Feature::Edge(simplex[0].index_b, simplex[1].index_b),
        );
    }

    // Edge-aligned parallel case: all four source vertices are distinct.
    // Project both pairs onto A's edge direction; whichever interval is
    // contained in the other supplies the vertex witness.
    let dir = simplex[1].point_a - simplex[0].point_a;
    let da = [simplex[0].point_a.dot(dir), simplex[1].point_a.dot(dir)];
    let da_max = usize::from(da[1] > da[0]);
    let da_min = 1 - da_max;

    let db = [simplex[0].point_b.dot(dir), simplex[1].point_b.dot(dir)];
    let db_max = usize::from(db[1] > db[0]);
    let db_min = 1 - db_max;

    if da[da_min] < db[db_min] && da[da_max] > db[db_max] {
        // B's interval is bracketed by A's: B supplies the vertex.
        (
            Feature::Edge(simplex[0].index_a, simplex[1].index_a),
            Feature::Vertex(simplex[0].index_b),
        )
    } else if da[da_min] > db[db_min] {
        // A's low endpoint lies inside B's interval.
        (
            Feature::Vertex(simplex[da_min].index_a),
            Feature::Edge(simplex[0].index_b, simplex[1].index_b),
        )
    } else {
        // A's high endpoint lies inside B's interval.
        (
            Feature::Vertex(simplex[da_max].index_a),
            Feature::Edge(simplex[0].index_b, simplex[1].index_b),
        )
    }
}
