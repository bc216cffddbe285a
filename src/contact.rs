//! Witness features and result types shared by the collision queries.

use crate::float::F32;
use crate::math::Vec2;

/// Separation/overlap tolerance band, in distance units (0.01).
///
/// Contact within this band is reported as a hit so the time-of-impact
/// advancement can conclude.
pub const TOLERANCE: F32 = F32::from_bits(0x3c23_d70a);

/// A witness on one polygon: the vertex or edge closest to the other body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    /// A single vertex, by index.
    Vertex(usize),
    /// The edge from vertex `.0` to vertex `.1` (CCW adjacent).
    Edge(usize, usize),
}

impl Feature {
    #[inline]
    pub fn is_edge(self) -> bool {
        matches!(self, Feature::Edge(..))
    }
}

/// Result of a GJK distance query.
#[derive(Clone, Copy, Debug)]
pub struct Distance {
    /// Closest distance between the polygons; zero when they overlap.
    pub distance: F32,
    /// Closest point on polygon A, in world space.
    pub closest_a: Vec2,
    /// Closest point on polygon B, in world space.
    pub closest_b: Vec2,
    pub feature_a: Feature,
    pub feature_b: Feature,
}

/// Minimum translation vector from a SAT query.
#[derive(Clone, Copy, Debug)]
pub struct Mtv {
    /// Unit separating axis, oriented so `axis · overlap` moves polygon A
    /// away from polygon B.
    pub axis: Vec2,
    /// Penetration depth along `axis`.
    pub overlap: F32,
}

/// Result of a time-of-impact query.
#[derive(Clone, Copy, Debug)]
pub struct Impact {
    /// Earliest contact time in `[t_start, 1]`.
    pub t: F32,
    pub feature_a: Feature,
    pub feature_b: Feature,
    /// Contact point in world space.
    pub point: Vec2,
}
