//! Rigid bodies and world-space polygon evaluation.

use thiserror::Error;

use crate::float::F32;
use crate::math::{Mat22, Vec2};

/// Polygon vertex cap. Keeps every working buffer on the stack.
pub const MAX_VERTICES: usize = 8;

/// Rejected body definitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon is capped at {MAX_VERTICES} vertices, got {0}")]
    TooManyVertices(usize),
    #[error("vertex {0} is not finite")]
    NonFinite(usize),
    #[error("polygon winding must be counter-clockwise")]
    NotCounterClockwise,
    #[error("polygon is not convex at vertex {0}")]
    NotConvex(usize),
}

/// A rigid body with constant linear and angular velocity over the query
/// interval. Immutable for the duration of a time-of-impact query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Center position at t = 0 of the query.
    pub center: Vec2,
    /// Orientation at t = 0 of the query, radians.
    pub angle: F32,
    pub vel: Vec2,
    pub angular_vel: F32,
    /// Read by the external solver, not by the collision queries.
    pub inv_mass: F32,
    pub inv_inertia: F32,
    pub friction: F32,
    vertices: [Vec2; MAX_VERTICES],
    num_vertices: usize,
}

impl Body {
    /// Build a body from a local-space convex polygon in CCW order.
    ///
    /// Pose, motion, and mass terms default to zero; set them through the
    /// public fields.
    pub fn new(vertices: &[Vec2]) -> Result<Body, BodyError> {
        if vertices.len() < 3 {
            return Err(BodyError::TooFewVertices(vertices.len()));
        }
        if vertices.len() > MAX_VERTICES {
            return Err(BodyError::TooManyVertices(vertices.len()));
        }
        for (i, v) in vertices.iter().enumerate() {
            if !v.is_finite() {
                return Err(BodyError::NonFinite(i));
            }
        }

        // Shoelace area: positive for CCW winding.
        let n = vertices.len();
        let mut area = F32::ZERO;
        for i in 0..n {
            area += vertices[i].cross(vertices[(i + 1) % n]);
        }
        if area <= F32::ZERO {
            return Err(BodyError::NotCounterClockwise);
        }
        // Every turn must be a left turn; collinear triples are rejected too.
        for i in 0..n {
            let e0 = vertices[(i + 1) % n] - vertices[i];
            let e1 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            if e0.cross(e1) <= F32::ZERO {
                return Err(BodyError::NotConvex((i + 1) % n));
            }
        }

        let mut buffer = [Vec2::ZERO; MAX_VERTICES];
        buffer[..n].copy_from_slice(vertices);
        Ok(Body {
            center: Vec2::ZERO,
            angle: F32::ZERO,
            vel: Vec2::ZERO,
            angular_vel: F32::ZERO,
            inv_mass: F32::ZERO,
            inv_inertia: F32::ZERO,
            friction: F32::ZERO,
            vertices: buffer,
            num_vertices: n,
        })
    }

    /// Local-space vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices[..self.num_vertices]
    }

    /// Center position after advancing time by `t`.
    #[inline]
    pub fn center_at(&self, t: F32) -> Vec2 {
        self.center + t * self.vel
    }

    /// One world-space vertex at time `t`. Used by the time-of-impact inner
    /// loop to avoid rebuilding the whole polygon.
    pub fn vertex_at(&self, index: usize, t: F32) -> Vec2 {
        let rot = Mat22::from_angle(self.angle + t * self.angular_vel);
        rot.mul_vec2(self.vertices[index]) + self.center_at(t)
    }

    /// The full world-space polygon at time `t`.
    pub fn polygon_at(&self, t: F32) -> Polygon {
        let rot = Mat22::from_angle(self.angle + t * self.angular_vel);
        let offset = self.center_at(t);
        let mut vertices = [Vec2::ZERO; MAX_VERTICES];
        for (out, &local) in vertices.iter_mut().zip(self.vertices()) {
            *out = rot.mul_vec2(local) + offset;
        }
        Polygon {
            vertices,
            len: self.num_vertices,
        }
    }
}

/// Fixed-capacity world-space polygon. Dereferences to a vertex slice.
#[derive(Clone, Copy, Debug)]
pub struct Polygon {
    vertices: [Vec2; MAX_VERTICES],
    len: usize,
}

impl Polygon {
    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec2) {
        for v in self.vertices[..self.len].iter_mut() {
            *v += offset;
        }
    }
}

impl std::ops::Deref for Polygon {
    type Target = [Vec2];

    #[inline]
    fn deref(&self) -> &[Vec2] {
        &self.vertices[..self.len]
    }
}
