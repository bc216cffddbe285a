//! 2D vector and matrix primitives over the deterministic scalar.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::float::F32;

/// 2D vector with deterministic components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: F32,
    pub y: F32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 {
        x: F32::ZERO,
        y: F32::ZERO,
    };

    #[inline]
    pub const fn new(x: F32, y: F32) -> Vec2 {
        Vec2 { x, y }
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> F32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// 2D cross product, the z component of the 3D cross.
    #[inline]
    pub fn cross(self, rhs: Vec2) -> F32 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// v × s: the in-plane cross of a vector with an out-of-plane scalar.
    #[inline]
    pub fn cross_scalar(self, s: F32) -> Vec2 {
        Vec2::new(s * self.y, -s * self.x)
    }

    /// s × v, the mirror of [`Vec2::cross_scalar`].
    #[inline]
    pub fn scalar_cross(s: F32, v: Vec2) -> Vec2 {
        Vec2::new(-s * v.y, s * v.x)
    }

    #[inline]
    pub fn length_squared(self) -> F32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> F32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance_squared(self, rhs: Vec2) -> F32 {
        (rhs - self).length_squared()
    }

    #[inline]
    pub fn distance(self, rhs: Vec2) -> F32 {
        self.distance_squared(rhs).sqrt()
    }

    /// Unit vector in the same direction. Defined only for non-zero input;
    /// callers guarantee the magnitude is positive.
    #[inline]
    pub fn normalize(self) -> Vec2 {
        (F32::ONE / self.length()) * self
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<F32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, s: F32) -> Vec2 {
        Vec2::new(s * self.x, s * self.y)
    }
}

impl Mul<Vec2> for F32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(self * v.x, self * v.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        *self = *self - rhs;
    }
}

impl MulAssign<F32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, s: F32) {
        *self = *self * s;
    }
}

// Hardware-float caller boundary: component-wise bit reinterpretation, the
// only allowed conversion between the two worlds.
impl From<glam::Vec2> for Vec2 {
    #[inline]
    fn from(v: glam::Vec2) -> Vec2 {
        Vec2::new(F32::from_f32(v.x), F32::from_f32(v.y))
    }
}

impl From<Vec2> for glam::Vec2 {
    #[inline]
    fn from(v: Vec2) -> glam::Vec2 {
        glam::Vec2::new(v.x.to_f32(), v.y.to_f32())
    }
}

/// 2×2 rotation matrix, column-major.
#[derive(Clone, Copy, Debug)]
pub struct Mat22 {
    pub col1: Vec2,
    pub col2: Vec2,
}

impl Mat22 {
    /// Rotation by `angle` radians.
    #[inline]
    pub fn from_angle(angle: F32) -> Mat22 {
        let c = angle.cos();
        let s = angle.sin();
        Mat22 {
            col1: Vec2::new(c, s),
            col2: Vec2::new(-s, c),
        }
    }

    #[inline]
    pub fn mul_vec2(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.col1.x * v.x + self.col2.x * v.y,
            self.col1.y * v.x + self.col2.y * v.y,
        )
    }
}

/// Intersection of two line segments.
#[derive(Clone, Copy, Debug)]
pub struct SegmentHit {
    /// Intersection point, `a0 + ta · (a1 − a0)`.
    pub point: Vec2,
    /// Normalized parameter along segment A.
    pub ta: F32,
    /// Normalized parameter along segment B.
    pub tb: F32,
}

/// Intersect the segments `a0→a1` and `b0→b1`.
///
/// Solves `a0 + s·va = b0 + t·vb` by Cramer's rule on the 2×2 system.
/// Returns `None` for parallel or colinear segments (zero determinant) and
/// whenever either parameter falls outside [0, 1].
pub fn segment_intersect(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<SegmentHit> {
    let va = a1 - a0;
    let vb = b1 - b0;
    let ab = b0 - a0;

    let det = va.x * (-vb.y) - va.y * (-vb.x);
    if det == F32::ZERO {
        return None;
    }

    let s = (ab.x * (-vb.y) - ab.y * (-vb.x)) / det;
    let t = (va.x * ab.y - va.y * ab.x) / det;
    if s < F32::ZERO || s > F32::ONE || t < F32::ZERO || t > F32::ONE {
        return None;
    }

    Some(SegmentHit {
        point: a0 + s * va,
        ta: s,
        tb: t,
    })
}
