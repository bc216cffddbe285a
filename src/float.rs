//! Deterministic 32-bit floating point.
//!
//! Every scalar inside the collision kernel is an [`F32`]: an IEEE-754
//! binary32 value whose arithmetic runs entirely in software
//! (`rustc_apfloat`), with round-to-nearest-even. A result depends only on
//! the bit patterns of its operands, never on the host FPU, so queries are
//! bit-reproducible across platforms and runs.
//!
//! Conversions to and from hardware `f32` are bit reinterpretations, not
//! numeric conversions; they are the only place the two worlds touch.
//! Square root is an exact integer digit recurrence on the significand,
//! and the trigonometric functions are polynomial kernels composed of
//! `F32` operations only.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use rustc_apfloat::ieee::Single;
use rustc_apfloat::{Float, Round};

/// Deterministic binary32 scalar. Stores the raw bit pattern.
#[derive(Clone, Copy, Default)]
pub struct F32(u32);

impl F32 {
    pub const ZERO: F32 = F32(0x0000_0000);
    pub const ONE: F32 = F32(0x3f80_0000);
    pub const NEG_ONE: F32 = F32(0xbf80_0000);
    pub const HALF: F32 = F32(0x3f00_0000);
    pub const TWO: F32 = F32(0x4000_0000);
    /// π
    pub const PI: F32 = F32(0x4049_0fdb);
    /// π/2
    pub const FRAC_PI_2: F32 = F32(0x3fc9_0fdb);
    /// π/4
    pub const FRAC_PI_4: F32 = F32(0x3f49_0fdb);
    /// 2π
    pub const TAU: F32 = F32(0x40c9_0fdb);
    /// Largest finite value.
    pub const MAX: F32 = F32(0x7f7f_ffff);

    /// Reinterpret a raw binary32 bit pattern.
    #[inline]
    pub const fn from_bits(bits: u32) -> F32 {
        F32(bits)
    }

    /// The raw binary32 bit pattern.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }

    /// Reinterpret the bits of a hardware float. No arithmetic happens.
    #[inline]
    pub fn from_f32(value: f32) -> F32 {
        F32(value.to_bits())
    }

    /// Reinterpret back into a hardware float. No arithmetic happens.
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0)
    }

    #[inline]
    fn soft(self) -> Single {
        Single::from_bits(self.0 as u128)
    }

    #[inline]
    fn wrap(value: Single) -> F32 {
        F32(value.to_bits() as u32)
    }

    #[inline]
    pub fn is_nan(self) -> bool {
        self.0 & 0x7fff_ffff > 0x7f80_0000
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0 & 0x7f80_0000 != 0x7f80_0000
    }

    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Magnitude (clears the sign bit).
    #[inline]
    pub fn abs(self) -> F32 {
        F32(self.0 & 0x7fff_ffff)
    }

    /// The smaller of two values. NaN operands propagate through `other`.
    #[inline]
    pub fn min(self, other: F32) -> F32 {
        if self < other {
            self
        } else {
            other
        }
    }

    /// The larger of two values. NaN operands propagate through `other`.
    #[inline]
    pub fn max(self, other: F32) -> F32 {
        if self > other {
            self
        } else {
            other
        }
    }

    #[inline]
    pub fn clamp(self, low: F32, high: F32) -> F32 {
        low.max(self.min(high))
    }

    /// −1, 0, or +1 by comparison against zero.
    #[inline]
    pub fn signum(self) -> F32 {
        if self < F32::ZERO {
            F32::NEG_ONE
        } else if self > F32::ZERO {
            F32::ONE
        } else {
            F32::ZERO
        }
    }

    /// Exactly rounded square root.
    ///
    /// Digit recurrence over integer significands; the result is the
    /// correctly rounded binary32 square root for every input (ties cannot
    /// occur). Negative inputs give NaN, ±0 and +∞ pass through.
    pub fn sqrt(self) -> F32 {
        let bits = self.0;
        let mag = bits & 0x7fff_ffff;
        if mag > 0x7f80_0000 {
            // NaN in, quiet NaN out
            return F32(bits | 0x0040_0000);
        }
        if mag == 0 {
            return self;
        }
        if bits >> 31 == 1 {
            return F32(0x7fc0_0000);
        }
        if mag == 0x7f80_0000 {
            return self;
        }

        // Normalize to value = m · 2^(ex − 23) with m in [2^23, 2^24).
        let raw_exp = mag >> 23;
        let mut frac = mag & 0x007f_ffff;
        let ex: i32;
        if raw_exp == 0 {
            let shift = frac.leading_zeros() - 8;
            frac <<= shift;
            ex = -126 - shift as i32;
        } else {
            frac |= 0x0080_0000;
            ex = raw_exp as i32 - 127;
        }

        // value = md · 2^(2k − 23), md in [2^23, 2^25)
        let k = ex.div_euclid(2);
        let md = (frac as u64) << ex.rem_euclid(2);

        // n = round(sqrt(md · 2^23)) is the result significand in [2^23, 2^24]
        let scaled = md << 23;
        let n = isqrt(scaled);
        let rem = scaled - n * n;
        // round to nearest; y = n + 0.5 exactly is impossible for integer operands
        let n = if rem > n { n + 1 } else { n };
        let (n, k) = if n == 1 << 24 { (1u64 << 23, k + 1) } else { (n, k) };

        let biased = (k + 127) as u32;
        F32((biased << 23) | (n as u32 & 0x007f_ffff))
    }

    /// Sine by argument reduction into [−π/2, π/2] and an odd degree-9
    /// polynomial kernel.
    pub fn sin(self) -> F32 {
        let mut x = self % F32::TAU;
        if x > F32::PI {
            x = x - F32::TAU;
        } else if x < -F32::PI {
            x = x + F32::TAU;
        }
        if x > F32::FRAC_PI_2 {
            x = F32::PI - x;
        } else if x < -F32::FRAC_PI_2 {
            x = -F32::PI - x;
        }
        sin_kernel(x)
    }

    /// Cosine by argument reduction into [0, π/2] and an even degree-10
    /// polynomial kernel. Exact at zero, so an unrotated polygon keeps its
    /// vertices bit-for-bit.
    pub fn cos(self) -> F32 {
        let mut x = self % F32::TAU;
        if x > F32::PI {
            x = x - F32::TAU;
        } else if x < -F32::PI {
            x = x + F32::TAU;
        }
        let x = x.abs();
        if x > F32::FRAC_PI_2 {
            -cos_kernel(F32::PI - x)
        } else {
            cos_kernel(x)
        }
    }

    #[inline]
    pub fn tan(self) -> F32 {
        self.sin() / self.cos()
    }

    /// Arctangent with three-interval reduction (split at tan π/8 and
    /// tan 3π/8) and a degree-4 polynomial in x².
    pub fn atan(self) -> F32 {
        if self.is_nan() {
            return self;
        }
        let negative = self < F32::ZERO;
        let mut x = self.abs();
        let mut y = F32::ZERO;
        if x > F32::from_f32(2.414_213_5) {
            // tan(3π/8)
            y = F32::FRAC_PI_2;
            x = F32::NEG_ONE / x;
        } else if x > F32::from_f32(0.414_213_56) {
            // tan(π/8)
            y = F32::FRAC_PI_4;
            x = (x - F32::ONE) / (x + F32::ONE);
        }
        let z = x * x;
        let mut p = F32::from_f32(8.053_744_5e-2);
        p = p * z - F32::from_f32(1.387_768_6e-1);
        p = p * z + F32::from_f32(1.997_771_1e-1);
        p = p * z - F32::from_f32(3.333_294_9e-1);
        let r = y + (p * z * x + x);
        if negative {
            -r
        } else {
            r
        }
    }

    /// Four-quadrant arctangent of `self / x`.
    pub fn atan2(self, x: F32) -> F32 {
        let y = self;
        if x == F32::ZERO {
            return if y > F32::ZERO {
                F32::FRAC_PI_2
            } else if y < F32::ZERO {
                -F32::FRAC_PI_2
            } else {
                F32::ZERO
            };
        }
        let w = (y / x).atan();
        if x < F32::ZERO {
            if y < F32::ZERO {
                w - F32::PI
            } else {
                w + F32::PI
            }
        } else {
            w
        }
    }
}

/// sin(x) for x in [−π/2, π/2].
fn sin_kernel(x: F32) -> F32 {
    let z = x * x;
    let mut p = F32::from_f32(2.755_731_9e-6);
    p = p * z - F32::from_f32(1.984_127_0e-4);
    p = p * z + F32::from_f32(8.333_333_3e-3);
    p = p * z - F32::from_f32(1.666_666_7e-1);
    x + x * z * p
}

/// cos(x) for x in [0, π/2].
fn cos_kernel(x: F32) -> F32 {
    let z = x * x;
    let mut p = -F32::from_f32(2.755_731_9e-7);
    p = p * z + F32::from_f32(2.480_158_7e-5);
    p = p * z - F32::from_f32(1.388_888_9e-3);
    p = p * z + F32::from_f32(4.166_666_7e-2);
    p = p * z - F32::HALF;
    F32::ONE + z * p
}

/// floor(sqrt(a)), bit-by-bit.
fn isqrt(a: u64) -> u64 {
    let mut bit = 1u64 << 62;
    while bit > a {
        bit >>= 2;
    }
    let mut rem = a;
    let mut root = 0u64;
    while bit != 0 {
        if rem >= root + bit {
            rem -= root + bit;
            root = (root >> 1) + bit;
        } else {
            root >>= 1;
        }
        bit >>= 2;
    }
    root
}

impl Add for F32 {
    type Output = F32;
    #[inline]
    fn add(self, rhs: F32) -> F32 {
        F32::wrap(self.soft().add_r(rhs.soft(), Round::NearestTiesToEven).value)
    }
}

impl Sub for F32 {
    type Output = F32;
    #[inline]
    fn sub(self, rhs: F32) -> F32 {
        F32::wrap(self.soft().sub_r(rhs.soft(), Round::NearestTiesToEven).value)
    }
}

impl Mul for F32 {
    type Output = F32;
    #[inline]
    fn mul(self, rhs: F32) -> F32 {
        F32::wrap(self.soft().mul_r(rhs.soft(), Round::NearestTiesToEven).value)
    }
}

impl Div for F32 {
    type Output = F32;
    #[inline]
    fn div(self, rhs: F32) -> F32 {
        F32::wrap(self.soft().div_r(rhs.soft(), Round::NearestTiesToEven).value)
    }
}

impl Rem for F32 {
    type Output = F32;
    #[inline]
    fn rem(self, rhs: F32) -> F32 {
        F32::wrap(self.soft().c_fmod(rhs.soft()).value)
    }
}

impl Neg for F32 {
    type Output = F32;
    #[inline]
    fn neg(self) -> F32 {
        F32(self.0 ^ 0x8000_0000)
    }
}

impl AddAssign for F32 {
    #[inline]
    fn add_assign(&mut self, rhs: F32) {
        *self = *self + rhs;
    }
}

impl SubAssign for F32 {
    #[inline]
    fn sub_assign(&mut self, rhs: F32) {
        *self = *self - rhs;
    }
}

impl MulAssign for F32 {
    #[inline]
    fn mul_assign(&mut self, rhs: F32) {
        *self = *self * rhs;
    }
}

impl DivAssign for F32 {
    #[inline]
    fn div_assign(&mut self, rhs: F32) {
        *self = *self / rhs;
    }
}

impl PartialEq for F32 {
    #[inline]
    fn eq(&self, other: &F32) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for F32 {
    fn partial_cmp(&self, other: &F32) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        // Map the bit patterns to a total order: positive values compare as
        // integers, negative values reversed. ±0 both map to zero.
        fn key(bits: u32) -> i64 {
            let mag = (bits & 0x7fff_ffff) as i64;
            if bits >> 31 == 1 {
                -mag
            } else {
                mag
            }
        }
        Some(key(self.0).cmp(&key(other.0)))
    }
}

impl From<f32> for F32 {
    #[inline]
    fn from(value: f32) -> F32 {
        F32::from_f32(value)
    }
}

impl From<F32> for f32 {
    #[inline]
    fn from(value: F32) -> f32 {
        value.to_f32()
    }
}

impl From<i32> for F32 {
    #[inline]
    fn from(value: i32) -> F32 {
        F32::from_f32(value as f32)
    }
}

impl fmt::Debug for F32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_f32(), f)
    }
}

impl fmt::Display for F32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}
