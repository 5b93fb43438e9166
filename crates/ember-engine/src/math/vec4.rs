use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

use super::scalar::clamp;
use super::simd;

/// 4D vector, 16-byte aligned so it maps onto one SIMD register.
///
/// Doubles as an RGBA color (`r g b a`) and a texture rectangle
/// (`s t u v`); the aliases are accessor methods over the same lanes.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const ZERO: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    // color aliases
    #[inline] pub const fn r(self) -> f32 { self.x }
    #[inline] pub const fn g(self) -> f32 { self.y }
    #[inline] pub const fn b(self) -> f32 { self.z }
    #[inline] pub const fn a(self) -> f32 { self.w }

    // texture-rect aliases
    #[inline] pub const fn s(self) -> f32 { self.x }
    #[inline] pub const fn t(self) -> f32 { self.y }
    #[inline] pub const fn u(self) -> f32 { self.z }
    #[inline] pub const fn v(self) -> f32 { self.w }

    #[inline]
    pub fn sqr_length(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.sqr_length().sqrt()
    }

    /// Returns `self / length`. A zero vector yields NaN components.
    #[inline]
    pub fn unit(self) -> Vec4 {
        self / self.length()
    }

    /// Normalizes in place and returns `self` for chaining.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        *self /= self.length();
        self
    }

    /// Sum of all four lane products.
    #[inline]
    pub fn dot(self, rhs: Vec4) -> f32 {
        let p = simd::mul(self.to_array(), rhs.to_array());
        p[0] + p[1] + p[2] + p[3]
    }

    #[inline]
    pub fn sqr_distance(self, other: Vec4) -> f32 {
        (self - other).sqr_length()
    }

    #[inline]
    pub fn distance(self, other: Vec4) -> f32 {
        (self - other).length()
    }

    /// Returns `t * self + (1 - t) * other` with `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: Vec4, t: f32) -> Vec4 {
        let t = clamp(t, 0.0, 1.0);
        Vec4::from_array(simd::blend(self.to_array(), t, other.to_array(), 1.0 - t))
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(a: [f32; 4]) -> Self {
        Vec4::from_array(a)
    }
}

impl From<Vec4> for [f32; 4] {
    #[inline]
    fn from(v: Vec4) -> Self {
        v.to_array()
    }
}

impl Add for Vec4 {
    type Output = Vec4;
    #[inline]
    fn add(self, rhs: Vec4) -> Vec4 {
        Vec4::from_array(simd::add(self.to_array(), rhs.to_array()))
    }
}

impl Sub for Vec4 {
    type Output = Vec4;
    #[inline]
    fn sub(self, rhs: Vec4) -> Vec4 {
        Vec4::from_array(simd::sub(self.to_array(), rhs.to_array()))
    }
}

impl Mul<f32> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, rhs: f32) -> Vec4 {
        Vec4::from_array(simd::scale(self.to_array(), rhs))
    }
}

impl Div<f32> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn div(self, rhs: f32) -> Vec4 {
        Vec4::from_array(simd::div_scalar(self.to_array(), rhs))
    }
}

impl Neg for Vec4 {
    type Output = Vec4;
    #[inline]
    fn neg(self) -> Vec4 {
        self * -1.0
    }
}

impl AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec4) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec4) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vec4 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vec4 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}
