use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::scalar::clamp;

/// 2D vector. Used for positions and sizes in reference-resolution units
/// (top-left origin, +Y down) as well as plain 2D math.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn sqr_length(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.sqr_length().sqrt()
    }

    /// Returns `self / length`. A zero vector yields NaN components.
    #[inline]
    pub fn unit(self) -> Vec2 {
        self / self.length()
    }

    /// Normalizes in place and returns `self` for chaining.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        *self /= self.length();
        self
    }

    #[inline]
    pub fn dot(self, rhs: Vec2) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    #[inline]
    pub fn sqr_distance(self, other: Vec2) -> f32 {
        (self - other).sqr_length()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Returns `t * self + (1 - t) * other` with `t` clamped to `[0, 1]`.
    ///
    /// `t = 1` yields `self`, `t = 0` yields `other`.
    #[inline]
    pub fn lerp(self, other: Vec2, t: f32) -> Vec2 {
        let t = clamp(t, 0.0, 1.0);
        self * t + other * (1.0 - t)
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

impl Mul for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
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

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vec2 {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    // ── length / normalize ────────────────────────────────────────────────

    #[test]
    fn length_of_3_4_is_5() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::new(3.0, 4.0).sqr_length(), 25.0);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let mut v = Vec2::new(-7.0, 2.5);
        v.normalize();
        assert!((v.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn unit_leaves_original_untouched() {
        let v = Vec2::new(0.0, 9.0);
        assert_eq!(v.unit(), Vec2::new(0.0, 1.0));
        assert_eq!(v, Vec2::new(0.0, 9.0));
    }

    // ── operators ─────────────────────────────────────────────────────────

    #[test]
    fn componentwise_mul_and_div() {
        let a = Vec2::new(2.0, 6.0);
        let b = Vec2::new(4.0, 3.0);
        assert_eq!(a * b, Vec2::new(8.0, 18.0));
        assert_eq!(a / b, Vec2::new(0.5, 2.0));
    }

    #[test]
    fn compound_assignment() {
        let mut v = Vec2::new(1.0, 1.0);
        v += Vec2::new(1.0, 2.0);
        v *= 2.0;
        v -= Vec2::new(0.0, 1.0);
        v /= 4.0;
        assert_eq!(v, Vec2::new(1.0, 1.25));
    }

    // ── distance / lerp ───────────────────────────────────────────────────

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.sqr_distance(a), 25.0);
    }

    #[test]
    fn lerp_endpoints_are_reversed() {
        let a = Vec2::new(10.0, 0.0);
        let b = Vec2::new(0.0, 10.0);
        assert_eq!(a.lerp(b, 1.0), a);
        assert_eq!(a.lerp(b, 0.0), b);
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.lerp(b, 5.0), a);
        assert_eq!(a.lerp(b, -5.0), b);
    }
}
