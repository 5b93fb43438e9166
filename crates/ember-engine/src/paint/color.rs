use crate::math::Vec4;

/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`. The renderer
/// blends with `One, OneMinusSrcAlpha`, so straight-alpha input must go
/// through [`from_straight`](Self::from_straight) (or `From<Vec4>`).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Opaque grey of the given intensity.
    #[inline]
    pub const fn grey(v: f32) -> Self {
        Self::from_premul(v, v, v, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// Interprets the vector as straight-alpha `(r, g, b, a)`.
impl From<Vec4> for Color {
    #[inline]
    fn from(v: Vec4) -> Self {
        Color::from_straight(v.r(), v.g(), v.b(), v.a())
    }
}

impl From<Color> for wgpu::Color {
    #[inline]
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_straight_premultiplies() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn from_straight_clamps_channels() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 3.0);
        assert_eq!(c, Color::from_premul(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn vec4_converts_as_straight_alpha() {
        let c: Color = Vec4::new(0.0, 0.0, 0.0, 0.7).into();
        assert_eq!(c, Color::from_premul(0.0, 0.0, 0.0, 0.7));
        let c: Color = Vec4::new(1.0, 0.4, 0.5, 1.0).into();
        assert_eq!(c.to_array(), [1.0, 0.4, 0.5, 1.0]);
    }
}
