use super::Vec2;

/// Reference resolution: the virtual coordinate space all UI and sprite
/// positions are expressed in.
///
/// Only the height is chosen by the application; the width follows the
/// window aspect ratio so that reference units stay square.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reference resolution of `height` units for a window of the given
    /// physical size (`width = aspect * height`).
    #[inline]
    pub fn for_window(window_width: f32, window_height: f32, height: f32) -> Self {
        let aspect = if window_height > 0.0 { window_width / window_height } else { 1.0 };
        Self::new(aspect * height, height)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Reference point → NDC (`[-1, 1]`, +Y up).
    #[inline]
    pub fn to_ndc(self, p: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * (p.x / self.width) - 1.0,
            1.0 - 2.0 * (p.y / self.height),
        )
    }

    /// NDC → reference point. Inverse of [`to_ndc`](Self::to_ndc).
    #[inline]
    pub fn from_ndc(self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }

    /// Reference extent → NDC extent (both components positive).
    #[inline]
    pub fn size_to_ndc(self, size: Vec2) -> Vec2 {
        Vec2::new(2.0 * size.x / self.width, 2.0 * size.y / self.height)
    }

    /// Maps a window-space position (logical pixels) into reference units.
    #[inline]
    pub fn from_window(self, p: Vec2, window_size: Vec2) -> Vec2 {
        Vec2::new(
            p.x / window_size.x * self.width,
            p.y / window_size.y * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn corners_map_to_ndc_extremes() {
        let vp = Viewport::new(400.0, 300.0);
        assert_eq!(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(200.0, 150.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn ndc_round_trip() {
        let vp = Viewport::new(533.333, 400.0);
        for p in [Vec2::new(12.5, 380.0), Vec2::new(533.0, 0.0), Vec2::new(-20.0, 410.0)] {
            assert!(close(vp.from_ndc(vp.to_ndc(p)), p));
        }
    }

    #[test]
    fn size_to_ndc_scales_by_two_over_extent() {
        let vp = Viewport::new(400.0, 200.0);
        assert_eq!(vp.size_to_ndc(Vec2::new(100.0, 50.0)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn width_follows_window_aspect() {
        let vp = Viewport::for_window(800.0, 400.0, 300.0);
        assert_eq!(vp, Viewport::new(600.0, 300.0));
    }

    #[test]
    fn window_positions_scale_into_reference_units() {
        let vp = Viewport::new(400.0, 400.0);
        let p = vp.from_window(Vec2::new(100.0, 50.0), Vec2::new(800.0, 800.0));
        assert_eq!(p, Vec2::new(50.0, 25.0));
    }
}
