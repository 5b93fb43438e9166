use super::Vec2;

/// Axis-aligned rectangle in reference units (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            top_left: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_top_left_size(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.top_left
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.top_left + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.top_left + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.top_left.x;
        let mut y = self.top_left.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Closed containment: `[min, max]` on both axes.
    ///
    /// A point exactly on any edge counts as inside; widget hit-testing
    /// relies on this.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.top_left.x
            && p.y >= r.top_left.y
            && p.x <= r.top_left.x + r.size.x
            && p.y <= r.top_left.y + r.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.top_left.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_every_edge_inclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(10.0, 0.0)));
        assert!(rect.contains(Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains(Vec2::new(-0.01, 5.0)));
        assert!(!rect.contains(Vec2::new(5.0, 10.01)));
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn max_and_center() {
        let rect = r(2.0, 4.0, 6.0, 8.0);
        assert_eq!(rect.max(), Vec2::new(8.0, 12.0));
        assert_eq!(rect.center(), Vec2::new(5.0, 8.0));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
