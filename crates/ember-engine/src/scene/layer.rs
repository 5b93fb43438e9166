use core::cmp::Ordering;

/// Depth layer of a draw item.
///
/// Smaller values are closer to the viewer: an item on layer `-0.02` covers
/// one on layer `0.0`. Ordering uses `f32::total_cmp`, so every value
/// (including NaN) has a fixed position.
#[derive(Debug, Copy, Clone, Default)]
pub struct Layer(pub f32);

impl Layer {
    pub const BASE: Layer = Layer(0.0);

    #[inline]
    pub const fn new(v: f32) -> Self {
        Self(v)
    }

    /// Returns a layer `delta` further back (positive) or forward (negative).
    #[inline]
    pub fn offset(self, delta: f32) -> Self {
        Self(self.0 + delta)
    }
}

impl From<f32> for Layer {
    #[inline]
    fn from(v: f32) -> Self {
        Self(v)
    }
}

impl PartialEq for Layer {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Layer {}

impl Ord for Layer {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Layer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
