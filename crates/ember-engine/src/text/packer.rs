/// Row-based ("shelf") rectangle packer for a fixed-size bitmap.
///
/// Rectangles are placed left to right with a 1px gap. When a rectangle
/// would touch the right edge, a new shelf starts below the tallest
/// rectangle placed so far. Once a rectangle would touch the bottom edge
/// the packer refuses it.
#[derive(Debug, Clone)]
pub(crate) struct ShelfPacker {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    bottom_y: u32,
}

const GAP: u32 = 1;

impl ShelfPacker {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, x: GAP, y: GAP, bottom_y: GAP }
    }

    /// Reserves a `w x h` slot and returns its top-left corner.
    pub(crate) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.x + w + GAP >= self.width {
            self.y = self.bottom_y;
            self.x = GAP;
        }
        if self.y + h + GAP >= self.height {
            return None;
        }

        let slot = (self.x, self.y);
        self.x += w + GAP;
        self.bottom_y = self.bottom_y.max(self.y + h + GAP);
        Some(slot)
    }
}
