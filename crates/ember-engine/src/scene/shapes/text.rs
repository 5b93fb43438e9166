use core::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::render::FontHandle;
use crate::scene::{DrawCmd, DrawList, Layer};
use crate::text::GlyphQuad;

/// Text draw payload: one call's glyph quads in reference units.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub font: FontHandle,
    pub color: Color,
    pub quads: Vec<GlyphQuad>,
}

impl DrawList {
    /// Records a pre-laid-out run of glyph quads. Empty runs are dropped.
    pub fn push_text(
        &mut self,
        layer: impl Into<Layer>,
        font: FontHandle,
        color: Color,
        quads: Vec<GlyphQuad>,
    ) {
        if quads.is_empty() {
            return;
        }
        self.push(layer, DrawCmd::Text(TextCmd { font, color, quads }));
    }
}

/// Clip-space glyph vertex: `(x, y)` in NDC plus bitmap `(s, t)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

/// CPU staging for text geometry, reused frame to frame.
///
/// Every glyph contributes four vertices in the order
/// `(left, bottom) (right, bottom) (right, top) (left, top)` and six
/// indices `0 1 2 2 3 0` relative to its first vertex.
#[derive(Debug, Default)]
pub struct TextMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
}

impl TextMesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Appends `quads` converted to NDC and returns the index range they
    /// occupy, ready for a single indexed draw.
    pub fn append(&mut self, quads: &[GlyphQuad], viewport: Viewport) -> Range<u32> {
        let first_index = self.indices.len() as u32;
        self.vertices.reserve(quads.len() * 4);
        self.indices.reserve(quads.len() * 6);

        for q in quads {
            let base = self.vertices.len() as u32;
            let lt = viewport.to_ndc(Vec2::new(q.x0, q.y0));
            let rb = viewport.to_ndc(Vec2::new(q.x1, q.y1));

            self.vertices.extend_from_slice(&[
                GlyphVertex { pos: [lt.x, rb.y], uv: [q.s0, q.t1] },
                GlyphVertex { pos: [rb.x, rb.y], uv: [q.s1, q.t1] },
                GlyphVertex { pos: [rb.x, lt.y], uv: [q.s1, q.t0] },
                GlyphVertex { pos: [lt.x, lt.y], uv: [q.s0, q.t0] },
            ]);
            self.indices
                .extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
        }

        first_index..self.indices.len() as u32
    }
}
