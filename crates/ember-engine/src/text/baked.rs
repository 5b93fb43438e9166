use std::fmt;
use std::path::{Path, PathBuf};

use crate::coords::Vec2;

use super::packer::ShelfPacker;

/// Side length of the baked glyph bitmap (single channel).
pub const BITMAP_SIZE: u32 = 512;
/// First baked character (space).
pub const FIRST_CHAR: u8 = b' ';
/// One past the last baked character.
pub const END_CHAR: u8 = 128;

const GLYPH_COUNT: usize = (END_CHAR - FIRST_CHAR) as usize;

/// Distance from the top of a text line to its baseline, as a fraction of
/// the font height.
pub const BASELINE_RATIO: f32 = 0.75;

/// Error returned when a font cannot be read or baked.
#[derive(Debug)]
pub enum FontLoadError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(String),
    InvalidHeight(f32),
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read font {}: {source}", path.display())
            }
            Self::Parse(msg) => write!(f, "font parse error: {msg}"),
            Self::InvalidHeight(h) => write!(f, "invalid font pixel height {h}"),
        }
    }
}

impl std::error::Error for FontLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Metrics and bitmap location of one baked glyph.
///
/// `x0..x1`/`y0..y1` is the sub-rectangle inside the bitmap. `xoff`/`yoff`
/// place the bitmap's top-left corner relative to the pen position on the
/// baseline (+Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BakedGlyph {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    pub xoff: f32,
    pub yoff: f32,
    pub xadvance: f32,
}

/// One glyph quad: pixel-space corners plus bitmap texture coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct GlyphQuad {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub s0: f32,
    pub t0: f32,
    pub s1: f32,
    pub t1: f32,
}

/// A font rasterized once into a fixed `512 x 512` single-channel bitmap
/// for the printable ASCII range.
///
/// The bitmap lives on the CPU; the renderer uploads it to an `R8Unorm`
/// texture. A font with no glyphs ([`BakedFont::empty`]) measures every
/// string as zero-width and produces no quads.
#[derive(Debug, Clone)]
pub struct BakedFont {
    height: f32,
    bitmap: Vec<u8>,
    glyphs: Vec<Option<BakedGlyph>>,
}

impl BakedFont {
    /// Reads a TrueType/OpenType file and bakes it at `height` pixels.
    pub fn load(path: impl AsRef<Path>, height: f32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::bake(&bytes, height)
    }

    /// Rasterizes `' '..=127` at `height` pixels and packs the glyphs.
    ///
    /// `height` is the distance from the highest ascender to the lowest
    /// descender, not the em size. Glyphs that do not fit in the bitmap are
    /// left out (logged once).
    pub fn bake(bytes: &[u8], height: f32) -> Result<Self, FontLoadError> {
        if !(height.is_finite() && height > 0.0) {
            return Err(FontLoadError::InvalidHeight(height));
        }

        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;

        // fontdue sizes are em sizes; rescale so ascent - descent == height.
        let px = match font.horizontal_line_metrics(height) {
            Some(lm) if lm.ascent - lm.descent > 0.0 => height * height / (lm.ascent - lm.descent),
            _ => height,
        };

        let mut baked = Self::empty(height);
        baked.bitmap = vec![0u8; (BITMAP_SIZE * BITMAP_SIZE) as usize];

        let mut packer = ShelfPacker::new(BITMAP_SIZE, BITMAP_SIZE);
        let mut placed = 0usize;

        for code in FIRST_CHAR..END_CHAR {
            let (metrics, coverage) = font.rasterize(code as char, px);
            let (w, h) = (metrics.width as u32, metrics.height as u32);

            let Some((gx, gy)) = packer.place(w, h) else {
                log::warn!(
                    "font bitmap full after {placed} glyphs at height {height}; \
                     remaining characters will not render"
                );
                break;
            };

            for row in 0..h {
                let src = (row * w) as usize;
                let dst = ((gy + row) * BITMAP_SIZE + gx) as usize;
                baked.bitmap[dst..dst + w as usize].copy_from_slice(&coverage[src..src + w as usize]);
            }

            baked.glyphs[(code - FIRST_CHAR) as usize] = Some(BakedGlyph {
                x0: gx as u16,
                y0: gy as u16,
                x1: (gx + w) as u16,
                y1: (gy + h) as u16,
                xoff: metrics.xmin as f32,
                yoff: -(metrics.ymin as f32 + h as f32),
                xadvance: metrics.advance_width,
            });
            placed += 1;
        }

        log::debug!("baked {placed} glyphs at {height}px");
        Ok(baked)
    }

    /// A font with no glyphs. Used as the fail-soft fallback when loading
    /// fails.
    pub fn empty(height: f32) -> Self {
        Self {
            height,
            bitmap: Vec::new(),
            glyphs: vec![None; GLYPH_COUNT],
        }
    }

    /// Builds a font from an explicit glyph table over a blank bitmap.
    ///
    /// Useful for synthetic fonts in layout tests.
    pub fn from_glyphs(height: f32, glyphs: impl IntoIterator<Item = (char, BakedGlyph)>) -> Self {
        let mut font = Self::empty(height);
        font.bitmap = vec![0u8; (BITMAP_SIZE * BITMAP_SIZE) as usize];
        for (ch, g) in glyphs {
            if let Some(slot) = glyph_index(ch) {
                font.glyphs[slot] = Some(g);
            }
        }
        font
    }

    /// Pixel height the font was baked at (also the line height).
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// `BITMAP_SIZE * BITMAP_SIZE` coverage bytes, or empty for
    /// [`BakedFont::empty`].
    #[inline]
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    #[inline]
    pub fn is_usable(&self) -> bool {
        !self.bitmap.is_empty()
    }

    pub fn glyph(&self, ch: char) -> Option<&BakedGlyph> {
        glyph_index(ch).and_then(|i| self.glyphs[i].as_ref())
    }

    /// Computes the quad for `ch` with the pen at `(*x, y)` on the baseline
    /// and advances `*x`.
    ///
    /// The quad's top-left corner is snapped to whole pixels. Characters
    /// without a baked glyph return `None` and do not advance.
    pub fn glyph_quad(&self, ch: char, x: &mut f32, y: f32) -> Option<GlyphQuad> {
        let g = self.glyph(ch)?;
        let inv = 1.0 / BITMAP_SIZE as f32;

        let round_x = (*x + g.xoff + 0.5).floor();
        let round_y = (y + g.yoff + 0.5).floor();

        let quad = GlyphQuad {
            x0: round_x,
            y0: round_y,
            x1: round_x + (g.x1 - g.x0) as f32,
            y1: round_y + (g.y1 - g.y0) as f32,
            s0: g.x0 as f32 * inv,
            t0: g.y0 as f32 * inv,
            s1: g.x1 as f32 * inv,
            t1: g.y1 as f32 * inv,
        };

        *x += g.xadvance;
        Some(quad)
    }

    /// Bounding size of `text` laid out without wrapping.
    ///
    /// Width is the widest line's advance. Height is one line per line of
    /// text: `""` is one line tall, each `'\n'` adds another.
    pub fn measure(&self, text: &str) -> Vec2 {
        let mut size = Vec2::new(0.0, self.height);
        let mut line_x = 0.0f32;

        for ch in text.chars() {
            if ch == '\n' {
                size.y += self.height;
                size.x = size.x.max(line_x);
                line_x = 0.0;
                continue;
            }
            if let Some(g) = self.glyph(ch) {
                line_x += g.xadvance;
            }
        }

        size.x = size.x.max(line_x);
        size
    }

    /// Lays out `text` with its first line's top edge at `top_left.y`.
    ///
    /// The baseline of the first line sits at `top_left.y + 0.75 * height`;
    /// `'\n'` returns to `top_left.x` one line height lower.
    pub fn layout(&self, text: &str, top_left: Vec2) -> Vec<GlyphQuad> {
        let mut quads = Vec::with_capacity(text.len());
        let mut x = top_left.x;
        let mut y = top_left.y + self.height * BASELINE_RATIO;

        for ch in text.chars() {
            if ch == '\n' {
                y += self.height;
                x = top_left.x;
                continue;
            }
            if let Some(q) = self.glyph_quad(ch, &mut x, y) {
                quads.push(q);
            }
        }
        quads
    }
}

fn glyph_index(ch: char) -> Option<usize> {
    let code = u32::from(ch);
    (u32::from(FIRST_CHAR)..u32::from(END_CHAR))
        .contains(&code)
        .then(|| (code - u32::from(FIRST_CHAR)) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10px advance, 8x12 bitmap cell, glyph top 9px above the baseline.
    fn mono(height: f32) -> BakedFont {
        let glyphs = (b'!'..b'~').enumerate().map(|(i, c)| {
            let x0 = 1 + i as u16 * 9;
            (
                c as char,
                BakedGlyph { x0, y0: 1, x1: x0 + 8, y1: 13, xoff: 1.0, yoff: -9.0, xadvance: 10.0 },
            )
        });
        let space = BakedGlyph { xadvance: 10.0, ..BakedGlyph::default() };
        BakedFont::from_glyphs(height, glyphs.chain(std::iter::once((' ', space))))
    }

    // ── measure ───────────────────────────────────────────────────────────

    #[test]
    fn empty_string_is_one_line_tall() {
        assert_eq!(mono(16.0).measure(""), Vec2::new(0.0, 16.0));
    }

    #[test]
    fn two_lines_take_widest_line() {
        let font = mono(16.0);
        assert_eq!(font.measure("AB\nCD"), Vec2::new(20.0, 32.0));
        assert_eq!(font.measure("ABC\nD"), Vec2::new(30.0, 32.0));
        assert_eq!(font.measure("A\nBCDE"), Vec2::new(40.0, 32.0));
    }

    #[test]
    fn trailing_newline_adds_a_line() {
        assert_eq!(mono(10.0).measure("AB\n"), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn unbaked_characters_are_skipped() {
        let font = mono(16.0);
        assert_eq!(font.measure("A\u{7}é\tB"), Vec2::new(20.0, 16.0));
    }

    #[test]
    fn empty_font_measures_zero_width() {
        let font = BakedFont::empty(24.0);
        assert!(!font.is_usable());
        assert_eq!(font.measure("hello"), Vec2::new(0.0, 24.0));
        assert!(font.layout("hello", Vec2::ZERO).is_empty());
    }

    // ── glyph_quad ────────────────────────────────────────────────────────

    #[test]
    fn glyph_quad_snaps_and_advances() {
        let font = mono(16.0);
        let mut x = 4.25;
        let q = font.glyph_quad('A', &mut x, 20.0).unwrap();
        // floor(4.25 + 1 + 0.5) = 5, floor(20 - 9 + 0.5) = 11
        assert_eq!((q.x0, q.y0, q.x1, q.y1), (5.0, 11.0, 13.0, 23.0));
        assert_eq!(x, 14.25);
    }

    #[test]
    fn glyph_quad_texture_coords_are_normalized() {
        let font = mono(16.0);
        let g = *font.glyph('A').unwrap();
        let mut x = 0.0;
        let q = font.glyph_quad('A', &mut x, 0.0).unwrap();
        assert_eq!(q.s0, g.x0 as f32 / 512.0);
        assert_eq!(q.t1, g.y1 as f32 / 512.0);
    }

    #[test]
    fn glyph_quad_for_missing_char_does_not_advance() {
        let font = mono(16.0);
        let mut x = 3.0;
        assert!(font.glyph_quad('\u{1}', &mut x, 0.0).is_none());
        assert_eq!(x, 3.0);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_places_baseline_at_three_quarters() {
        let font = mono(16.0);
        let quads = font.layout("A", Vec2::new(0.0, 100.0));
        // baseline 112, glyph top 9 above
        assert_eq!(quads[0].y0, 103.0);
    }

    #[test]
    fn layout_newline_returns_to_left_edge() {
        let font = mono(16.0);
        let quads = font.layout("AB\nC", Vec2::new(50.0, 0.0));
        assert_eq!(quads.len(), 3);
        assert_eq!(quads[0].x0, 51.0);
        assert_eq!(quads[1].x0, 61.0);
        assert_eq!(quads[2].x0, 51.0);
        assert_eq!(quads[2].y0 - quads[0].y0, 16.0);
    }

    #[test]
    fn layout_emits_quad_for_space_without_area() {
        let font = mono(16.0);
        let quads = font.layout("A B", Vec2::ZERO);
        assert_eq!(quads.len(), 3);
        assert_eq!(quads[1].x0, quads[1].x1);
        assert_eq!(quads[2].x0, 21.0);
    }

    // ── bake ──────────────────────────────────────────────────────────────

    const DEJAVU_MONO: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../ember-board/assets/fonts/DejaVuSansMono.ttf"
    ));

    fn baked_count(font: &BakedFont) -> usize {
        (FIRST_CHAR..END_CHAR).filter(|&c| font.glyph(c as char).is_some()).count()
    }

    #[test]
    fn bake_packs_every_glyph_at_text_sizes() {
        let font = BakedFont::bake(DEJAVU_MONO, 24.0).unwrap();
        assert!(font.is_usable());
        assert_eq!(font.bitmap().len(), (BITMAP_SIZE * BITMAP_SIZE) as usize);
        assert_eq!(baked_count(&font), GLYPH_COUNT);
    }

    #[test]
    fn baked_capital_sits_on_baseline() {
        let font = BakedFont::bake(DEJAVU_MONO, 24.0).unwrap();
        let a = font.glyph('A').unwrap();
        let h = (a.y1 - a.y0) as f32;
        assert!(a.yoff < 0.0);
        assert!(a.yoff + h <= 0.0);
        assert!(a.yoff + h > -1.0);
        assert!(a.xadvance > 0.0);
    }

    #[test]
    fn baked_glyph_coverage_lands_in_its_rect() {
        let font = BakedFont::bake(DEJAVU_MONO, 24.0).unwrap();
        let g = font.glyph('M').unwrap();
        let inked = (g.y0..g.y1)
            .flat_map(|y| (g.x0..g.x1).map(move |x| y as usize * BITMAP_SIZE as usize + x as usize))
            .any(|i| font.bitmap()[i] > 0);
        assert!(inked);
    }

    #[test]
    fn baked_measure_uses_font_advances() {
        let font = BakedFont::bake(DEJAVU_MONO, 24.0).unwrap();
        let advance = font.glyph('A').unwrap().xadvance;
        assert_eq!(font.measure("AB\nCD"), Vec2::new(2.0 * advance, 48.0));
    }

    #[test]
    fn oversized_bake_drops_trailing_glyphs() {
        let font = BakedFont::bake(DEJAVU_MONO, 200.0).unwrap();
        let count = baked_count(&font);
        assert!(count > 0 && count < GLYPH_COUNT);
        assert!(font.glyph(' ').is_some());
        assert!(font.glyph('~').is_none());
    }

    #[test]
    fn bake_rejects_garbage_bytes() {
        assert!(matches!(BakedFont::bake(b"not a font", 16.0), Err(FontLoadError::Parse(_))));
    }

    #[test]
    fn bake_rejects_non_positive_height() {
        assert!(matches!(BakedFont::bake(&[], 0.0), Err(FontLoadError::InvalidHeight(_))));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = BakedFont::load("/definitely/not/here.ttf", 16.0).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ttf"));
    }
}
