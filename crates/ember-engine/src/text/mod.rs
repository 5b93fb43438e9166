//! Baked bitmap fonts and text layout.
//!
//! Fonts are rasterized once (via `fontdue`) into a single-channel bitmap for
//! the printable ASCII range. Layout is a simple pen walk over the baked
//! glyph table; no shaping, kerning or wrapping.

mod baked;
mod packer;

pub use baked::{
    BakedFont, BakedGlyph, FontLoadError, GlyphQuad, BASELINE_RATIO, BITMAP_SIZE, END_CHAR,
    FIRST_CHAR,
};
