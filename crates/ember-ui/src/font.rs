use std::path::Path;

use ember_engine::core::FrameCtx;
use ember_engine::render::FontHandle;
use ember_engine::text::{BakedFont, FontLoadError};

/// A baked font together with its uploaded bitmap texture.
///
/// Built once at init; immutable afterwards.
#[derive(Debug)]
pub struct Font {
    baked: BakedFont,
    texture: Option<FontHandle>,
}

impl Font {
    /// Reads, bakes and uploads the font at `path`.
    pub fn load(
        ctx: &mut FrameCtx<'_, '_>,
        path: impl AsRef<Path>,
        height: f32,
    ) -> Result<Self, FontLoadError> {
        let baked = BakedFont::load(path.as_ref(), height)?;
        log::info!("loaded font {} at {height}px", path.as_ref().display());
        Ok(Self::upload(ctx, baked))
    }

    /// Uploads an already baked font.
    pub fn upload(ctx: &mut FrameCtx<'_, '_>, baked: BakedFont) -> Self {
        let texture = ctx.upload_font(&baked);
        Self { baked, texture: Some(texture) }
    }

    /// Fallback for a font that failed to load: every string measures as
    /// empty and nothing is drawn.
    pub fn unusable(height: f32) -> Self {
        Self { baked: BakedFont::empty(height), texture: None }
    }

    /// Pairs a baked font with an existing texture handle.
    pub fn from_parts(baked: BakedFont, texture: FontHandle) -> Self {
        Self { baked, texture: Some(texture) }
    }

    #[inline]
    pub fn baked(&self) -> &BakedFont {
        &self.baked
    }

    /// Texture handle; `None` for [`Font::unusable`].
    #[inline]
    pub fn texture(&self) -> Option<FontHandle> {
        self.texture
    }

    /// Line height in reference units.
    #[inline]
    pub fn height(&self) -> f32 {
        self.baked.height()
    }

    #[inline]
    pub fn is_usable(&self) -> bool {
        self.texture.is_some() && self.baked.is_usable()
    }
}
