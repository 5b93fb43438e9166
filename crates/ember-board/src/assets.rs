//! Asset lookup with fallbacks. Every loader here fails soft: a missing
//! file is logged and replaced by something drawable.
//!
//! Assets live in `assets/` next to this crate's manifest. A directory of
//! the same name in the working directory takes precedence.

use std::path::{Path, PathBuf};

use ember_engine::core::FrameCtx;
use ember_engine::render::{AssetError, ShaderSource, SpriteAtlas};
use ember_ui::Font;

pub const ASSET_DIR: &str = "assets";
pub const FONT_HEIGHT: f32 = 24.0;

const GAME_FONT: &str = "fonts/DejaVuSansMono.ttf";
const ATLAS: &str = "images/atlas.png";
const SPRITE_VERT: &str = "shaders/sprite.vert.wgsl";
const SPRITE_FRAG: &str = "shaders/sprite.frag.wgsl";
pub const ICON: &str = "icons/icon.png";

const SYSTEM_FONTS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/noto/NotoSansMono-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
];

/// Straight-alpha colors of the generated cross and circle.
const CROSS_RGB: [u8; 3] = [255, 102, 128];
const CIRCLE_RGB: [u8; 3] = [128, 102, 255];

pub fn asset_path(relative: &str) -> PathBuf {
    asset_root().join(relative)
}

fn asset_root() -> PathBuf {
    let local = Path::new(ASSET_DIR);
    if local.is_dir() {
        local.to_path_buf()
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSET_DIR)
    }
}

/// Game font, then a system monospace font, then [`Font::unusable`].
pub fn load_font(ctx: &mut FrameCtx<'_, '_>) -> Font {
    let candidates = std::iter::once(asset_path(GAME_FONT)).chain(SYSTEM_FONTS.iter().map(PathBuf::from));
    for path in candidates {
        match Font::load(ctx, &path, FONT_HEIGHT) {
            Ok(font) => return font,
            Err(e) => log::debug!("font candidate skipped: {e}"),
        }
    }
    log::warn!("no usable font found; text will not be drawn");
    Font::unusable(FONT_HEIGHT)
}

/// The atlas image, or a generated one with the cross on the left half
/// and the circle on the right half.
pub fn load_atlas() -> Result<SpriteAtlas, AssetError> {
    let path = asset_path(ATLAS);
    match SpriteAtlas::load(&path) {
        Ok(atlas) => Ok(atlas),
        Err(e) => {
            log::warn!("{e}; using generated atlas");
            generated_atlas(128)
        }
    }
}

/// Custom sprite shader, if both stages are present.
pub fn load_sprite_shader() -> Option<ShaderSource> {
    match ShaderSource::from_files("sprite", asset_path(SPRITE_VERT), asset_path(SPRITE_FRAG)) {
        Ok(source) => Some(source),
        Err(e) => {
            log::debug!("built-in sprite shader in use ({e})");
            None
        }
    }
}

/// `2 * cell` by `cell` atlas: cross in the left square, ring in the right.
pub fn generated_atlas(cell: u32) -> Result<SpriteAtlas, AssetError> {
    let base = image::RgbaImage::from_fn(cell * 2, cell, |x, y| {
        let (local_x, rgb, inside) = if x < cell {
            (x, CROSS_RGB, cross_coverage as fn(f32, f32) -> bool)
        } else {
            (x - cell, CIRCLE_RGB, ring_coverage as fn(f32, f32) -> bool)
        };
        // Unit square centered on the cell, +Y down.
        let u = (local_x as f32 + 0.5) / cell as f32 - 0.5;
        let v = (y as f32 + 0.5) / cell as f32 - 0.5;
        let alpha = if inside(u, v) { 255 } else { 0 };
        image::Rgba([rgb[0], rgb[1], rgb[2], alpha])
    });
    SpriteAtlas::from_image(base)
}

const STROKE: f32 = 0.07;
const EXTENT: f32 = 0.36;

fn cross_coverage(u: f32, v: f32) -> bool {
    let within = u.abs() <= EXTENT && v.abs() <= EXTENT;
    let diag = (u - v).abs() / std::f32::consts::SQRT_2;
    let anti = (u + v).abs() / std::f32::consts::SQRT_2;
    within && (diag <= STROKE || anti <= STROKE)
}

fn ring_coverage(u: f32, v: f32) -> bool {
    let r = (u * u + v * v).sqrt();
    (r - (EXTENT - STROKE)).abs() <= STROKE
}
