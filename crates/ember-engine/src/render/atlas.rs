use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::math::Vec2;

use super::AssetError;

/// CPU side of a sprite atlas: an RGBA8 image plus its full mip chain.
///
/// Upload with [`Renderer2d::upload_atlas`](super::Renderer2d::upload_atlas);
/// the texture is sRGB and sampled with clamp-to-edge, trilinear filtering.
/// Texture coordinates have their origin at the top-left of the image.
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    mips: Vec<RgbaImage>,
}

impl SpriteAtlas {
    /// Decodes an image file (any format enabled on the `image` crate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let img = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let atlas = Self::from_image(img.to_rgba8())?;
        log::debug!(
            "loaded atlas {} ({}x{}, {} mips)",
            path.display(),
            atlas.width(),
            atlas.height(),
            atlas.mip_count()
        );
        Ok(atlas)
    }

    /// Wraps tightly packed RGBA8 pixels, row-major from the top row.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        let len = pixels.len();
        let base = RgbaImage::from_raw(width, height, pixels)
            .ok_or(AssetError::PixelCount { width, height, len })?;
        Self::from_image(base)
    }

    /// Builds the mip chain for `base`. An image without pixels is rejected.
    pub fn from_image(base: RgbaImage) -> Result<Self, AssetError> {
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::PixelCount { width, height, len: base.as_raw().len() });
        }

        let mut mips = vec![base];
        loop {
            let Some(prev) = mips.last() else { break };
            let (w, h) = prev.dimensions();
            if w <= 1 && h <= 1 {
                break;
            }
            let next = imageops::resize(prev, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle);
            mips.push(next);
        }
        Ok(Self { mips })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.mips[0].width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.mips[0].height()
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    #[inline]
    pub fn mip_count(&self) -> u32 {
        self.mips.len() as u32
    }

    /// Mip levels from full resolution down to 1x1.
    #[inline]
    pub fn mips(&self) -> &[RgbaImage] {
        &self.mips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> SpriteAtlas {
        let pixels = px.repeat((w * h) as usize);
        SpriteAtlas::from_rgba(w, h, pixels).unwrap()
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let atlas = solid(8, 2, [255, 0, 0, 255]);
        let dims: Vec<(u32, u32)> = atlas.mips().iter().map(|m| m.dimensions()).collect();
        assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert_eq!(atlas.mip_count(), 4);
    }

    #[test]
    fn uniform_color_survives_downsampling() {
        let atlas = solid(4, 4, [10, 20, 30, 255]);
        let last = &atlas.mips()[atlas.mips().len() - 1];
        assert_eq!(last.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn wrong_pixel_count_is_rejected() {
        let err = SpriteAtlas::from_rgba(4, 4, vec![0u8; 10]).unwrap_err();
        assert!(matches!(err, AssetError::PixelCount { width: 4, height: 4, len: 10 }));
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        assert!(SpriteAtlas::from_rgba(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn zero_width_image_is_rejected() {
        let err = SpriteAtlas::from_image(RgbaImage::new(0, 16)).unwrap_err();
        assert!(matches!(err, AssetError::PixelCount { width: 0, height: 16, len: 0 }));
    }

    #[test]
    fn from_image_keeps_base_pixels() {
        let base = RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]));
        let atlas = SpriteAtlas::from_image(base).unwrap();
        assert_eq!(atlas.mips()[0].get_pixel(1, 1).0, [1, 2, 3, 4]);
        assert_eq!(atlas.mip_count(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = SpriteAtlas::load("/nonexistent/atlas.png").unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let path = std::env::temp_dir().join(format!("ember-atlas-{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = SpriteAtlas::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn size_reports_base_level() {
        assert_eq!(solid(6, 3, [0; 4]).size(), Vec2::new(6.0, 3.0));
    }
}
