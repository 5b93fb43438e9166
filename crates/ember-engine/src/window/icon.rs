use std::path::Path;

use anyhow::{Context, Result};
use winit::window::Icon;

/// Decodes an image file into a window icon.
pub(crate) fn load_icon(path: &Path) -> Result<Icon> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let rgba = image::load_from_memory(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Icon::from_rgba(rgba.into_raw(), width, height).context("invalid icon dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_icon(Path::new("does/not/exist.png")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.png"));
    }

    #[test]
    fn decodes_png_icon() {
        let dir = std::env::temp_dir().join(format!("ember-icon-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("icon.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        assert!(load_icon(&path).is_ok());
        std::fs::remove_dir_all(&dir).ok();
    }
}
