use std::fmt;
use std::path::PathBuf;

/// Error returned when an image or shader asset cannot be loaded.
#[derive(Debug)]
pub enum AssetError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    /// Raw pixel data does not match `width * height * 4` bytes.
    PixelCount {
        width: u32,
        height: u32,
        len: usize,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "failed to decode image {}: {source}", path.display())
            }
            Self::PixelCount { width, height, len } => write!(
                f,
                "{len} bytes of pixel data do not form a {width}x{height} RGBA8 image"
            ),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::PixelCount { .. } => None,
        }
    }
}
