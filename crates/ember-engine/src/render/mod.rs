//! GPU rendering subsystem.
//!
//! [`Renderer2d`] consumes `scene` draw streams and issues GPU commands via
//! wgpu. It owns its GPU resources (pipelines, buffers, textures) and hands
//! out small copyable handles for them.
//!
//! Convention:
//! - draw commands are in reference units (top-left origin, +Y down)
//! - the CPU converts to NDC with the frame's [`Viewport`](crate::coords::Viewport)
//! - per-draw shader parameters travel in named [`UniformBlock`]s

mod arena;
mod atlas;
mod ctx;
mod error;
mod handle;
mod renderer;
mod shader;
mod shapes;
mod sprite;

pub use atlas::SpriteAtlas;
pub use ctx::{RenderCtx, RenderTarget};
pub use error::AssetError;
pub use handle::{AtlasHandle, FontHandle, SpriteHandle};
pub use renderer::Renderer2d;
pub use shader::{Shader, ShaderSource, UniformBlock, UniformKind};
pub use sprite::{SPRITE_INDICES, Sprite, SpriteVertex};
