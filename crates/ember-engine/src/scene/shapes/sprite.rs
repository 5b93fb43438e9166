use crate::math::Mat4;
use crate::render::{AtlasHandle, SpriteHandle};
use crate::scene::{DrawCmd, DrawList, Layer};

/// Sprite draw payload.
///
/// `transform` is applied to the sprite's quad in the vertex shader; the
/// quad is already expressed in clip space, so the matrix usually only
/// scales and translates.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub atlas: AtlasHandle,
    pub sprite: SpriteHandle,
    pub transform: Mat4,
}

impl DrawList {
    /// Records a sprite draw using `atlas` as its texture.
    #[inline]
    pub fn push_sprite(
        &mut self,
        layer: impl Into<Layer>,
        atlas: AtlasHandle,
        sprite: SpriteHandle,
        transform: Mat4,
    ) {
        self.push(layer, DrawCmd::Sprite(SpriteCmd { atlas, sprite, transform }));
    }
}
