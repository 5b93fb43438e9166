//! Per-command payloads and their `DrawList::push_*` helpers.

pub(crate) mod rect;
pub(crate) mod sprite;
pub(crate) mod text;

pub use rect::RectCmd;
pub use sprite::SpriteCmd;
pub use text::{GlyphVertex, TextCmd, TextMesh};
