//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands recorded during a frame
//! - provide deterministic ordering (layer + insertion order)
//! - keep command-specific helpers isolated per file under `scene::shapes`

mod cmd;
mod key;
mod layer;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use layer::Layer;
pub use list::{DrawItem, DrawList};
