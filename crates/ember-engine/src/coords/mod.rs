//! Coordinate and geometry types shared across engine renderers and UI.
//!
//! Canonical CPU space is the *reference resolution*:
//! - virtual units independent of framebuffer pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Conversion to normalized device coordinates happens on the CPU through
//! [`Viewport`] right before geometry is recorded.

mod rect;
mod viewport;

pub use crate::math::Vec2;
pub use rect::Rect;
pub use viewport::Viewport;
