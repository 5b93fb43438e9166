//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single game window, and wires them to
//! the GPU layer and the 2D renderer.

mod icon;
mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
