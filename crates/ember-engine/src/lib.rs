//! Ember engine crate.
//!
//! SIMD math, a reference-resolution coordinate space, font baking, a
//! layered 2D draw list and the wgpu renderer that flushes it, plus the
//! winit runtime that drives an [`core::App`].

pub mod math;
pub mod coords;
pub mod paint;
pub mod text;
pub mod scene;

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;
pub mod render;

pub mod logging;
