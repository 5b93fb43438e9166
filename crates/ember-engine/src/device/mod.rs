//! wgpu device and window surface.
//!
//! One [`Gpu`] per window: it owns the device/queue pair, keeps the surface
//! configured across resizes and hands out per-frame encoders.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
