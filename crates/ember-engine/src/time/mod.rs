//! Time subsystem.
//!
//! The runtime owns one `FrameClock` and ticks it once per frame; apps read
//! the resulting `FrameTime` from the frame context.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
