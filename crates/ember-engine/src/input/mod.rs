//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates window events into `InputEvent`s (see `platform.rs`)
//! and feeds them to `InputState::apply_event`.

mod frame;
mod state;
mod types;
pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
