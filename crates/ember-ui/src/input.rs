use ember_engine::coords::{Vec2, Viewport};
use ember_engine::core::FrameCtx;
use ember_engine::input::MouseButton;

/// Snapshot of the input the UI reads for one frame.
///
/// Construct it from the frame context with [`UiInput::from_frame`], or by
/// hand in tests.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UiInput {
    /// Reference resolution of the frame.
    pub viewport: Viewport,
    /// Pointer position in reference units; `None` when outside the window.
    pub pointer: Option<Vec2>,
    /// `true` while the primary button is held down.
    pub primary_down: bool,
}

impl UiInput {
    pub fn from_frame(ctx: &FrameCtx<'_, '_>) -> Self {
        Self {
            viewport: ctx.viewport(),
            pointer: ctx.pointer(),
            primary_down: ctx.button_down(MouseButton::Left),
        }
    }
}
