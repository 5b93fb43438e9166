use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Call order: `init` once on the first frame, then `update` followed by
/// `render` every frame. Input edges (`key_pressed`, `button_pressed`) seen
/// in `update` are cleared after `render`.
pub trait App {
    /// Loads fonts, atlases and sprites. An error stops the runtime.
    fn init(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<()>;

    /// Advances game state.
    fn update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Records and presents the frame, usually through [`FrameCtx::render`].
    fn render(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
