use winit::window::{Window, WindowId};

use crate::coords::{Vec2, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState, Key, MouseButton};
use crate::paint::Color;
use crate::render::{
    AtlasHandle, FontHandle, RenderCtx, RenderTarget, Renderer2d, Sprite, SpriteAtlas,
    SpriteHandle,
};
use crate::scene::DrawList;
use crate::text::BakedFont;
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle and metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        (logi.width as f32, logi.height as f32)
    }
}

/// Per-frame context passed to every [`App`](super::App) callback.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub renderer: &'a mut Renderer2d,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    viewport: Viewport,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Builds the context; the reference resolution is `reference_height`
    /// tall and as wide as the window aspect allows.
    pub fn new(
        window: WindowCtx<'a>,
        gpu: &'a mut Gpu<'w>,
        renderer: &'a mut Renderer2d,
        input: &'a InputState,
        input_frame: &'a InputFrame,
        time: FrameTime,
        reference_height: f32,
    ) -> Self {
        let (w, h) = window.logical_size();
        let viewport = Viewport::for_window(w, h, reference_height);
        Self {
            window,
            gpu,
            renderer,
            input,
            input_frame,
            time,
            viewport,
        }
    }

    // ── coordinates ───────────────────────────────────────────────────────

    /// Reference resolution for this frame.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pointer position in reference units, if the pointer is over the window.
    pub fn pointer(&self) -> Option<Vec2> {
        let (x, y) = self.input.pointer_pos?;
        let (w, h) = self.window.logical_size();
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        Some(self.viewport.from_window(Vec2::new(x, y), Vec2::new(w, h)))
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    /// True only on the frame `key` went down.
    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input_frame.key_pressed(key)
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.input_frame.key_released(key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.button_down(button)
    }

    #[inline]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.input_frame.button_pressed(button)
    }

    #[inline]
    pub fn button_released(&self, button: MouseButton) -> bool {
        self.input_frame.button_released(button)
    }

    // ── time ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }

    /// Seconds since the runtime started.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.time.elapsed
    }

    // ── resources ─────────────────────────────────────────────────────────

    pub fn upload_font(&mut self, font: &BakedFont) -> FontHandle {
        self.renderer.upload_font(self.gpu.device(), self.gpu.queue(), font)
    }

    pub fn upload_atlas(&mut self, atlas: &SpriteAtlas) -> AtlasHandle {
        self.renderer.upload_atlas(self.gpu.device(), self.gpu.queue(), atlas)
    }

    pub fn upload_sprite(&mut self, sprite: &Sprite) -> SpriteHandle {
        self.renderer.upload_sprite(self.gpu.device(), sprite)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Clears the surface with `clear`, flushes `draw_list` and presents.
    ///
    /// The list is left intact; callers clear it when they start recording
    /// the next frame.
    pub fn render(&mut self, clear: Color, draw_list: &mut DrawList) -> AppControl {
        let mut frame = match self.gpu.acquire() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.recover(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // Clear pass: dropped before the encoder is reused below.
        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ember clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear.into()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            self.viewport,
        );

        // RenderTarget borrows frame.encoder; dropped before present() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            self.renderer.render(&rctx, &mut target, draw_list);
        }

        self.window.window.pre_present_notify();
        self.gpu.present(frame);

        AppControl::Continue
    }
}
