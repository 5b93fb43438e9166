use std::path::PathBuf;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::render::Renderer2d;
use crate::time::{FrameClock, FrameTime};

use super::icon::load_icon;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    /// Height of the reference resolution; the width follows the window
    /// aspect ratio.
    pub reference_height: f32,
    pub resizable: bool,
    pub fullscreen: bool,
    /// Wait for vertical blank when presenting.
    pub vsync: bool,
    /// Window icon. A missing or undecodable file is logged and ignored.
    pub icon: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            size: LogicalSize::new(400.0, 400.0),
            reference_height: 400.0,
            resizable: false,
            fullscreen: false,
            vsync: true,
            icon: None,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until it exits or the window closes.
    ///
    /// Errors from window creation, GPU initialization or [`App::init`]
    /// (see [`crate::core::App`]) are returned once the loop has stopped.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    renderer: Option<Renderer2d>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    app_initialized: bool,

    window: Option<WindowEntry>,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            app_initialized: false,
            window: None,
            error: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let config = &self.config;
        let mut attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.size)
            .with_resizable(config.resizable);

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        if let Some(path) = &config.icon {
            match load_icon(path) {
                Ok(icon) => attrs = attrs.with_window_icon(Some(icon)),
                Err(e) => log::warn!("window icon not set: {e:#}"),
            }
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone().with_vsync(config.vsync);

        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            renderer: None,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        entry.with_mut(|fields| {
            *fields.renderer = Some(Renderer2d::new(fields.gpu.device()));
        });

        Ok(entry)
    }

    /// Runs init (first frame only), update and render for one frame.
    fn drive_frame(&mut self, window_id: WindowId) -> Result<AppControl> {
        let reference_height = self.config.reference_height;
        let (app, app_initialized) = (&mut self.app, &mut self.app_initialized);

        let Some(entry) = self.window.as_mut() else {
            return Ok(AppControl::Exit);
        };

        entry.with_mut(|fields| {
            let size = fields.window.inner_size();
            if size.width == 0 || size.height == 0 {
                return Ok(AppControl::Continue);
            }

            let Some(renderer) = fields.renderer.as_mut() else {
                return Ok(AppControl::Exit);
            };

            let ft: FrameTime = fields.clock.tick();
            let mut control = AppControl::Continue;

            // Scope to ensure `ctx` is dropped before mutating frame state.
            {
                let mut ctx = FrameCtx::new(
                    WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    fields.gpu,
                    renderer,
                    fields.input_state,
                    fields.input_frame,
                    ft,
                    reference_height,
                );

                if !*app_initialized {
                    app.init(&mut ctx).context("application init failed")?;
                    *app_initialized = true;
                }

                if app.update(&mut ctx) == AppControl::Exit {
                    control = AppControl::Exit;
                } else if app.render(&mut ctx) == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }

            // Clear per-frame edges after the frame is consumed.
            fields.input_frame.clear();
            Ok(control)
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; pacing comes from the present mode.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("window resized to {}x{}", new_size.width, new_size.height);
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => match self.drive_frame(window_id) {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => {
                    log::info!("application requested exit");
                    self.exit_requested = true;
                    event_loop.exit();
                }
                Err(e) => self.fail(event_loop, e),
            },

            _ => {}
        }
    }
}
