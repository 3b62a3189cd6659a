//! Standalone carousel window backed by winit.
//!
//! The native viewer has no audio or page router; its [`LogHost`] logs every
//! effect the engine requests instead.
//!
//! ```no_run
//! # use ringmenu::Viewer;
//! Viewer::builder()
//!     .with_title("Menu")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::{CarouselEngine, Host, SoundCue},
    error::CarouselError,
    gpu::CarouselRenderer,
    options::Options,
    util::frame_timing::FrameTiming,
    InputEvent, MouseButton,
};

/// Frame cap for the native window.
const TARGET_FPS: u32 = 60;

// ── Host ─────────────────────────────────────────────────────────────────

/// A [`Host`] that logs requested effects.
#[derive(Debug, Default)]
pub struct LogHost;

impl Host for LogHost {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("play {cue:?}");
    }

    fn stop(&mut self, cue: SoundCue) {
        log::debug!("stop {cue:?}");
    }

    fn navigate(&mut self, path: &str) {
        log::info!("navigate requested: {path}");
    }

    fn open_external(&mut self, url: &str) {
        log::info!("external link requested: {url}");
    }
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Menu".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the carousel.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`CarouselError::Viewer`] if the event loop cannot start, or the
    /// first setup error hit while opening the window.
    pub fn run(self) -> Result<(), CarouselError> {
        let event_loop =
            EventLoop::new().map_err(|e| CarouselError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            state: None,
            options: self.options,
            title: self.title,
            host: LogHost,
            timing: FrameTiming::new(TARGET_FPS),
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CarouselError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Engine and renderer, created once the window exists.
struct RunningMenu {
    engine: CarouselEngine,
    renderer: CarouselRenderer,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    state: Option<RunningMenu>,
    options: Options,
    title: String,
    host: LogHost,
    timing: FrameTiming,
    /// Setup failure reported back from [`Viewer::run`].
    error: Option<CarouselError>,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn open(
        &self,
        window: &Arc<Window>,
    ) -> Result<RunningMenu, CarouselError> {
        let size = viewport_size(window.inner_size());
        let renderer = pollster::block_on(CarouselRenderer::create(
            Arc::clone(window),
            size,
            &self.options.lighting,
        ))?;
        let engine = CarouselEngine::new(self.options.clone(), size)?;
        Ok(RunningMenu { engine, renderer })
    }

    fn redraw(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        if self.timing.should_render() {
            let _ = state.engine.update();
            state
                .renderer
                .render(state.engine.camera(), state.engine.placements());
            state.engine.flush(&mut self.host);
            self.timing.end_frame();
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                self.error = Some(CarouselError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        match self.open(&window) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("failed to initialize carousel: {e}");
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(state) = self.state.take() {
                state.engine.teardown(&mut self.host);
            }
            event_loop.exit();
            return;
        }
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (width, height) = viewport_size(size);
                state.engine.resize(width, height);
                state.renderer.resize(width, height);
            }

            WindowEvent::MouseInput {
                button,
                state: button_state,
                ..
            } => {
                let _ = state.engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: button_state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let _ = state.engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                let _ = state.engine.handle_input(InputEvent::CursorLeft);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let _ = state.engine.handle_key_press(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
