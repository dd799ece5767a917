//! The winit application handler driving the render loop.
//!
//! Each redraw runs one frame: process input, clear, draw, present. After
//! the event queue drains, either the loop exits (close requested) or the
//! next redraw is requested, so frames run back to back under
//! `ControlFlow::Poll`.

use gl_experiment_core::{AppConfig, Key, ShaderSources, WindowState};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use crate::error::CliError;
use crate::graphics::Graphics;

/// Maps a winit key to the keys the application reacts to.
pub fn map_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        _ => Key::Other,
    }
}

/// Drives one window from creation to close, counting rendered frames.
pub struct App {
    config: AppConfig,
    sources: ShaderSources,
    state: WindowState,
    graphics: Option<Graphics>,
    frames: u64,
    error: Option<CliError>,
}

impl App {
    /// Creates a handler; the window itself is opened on the first resume.
    pub fn new(config: AppConfig, sources: ShaderSources, state: WindowState) -> Self {
        Self {
            config,
            sources,
            state,
            graphics: None,
            frames: 0,
            error: None,
        }
    }

    /// Window state as seen by the render loop.
    pub fn state(&self) -> &WindowState {
        &self.state
    }

    /// Consumes the handler after the event loop returns, yielding the
    /// error that stopped it, if any.
    pub fn finish(mut self) -> Result<(), CliError> {
        // Release GL objects before the event loop goes away.
        self.graphics = None;
        log::info!("rendered {} frame(s)", self.frames);
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Keeps the first fatal error for [`App::finish`] and requests close.
    /// The error is reported once, by the caller of `finish`.
    fn record_error(&mut self, error: CliError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.state.request_close();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: CliError) {
        self.record_error(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.state.process_input();
        if self.state.should_close() {
            event_loop.exit();
            return;
        }

        let Some(graphics) = &self.graphics else {
            return;
        };
        graphics
            .renderer
            .render_frame(self.config.clear_color, self.config.mesh);
        let presented = graphics.present();
        self.frames += 1;

        if let Err(e) = presented {
            self.fail(event_loop, e);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::create(event_loop, &self.config, &self.sources) {
            Ok(graphics) => {
                let size = graphics.window.inner_size();
                let viewport = self.state.resize(size.width, size.height);
                graphics.resize(size, viewport);
                log::info!(
                    "window open at {}x{}, drawing {}",
                    size.width,
                    size.height,
                    self.config.mesh.name()
                );
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.state.request_close();
            }
            WindowEvent::Resized(size) => {
                let viewport = self.state.resize(size.width, size.height);
                if let Some(graphics) = &self.graphics {
                    graphics.resize(size, viewport);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.state.key_event(
                    map_key(event.physical_key),
                    event.state == ElementState::Pressed,
                );
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.should_close() {
            event_loop.exit();
        } else if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}
