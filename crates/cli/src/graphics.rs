//! Window, GL context, and renderer creation.
//!
//! `winit` creates the window; `glutin` opens the platform GL display, picks
//! a config compatible with the window, creates a core-profile context and
//! makes it current on the window surface (described via `glutin-winit`).
//! `glow` then loads its function pointers from the display.

use std::num::NonZeroU32;

use gl_experiment_core::render::{GpuContext, Renderer};
use gl_experiment_core::{AppConfig, ShaderSources, Viewport};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::error::CliError;

/// Everything tied to one open window.
///
/// Fields drop in declaration order: the renderer releases its GL objects
/// while the context is still alive and current.
pub struct Graphics {
    pub renderer: Renderer,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    pub window: Window,
}

impl Graphics {
    /// Opens the window, creates a current GL context, and builds the renderer.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Init` if the window, context, surface, or renderer
    /// cannot be created, or if the driver's GL version is too old.
    #[allow(unsafe_code)]
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &AppConfig,
        sources: &ShaderSources,
    ) -> Result<Self, CliError> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height));

        let window = event_loop
            .create_window(attributes)
            .map_err(|e| CliError::Init(format!("Failed to create window: {e}")))?;

        let raw_window_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| CliError::Init(format!("window has no usable handle: {e}")))?;
        let raw_display_handle = event_loop
            .display_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| CliError::Init(format!("event loop has no usable display: {e}")))?;

        // SAFETY: the display handle belongs to the running event loop, which
        // outlives every GL object created from this display.
        let gl_display =
            unsafe { Display::new(raw_display_handle, api_preference(raw_window_handle)) }
                .map_err(|e| CliError::Init(format!("failed to open GL display: {e}")))?;

        let template = ConfigTemplateBuilder::new()
            .compatible_with_native_window(raw_window_handle)
            .build();
        // SAFETY: the template only refers to the live window handle above.
        let configs = unsafe { gl_display.find_configs(template) }
            .map_err(|e| CliError::Init(format!("failed to query GL configs: {e}")))?;
        let gl_config = least_sampled(configs, |config| config.num_samples())
            .ok_or_else(|| CliError::Init("no GL config matches the window".to_string()))?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(
                config.gl_version.major,
                config.gl_version.minor,
            ))))
            .build(Some(raw_window_handle));

        // SAFETY: the raw window handle belongs to `window`, which outlives
        // the context (see field order of `Graphics`).
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| CliError::Init(format!("failed to create GL context: {e}")))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| CliError::Init(format!("failed to describe window surface: {e}")))?;
        // SAFETY: same handle as above; the surface is dropped before the window.
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| CliError::Init(format!("failed to create window surface: {e}")))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| CliError::Init(format!("failed to make GL context current: {e}")))?;

        if config.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("could not enable vsync: {e}");
            }
        }

        // SAFETY: the context is current on this thread, so the display
        // returns function pointers valid for it.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|symbol| {
                gl_display.get_proc_address(symbol).cast()
            })
        };
        let gpu = GpuContext::new(gl, config.gl_version)
            .map_err(|e| CliError::Init(format!("Failed to initialize OpenGL: {e}")))?;

        let renderer = Renderer::new(gpu, sources)?;
        if !renderer.report().is_clean() {
            log::warn!(
                "continuing with {} shader diagnostic(s); rendering may be incomplete",
                renderer.report().diagnostics().len()
            );
        }

        Ok(Self {
            renderer,
            surface,
            context,
            window,
        })
    }

    /// Resizes the window surface and applies the viewport.
    ///
    /// Zero-sized framebuffers (minimized windows) leave the surface alone;
    /// the viewport is applied either way.
    pub fn resize(&self, size: PhysicalSize<u32>, viewport: Viewport) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
        self.renderer.set_viewport(viewport);
    }

    /// Presents the back buffer.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Runtime` if the swap fails.
    pub fn present(&self) -> Result<(), CliError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| CliError::Runtime(format!("failed to present frame: {e}")))
    }
}

/// Display backend for the current platform.
#[cfg(target_os = "windows")]
fn api_preference(raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Wgl(Some(raw_window_handle))
}

#[cfg(target_os = "macos")]
fn api_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn api_preference(_raw_window_handle: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

/// Picks the config with the fewest samples, matching a default window
/// framebuffer. `None` if there is nothing to pick from.
fn least_sampled<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.min_by_key(|config| samples(config))
}
