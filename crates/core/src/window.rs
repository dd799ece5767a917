//! Window-side state shared by the resize handler and the render loop.
//!
//! `WindowState` replaces process-wide size globals: the event handler owns
//! one and passes it wherever the framebuffer size, viewport, or close flag
//! is needed. It knows nothing about the windowing backend; key events are
//! translated into [`Key`] by the caller.

use crate::error::CoreError;

/// Default framebuffer width for a new window.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default framebuffer height for a new window.
pub const DEFAULT_HEIGHT: u32 = 720;

/// Framebuffer dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    /// Returns true if either dimension is zero (e.g. a minimized window).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Screen-space rectangle that rendering output is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Viewport covering the whole framebuffer.
    pub fn full(size: FrameSize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: i32::try_from(size.width).unwrap_or(i32::MAX),
            height: i32::try_from(size.height).unwrap_or(i32::MAX),
        }
    }
}

/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Framebuffer size, viewport, and close-request state of one window.
#[derive(Debug, Clone)]
pub struct WindowState {
    size: FrameSize,
    viewport: Viewport,
    escape_held: bool,
    close_requested: bool,
}

impl WindowState {
    /// Creates the state for a window with the given initial framebuffer size.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        let size = FrameSize { width, height };
        if size.is_empty() {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            size,
            viewport: Viewport::full(size),
            escape_held: false,
            close_requested: false,
        })
    }

    /// Current framebuffer size.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Viewport the renderer should use.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Records a framebuffer resize and returns the viewport to apply.
    ///
    /// The viewport always covers the new framebuffer, including a zero-sized
    /// one from a minimized window.
    pub fn resize(&mut self, width: u32, height: u32) -> Viewport {
        self.size = FrameSize { width, height };
        self.viewport = Viewport::full(self.size);
        log::debug!("framebuffer resized to {width}x{height}");
        self.viewport
    }

    /// Tracks key press/release; only the escape key is remembered.
    pub fn key_event(&mut self, key: Key, pressed: bool) {
        if key == Key::Escape {
            self.escape_held = pressed;
        }
    }

    /// Per-frame input check: requests close while escape is held.
    pub fn process_input(&mut self) {
        if self.escape_held && !self.close_requested {
            log::info!("escape pressed, closing window");
            self.close_requested = true;
        }
    }

    /// Handles a close request from the window system.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Returns true once the window has been asked to close.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}

impl Default for WindowState {
    fn default() -> Self {
        let size = FrameSize {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        };
        Self {
            size,
            viewport: Viewport::full(size),
            escape_held: false,
            close_requested: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_1280_by_720() {
        let state = WindowState::default();
        assert_eq!(
            state.size(),
            FrameSize {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(
            state.viewport(),
            Viewport {
                x: 0,
                y: 0,
                width: 1280,
                height: 720
            }
        );
        assert!(!state.should_close());
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            WindowState::new(0, 720),
            Err(CoreError::InvalidDimensions { width: 0, height: 720 })
        ));
        assert!(WindowState::new(1280, 0).is_err());
    }

    #[test]
    fn resize_sets_viewport_to_new_framebuffer() {
        let mut state = WindowState::new(1280, 720).unwrap();
        let vp = state.resize(800, 600);
        assert_eq!(
            vp,
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
        assert_eq!(state.viewport(), vp);
    }

    #[test]
    fn zero_sized_resize_collapses_viewport() {
        let mut state = WindowState::new(1280, 720).unwrap();
        state.resize(640, 480);
        let vp = state.resize(0, 0);
        assert_eq!(
            vp,
            Viewport {
                x: 0,
                y: 0,
                width: 0,
                height: 0
            }
        );
        assert_eq!(state.viewport(), vp);
        assert!(state.size().is_empty());

        let restored = state.resize(1280, 720);
        assert_eq!((restored.width, restored.height), (1280, 720));
    }

    #[test]
    fn escape_sets_close_flag_on_next_input_poll() {
        let mut state = WindowState::default();
        state.key_event(Key::Escape, true);
        assert!(!state.should_close(), "flag must wait for the input poll");
        state.process_input();
        assert!(state.should_close());
    }

    #[test]
    fn other_keys_never_request_close() {
        let mut state = WindowState::default();
        state.key_event(Key::Other, true);
        state.process_input();
        assert!(!state.should_close());
    }

    #[test]
    fn released_escape_does_not_request_close() {
        let mut state = WindowState::default();
        state.key_event(Key::Escape, true);
        state.key_event(Key::Escape, false);
        state.process_input();
        assert!(!state.should_close());
    }

    #[test]
    fn other_key_release_does_not_clear_escape() {
        let mut state = WindowState::default();
        state.key_event(Key::Escape, true);
        state.key_event(Key::Other, false);
        state.process_input();
        assert!(state.should_close());
    }

    #[test]
    fn os_close_request_sets_flag_regardless_of_keys() {
        let mut state = WindowState::default();
        state.key_event(Key::Other, true);
        state.request_close();
        assert!(state.should_close());

        let mut idle = WindowState::default();
        idle.request_close();
        assert!(idle.should_close());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn viewport_after_resize_equals_framebuffer(
                width in 0u32..=8192,
                height in 0u32..=8192,
            ) {
                let mut state = WindowState::new(1280, 720).unwrap();
                let vp = state.resize(width, height);
                prop_assert_eq!(vp.x, 0);
                prop_assert_eq!(vp.y, 0);
                prop_assert_eq!(vp.width as u32, width);
                prop_assert_eq!(vp.height as u32, height);
            }

            #[test]
            fn last_resize_wins(
                sizes in proptest::collection::vec((0u32..=4096, 0u32..=4096), 1..16),
            ) {
                let mut state = WindowState::default();
                for &(w, h) in &sizes {
                    state.resize(w, h);
                }
                let (w, h) = sizes[sizes.len() - 1];
                prop_assert_eq!(state.viewport(), Viewport::full(FrameSize { width: w, height: h }));
            }
        }
    }
}
