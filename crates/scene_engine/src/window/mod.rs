//! Window management
//!
//! The controller consumes windows through the [`WindowManager`] trait:
//! one `update` per frame (present + poll, returning the close signal) and
//! a drained queue of [`WindowEvent`]s. [`GlfwWindowManager`] is the real
//! backend; [`HeadlessWindow`] drives tests and CI.

mod glfw_backend;
mod headless;

pub use glfw_backend::GlfwWindowManager;
pub use headless::HeadlessWindow;

use crate::input::InputCode;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library failed to initialize
    #[error("window system initialization failed")]
    InitializationFailed,

    /// The window itself could not be created
    #[error("window creation failed")]
    CreationFailed,
}

/// Events a window backend reports to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// The user asked the window to close
    CloseRequested,
    /// The framebuffer was resized
    FramebufferResize(u32, u32),
    /// A raw input changed state
    Input {
        /// The input that changed
        code: InputCode,
        /// New pressed state
        pressed: bool,
    },
    /// The cursor moved
    MousePos(f64, f64),
}

/// Contract between the controller's frame loop and a window backend
pub trait WindowManager {
    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);

    /// Present the previous frame and poll for new events
    ///
    /// Returns true when the window requested close; the frame loop exits
    /// early without rendering.
    fn update(&mut self) -> bool;

    /// Take the events collected by the last `update`
    fn drain_events(&mut self) -> Vec<WindowEvent>;

    /// Change the window title
    fn set_title(&mut self, title: &str);
}
