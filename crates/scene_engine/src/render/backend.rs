//! Render backend seam
//!
//! The engine core never talks to a graphics API directly; it assembles a
//! [`FramePacket`] per frame and hands it to a [`RenderBackend`]. Concrete
//! GPU backends (the Vulkan factory lives out-of-tree) implement this
//! trait; [`NullBackend`] is the headless stand-in used by tests, CI, and
//! the editor when no GPU is available.

use crate::foundation::math::Mat4;
use crate::scene::{ComponentId, EntityId, RenderKind};
use super::settings::{ProjectionMode, RenderingSettings};
use thiserror::Error;

/// Errors surfaced by a render backend
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend rejected or lost the frame
    #[error("backend failed to present frame: {0}")]
    Present(String),
}

/// One draw or light command resolved from the render pool
#[derive(Debug, Clone)]
pub struct DrawCall {
    /// Render kind of the object
    pub kind: RenderKind,
    /// Entity whose global transform produced the model matrix
    pub entity: EntityId,
    /// Component being drawn
    pub component: ComponentId,
    /// Model matrix (the entity's current global transform)
    pub model: Mat4,
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone)]
pub struct FramePacket {
    /// Clear color, linear RGBA
    pub clear_color: [f32; 4],
    /// View matrix of the active camera
    pub view: Mat4,
    /// Projection mode in effect
    pub projection: ProjectionMode,
    /// Framebuffer size in pixels
    pub framebuffer: (u32, u32),
    /// Draw and light commands, pool bucket order
    pub draws: Vec<DrawCall>,
}

/// Backend contract consumed by the rendering engine
pub trait RenderBackend {
    /// Apply project-wide rendering settings
    fn apply_settings(&mut self, settings: &RenderingSettings);

    /// React to a framebuffer resize
    fn set_framebuffer_size(&mut self, width: u32, height: u32);

    /// Allocate GPU-resident resources scoped to a project
    fn prepare_project(&mut self, project_name: &str);

    /// Present one frame
    fn present(&mut self, frame: &FramePacket) -> Result<(), RenderError>;
}

/// Backend that draws nothing and records frame statistics
#[derive(Debug, Default)]
pub struct NullBackend {
    frames: u64,
    last_draw_count: usize,
}

impl NullBackend {
    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Draw-call count of the most recent frame
    pub fn last_draw_count(&self) -> usize {
        self.last_draw_count
    }
}

impl RenderBackend for NullBackend {
    fn apply_settings(&mut self, settings: &RenderingSettings) {
        log::debug!("null backend: settings applied ({:?})", settings.projection_mode);
    }

    fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        log::debug!("null backend: framebuffer resized to {width}x{height}");
    }

    fn prepare_project(&mut self, project_name: &str) {
        log::debug!("null backend: prepared resources for project '{project_name}'");
    }

    fn present(&mut self, frame: &FramePacket) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_draw_count = frame.draws.len();
        log::trace!("null backend: frame {} with {} draws", self.frames, frame.draws.len());
        Ok(())
    }
}
