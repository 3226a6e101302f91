//! Rendering factory seam
//!
//! Concrete GPU backends register themselves by implementing this factory;
//! the editor asks it for an engine and for textures without knowing which
//! backend is linked in.

use super::backend::{NullBackend, RenderBackend};
use super::engine::RenderingEngine;
use super::texture::Texture;

/// Factory producing rendering engines and textures for one backend family
pub trait RenderingFactory {
    /// Create a rendering engine sized to the current framebuffer
    fn new_rendering_engine(&self, width: u32, height: u32) -> RenderingEngine;

    /// Create an empty texture owned by this backend family
    fn new_texture(&self, name: &str) -> Texture;
}

/// Factory for the headless null backend
#[derive(Debug, Default)]
pub struct NullRenderingFactory;

impl RenderingFactory for NullRenderingFactory {
    fn new_rendering_engine(&self, width: u32, height: u32) -> RenderingEngine {
        RenderingEngine::new(Box::<NullBackend>::default(), width, height)
    }

    fn new_texture(&self, name: &str) -> Texture {
        Texture::new(name)
    }
}

impl NullRenderingFactory {
    /// Create a boxed backend directly, for callers wiring a controller by
    /// hand
    pub fn new_backend() -> Box<dyn RenderBackend> {
        Box::<NullBackend>::default()
    }
}
