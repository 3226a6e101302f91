//! Rendering abstraction: render pool, engine facade, backend seam
//!
//! The [`RenderPool`] is the registry bridging scene entities to the
//! rendering engine. The activation machinery is its only writer, and only
//! on the render thread. Backend internals (Vulkan et al.) live behind the
//! [`RenderBackend`] trait; a [`NullBackend`] ships for tests and headless
//! runs.

mod pool;
mod backend;
mod engine;
mod camera;
mod texture;
mod settings;
mod factory;

pub use pool::{RenderPool, PoolEntry};
pub use backend::{RenderBackend, NullBackend, RenderError, FramePacket, DrawCall};
pub use engine::{RenderingEngine, FrameContext};
pub use camera::Camera;
pub use texture::{Texture, TextureError};
pub use settings::{RenderingSettings, ProjectionMode};
pub use factory::{RenderingFactory, NullRenderingFactory};
