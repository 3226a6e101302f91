//! # Scene Engine
//!
//! A modular game engine / editor core built around a hierarchical
//! entity-component scene graph and a render-object pool.
//!
//! ## Features
//!
//! - **Scene Graph**: Entities owning sub-entities by value, with eager
//!   local/global transform propagation
//! - **Activation Lifecycle**: Project → Scene → Chunk → Entity activation
//!   synchronized with the render pool
//! - **Render Abstraction**: Pluggable render backend behind a pool of
//!   kind-partitioned render objects
//! - **Windowing/Input**: GLFW-backed window manager plus a headless
//!   implementation for tests and CI
//! - **Scripting Hooks**: Generic component registration protocol for
//!   user-authored native components
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() {
//!     scene_engine::foundation::logging::init();
//!
//!     let window = Box::new(HeadlessWindow::new(1280, 720));
//!     let backend = Box::new(NullBackend::default());
//!     let gui = Box::new(NullGuiAdaptor);
//!     let mut controller = Controller::new(window, backend, gui);
//!
//!     let mut scene = Scene::new("sandbox");
//!     let mut entity = Entity::new("player");
//!     entity.add_render_component(RenderComponent::sprite("player.png"));
//!     scene.add_entity(entity);
//!
//!     controller.add_scene(scene);
//!     controller.activate_scene("sandbox").unwrap();
//!     controller.start();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod scene;
pub mod render;
pub mod window;
pub mod input;
pub mod gui;
pub mod scripting;
pub mod tasks;
pub mod project;
pub mod assets;

mod control;

pub use control::{Controller, ControllerError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Controller, ControllerError,
        foundation::math::{Vec3, Quat, Mat4, Transform},
        scene::{Entity, EntityId, Scene, Chunk, RenderComponent, RenderKind, ComponentId},
        render::{RenderPool, RenderingEngine, RenderBackend, NullBackend, Camera, ProjectionMode},
        window::{WindowManager, WindowEvent, HeadlessWindow},
        input::{InputManager, InputCode},
        gui::{GuiAdaptor, GuiFrame, NullGuiAdaptor},
        project::{Project, ProjectSettings, ProjectLoader, FileProjectLoader},
    };
}
