//! Scene graph: entities, chunks, scenes, and their components
//!
//! A [`Scene`] is the activatable unit of game content. It owns root
//! [`Entity`] nodes directly and through named [`Chunk`] groupings. Each
//! entity owns its sub-entities by value and carries a local and a global
//! transform; transform edits propagate eagerly down the tree (there is no
//! lazy/dirty-flag recomputation).

mod components;
mod entity;
mod chunk;
mod scene;

pub use components::{
    ComponentId, ComponentError, RenderKind, RenderComponent,
    SpriteRenderer, TileRenderer, MeshRenderer, PointLight, DirLight,
};
pub use entity::{Entity, EntityId, ContextRef};
pub use chunk::Chunk;
pub use scene::Scene;
