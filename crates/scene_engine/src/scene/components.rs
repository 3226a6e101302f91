//! Renderable components attached to entities
//!
//! One polymorphic renderable capability with a kind tag replaces per-kind
//! duplication in the activation walk: the walk iterates
//! [`Entity::render_components`](super::Entity::render_components) once and
//! dispatches on [`RenderKind`], while the render pool keeps its per-kind
//! registration API.

use crate::foundation::math::Vec3;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

static NEXT_COMPONENT_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique handle for a component instance
///
/// Used as the registration key in the render pool and by scripting engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(u32);

impl ComponentId {
    /// Allocate the next component id from the process-wide counter
    pub fn next() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Errors raised while initializing a component
#[derive(Error, Debug)]
pub enum ComponentError {
    /// The component references a resource by an empty name
    #[error("{kind} component has no {what}")]
    MissingResource {
        /// Kind of the failing component
        kind: RenderKind,
        /// Which resource reference is missing
        what: &'static str,
    },
}

/// The render-object kinds the pool partitions by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// 2D textured quad
    Sprite,
    /// Tile-grid renderer over a texture atlas
    Tile,
    /// 3D mesh with a material
    Mesh,
    /// Positional light with falloff
    PointLight,
    /// Directional light
    DirLight,
}

impl RenderKind {
    /// All kinds, in bucket order
    pub const ALL: [RenderKind; 5] = [
        RenderKind::Sprite,
        RenderKind::Tile,
        RenderKind::Mesh,
        RenderKind::PointLight,
        RenderKind::DirLight,
    ];

    pub(crate) fn bucket_index(self) -> usize {
        match self {
            RenderKind::Sprite => 0,
            RenderKind::Tile => 1,
            RenderKind::Mesh => 2,
            RenderKind::PointLight => 3,
            RenderKind::DirLight => 4,
        }
    }
}

impl std::fmt::Display for RenderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RenderKind::Sprite => "sprite",
            RenderKind::Tile => "tile",
            RenderKind::Mesh => "mesh",
            RenderKind::PointLight => "point light",
            RenderKind::DirLight => "directional light",
        };
        f.write_str(name)
    }
}

/// Sprite renderer: a textured quad in the scene
#[derive(Debug)]
pub struct SpriteRenderer {
    id: ComponentId,
    /// Name of the texture resource to draw
    pub texture: String,
    initialized: bool,
}

impl SpriteRenderer {
    /// Create a sprite renderer referencing a texture by name
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            id: ComponentId::next(),
            texture: texture.into(),
            initialized: false,
        }
    }
}

/// Tile renderer: a grid of tiles sourced from a texture atlas
#[derive(Debug)]
pub struct TileRenderer {
    id: ComponentId,
    /// Name of the atlas texture
    pub atlas: String,
    /// Grid dimensions (columns, rows)
    pub grid: (u32, u32),
    initialized: bool,
}

impl TileRenderer {
    /// Create a tile renderer over an atlas with the given grid
    pub fn new(atlas: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self {
            id: ComponentId::next(),
            atlas: atlas.into(),
            grid: (columns, rows),
            initialized: false,
        }
    }
}

/// Mesh renderer: a 3D mesh drawn with a material
#[derive(Debug)]
pub struct MeshRenderer {
    id: ComponentId,
    /// Name of the mesh resource
    pub mesh: String,
    /// Name of the material resource
    pub material: String,
    initialized: bool,
}

impl MeshRenderer {
    /// Create a mesh renderer from mesh and material resource names
    pub fn new(mesh: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            id: ComponentId::next(),
            mesh: mesh.into(),
            material: material.into(),
            initialized: false,
        }
    }
}

/// Point light with color and range
#[derive(Debug)]
pub struct PointLight {
    id: ComponentId,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Falloff range in world units
    pub range: f32,
}

impl PointLight {
    /// Create a point light
    pub fn new(color: [f32; 3], range: f32) -> Self {
        Self {
            id: ComponentId::next(),
            color,
            range,
        }
    }
}

/// Directional light with color and direction
#[derive(Debug)]
pub struct DirLight {
    id: ComponentId,
    /// Linear RGB color
    pub color: [f32; 3],
    /// World-space direction the light travels in
    pub direction: Vec3,
}

impl DirLight {
    /// Create a directional light
    pub fn new(color: [f32; 3], direction: Vec3) -> Self {
        Self {
            id: ComponentId::next(),
            color,
            direction,
        }
    }
}

/// A renderable component of any kind
///
/// At most one instance per kind lives on an entity. Each instance carries
/// a process-unique [`ComponentId`] that the render pool registers under.
#[derive(Debug)]
pub enum RenderComponent {
    /// Sprite renderer
    Sprite(SpriteRenderer),
    /// Tile renderer
    Tile(TileRenderer),
    /// Mesh renderer
    Mesh(MeshRenderer),
    /// Point light
    PointLight(PointLight),
    /// Directional light
    DirLight(DirLight),
}

impl RenderComponent {
    /// Shorthand for a sprite renderer component
    pub fn sprite(texture: impl Into<String>) -> Self {
        RenderComponent::Sprite(SpriteRenderer::new(texture))
    }

    /// Shorthand for a tile renderer component
    pub fn tile(atlas: impl Into<String>, columns: u32, rows: u32) -> Self {
        RenderComponent::Tile(TileRenderer::new(atlas, columns, rows))
    }

    /// Shorthand for a mesh renderer component
    pub fn mesh(mesh: impl Into<String>, material: impl Into<String>) -> Self {
        RenderComponent::Mesh(MeshRenderer::new(mesh, material))
    }

    /// Shorthand for a point light component
    pub fn point_light(color: [f32; 3], range: f32) -> Self {
        RenderComponent::PointLight(PointLight::new(color, range))
    }

    /// Shorthand for a directional light component
    pub fn dir_light(color: [f32; 3], direction: Vec3) -> Self {
        RenderComponent::DirLight(DirLight::new(color, direction))
    }

    /// The kind tag this component registers under
    pub fn kind(&self) -> RenderKind {
        match self {
            RenderComponent::Sprite(_) => RenderKind::Sprite,
            RenderComponent::Tile(_) => RenderKind::Tile,
            RenderComponent::Mesh(_) => RenderKind::Mesh,
            RenderComponent::PointLight(_) => RenderKind::PointLight,
            RenderComponent::DirLight(_) => RenderKind::DirLight,
        }
    }

    /// The component's registration handle
    pub fn id(&self) -> ComponentId {
        match self {
            RenderComponent::Sprite(c) => c.id,
            RenderComponent::Tile(c) => c.id,
            RenderComponent::Mesh(c) => c.id,
            RenderComponent::PointLight(c) => c.id,
            RenderComponent::DirLight(c) => c.id,
        }
    }

    /// Initialization hook invoked during activation, before pool
    /// registration
    ///
    /// A failure here is reported by the activation walk and the component
    /// is skipped; the walk continues with siblings and descendants.
    pub fn init(&mut self) -> Result<(), ComponentError> {
        match self {
            RenderComponent::Sprite(c) => {
                if c.texture.is_empty() {
                    return Err(ComponentError::MissingResource {
                        kind: RenderKind::Sprite,
                        what: "texture",
                    });
                }
                c.initialized = true;
            }
            RenderComponent::Tile(c) => {
                if c.atlas.is_empty() || c.grid.0 == 0 || c.grid.1 == 0 {
                    return Err(ComponentError::MissingResource {
                        kind: RenderKind::Tile,
                        what: "atlas grid",
                    });
                }
                c.initialized = true;
            }
            RenderComponent::Mesh(c) => {
                if c.mesh.is_empty() {
                    return Err(ComponentError::MissingResource {
                        kind: RenderKind::Mesh,
                        what: "mesh",
                    });
                }
                c.initialized = true;
            }
            RenderComponent::PointLight(_) => {}
            RenderComponent::DirLight(c) => {
                if c.direction.magnitude() > 0.0 {
                    c.direction = c.direction.normalize();
                }
            }
        }
        Ok(())
    }

    /// Whether the initialization hook has run successfully
    pub fn is_initialized(&self) -> bool {
        match self {
            RenderComponent::Sprite(c) => c.initialized,
            RenderComponent::Tile(c) => c.initialized,
            RenderComponent::Mesh(c) => c.initialized,
            // lights have no deferred resources to bind
            RenderComponent::PointLight(_) | RenderComponent::DirLight(_) => true,
        }
    }

    /// Deep-copy this component with a freshly assigned [`ComponentId`]
    ///
    /// Used by [`Entity`](super::Entity) tree cloning; the copy starts
    /// uninitialized and unregistered.
    pub fn duplicate(&self) -> Self {
        match self {
            RenderComponent::Sprite(c) => RenderComponent::sprite(c.texture.clone()),
            RenderComponent::Tile(c) => RenderComponent::tile(c.atlas.clone(), c.grid.0, c.grid.1),
            RenderComponent::Mesh(c) => RenderComponent::mesh(c.mesh.clone(), c.material.clone()),
            RenderComponent::PointLight(c) => RenderComponent::point_light(c.color, c.range),
            RenderComponent::DirLight(c) => RenderComponent::dir_light(c.color, c.direction),
        }
    }
}
