//! Project and scene loading
//!
//! Developer-authored files on disk: a TOML manifest (`project.toml`),
//! TOML settings (`settings.toml`), a TOML scene declaration map
//! (`scenes.toml`), and one RON file per scene or entity prefab. The data
//! model here is purely declarative; runtime ids are assigned while
//! building the live tree.

use super::{Project, ProjectError, ProjectInfo, ProjectSettings};
use crate::foundation::files::load_text_file;
use crate::foundation::math::Vec3;
use crate::scene::{Chunk, Entity, RenderComponent, Scene};
use crate::scripting::CustomComponent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Loads developer-written project files into the engine
pub trait ProjectLoader {
    /// Load all properties of the project, but no scene
    fn load_project(&self, path: &Path) -> Result<Project, ProjectError>;

    /// Load the manifest: version, name, engine compatibility
    fn load_project_manifest(&self, path: &Path) -> Result<ProjectInfo, ProjectError>;

    /// Load the scene declaration map (scene name → scene path)
    fn load_scene_declarations(&self, path: &Path) -> Result<HashMap<String, String>, ProjectError>;

    /// Load settings: rendering and input configuration
    fn load_project_settings(&self, path: &Path) -> Result<ProjectSettings, ProjectError>;

    /// Load a scene declared by the project
    fn load_scene(&self, project: &Project, name: &str) -> Result<Scene, ProjectError>;

    /// Load an entity prefab usable for repeated instantiation
    fn load_entity_prefab(&self, path: &Path) -> Result<Entity, ProjectError>;
}

/// Declarative form of a renderable component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ComponentData {
    /// Sprite renderer
    Sprite {
        /// Texture resource name
        texture: String,
    },
    /// Tile renderer
    Tile {
        /// Atlas texture name
        atlas: String,
        /// Grid columns
        columns: u32,
        /// Grid rows
        rows: u32,
    },
    /// Mesh renderer
    Mesh {
        /// Mesh resource name
        mesh: String,
        /// Material resource name
        material: String,
    },
    /// Point light
    PointLight {
        /// Linear RGB color
        color: [f32; 3],
        /// Falloff range
        range: f32,
    },
    /// Directional light
    DirLight {
        /// Linear RGB color
        color: [f32; 3],
        /// World-space direction
        direction: [f32; 3],
    },
    /// Scripted component owned by a registered script engine
    Custom {
        /// Instance name
        name: String,
        /// Component type name
        type_name: String,
    },
}

fn default_enabled() -> bool {
    true
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Declarative form of an entity subtree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityData {
    /// Entity name
    pub name: String,
    /// Classification tag
    #[serde(default)]
    pub tag: String,
    /// Originating prefab, empty if none
    #[serde(default)]
    pub prefab: String,
    /// Whether the entity participates in activation
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Local translation
    #[serde(default)]
    pub translation: [f32; 3],
    /// Local rotation, Euler degrees
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
    /// Local scale
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    /// Components on this entity
    #[serde(default)]
    pub components: Vec<ComponentData>,
    /// Sub-entities
    #[serde(default)]
    pub children: Vec<EntityData>,
}

/// Declarative form of a chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkData {
    /// Chunk name
    pub name: String,
    /// Root entities owned by the chunk
    #[serde(default)]
    pub entities: Vec<EntityData>,
}

/// Declarative form of a scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneData {
    /// Scene name
    pub name: String,
    /// Root entities owned directly by the scene
    #[serde(default)]
    pub entities: Vec<EntityData>,
    /// Chunks
    #[serde(default)]
    pub chunks: Vec<ChunkData>,
}

#[derive(Debug, Deserialize)]
struct SceneDeclarations {
    scenes: HashMap<String, String>,
}

/// Build a live entity tree from its declarative form
///
/// Runtime ids are assigned here; the data file never carries them.
pub fn build_entity(data: &EntityData) -> Entity {
    let mut entity = Entity::new(&data.name);
    entity.set_tag(&data.tag);
    entity.set_prefab(&data.prefab);
    entity.set_enabled(data.enabled);

    entity.translate(Vec3::from(data.translation));
    entity.rotate_degrees(Vec3::from(data.rotation_degrees));
    entity.scale(Vec3::from(data.scale));

    for component in &data.components {
        match component {
            ComponentData::Sprite { texture } => {
                entity.add_render_component(RenderComponent::sprite(texture.clone()));
            }
            ComponentData::Tile { atlas, columns, rows } => {
                entity.add_render_component(RenderComponent::tile(atlas.clone(), *columns, *rows));
            }
            ComponentData::Mesh { mesh, material } => {
                entity.add_render_component(RenderComponent::mesh(mesh.clone(), material.clone()));
            }
            ComponentData::PointLight { color, range } => {
                entity.add_render_component(RenderComponent::point_light(*color, *range));
            }
            ComponentData::DirLight { color, direction } => {
                entity.add_render_component(RenderComponent::dir_light(*color, Vec3::from(*direction)));
            }
            ComponentData::Custom { name, type_name } => {
                entity.add_custom_component(CustomComponent::new(name.clone(), type_name.clone()));
            }
        }
    }

    for child in &data.children {
        entity.add_sub_entity(build_entity(child));
    }
    entity
}

/// Build a live scene from its declarative form
pub fn build_scene(data: &SceneData) -> Scene {
    let mut scene = Scene::new(&data.name);
    for entity in &data.entities {
        scene.add_entity(build_entity(entity));
    }
    for chunk_data in &data.chunks {
        let mut chunk = Chunk::new(&chunk_data.name);
        for entity in &chunk_data.entities {
            chunk.add_entity(build_entity(entity));
        }
        scene.add_chunk(chunk);
    }
    scene
}

/// File-backed project loader: TOML manifests, RON scene data
#[derive(Debug, Default)]
pub struct FileProjectLoader;

impl FileProjectLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }

    fn parse_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ProjectError> {
        let text = load_text_file(path)?;
        toml::from_str(&text).map_err(|e| ProjectError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn parse_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ProjectError> {
        let text = load_text_file(path)?;
        ron::from_str(&text).map_err(|e| ProjectError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl ProjectLoader for FileProjectLoader {
    fn load_project(&self, path: &Path) -> Result<Project, ProjectError> {
        let info = self.load_project_manifest(path)?;
        let settings = self.load_project_settings(path)?;
        let scenes = self.load_scene_declarations(path)?;
        log::info!("loaded project '{}' with {} declared scenes", info.name, scenes.len());
        Ok(Project::new(info, settings, scenes, path))
    }

    fn load_project_manifest(&self, path: &Path) -> Result<ProjectInfo, ProjectError> {
        Self::parse_toml(&path.join("project.toml"))
    }

    fn load_scene_declarations(&self, path: &Path) -> Result<HashMap<String, String>, ProjectError> {
        let declarations: SceneDeclarations = Self::parse_toml(&path.join("scenes.toml"))?;
        Ok(declarations.scenes)
    }

    fn load_project_settings(&self, path: &Path) -> Result<ProjectSettings, ProjectError> {
        Self::parse_toml(&path.join("settings.toml"))
    }

    fn load_scene(&self, project: &Project, name: &str) -> Result<Scene, ProjectError> {
        let scene_path = project.scene_path(name)?;
        let data: SceneData = Self::parse_ron(&scene_path)?;
        Ok(build_scene(&data))
    }

    fn load_entity_prefab(&self, path: &Path) -> Result<Entity, ProjectError> {
        let data: EntityData = Self::parse_ron(path)?;
        Ok(build_entity(&data))
    }
}
