//! Project: the outermost loadable unit
//!
//! A project bundles its manifest, project-wide settings, and the map of
//! scene declarations. Loading is delegated to a [`ProjectLoader`];
//! activation applies the settings through the controller.

mod loader;

pub use loader::{
    ProjectLoader, FileProjectLoader,
    ComponentData, EntityData, ChunkData, SceneData,
    build_entity, build_scene,
};

use crate::input::InputSettings;
use crate::render::RenderingSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading project data
#[derive(Error, Debug)]
pub enum ProjectError {
    /// A project file could not be opened
    #[error(transparent)]
    Resource(#[from] crate::foundation::files::ResourceError),

    /// A project file could not be parsed
    #[error("could not parse {path}: {reason}")]
    Parse {
        /// Path of the unparseable file
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// A scene name is not declared by the project
    #[error("scene '{0}' is not declared by the project")]
    UnknownScene(String),
}

/// Project manifest: version, name, engine compatibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name
    pub name: String,
    /// Project version string
    pub version: String,
    /// Engine version the project was authored against
    pub engine_version: String,
}

/// Project-wide settings applied on activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectSettings {
    /// Rendering configuration
    pub rendering: RenderingSettings,
    /// Default input controls
    pub input: InputSettings,
}

/// A loaded project
#[derive(Debug, Clone)]
pub struct Project {
    info: ProjectInfo,
    settings: ProjectSettings,
    scene_declarations: HashMap<String, String>,
    root: PathBuf,
}

impl Project {
    /// Assemble a project from loaded parts
    pub fn new(
        info: ProjectInfo,
        settings: ProjectSettings,
        scene_declarations: HashMap<String, String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            info,
            settings,
            scene_declarations,
            root: root.into(),
        }
    }

    /// The project manifest
    pub fn info(&self) -> &ProjectInfo {
        &self.info
    }

    /// The project settings
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Map from scene name to scene file path (relative to the root)
    pub fn scene_declarations(&self) -> &HashMap<String, String> {
        &self.scene_declarations
    }

    /// Resolve a declared scene's absolute path
    pub fn scene_path(&self, name: &str) -> Result<PathBuf, ProjectError> {
        self.scene_declarations
            .get(name)
            .map(|rel| self.root.join(rel))
            .ok_or_else(|| ProjectError::UnknownScene(name.to_owned()))
    }

    /// The project's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}
