//! Rendering settings applied on project activation

use serde::{Deserialize, Serialize};

/// Camera projection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectionMode {
    /// Perspective projection
    Perspective,
    /// Orthographic projection
    #[default]
    Orthographic,
}

/// Project-wide rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderingSettings {
    /// Projection mode for the default camera
    pub projection_mode: ProjectionMode,

    /// Clear color, linear RGBA
    pub clear_color: [f32; 4],

    /// Whether the backend should wait for vertical sync
    pub vsync: bool,
}

impl Default for RenderingSettings {
    fn default() -> Self {
        Self {
            projection_mode: ProjectionMode::Orthographic,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vsync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml_roundtrip() {
        let settings = RenderingSettings {
            projection_mode: ProjectionMode::Perspective,
            clear_color: [0.1, 0.2, 0.3, 1.0],
            vsync: false,
        };

        let text = toml::to_string(&settings).unwrap();
        let parsed: RenderingSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
