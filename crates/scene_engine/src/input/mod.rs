//! Input management
//!
//! The window layer forwards raw input changes here; game and editor code
//! reads named controls bound through the project's input settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw input codes the window layer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Left mouse button
    MouseLeft,
    /// Right mouse button
    MouseRight,
    /// Middle mouse button
    MouseMiddle,
}

/// One named control and the codes that trigger it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBinding {
    /// Control name referenced by game code (e.g. "jump")
    pub name: String,
    /// Input codes bound to the control
    pub codes: Vec<InputCode>,
}

/// Developer-defined default input controls for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InputSettings {
    /// Control bindings applied on project activation
    pub controls: Vec<ControlBinding>,
}

/// Tracks raw input state and resolves named controls
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: HashMap<String, Vec<InputCode>>,
    pressed: HashMap<InputCode, bool>,
    mouse: (f64, f64),
}

impl InputManager {
    /// Create an input manager with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all bindings and pressed state (previous project's inputs)
    pub fn clear_inputs(&mut self) {
        self.bindings.clear();
        self.pressed.clear();
    }

    /// Apply a project's default control bindings
    pub fn apply_input_settings(&mut self, settings: &InputSettings) {
        for control in &settings.controls {
            self.bindings
                .insert(control.name.clone(), control.codes.clone());
        }
    }

    /// Record a raw input change from the window layer
    pub fn set_input(&mut self, code: InputCode, triggered: bool) {
        self.pressed.insert(code, triggered);
    }

    /// Record the cursor position from the window layer
    pub fn set_mouse_pos(&mut self, x: f64, y: f64) {
        self.mouse = (x, y);
    }

    /// Whether a raw code is currently pressed
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.pressed.get(&code).copied().unwrap_or(false)
    }

    /// Whether any code bound to a named control is pressed
    pub fn is_triggered(&self, control: &str) -> bool {
        self.bindings
            .get(control)
            .is_some_and(|codes| codes.iter().any(|c| self.is_pressed(*c)))
    }

    /// Last reported cursor position
    pub fn mouse_pos(&self) -> (f64, f64) {
        self.mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jump_settings() -> InputSettings {
        InputSettings {
            controls: vec![ControlBinding {
                name: "jump".into(),
                codes: vec![InputCode::Space, InputCode::Up],
            }],
        }
    }

    #[test]
    fn test_control_triggers_on_any_bound_code() {
        let mut input = InputManager::new();
        input.apply_input_settings(&jump_settings());

        assert!(!input.is_triggered("jump"));
        input.set_input(InputCode::Up, true);
        assert!(input.is_triggered("jump"));
    }

    #[test]
    fn test_clear_inputs_drops_previous_project() {
        let mut input = InputManager::new();
        input.apply_input_settings(&jump_settings());
        input.set_input(InputCode::Space, true);

        input.clear_inputs();
        assert!(!input.is_triggered("jump"));
        assert!(!input.is_pressed(InputCode::Space));
    }

    #[test]
    fn test_input_settings_toml_roundtrip() {
        let settings = jump_settings();
        let text = toml::to_string(&settings).unwrap();
        let parsed: InputSettings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
