//! Scripting hooks: user-authored native components
//!
//! The engine does not interpret scripts itself; each script component
//! type is owned by a [`ScriptEngine`] that receives add/remove
//! notifications when entities activate and deactivate. Engines are
//! discovered through a name → factory registry, so a game links its
//! component engines in without the core knowing their types.

use crate::scene::{ComponentId, EntityId};
use std::collections::HashMap;

/// A user-authored component attached to an entity
///
/// The payload lives inside the owning script engine; the entity carries
/// only the identity needed for the registration protocol.
#[derive(Debug, Clone)]
pub struct CustomComponent {
    id: ComponentId,
    /// Instance name
    pub name: String,
    /// Component type name, matched against engine registrations
    pub type_name: String,
}

impl CustomComponent {
    /// Create a custom component instance
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    /// The component's registration handle
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Copy with a freshly assigned handle, for entity tree cloning
    pub fn duplicate(&self) -> Self {
        Self::new(self.name.clone(), self.type_name.clone())
    }
}

/// One scripting engine owning all components of a single type
pub trait ScriptEngine {
    /// The component type name this engine owns
    fn component_type_name(&self) -> &str;

    /// A component of this engine's type was activated on an entity
    fn add_component(&mut self, entity: EntityId, component: &CustomComponent);

    /// A previously added component was deactivated
    fn remove_component(&mut self, component: ComponentId);

    /// One-time initialization when the pool starts
    fn init(&mut self) {}

    /// Per-frame update
    fn update(&mut self) {}
}

/// Factory creating a script engine instance
pub type ScriptEngineFactory = fn() -> Box<dyn ScriptEngine>;

/// Registry mapping component type names to engine factories
#[derive(Default)]
pub struct ScriptEngineRegistry {
    factories: HashMap<String, ScriptEngineFactory>,
}

impl ScriptEngineRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a component type name to an engine factory
    pub fn register(&mut self, type_name: impl Into<String>, factory: ScriptEngineFactory) {
        self.factories.insert(type_name.into(), factory);
    }

    /// Instantiate the engine for a type name, if registered
    pub fn instantiate(&self, type_name: &str) -> Option<Box<dyn ScriptEngine>> {
        self.factories.get(type_name).map(|f| f())
    }

    /// Registered type names
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

/// The set of live script engines, notified by the activation walk
#[derive(Default)]
pub struct ScriptPool {
    engines: Vec<Box<dyn ScriptEngine>>,
    by_type: HashMap<String, usize>,
}

impl ScriptPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool holding one engine per registered factory
    pub fn from_registry(registry: &ScriptEngineRegistry) -> Self {
        let mut pool = Self::new();
        for type_name in registry.type_names() {
            if let Some(engine) = registry.instantiate(type_name) {
                pool.add_engine(engine);
            }
        }
        pool
    }

    /// Add a script engine to the pool
    pub fn add_engine(&mut self, mut engine: Box<dyn ScriptEngine>) {
        let type_name = engine.component_type_name().to_owned();
        engine.init();
        self.by_type.insert(type_name, self.engines.len());
        self.engines.push(engine);
    }

    /// Route an activated component to its owning engine
    ///
    /// An unknown type name is reported and skipped; a missing engine must
    /// not break the activation walk.
    pub fn attach(&mut self, entity: EntityId, component: &CustomComponent) {
        match self.by_type.get(&component.type_name) {
            Some(&index) => self.engines[index].add_component(entity, component),
            None => log::warn!(
                "no script engine for component type '{}'; attach skipped",
                component.type_name
            ),
        }
    }

    /// Route a deactivated component to its owning engine
    pub fn detach(&mut self, component: &CustomComponent) {
        match self.by_type.get(&component.type_name) {
            Some(&index) => self.engines[index].remove_component(component.id()),
            None => log::warn!(
                "no script engine for component type '{}'; detach skipped",
                component.type_name
            ),
        }
    }

    /// Per-frame update of every engine
    pub fn update(&mut self) {
        for engine in &mut self.engines {
            engine.update();
        }
    }
}
