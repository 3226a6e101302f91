//! Chunk: a named grouping of root entities within a scene
//!
//! Purely an organizational/lifecycle partition one level below the scene;
//! a chunk has no transform and no components of its own.

use super::entity::{Entity, EntityId};

/// A named grouping of root-level entities
#[derive(Debug, Clone)]
pub struct Chunk {
    name: String,
    entities: Vec<Entity>,
}

impl Chunk {
    /// Create an empty chunk
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// The chunk's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root entities owned by this chunk
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the chunk's entities
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Add a root entity to the chunk
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Remove an entity (or descendant) by id
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(index) = self.entities.iter().position(|e| e.id() == id) {
            return Some(self.entities.remove(index));
        }
        self.entities
            .iter_mut()
            .find_map(|e| e.remove_sub_entity(id))
    }

    /// Find an entity (or descendant) by id
    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find_map(|e| e.find(id))
    }

    /// Mutable variant of [`Chunk::find_entity`]
    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find_map(|e| e.find_mut(id))
    }
}
