//! Scene: one loadable/activatable unit of game content

use super::chunk::Chunk;
use super::entity::{Entity, EntityId};

/// A collection of entities and chunks forming one activatable unit
///
/// Only entities within an activated scene may hold render-pool
/// registrations.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    entities: Vec<Entity>,
    chunks: Vec<Chunk>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// The scene's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root entities owned directly by the scene
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the scene's direct root entities
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Chunks owned by the scene
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Mutable access to the scene's chunks
    pub fn chunks_mut(&mut self) -> &mut [Chunk] {
        &mut self.chunks
    }

    /// Add a root entity to the scene
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Add a chunk to the scene
    pub fn add_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Resolve an entity id anywhere in the scene (weak id-based lookup)
    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find_map(|e| e.find(id))
            .or_else(|| self.chunks.iter().find_map(|c| c.find_entity(id)))
    }

    /// Mutable variant of [`Scene::find_entity`]
    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        for entity in &mut self.entities {
            if let Some(found) = entity.find_mut(id) {
                return Some(found);
            }
        }
        self.chunks.iter_mut().find_map(|c| c.find_entity_mut(id))
    }

    /// Remove an entity subtree by id from wherever it lives in the scene
    ///
    /// Destruction must be preceded by deactivation when the scene is
    /// live; the controller's `destroy_entity` handles that ordering.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(index) = self.entities.iter().position(|e| e.id() == id) {
            return Some(self.entities.remove(index));
        }
        for entity in &mut self.entities {
            if let Some(removed) = entity.remove_sub_entity(id) {
                return Some(removed);
            }
        }
        self.chunks.iter_mut().find_map(|c| c.remove_entity(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_entity_searches_chunks() {
        let mut scene = Scene::new("level-1");
        let mut chunk = Chunk::new("north");
        let entity = Entity::new("tree");
        let id = chunk.add_entity(entity);
        scene.add_chunk(chunk);

        assert_eq!(scene.find_entity(id).unwrap().name(), "tree");
    }

    #[test]
    fn test_remove_entity_from_nested_subtree() {
        let mut scene = Scene::new("level-2");
        let mut root = Entity::new("root");
        let child_id = root.add_sub_entity(Entity::new("child"));
        scene.add_entity(root);

        let removed = scene.remove_entity(child_id).unwrap();
        assert_eq!(removed.name(), "child");
        assert!(scene.find_entity(child_id).is_none());
    }
}
