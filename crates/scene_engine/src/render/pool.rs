//! Render pool: the registry of render-ready objects
//!
//! Entries are keyed by component handle and partitioned by
//! [`RenderKind`]. The pool owns neither the transform nor the component;
//! it records (entity id, component id) pairs whose validity is bracketed
//! by the activation protocol. The renderer resolves the owning entity's
//! *current* global transform at frame time, so transform mutations are
//! visible without re-registration.
//!
//! Double-add and removal of an unregistered handle are defined as
//! reported, non-fatal conditions: a diagnostic is logged and the call is
//! skipped, keeping the frame loop robust.

use crate::scene::{ComponentId, EntityId, RenderKind};
use slotmap::{DefaultKey, SlotMap};
use std::collections::HashMap;

/// A registered render object: which entity's transform drives it, and
/// which component it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolEntry {
    /// Entity whose current global transform positions the object
    pub entity: EntityId,
    /// The registered component
    pub component: ComponentId,
}

#[derive(Default)]
struct Bucket {
    entries: SlotMap<DefaultKey, PoolEntry>,
    by_component: HashMap<ComponentId, DefaultKey>,
}

impl Bucket {
    fn add(&mut self, kind: RenderKind, entity: EntityId, component: ComponentId) {
        if self.by_component.contains_key(&component) {
            log::warn!(
                "{kind} component {} is already registered; add skipped",
                component.raw()
            );
            return;
        }
        let key = self.entries.insert(PoolEntry { entity, component });
        self.by_component.insert(component, key);
    }

    fn remove(&mut self, kind: RenderKind, component: ComponentId) {
        match self.by_component.remove(&component) {
            Some(key) => {
                self.entries.remove(key);
            }
            None => {
                log::warn!(
                    "{kind} component {} is not registered; remove skipped",
                    component.raw()
                );
            }
        }
    }
}

/// Registry mapping (entity transform, component) pairs to render-ready
/// objects, partitioned by kind
///
/// A component is registered in at most one slot of its kind at any time.
pub struct RenderPool {
    buckets: [Bucket; 5],
}

impl Default for RenderPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| Bucket::default()),
        }
    }

    /// Register a sprite renderer driven by an entity's global transform
    pub fn add_sprite_renderer(&mut self, entity: EntityId, component: ComponentId) {
        self.register(RenderKind::Sprite, entity, component);
    }

    /// Register a tile renderer
    pub fn add_tile_renderer(&mut self, entity: EntityId, component: ComponentId) {
        self.register(RenderKind::Tile, entity, component);
    }

    /// Register a mesh renderer
    pub fn add_mesh_renderer(&mut self, entity: EntityId, component: ComponentId) {
        self.register(RenderKind::Mesh, entity, component);
    }

    /// Register a point light
    pub fn add_point_light(&mut self, entity: EntityId, component: ComponentId) {
        self.register(RenderKind::PointLight, entity, component);
    }

    /// Register a directional light
    pub fn add_dir_light(&mut self, entity: EntityId, component: ComponentId) {
        self.register(RenderKind::DirLight, entity, component);
    }

    /// Deregister a sprite renderer
    pub fn remove_sprite_renderer(&mut self, component: ComponentId) {
        self.deregister(RenderKind::Sprite, component);
    }

    /// Deregister a tile renderer
    pub fn remove_tile_renderer(&mut self, component: ComponentId) {
        self.deregister(RenderKind::Tile, component);
    }

    /// Deregister a mesh renderer
    pub fn remove_mesh_renderer(&mut self, component: ComponentId) {
        self.deregister(RenderKind::Mesh, component);
    }

    /// Deregister a point light
    pub fn remove_point_light(&mut self, component: ComponentId) {
        self.deregister(RenderKind::PointLight, component);
    }

    /// Deregister a directional light
    pub fn remove_dir_light(&mut self, component: ComponentId) {
        self.deregister(RenderKind::DirLight, component);
    }

    /// Kind-dispatched registration used by the activation walk
    pub fn register(&mut self, kind: RenderKind, entity: EntityId, component: ComponentId) {
        self.buckets[kind.bucket_index()].add(kind, entity, component);
    }

    /// Kind-dispatched deregistration used by the deactivation walk
    pub fn deregister(&mut self, kind: RenderKind, component: ComponentId) {
        self.buckets[kind.bucket_index()].remove(kind, component);
    }

    /// Whether a component is currently registered under its kind
    pub fn contains(&self, kind: RenderKind, component: ComponentId) -> bool {
        self.buckets[kind.bucket_index()]
            .by_component
            .contains_key(&component)
    }

    /// Number of registrations of the given kind
    pub fn len(&self, kind: RenderKind) -> usize {
        self.buckets[kind.bucket_index()].entries.len()
    }

    /// Whether the pool holds no registrations of any kind
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.entries.is_empty())
    }

    /// Iterate the registrations of one kind
    pub fn entries(&self, kind: RenderKind) -> impl Iterator<Item = &PoolEntry> {
        self.buckets[kind.bucket_index()].entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_remove_roundtrips() {
        let mut pool = RenderPool::new();
        let entity = EntityId::next();
        let component = ComponentId::next();

        pool.add_sprite_renderer(entity, component);
        assert_eq!(pool.len(RenderKind::Sprite), 1);
        assert!(pool.contains(RenderKind::Sprite, component));

        pool.remove_sprite_renderer(component);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_double_add_is_skipped() {
        let mut pool = RenderPool::new();
        let entity = EntityId::next();
        let component = ComponentId::next();

        pool.add_mesh_renderer(entity, component);
        pool.add_mesh_renderer(entity, component);
        assert_eq!(pool.len(RenderKind::Mesh), 1);
    }

    #[test]
    fn test_remove_unregistered_is_noop() {
        let mut pool = RenderPool::new();
        pool.remove_point_light(ComponentId::next());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_kinds_are_partitioned() {
        let mut pool = RenderPool::new();
        let entity = EntityId::next();
        let sprite = ComponentId::next();
        let light = ComponentId::next();

        pool.add_sprite_renderer(entity, sprite);
        pool.add_dir_light(entity, light);

        assert_eq!(pool.len(RenderKind::Sprite), 1);
        assert_eq!(pool.len(RenderKind::DirLight), 1);
        assert!(!pool.contains(RenderKind::Sprite, light));
    }

    #[test]
    fn test_entries_expose_owning_entity() {
        let mut pool = RenderPool::new();
        let entity = EntityId::next();
        let component = ComponentId::next();
        pool.add_tile_renderer(entity, component);

        let entry = pool.entries(RenderKind::Tile).next().unwrap();
        assert_eq!(entry.entity, entity);
        assert_eq!(entry.component, component);
    }
}
