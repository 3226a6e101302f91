//! Entity: a node in the scene tree
//!
//! Entities own their sub-entities by value and carry both a local and a
//! global transform. Transform edits are pushed eagerly to every
//! descendant, depth-first pre-order, so a descendant's global update is
//! always computed after its parent's in the same call chain. The
//! `*_parent` family applies a parent's delta to the global transform only,
//! since the sub-entity itself did not move relative to its parent.

use crate::foundation::math::{Transform, Vec3, DEG_TO_RAD};
use super::components::{RenderComponent, RenderKind};
use crate::scripting::CustomComponent;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique entity identifier
///
/// Assigned from a process-wide monotonically increasing counter; never
/// reused for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Allocate the next entity id from the process-wide counter
    pub fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Token identifying the live game context an entity is attached to
///
/// A weak id-based reference, never an owning pointer. The activation walk
/// hands it out; deactivation clears it on recursed sub-entities because
/// control over their activation no longer flows from an active ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextRef(u32);

impl ContextRef {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// A node in the scene's hierarchical tree
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    tag: String,
    prefab: String,
    enabled: bool,
    context: Option<ContextRef>,
    local_transform: Transform,
    global_transform: Transform,
    render_components: Vec<RenderComponent>,
    custom_components: Vec<CustomComponent>,
    sub_entities: Vec<Entity>,
}

impl Entity {
    /// Create a new entity with a freshly assigned id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::next(),
            name: name.into(),
            tag: String::new(),
            prefab: String::new(),
            enabled: true,
            context: None,
            local_transform: Transform::identity(),
            global_transform: Transform::identity(),
            render_components: Vec::new(),
            custom_components: Vec::new(),
            sub_entities: Vec::new(),
        }
    }

    /// The entity's process-unique id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's name (not required to be unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Classification tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set the classification tag
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// Name of the prefab this entity was instantiated from, empty if none
    pub fn prefab(&self) -> &str {
        &self.prefab
    }

    /// Record the originating prefab
    pub fn set_prefab(&mut self, prefab: impl Into<String>) {
        self.prefab = prefab.into();
    }

    /// Whether the entity participates in activation
    ///
    /// A disabled entity stays inactive even when its parent activates.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the entity
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// The live-context back-reference, if attached
    pub fn context_ref(&self) -> Option<ContextRef> {
        self.context
    }

    pub(crate) fn set_context_ref(&mut self, context: Option<ContextRef>) {
        self.context = context;
    }

    /// The transform relative to the immediate parent
    pub fn local_transform(&self) -> &Transform {
        &self.local_transform
    }

    /// The transform composed along the path from the scene root
    ///
    /// Maintained incrementally by the mutation methods; never recomputed
    /// by re-traversing ancestors.
    pub fn global_transform(&self) -> &Transform {
        &self.global_transform
    }

    /// Ordered sub-entities, owned by value
    pub fn sub_entities(&self) -> &[Entity] {
        &self.sub_entities
    }

    /// Mutable access to the sub-entities
    pub fn sub_entities_mut(&mut self) -> &mut [Entity] {
        &mut self.sub_entities
    }

    /// Attach a sub-entity, deriving global transforms for the whole
    /// attached subtree from this node
    pub fn add_sub_entity(&mut self, mut sub: Entity) -> EntityId {
        sub.refresh_global_transforms(&self.global_transform);
        let id = sub.id;
        self.sub_entities.push(sub);
        id
    }

    /// Recompute this subtree's global transforms from a parent's global
    pub(crate) fn refresh_global_transforms(&mut self, parent_global: &Transform) {
        self.global_transform = parent_global.compose(&self.local_transform);
        let global = self.global_transform.clone();
        for sub in &mut self.sub_entities {
            sub.refresh_global_transforms(&global);
        }
    }

    /// Detach and return the sub-entity with the given id, searching the
    /// whole subtree
    ///
    /// The caller is responsible for deactivating first if the node is
    /// currently active (see `Controller::destroy_entity`).
    pub fn remove_sub_entity(&mut self, id: EntityId) -> Option<Entity> {
        if let Some(index) = self.sub_entities.iter().position(|e| e.id == id) {
            return Some(self.sub_entities.remove(index));
        }
        self.sub_entities
            .iter_mut()
            .find_map(|sub| sub.remove_sub_entity(id))
    }

    /// Find a descendant (or this entity itself) by id
    pub fn find(&self, id: EntityId) -> Option<&Entity> {
        if self.id == id {
            return Some(self);
        }
        self.sub_entities.iter().find_map(|sub| sub.find(id))
    }

    /// Mutable variant of [`Entity::find`]
    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.id == id {
            return Some(self);
        }
        self.sub_entities.iter_mut().find_map(|sub| sub.find_mut(id))
    }

    /// Attach a renderable component
    ///
    /// At most one component per kind may live on an entity; a second add
    /// of an occupied kind is rejected with a diagnostic.
    pub fn add_render_component(&mut self, component: RenderComponent) -> bool {
        let kind = component.kind();
        if self.render_components.iter().any(|c| c.kind() == kind) {
            log::warn!(
                "entity '{}' already has a {kind} component; add rejected",
                self.name
            );
            return false;
        }
        self.render_components.push(component);
        true
    }

    /// The component of the given kind, if present
    ///
    /// An absent kind is an empty result, never an error.
    pub fn render_component(&self, kind: RenderKind) -> Option<&RenderComponent> {
        self.render_components.iter().find(|c| c.kind() == kind)
    }

    /// All renderable components on this entity
    pub fn render_components(&self) -> impl Iterator<Item = &RenderComponent> {
        self.render_components.iter()
    }

    /// Mutable iteration over the renderable components
    pub fn render_components_mut(&mut self) -> impl Iterator<Item = &mut RenderComponent> {
        self.render_components.iter_mut()
    }

    /// Remove and return the component of the given kind
    pub fn take_render_component(&mut self, kind: RenderKind) -> Option<RenderComponent> {
        let index = self.render_components.iter().position(|c| c.kind() == kind)?;
        Some(self.render_components.remove(index))
    }

    /// Attach a scripted custom component
    pub fn add_custom_component(&mut self, component: CustomComponent) {
        self.custom_components.push(component);
    }

    /// Scripted custom components on this entity
    pub fn custom_components(&self) -> &[CustomComponent] {
        &self.custom_components
    }

    /// Deep-copy the whole subtree
    ///
    /// Equivalent to `clone()`; the explicit name documents that this
    /// copies sub-entities recursively and assigns fresh ids at every
    /// level.
    pub fn clone_tree(&self) -> Entity {
        self.clone()
    }

    // ---- transform mutation: entity moved itself ------------------------
    //
    // Each method updates both the local and the global transform, then
    // pushes the same delta into every descendant's global transform via
    // the *_parent family. Depth-first pre-order is a correctness
    // requirement: a child's global update must happen after its parent's.

    /// Translate this entity and propagate to all descendants
    pub fn translate(&mut self, delta: Vec3) {
        self.local_transform.translate(delta);
        self.global_transform.translate(delta);
        for sub in &mut self.sub_entities {
            sub.translate_parent(delta);
        }
    }

    /// Rotate this entity by Euler radians and propagate to all descendants
    pub fn rotate(&mut self, euler: Vec3) {
        self.local_transform.rotate(euler);
        self.global_transform.rotate(euler);
        for sub in &mut self.sub_entities {
            sub.rotate_parent(euler);
        }
    }

    /// Rotate this entity by Euler degrees
    ///
    /// Converts to radians once here; the recursion below propagates the
    /// already-converted delta.
    pub fn rotate_degrees(&mut self, euler: Vec3) {
        self.rotate(euler * DEG_TO_RAD);
    }

    /// Scale this entity by a non-uniform factor and propagate
    pub fn scale(&mut self, multiplier: Vec3) {
        self.local_transform.scale(multiplier);
        self.global_transform.scale(multiplier);
        for sub in &mut self.sub_entities {
            sub.scale_parent(multiplier);
        }
    }

    /// Scale uniformly; equivalent to `scale` with a splatted vector
    pub fn scale_uniform(&mut self, scalar: f32) {
        self.scale(Vec3::new(scalar, scalar, scalar));
    }

    /// Scale by three discrete components; equivalent to the vector form
    pub fn scale_xyz(&mut self, x: f32, y: f32, z: f32) {
        self.scale(Vec3::new(x, y, z));
    }

    // ---- transform mutation: parent moved -------------------------------
    //
    // Updates only the global transform; the sub-entity did not move
    // relative to its immediate parent, so its local transform is
    // untouched.

    /// Apply a parent's translation delta to the global transform only
    pub fn translate_parent(&mut self, delta: Vec3) {
        self.global_transform.translate(delta);
        for sub in &mut self.sub_entities {
            sub.translate_parent(delta);
        }
    }

    /// Apply a parent's rotation delta (radians) to the global transform only
    pub fn rotate_parent(&mut self, euler: Vec3) {
        self.global_transform.rotate(euler);
        for sub in &mut self.sub_entities {
            sub.rotate_parent(euler);
        }
    }

    /// Apply a parent's scale delta to the global transform only
    pub fn scale_parent(&mut self, multiplier: Vec3) {
        self.global_transform.scale(multiplier);
        for sub in &mut self.sub_entities {
            sub.scale_parent(multiplier);
        }
    }
}

impl Clone for Entity {
    /// Deep copy with fresh identifiers
    ///
    /// Sub-entities are stored by value, so cloning copies the whole
    /// subtree; every copied node receives a freshly assigned id and every
    /// copied component a fresh handle. Name, tag, prefab origin, the
    /// enabled flag, and both transforms are copied verbatim. The copy is
    /// not attached to a live context.
    fn clone(&self) -> Self {
        Self {
            id: EntityId::next(),
            name: self.name.clone(),
            tag: self.tag.clone(),
            prefab: self.prefab.clone(),
            enabled: self.enabled,
            context: None,
            local_transform: self.local_transform.clone(),
            global_transform: self.global_transform.clone(),
            render_components: self.render_components.iter().map(RenderComponent::duplicate).collect(),
            custom_components: self.custom_components.iter().map(CustomComponent::duplicate).collect(),
            sub_entities: self.sub_entities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn tree() -> Entity {
        let mut root = Entity::new("root");
        let mut child = Entity::new("child");
        child.translate(Vec3::new(1.0, 0.0, 0.0));
        let mut grandchild = Entity::new("grandchild");
        grandchild.translate(Vec3::new(0.0, 1.0, 0.0));
        child.add_sub_entity(grandchild);
        root.add_sub_entity(child);
        root
    }

    #[test]
    fn test_translate_updates_child_global_only() {
        let mut root = tree();
        root.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_relative_eq!(root.global_transform().translation, Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(root.local_transform().translation, Vec3::new(5.0, 0.0, 0.0), epsilon = EPSILON);

        let child = &root.sub_entities()[0];
        assert_relative_eq!(child.local_transform().translation, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(child.global_transform().translation, Vec3::new(6.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_translate_reaches_grandchildren() {
        let mut root = tree();
        root.translate(Vec3::new(0.0, 0.0, 2.0));

        let grandchild = &root.sub_entities()[0].sub_entities()[0];
        assert_relative_eq!(
            grandchild.global_transform().translation,
            Vec3::new(1.0, 1.0, 2.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            grandchild.local_transform().translation,
            Vec3::new(0.0, 1.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotate_degrees_propagates_converted_delta() {
        let mut by_degrees = tree();
        let mut by_radians = tree();

        by_degrees.rotate_degrees(Vec3::new(0.0, 90.0, 0.0));
        by_radians.rotate(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));

        let deg_child = &by_degrees.sub_entities()[0];
        let rad_child = &by_radians.sub_entities()[0];
        let dot = deg_child
            .global_transform()
            .rotation
            .coords
            .dot(&rad_child.global_transform().rotation.coords);
        assert!(dot.abs() > 0.999, "child rotations diverged: dot = {dot}");
    }

    #[test]
    fn test_scale_forms_are_equivalent() {
        let mut uniform = tree();
        let mut vector = tree();
        let mut discrete = tree();

        uniform.scale_uniform(2.0);
        vector.scale(Vec3::new(2.0, 2.0, 2.0));
        discrete.scale_xyz(2.0, 2.0, 2.0);

        for t in [&vector, &discrete] {
            assert_relative_eq!(
                uniform.global_transform().scale,
                t.global_transform().scale,
                epsilon = EPSILON
            );
            assert_relative_eq!(
                uniform.sub_entities()[0].global_transform().scale,
                t.sub_entities()[0].global_transform().scale,
                epsilon = EPSILON
            );
        }
    }

    #[test]
    fn test_scale_leaves_child_local_untouched() {
        let mut root = tree();
        root.scale_uniform(3.0);

        let child = &root.sub_entities()[0];
        assert_relative_eq!(child.local_transform().scale, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(child.global_transform().scale, Vec3::new(3.0, 3.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_clone_assigns_fresh_ids_at_every_level() {
        let mut original = tree();
        original.set_tag("scenery");
        original.add_render_component(RenderComponent::sprite("bark.png"));

        let copy = original.clone_tree();

        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.name(), original.name());
        assert_eq!(copy.tag(), original.tag());
        assert_eq!(copy.sub_entities().len(), original.sub_entities().len());

        let orig_child = &original.sub_entities()[0];
        let copy_child = &copy.sub_entities()[0];
        assert_ne!(copy_child.id(), orig_child.id());
        assert_eq!(copy_child.name(), orig_child.name());
        assert_relative_eq!(
            copy_child.global_transform().translation,
            orig_child.global_transform().translation,
            epsilon = EPSILON
        );

        let orig_grandchild = &orig_child.sub_entities()[0];
        let copy_grandchild = &copy_child.sub_entities()[0];
        assert_ne!(copy_grandchild.id(), orig_grandchild.id());

        // component data is part of the clone contract, with fresh handles
        let orig_sprite = original.render_component(RenderKind::Sprite).unwrap();
        let copy_sprite = copy.render_component(RenderKind::Sprite).unwrap();
        assert_ne!(copy_sprite.id(), orig_sprite.id());
    }

    #[test]
    fn test_duplicate_kind_component_rejected() {
        let mut entity = Entity::new("lamp");
        assert!(entity.add_render_component(RenderComponent::point_light([1.0; 3], 5.0)));
        assert!(!entity.add_render_component(RenderComponent::point_light([0.5; 3], 2.0)));
        assert_eq!(entity.render_components().count(), 1);
    }

    #[test]
    fn test_component_query_of_absent_kind_is_empty() {
        let entity = Entity::new("bare");
        assert!(entity.render_component(RenderKind::Mesh).is_none());
    }

    #[test]
    fn test_add_sub_entity_derives_global_transform() {
        let mut root = Entity::new("root");
        root.translate(Vec3::new(2.0, 0.0, 0.0));

        let mut child = Entity::new("child");
        child.translate(Vec3::new(1.0, 0.0, 0.0));
        root.add_sub_entity(child);

        let child = &root.sub_entities()[0];
        assert_relative_eq!(
            child.global_transform().translation,
            Vec3::new(3.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_remove_sub_entity_searches_subtree() {
        let mut root = tree();
        let grandchild_id = root.sub_entities()[0].sub_entities()[0].id();

        let removed = root.remove_sub_entity(grandchild_id).unwrap();
        assert_eq!(removed.id(), grandchild_id);
        assert!(root.find(grandchild_id).is_none());
    }
}
