//! Rendering engine facade
//!
//! Owns the render pool, the active rendering settings, and the backend.
//! Per frame it resolves every pool entry against the current scene graph
//! (so transform edits made since registration are picked up without
//! re-registration) and hands the assembled packet to the backend.

use crate::foundation::math::Transform;
use crate::project::Project;
use crate::scene::{Entity, EntityId, RenderKind, Scene};
use super::backend::{DrawCall, FramePacket, RenderBackend, RenderError};
use super::camera::Camera;
use super::pool::RenderPool;
use super::settings::{ProjectionMode, RenderingSettings};

/// The scene graphs visible to one frame
///
/// Overlays are entities living outside any scene (the editor GUI sprite);
/// their transforms resolve the same way.
#[derive(Default)]
pub struct FrameContext<'a> {
    /// Active scenes, in activation order
    pub scenes: Vec<&'a Scene>,
    /// Out-of-scene entities registered in the pool
    pub overlays: Vec<&'a Entity>,
}

impl<'a> FrameContext<'a> {
    /// Resolve an entity's current global transform
    pub fn global_transform(&self, id: EntityId) -> Option<&Transform> {
        for scene in &self.scenes {
            if let Some(entity) = scene.find_entity(id) {
                return Some(entity.global_transform());
            }
        }
        for overlay in &self.overlays {
            if let Some(entity) = overlay.find(id) {
                return Some(entity.global_transform());
            }
        }
        None
    }
}

/// Rendering engine: render pool + settings + backend
pub struct RenderingEngine {
    pool: RenderPool,
    settings: RenderingSettings,
    projection_mode: ProjectionMode,
    framebuffer: (u32, u32),
    backend: Box<dyn RenderBackend>,
}

impl RenderingEngine {
    /// Create an engine over a backend with an initial framebuffer size
    pub fn new(backend: Box<dyn RenderBackend>, width: u32, height: u32) -> Self {
        Self {
            pool: RenderPool::new(),
            settings: RenderingSettings::default(),
            projection_mode: ProjectionMode::default(),
            framebuffer: (width, height),
            backend,
        }
    }

    /// The render pool
    pub fn pool(&self) -> &RenderPool {
        &self.pool
    }

    /// Mutable access to the render pool
    ///
    /// Pool mutation is reserved to the activation machinery on the render
    /// thread.
    pub fn pool_mut(&mut self) -> &mut RenderPool {
        &mut self.pool
    }

    /// Apply project-wide rendering settings
    pub fn apply_rendering_settings(&mut self, settings: &RenderingSettings) {
        self.settings = settings.clone();
        self.projection_mode = settings.projection_mode;
        self.backend.apply_settings(&self.settings);
    }

    /// Set the projection mode and framebuffer size together
    pub fn set_projection_mode_and_fb_size(&mut self, mode: ProjectionMode, width: u32, height: u32) {
        self.projection_mode = mode;
        self.set_framebuffer_size(width, height);
    }

    /// React to a framebuffer resize
    pub fn set_framebuffer_size(&mut self, width: u32, height: u32) {
        self.framebuffer = (width, height);
        self.backend.set_framebuffer_size(width, height);
    }

    /// Current framebuffer size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer
    }

    /// Allocate GPU-resident resources scoped to the owning project
    pub fn create_project_resources(&mut self, project: &Project) {
        log::info!("creating GPU resources for project '{}'", project.info().name);
        self.backend.prepare_project(&project.info().name);
    }

    /// Release project-scoped GPU resources
    ///
    /// Deliberately a no-op for now; scene deactivation keeps project
    /// resources alive and project unload is where they would be freed.
    // TODO: free project-scoped backend allocations once project unload
    // carries the resource manifest needed to enumerate them.
    pub fn release_project_resources(&mut self) {
        log::debug!("project resource release requested (currently retained)");
    }

    /// Render one frame against the active camera
    ///
    /// Pool entries whose entity cannot be resolved in the frame context
    /// are skipped with a diagnostic; a half-drawn frame beats a dead
    /// frame loop.
    pub fn render(&mut self, ctx: &FrameContext<'_>, camera: &Camera) -> Result<(), RenderError> {
        let mut draws = Vec::new();
        for kind in RenderKind::ALL {
            for entry in self.pool.entries(kind) {
                match ctx.global_transform(entry.entity) {
                    Some(transform) => draws.push(DrawCall {
                        kind,
                        entity: entry.entity,
                        component: entry.component,
                        model: transform.to_matrix(),
                    }),
                    None => {
                        log::debug!(
                            "pool entry for {kind} component {} has no resolvable entity; skipped",
                            entry.component.raw()
                        );
                    }
                }
            }
        }

        let frame = FramePacket {
            clear_color: self.settings.clear_color,
            view: camera.view_matrix(),
            projection: self.projection_mode,
            framebuffer: self.framebuffer,
            draws,
        };
        self.backend.present(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullBackend;
    use crate::scene::RenderComponent;

    #[test]
    fn test_render_resolves_pool_entries() {
        let mut scene = Scene::new("test");
        let mut entity = Entity::new("quad");
        entity.add_render_component(RenderComponent::sprite("quad.png"));
        let sprite_id = entity.render_component(RenderKind::Sprite).unwrap().id();
        let entity_id = scene.add_entity(entity);

        let mut engine = RenderingEngine::new(Box::new(NullBackend::default()), 640, 480);
        engine.pool_mut().add_sprite_renderer(entity_id, sprite_id);

        let mut camera = Camera::new();
        camera.update();

        let ctx = FrameContext {
            scenes: vec![&scene],
            overlays: vec![],
        };
        engine.render(&ctx, &camera).unwrap();
    }

    #[test]
    fn test_render_skips_unresolvable_entries() {
        let mut engine = RenderingEngine::new(Box::new(NullBackend::default()), 640, 480);
        engine
            .pool_mut()
            .add_sprite_renderer(EntityId::next(), crate::scene::ComponentId::next());

        let camera = Camera::new();
        let ctx = FrameContext::default();
        // entry resolves to nothing; the frame still presents
        engine.render(&ctx, &camera).unwrap();
    }
}
