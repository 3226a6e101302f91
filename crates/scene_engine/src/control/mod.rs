//! Controller: the orchestrator driving the scene lifecycle
//!
//! Reacts to project/scene/chunk/entity lifecycle events, walks the entity
//! tree, and keeps the render pool consistent with the logical scene
//! graph. Every method that touches the pool or the tree must run on the
//! thread that created the controller — pool entries are GPU-resource-
//! adjacent, so this is a hard precondition enforced with a logged
//! diagnostic (and a debug assertion), not a recommendation.
//!
//! The activation walk never aborts partway through a subtree: a component
//! that fails to initialize is reported and skipped, because partial
//! activation beats leaving a whole subtree uninitialized.

use crate::gui::GuiAdaptor;
use crate::input::InputManager;
use crate::project::Project;
use crate::render::{
    Camera, FrameContext, ProjectionMode, RenderBackend, RenderPool, RenderingEngine, Texture,
};
use crate::scene::{Chunk, ContextRef, Entity, EntityId, RenderComponent, RenderKind, Scene};
use crate::scripting::ScriptPool;
use crate::window::{WindowEvent, WindowManager};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::ThreadId;
use thiserror::Error;

static NEXT_CONTEXT: AtomicU32 = AtomicU32::new(1);

/// Errors reported by controller operations
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The named scene has not been loaded into the controller
    #[error("scene '{0}' has not been loaded")]
    UnknownScene(String),

    /// The operation was invoked off the render-context thread
    #[error("operation must run on the render-context thread")]
    WrongThread,
}

/// The core orchestrator: owns the window, rendering engine, input, GUI
/// surface, script pool, and the loaded project/scene set
pub struct Controller {
    window: Box<dyn WindowManager>,
    rendering_engine: RenderingEngine,
    input: InputManager,
    gui: Box<dyn GuiAdaptor>,
    script_pool: ScriptPool,

    project: Option<Project>,
    scenes: HashMap<String, Scene>,
    active_scenes: Vec<String>,

    // the editor GUI surface: a sprite entity living outside any scene
    gui_entity: Entity,
    gui_texture: Texture,

    default_camera: Camera,
    camera_override: Option<Camera>,

    running: bool,
    render_thread: ThreadId,
    context: ContextRef,
}

impl Controller {
    /// Create a controller on the current thread
    ///
    /// The creating thread becomes the render-context thread; all
    /// lifecycle operations must happen on it.
    pub fn new(
        window: Box<dyn WindowManager>,
        backend: Box<dyn RenderBackend>,
        gui: Box<dyn GuiAdaptor>,
    ) -> Self {
        let (fb_width, fb_height) = window.framebuffer_size();

        let mut rendering_engine = RenderingEngine::new(backend, fb_width, fb_height);
        rendering_engine.set_projection_mode_and_fb_size(
            ProjectionMode::Orthographic,
            fb_width,
            fb_height,
        );

        // the GUI draws as a sprite just in front of the scene
        let gui_texture = Texture::new("gui");
        let mut gui_entity = Entity::new("GUI");
        let gui_sprite = RenderComponent::sprite("gui");
        let gui_sprite_id = gui_sprite.id();
        gui_entity.add_render_component(gui_sprite);
        gui_entity.translate(crate::foundation::math::Vec3::new(0.0, 0.0, 1.0));
        rendering_engine
            .pool_mut()
            .add_sprite_renderer(gui_entity.id(), gui_sprite_id);

        Self {
            window,
            rendering_engine,
            input: InputManager::new(),
            gui,
            script_pool: ScriptPool::new(),
            project: None,
            scenes: HashMap::new(),
            active_scenes: Vec::new(),
            gui_entity,
            gui_texture,
            default_camera: Camera::new(),
            camera_override: None,
            running: false,
            render_thread: std::thread::current().id(),
            context: ContextRef::new(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed)),
        }
    }

    fn assert_render_thread(&self, operation: &str) -> bool {
        let on_render_thread = std::thread::current().id() == self.render_thread;
        if !on_render_thread {
            log::error!("{operation} must run on the render-context thread; call ignored");
            debug_assert!(on_render_thread, "{operation} called off the render thread");
        }
        on_render_thread
    }

    // ---- project lifecycle ----------------------------------------------

    /// Make a project the active one, deactivating any previous project
    ///
    /// Exactly one project may be active at a time.
    pub fn set_active_project(&mut self, project: Project) {
        if !self.assert_render_thread("set_active_project") {
            return;
        }
        if let Some(previous) = self.project.take() {
            self.on_project_deactivated(&previous);
        }
        self.on_project_activated(&project);
        self.project = Some(project);
    }

    /// The active project, if any
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    // Called upon a project being activated (successful load)
    fn on_project_activated(&mut self, project: &Project) {
        log::info!("activating project '{}'", project.info().name);

        self.rendering_engine
            .apply_rendering_settings(&project.settings().rendering);

        // clear inputs from previous projects, then apply the defaults
        self.input.clear_inputs();
        self.input.apply_input_settings(&project.settings().input);
    }

    // Called upon a project being deactivated (a new project is loaded)
    fn on_project_deactivated(&mut self, project: &Project) {
        log::info!("deactivating project '{}'", project.info().name);
        self.input.clear_inputs();
        // GPU resource release stays deferred; see release_project_resources
        self.rendering_engine.release_project_resources();
    }

    // ---- scene lifecycle ------------------------------------------------

    /// Register a loaded scene with the controller
    pub fn add_scene(&mut self, scene: Scene) {
        self.scenes.insert(scene.name().to_owned(), scene);
    }

    /// A loaded scene by name
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Mutable access to a loaded scene
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Names of the currently active scenes, in activation order
    pub fn active_scenes(&self) -> &[String] {
        &self.active_scenes
    }

    /// Activate a loaded scene by name
    ///
    /// Creates project-scoped GPU resources, then activates every enabled
    /// entity in the scene, chunks included.
    pub fn activate_scene(&mut self, name: &str) -> Result<(), ControllerError> {
        if !self.assert_render_thread("activate_scene") {
            return Err(ControllerError::WrongThread);
        }
        if self.active_scenes.iter().any(|s| s == name) {
            log::warn!("scene '{name}' is already active; activation skipped");
            return Ok(());
        }

        // GPU memory for the project's resources must exist before any
        // render object references them
        if let Some(project) = &self.project {
            self.rendering_engine.create_project_resources(project);
        }

        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| ControllerError::UnknownScene(name.to_owned()))?;
        activate_scene_graph(
            scene,
            self.rendering_engine.pool_mut(),
            &mut self.script_pool,
            self.context,
        );

        self.active_scenes.push(name.to_owned());
        Ok(())
    }

    /// Deactivate an active scene by name
    ///
    /// Project-level GPU resources are not freed here; that is scoped to
    /// project deactivation.
    pub fn deactivate_scene(&mut self, name: &str) -> Result<(), ControllerError> {
        if !self.assert_render_thread("deactivate_scene") {
            return Err(ControllerError::WrongThread);
        }
        let Some(position) = self.active_scenes.iter().position(|s| s == name) else {
            log::warn!("scene '{name}' is not active; deactivation skipped");
            return Ok(());
        };

        let scene = self
            .scenes
            .get_mut(name)
            .ok_or_else(|| ControllerError::UnknownScene(name.to_owned()))?;
        deactivate_scene_graph(scene, self.rendering_engine.pool_mut(), &mut self.script_pool);

        self.active_scenes.remove(position);
        Ok(())
    }

    /// Activate an externally-owned scene
    pub fn on_scene_activated(&mut self, scene: &mut Scene) {
        if !self.assert_render_thread("on_scene_activated") {
            return;
        }
        if let Some(project) = &self.project {
            self.rendering_engine.create_project_resources(project);
        }
        activate_scene_graph(
            scene,
            self.rendering_engine.pool_mut(),
            &mut self.script_pool,
            self.context,
        );
    }

    /// Deactivate an externally-owned scene
    pub fn on_scene_deactivated(&mut self, scene: &mut Scene) {
        if !self.assert_render_thread("on_scene_deactivated") {
            return;
        }
        deactivate_scene_graph(scene, self.rendering_engine.pool_mut(), &mut self.script_pool);
    }

    // ---- chunk lifecycle ------------------------------------------------

    /// Activate a chunk along with its enabled entities
    ///
    /// Should never be called directly by a script; enable the chunk
    /// instead.
    pub fn on_chunk_activated(&mut self, chunk: &mut Chunk) {
        if !self.assert_render_thread("on_chunk_activated") {
            return;
        }
        log::debug!("activating chunk '{}'", chunk.name());
        let pool = self.rendering_engine.pool_mut();
        for entity in chunk.entities_mut() {
            if entity.is_enabled() {
                activate_entity(entity, pool, &mut self.script_pool, self.context);
            }
        }
    }

    /// Deactivate a chunk along with its enabled entities
    pub fn on_chunk_deactivated(&mut self, chunk: &mut Chunk) {
        if !self.assert_render_thread("on_chunk_deactivated") {
            return;
        }
        log::debug!("deactivating chunk '{}'", chunk.name());
        let pool = self.rendering_engine.pool_mut();
        for entity in chunk.entities_mut() {
            if entity.is_enabled() {
                deactivate_entity(entity, pool, &mut self.script_pool);
            }
        }
    }

    // ---- entity lifecycle -----------------------------------------------

    /// Activate an entity along with its enabled sub-entities
    ///
    /// Should never be called directly by a script; enable the entity
    /// instead.
    pub fn on_entity_activated(&mut self, entity: &mut Entity) {
        if !self.assert_render_thread("on_entity_activated") {
            return;
        }
        activate_entity(
            entity,
            self.rendering_engine.pool_mut(),
            &mut self.script_pool,
            self.context,
        );
    }

    /// Deactivate an entity along with all its enabled sub-entities
    ///
    /// The entity passed here keeps its live-context reference (the caller
    /// may reactivate it directly); recursed sub-entities lose theirs.
    pub fn on_entity_deactivated(&mut self, entity: &mut Entity) {
        if !self.assert_render_thread("on_entity_deactivated") {
            return;
        }
        deactivate_entity(entity, self.rendering_engine.pool_mut(), &mut self.script_pool);
    }

    /// Remove an entity subtree from a loaded scene, deactivating it first
    /// if the scene is live
    pub fn destroy_entity(&mut self, scene_name: &str, id: EntityId) -> Option<Entity> {
        if !self.assert_render_thread("destroy_entity") {
            return None;
        }
        let scene_is_active = self.active_scenes.iter().any(|s| s == scene_name);
        let scene = self.scenes.get_mut(scene_name)?;

        if scene_is_active {
            if let Some(entity) = scene.find_entity_mut(id) {
                if entity.is_enabled() {
                    deactivate_entity(
                        entity,
                        self.rendering_engine.pool_mut(),
                        &mut self.script_pool,
                    );
                }
            }
        }
        scene.remove_entity(id)
    }

    // ---- gui ------------------------------------------------------------

    /// Upload a new GUI frame into the GUI sprite's texture
    ///
    /// The buffer must be `width * height * 4` bytes; anything else is
    /// reported and dropped so the frame loop stays alive.
    pub fn update_gui_texture(&mut self, data: &[u8], width: u32, height: u32) {
        if !self.assert_render_thread("update_gui_texture") {
            return;
        }
        if let Err(e) = self.gui_texture.set_img_data(data, width, height) {
            log::error!("gui texture update rejected: {e}");
            return;
        }
        // re-register so the backend re-uploads the sprite's texture
        if let Some(sprite) = self.gui_entity.render_component(RenderKind::Sprite) {
            let sprite_id = sprite.id();
            let entity_id = self.gui_entity.id();
            let pool = self.rendering_engine.pool_mut();
            pool.remove_sprite_renderer(sprite_id);
            pool.add_sprite_renderer(entity_id, sprite_id);
        }
    }

    // ---- cameras --------------------------------------------------------

    /// Override the active camera; `None` falls back to the default camera
    pub fn set_active_camera(&mut self, camera: Option<Camera>) {
        self.camera_override = camera;
    }

    /// The camera rendering is performed relative to
    pub fn active_camera(&self) -> &Camera {
        self.camera_override.as_ref().unwrap_or(&self.default_camera)
    }

    // ---- frame loop -----------------------------------------------------

    /// Start the frame loop
    ///
    /// Starting an already-running controller is reported and ignored.
    /// Runs until the window requests close or [`Controller::stop`] is
    /// called from within a frame.
    pub fn start(&mut self) {
        if !self.assert_render_thread("start") {
            return;
        }
        if self.running {
            log::error!("cannot start controller, controller is already running");
            return;
        }
        self.running = true;
        self.run();
    }

    /// Request the frame loop to stop after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the frame loop is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    fn run(&mut self) {
        log::info!("controller running");
        while self.running {
            // presents the previous frame and polls for new events
            if self.window.update() {
                self.running = false;
                break;
            }
            for event in self.window.drain_events() {
                self.handle_window_event(event);
            }

            // update the camera
            match &mut self.camera_override {
                Some(camera) => camera.update(),
                None => self.default_camera.update(),
            }

            // update the embedded gui, uploading any finished frame
            self.gui.update();
            if let Some(frame) = self.gui.take_frame() {
                self.update_gui_texture(&frame.data, frame.width, frame.height);
            }

            self.script_pool.update();

            // render to the back buffer
            let mut ctx = FrameContext::default();
            for name in &self.active_scenes {
                if let Some(scene) = self.scenes.get(name) {
                    ctx.scenes.push(scene);
                }
            }
            ctx.overlays.push(&self.gui_entity);
            let camera = self.camera_override.as_ref().unwrap_or(&self.default_camera);
            if let Err(e) = self.rendering_engine.render(&ctx, camera) {
                log::error!("frame presentation failed: {e}");
            }
        }
        self.running = false;
        log::info!("controller stopped");
    }

    fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.running = false,
            WindowEvent::FramebufferResize(width, height) => {
                self.rendering_engine.set_framebuffer_size(width, height);
                self.gui.set_framebuffer_size(width, height);
            }
            WindowEvent::Input { code, pressed } => self.input.set_input(code, pressed),
            WindowEvent::MousePos(x, y) => self.input.set_mouse_pos(x, y),
        }
    }

    // ---- accessors ------------------------------------------------------

    /// The rendering engine
    pub fn rendering_engine(&self) -> &RenderingEngine {
        &self.rendering_engine
    }

    /// The input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Mutable access to the script pool, for registering engines
    pub fn script_pool_mut(&mut self) -> &mut ScriptPool {
        &mut self.script_pool
    }
}

fn activate_scene_graph(
    scene: &mut Scene,
    pool: &mut RenderPool,
    scripts: &mut ScriptPool,
    context: ContextRef,
) {
    log::info!("activating scene '{}'", scene.name());
    for entity in scene.entities_mut() {
        if entity.is_enabled() {
            activate_entity(entity, pool, scripts, context);
        }
    }
    for chunk in scene.chunks_mut() {
        log::debug!("activating chunk '{}'", chunk.name());
        for entity in chunk.entities_mut() {
            if entity.is_enabled() {
                activate_entity(entity, pool, scripts, context);
            }
        }
    }
}

fn deactivate_scene_graph(scene: &mut Scene, pool: &mut RenderPool, scripts: &mut ScriptPool) {
    log::info!("deactivating scene '{}'", scene.name());
    // entities keep their context reference: the scene still has control
    // over its own activation
    for entity in scene.entities_mut() {
        if entity.is_enabled() {
            deactivate_entity(entity, pool, scripts);
        }
    }
    for chunk in scene.chunks_mut() {
        log::debug!("deactivating chunk '{}'", chunk.name());
        for entity in chunk.entities_mut() {
            if entity.is_enabled() {
                deactivate_entity(entity, pool, scripts);
            }
        }
    }
}

/// Activate one entity and recurse into its enabled sub-entities
///
/// Each renderable component runs its init hook and is then registered
/// under the entity's current global transform. Disabled sub-entities stay
/// inactive even though their parent activated.
fn activate_entity(
    entity: &mut Entity,
    pool: &mut RenderPool,
    scripts: &mut ScriptPool,
    context: ContextRef,
) {
    log::debug!("activating entity '{}'", entity.name());
    entity.set_context_ref(Some(context));

    let entity_id = entity.id();
    let entity_name = entity.name().to_owned();
    for component in entity.render_components_mut() {
        match component.init() {
            Ok(()) => pool.register(component.kind(), entity_id, component.id()),
            // partial activation is preferable to an uninitialized subtree
            Err(e) => log::error!(
                "failed to initialise {} component on '{entity_name}': {e}; component skipped",
                component.kind()
            ),
        }
    }

    for component in entity.custom_components() {
        scripts.attach(entity_id, component);
    }

    for sub in entity.sub_entities_mut() {
        if sub.is_enabled() {
            activate_entity(sub, pool, scripts, context);
        }
    }
}

/// Deactivate one entity and recurse into its enabled sub-entities
///
/// Sub-entities lose their live-context reference before the recursion
/// descends into them: control over their activation no longer flows from
/// an active ancestor. The entity passed in keeps its reference so callers
/// can reactivate it directly.
fn deactivate_entity(entity: &mut Entity, pool: &mut RenderPool, scripts: &mut ScriptPool) {
    log::debug!("deactivating entity '{}'", entity.name());

    for component in entity.render_components() {
        pool.deregister(component.kind(), component.id());
    }

    for component in entity.custom_components() {
        scripts.detach(component);
    }

    for sub in entity.sub_entities_mut() {
        sub.set_context_ref(None);
        if sub.is_enabled() {
            deactivate_entity(sub, pool, scripts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::NullGuiAdaptor;
    use crate::render::NullBackend;
    use crate::window::HeadlessWindow;

    fn controller() -> Controller {
        Controller::new(
            Box::new(HeadlessWindow::new(640, 480)),
            Box::<NullBackend>::default(),
            Box::new(NullGuiAdaptor),
        )
    }

    fn sprite_entity(name: &str) -> Entity {
        let mut entity = Entity::new(name);
        entity.add_render_component(RenderComponent::sprite(format!("{name}.png")));
        entity
    }

    #[test]
    fn test_activate_deactivate_roundtrips_pool() {
        let mut controller = controller();

        let mut root = sprite_entity("root");
        let mut child = sprite_entity("child");
        child.add_render_component(RenderComponent::point_light([1.0; 3], 4.0));
        root.add_sub_entity(child);

        let mut scene = Scene::new("level");
        scene.add_entity(root);
        controller.add_scene(scene);

        let sprites_before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        let lights_before = controller.rendering_engine().pool().len(RenderKind::PointLight);

        controller.activate_scene("level").unwrap();
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            sprites_before + 2
        );
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::PointLight),
            lights_before + 1
        );

        controller.deactivate_scene("level").unwrap();
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            sprites_before
        );
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::PointLight),
            lights_before
        );
    }

    #[test]
    fn test_disabled_entity_is_not_registered() {
        let mut controller = controller();

        let enabled = sprite_entity("visible");
        let mut disabled = sprite_entity("hidden");
        disabled.set_enabled(false);

        let mut scene = Scene::new("level");
        scene.add_entity(enabled);
        scene.add_entity(disabled);
        controller.add_scene(scene);

        let before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        controller.activate_scene("level").unwrap();
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before + 1
        );
    }

    #[test]
    fn test_disabled_subtree_is_not_recursed() {
        let mut controller = controller();

        let mut root = sprite_entity("root");
        let mut disabled_child = sprite_entity("disabled-child");
        disabled_child.set_enabled(false);
        // grandchild is enabled but unreachable through the disabled child
        disabled_child.add_sub_entity(sprite_entity("grandchild"));
        root.add_sub_entity(disabled_child);

        let mut scene = Scene::new("level");
        scene.add_entity(root);
        controller.add_scene(scene);

        let before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        controller.activate_scene("level").unwrap();
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before + 1
        );
    }

    #[test]
    fn test_deactivation_clears_context_refs_on_children_only() {
        let mut controller = controller();

        let mut root = sprite_entity("root");
        let mut child = sprite_entity("child");
        child.add_sub_entity(sprite_entity("grandchild"));
        root.add_sub_entity(child);

        controller.on_entity_activated(&mut root);
        assert!(root.context_ref().is_some());
        assert!(root.sub_entities()[0].context_ref().is_some());
        assert!(root.sub_entities()[0].sub_entities()[0].context_ref().is_some());

        controller.on_entity_deactivated(&mut root);
        // the directly deactivated entity keeps its reference
        assert!(root.context_ref().is_some());
        // every recursed sub-entity loses its reference
        assert!(root.sub_entities()[0].context_ref().is_none());
        assert!(root.sub_entities()[0].sub_entities()[0].context_ref().is_none());
    }

    #[test]
    fn test_component_init_failure_does_not_abort_walk() {
        let mut controller = controller();

        // empty texture name makes the sprite init fail
        let mut root = Entity::new("broken");
        root.add_render_component(RenderComponent::sprite(""));
        let mut sibling_child = Entity::new("ok-child");
        sibling_child.add_render_component(RenderComponent::mesh("rock.obj", "stone"));
        root.add_sub_entity(sibling_child);

        let before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        controller.on_entity_activated(&mut root);

        // the failing sprite was skipped, the child's mesh still registered
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before
        );
        assert_eq!(controller.rendering_engine().pool().len(RenderKind::Mesh), 1);
    }

    #[test]
    fn test_chunk_activation_walks_chunk_entities() {
        let mut controller = controller();

        let mut chunk = Chunk::new("north");
        chunk.add_entity(sprite_entity("tree"));
        let mut disabled = sprite_entity("stump");
        disabled.set_enabled(false);
        chunk.add_entity(disabled);

        let before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        controller.on_chunk_activated(&mut chunk);
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before + 1
        );

        controller.on_chunk_deactivated(&mut chunk);
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before
        );
    }

    #[test]
    fn test_destroy_entity_deactivates_first() {
        let mut controller = controller();

        let mut scene = Scene::new("level");
        let id = scene.add_entity(sprite_entity("doomed"));
        controller.add_scene(scene);
        controller.activate_scene("level").unwrap();

        let before = controller.rendering_engine().pool().len(RenderKind::Sprite);
        let removed = controller.destroy_entity("level", id).unwrap();
        assert_eq!(removed.name(), "doomed");
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            before - 1
        );
        assert!(controller.scene("level").unwrap().find_entity(id).is_none());
    }

    #[test]
    fn test_gui_texture_update_reregisters_sprite() {
        let mut controller = controller();
        let sprites = controller.rendering_engine().pool().len(RenderKind::Sprite);

        controller.update_gui_texture(&[0u8; 16], 2, 2);
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            sprites
        );
    }

    #[test]
    fn test_gui_texture_bad_size_is_dropped() {
        let mut controller = controller();
        let sprites = controller.rendering_engine().pool().len(RenderKind::Sprite);

        // 3 bytes per pixel is not a valid GUI frame
        controller.update_gui_texture(&[0u8; 12], 2, 2);
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            sprites
        );
    }

    #[test]
    fn test_frame_loop_exits_on_window_close() {
        let mut window = HeadlessWindow::new(640, 480);
        window.close_after(3);
        let mut controller = Controller::new(
            Box::new(window),
            Box::<NullBackend>::default(),
            Box::new(NullGuiAdaptor),
        );

        controller.start();
        assert!(!controller.is_running());
    }

    #[test]
    fn test_window_events_reach_input_manager() {
        let mut window = HeadlessWindow::new(640, 480);
        window.queue_event(WindowEvent::Input {
            code: crate::input::InputCode::Space,
            pressed: true,
        });
        window.queue_event(WindowEvent::MousePos(12.0, 34.0));
        window.close_after(1);

        let mut controller = Controller::new(
            Box::new(window),
            Box::<NullBackend>::default(),
            Box::new(NullGuiAdaptor),
        );
        controller.start();

        assert!(controller.input().is_pressed(crate::input::InputCode::Space));
        assert_eq!(controller.input().mouse_pos(), (12.0, 34.0));
    }

    #[test]
    fn test_activate_unknown_scene_errors() {
        let mut controller = controller();
        assert!(matches!(
            controller.activate_scene("missing"),
            Err(ControllerError::UnknownScene(_))
        ));
    }

    #[test]
    fn test_double_activation_is_skipped() {
        let mut controller = controller();
        let mut scene = Scene::new("level");
        scene.add_entity(sprite_entity("quad"));
        controller.add_scene(scene);

        controller.activate_scene("level").unwrap();
        let after_first = controller.rendering_engine().pool().len(RenderKind::Sprite);
        controller.activate_scene("level").unwrap();
        assert_eq!(
            controller.rendering_engine().pool().len(RenderKind::Sprite),
            after_first
        );
    }
}
